//! Builds the list entries from the template entry.

use std::cmp::Ordering;

use dialcode_dom::{Document, NodeId};
use dialcode_providers::{CallerLocation, CountryRecord};

use crate::error::PickerError;
use crate::host::{flag_element, value_element, HostConfig};
use crate::selection::SelectionState;

/// One rendered country in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub node: NodeId,
    /// Index into the sorted catalog.
    pub country: usize,
    /// `id` attribute, referenced by the toggle's `aria-activedescendant`.
    pub option_id: String,
}

/// Sort order of the list: two-letter code, ascending.
///
/// Codes are ASCII, so a case-insensitive comparison with a byte-order
/// tie-break gives the same order as a locale-aware one.
pub fn compare_codes(a: &str, b: &str) -> Ordering {
    a.to_ascii_lowercase()
        .cmp(&b.to_ascii_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn sort_catalog(catalog: &mut [CountryRecord]) {
    catalog.sort_by(|a, b| compare_codes(&a.cca2, &b.cca2));
}

/// Owns the list entries and the template they are cloned from.
#[derive(Debug, Default)]
pub struct ListRenderer {
    template: Option<NodeId>,
    entries: Vec<ListEntry>,
}

impl ListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// The entry rendered at `node`, if it is one of ours.
    pub fn entry_for(&self, node: NodeId) -> Option<&ListEntry> {
        self.entries.iter().find(|e| e.node == node)
    }

    /// Replace the list with one entry per catalog record.
    ///
    /// `catalog` is sorted in place; entry `i` represents `catalog[i]` and
    /// carries the id `<prefix><i>`. Records whose code matches `location`
    /// are selected as they are rendered. The template is taken out of the
    /// page after the first run and kept for later runs.
    ///
    /// A failed caller selection is logged and the rest of the list still
    /// renders, with nothing selected.
    ///
    /// Replaced entries are detached, not freed: the document arena keeps
    /// every clone, so each run grows it by one template subtree per
    /// record. Populate once per document, or rebuild the page to reclaim
    /// the space.
    ///
    /// Returns the number of entries rendered.
    pub fn populate(
        &mut self,
        doc: &mut Document,
        host: &HostConfig,
        catalog: &mut [CountryRecord],
        location: Option<&CallerLocation>,
        selection: &mut SelectionState,
    ) -> Result<usize, PickerError> {
        let inner = host.inner_list(doc)?;
        let template = match self.template {
            Some(template) => template,
            None => doc
                .query_selector(inner, &dialcode_dom::Selector::tag("a"))
                .ok_or(PickerError::MissingElement("prefix list item"))?,
        };

        for old in self.entries.drain(..) {
            doc.remove(old.node)?;
        }
        selection.forget_entry();

        sort_catalog(catalog);

        for (index, country) in catalog.iter().enumerate() {
            let clone = doc.clone_node(template, true)?;
            let (Some(flag), Some(value)) = (flag_element(doc, clone), value_element(doc, clone))
            else {
                log::error!("prefix list item element not found for {}", country.cca2);
                continue;
            };

            doc.set_attribute(flag, "src", &country.flags.svg)?;
            doc.set_attribute(flag, "alt", &country.name.common)?;
            doc.set_text_content(value, &country.cca2)?;
            doc.remove_class(clone, &host.current_class)?;
            doc.append_child(inner, clone)?;

            let option_id = host.option_id(index);
            doc.set_attribute(clone, "role", "option")?;
            doc.set_attribute(clone, "aria-selected", "false")?;
            doc.set_attribute(clone, "id", &option_id)?;

            self.entries.push(ListEntry {
                node: clone,
                country: index,
                option_id,
            });

            if location.is_some_and(|loc| loc.country_code == country.cca2) {
                if let Err(e) = selection.set_selected(doc, host, catalog, index, Some(clone)) {
                    log::error!("could not select caller country {}: {e}", country.cca2);
                }
            }
        }

        if self.template.is_none() {
            doc.remove(template)?;
            self.template = Some(template);
        }

        log::info!("rendered {} countries", self.entries.len());
        Ok(self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostPage;
    use dialcode_providers::{CallingCode, CountryName, Flags};

    fn country(cca2: &str) -> CountryRecord {
        CountryRecord {
            cca2: cca2.to_string(),
            cca3: String::new(),
            name: CountryName {
                common: cca2.to_string(),
                official: String::new(),
            },
            flags: Flags {
                png: String::new(),
                svg: format!("{cca2}.svg"),
                alt: None,
            },
            flag: None,
            idd: CallingCode::new("+9", ["9"]),
        }
    }

    fn labels(doc: &Document, host: &HostConfig) -> Vec<String> {
        let inner = host.inner_list(doc).unwrap();
        doc.children(inner)
            .iter()
            .map(|n| doc.text_content(value_element(doc, *n).unwrap()))
            .collect()
    }

    #[test]
    fn compare_codes_is_case_insensitive() {
        assert_eq!(compare_codes("de", "DK"), Ordering::Less);
        assert_eq!(compare_codes("FR", "CA"), Ordering::Greater);
        assert_eq!(compare_codes("ca", "CA"), Ordering::Greater);
    }

    #[test]
    fn entries_are_sorted_and_template_removed() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let mut catalog = vec![country("FR"), country("CA"), country("DK"), country("DE")];
        let mut renderer = ListRenderer::new();
        let mut selection = SelectionState::new();

        let count = renderer
            .populate(&mut doc, &host, &mut catalog, None, &mut selection)
            .unwrap();

        assert_eq!(count, 4);
        assert_eq!(labels(&doc, &host), vec!["CA", "DE", "DK", "FR"]);
        assert!(!labels(&doc, &host).contains(&"XX".to_string()));

        let first = renderer.entries()[0].node;
        assert_eq!(doc.get_attribute(first, "id"), Some("country-option-0"));
        assert_eq!(doc.get_attribute(first, "role"), Some("option"));
        assert_eq!(doc.get_attribute(first, "aria-selected"), Some("false"));
        let flag = flag_element(&doc, first).unwrap();
        assert_eq!(doc.get_attribute(flag, "src"), Some("CA.svg"));
        assert_eq!(doc.get_attribute(flag, "alt"), Some("CA"));
        assert_eq!(selection.country(), None);
    }

    #[test]
    fn location_match_selects_during_population() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let mut catalog = vec![country("FR"), country("CA"), country("DE")];
        let mut renderer = ListRenderer::new();
        let mut selection = SelectionState::new();

        renderer
            .populate(
                &mut doc,
                &host,
                &mut catalog,
                Some(&CallerLocation::new("FR")),
                &mut selection,
            )
            .unwrap();

        assert_eq!(selection.country(), Some(2));
        let fr = renderer.entries()[2].node;
        assert_eq!(selection.entry(), Some(fr));
        assert_eq!(doc.get_attribute(fr, "aria-selected"), Some("true"));
        let toggle = host.toggle(&doc).unwrap();
        assert_eq!(doc.get_attribute(toggle, "aria-activedescendant"), Some("country-option-2"));
    }

    #[test]
    fn failed_caller_selection_keeps_rendering() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let input = host.country_input(&doc).unwrap();
        doc.remove(input).unwrap();
        let mut catalog = vec![country("FR"), country("CA"), country("DE"), country("US")];
        let mut renderer = ListRenderer::new();
        let mut selection = SelectionState::new();

        let count = renderer.populate(
            &mut doc,
            &host,
            &mut catalog,
            Some(&CallerLocation::new("DE")),
            &mut selection,
        );

        assert_eq!(count, Ok(4));
        assert_eq!(labels(&doc, &host), vec!["CA", "DE", "FR", "US"]);
        assert_eq!(selection.country(), None);
        assert_eq!(selection.entry(), None);
        let de = renderer.entries()[1].node;
        assert_eq!(doc.get_attribute(de, "aria-selected"), Some("false"));
    }

    #[test]
    fn repopulating_keeps_replaced_entries_allocated() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let mut renderer = ListRenderer::new();
        let mut selection = SelectionState::new();

        let before = doc.node_count();
        renderer
            .populate(&mut doc, &host, &mut [country("FR"), country("CA")], None, &mut selection)
            .unwrap();
        let old = renderer.entries()[0].node;
        let after_first = doc.node_count();
        renderer
            .populate(&mut doc, &host, &mut [country("FR"), country("CA")], None, &mut selection)
            .unwrap();

        assert_eq!(doc.node_count() - after_first, after_first - before);
        assert_eq!(doc.parent(old), None);
        assert_eq!(doc.get_attribute(old, "id"), Some("country-option-0"));
    }

    #[test]
    fn repopulating_replaces_entries() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let mut renderer = ListRenderer::new();
        let mut selection = SelectionState::new();

        let mut first = vec![country("FR"), country("CA")];
        renderer
            .populate(&mut doc, &host, &mut first, Some(&CallerLocation::new("FR")), &mut selection)
            .unwrap();

        let mut second = vec![country("JP"), country("BR"), country("NO")];
        let count = renderer
            .populate(&mut doc, &host, &mut second, None, &mut selection)
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(labels(&doc, &host), vec!["BR", "JP", "NO"]);
        assert_eq!(selection.entry(), None);
    }

    #[test]
    fn empty_catalog_still_removes_template() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let mut renderer = ListRenderer::new();
        let count = renderer
            .populate(&mut doc, &host, &mut [], None, &mut SelectionState::new())
            .unwrap();
        assert_eq!(count, 0);
        assert!(labels(&doc, &host).is_empty());
    }

    #[test]
    fn missing_template_renders_nothing() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let inner = host.inner_list(&doc).unwrap();
        let template = doc.children(inner)[0];
        doc.remove(template).unwrap();

        let err = ListRenderer::new()
            .populate(&mut doc, &host, &mut [country("FR")], None, &mut SelectionState::new())
            .unwrap_err();
        assert_eq!(err, PickerError::MissingElement("prefix list item"));
        assert!(doc.children(inner).is_empty());
    }
}
