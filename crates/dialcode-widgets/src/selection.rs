//! The picker's current choice and its reflection on the page.

use dialcode_dom::{Document, NodeId};
use dialcode_providers::{CallingCode, CountryRecord};

use crate::error::PickerError;
use crate::host::{flag_element, value_element, HostConfig};

/// Which country is chosen and which list entry represents it.
///
/// Changed only through [`set_selected`](SelectionState::set_selected), which
/// keeps the toggle, the hidden input and the entry markers in step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    country: Option<usize>,
    entry: Option<NodeId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected country in the sorted catalog.
    pub fn country(&self) -> Option<usize> {
        self.country
    }

    pub fn entry(&self) -> Option<NodeId> {
        self.entry
    }

    /// Select `catalog[country]`, optionally tied to its list entry.
    ///
    /// All host elements are resolved before anything changes, so a missing
    /// element leaves the page and this state untouched. On success:
    ///
    /// - the previous entry loses the current class and `aria-selected`;
    /// - `entry` (if any) gains them and becomes the recorded entry;
    /// - the toggle shows the country's flag and calling code and points
    ///   `aria-activedescendant` at the entry;
    /// - the hidden input holds the two-letter code.
    pub fn set_selected(
        &mut self,
        doc: &mut Document,
        host: &HostConfig,
        catalog: &[CountryRecord],
        country: usize,
        entry: Option<NodeId>,
    ) -> Result<(), PickerError> {
        let record = catalog.get(country).ok_or(PickerError::UnknownCountry(country))?;
        let toggle = host.toggle(doc)?;
        let toggle_flag =
            flag_element(doc, toggle).ok_or(PickerError::MissingElement("toggle flag"))?;
        let toggle_value =
            value_element(doc, toggle).ok_or(PickerError::MissingElement("toggle value"))?;
        let input = host.country_input(doc)?;

        self.country = Some(country);

        if let Some(previous) = self.entry.take() {
            doc.remove_class(previous, &host.current_class)?;
            doc.set_attribute(previous, "aria-selected", "false")?;
        }
        if let Some(node) = entry {
            doc.add_class(node, &host.current_class)?;
            doc.set_attribute(node, "aria-selected", "true")?;
            self.entry = Some(node);
        }

        doc.set_attribute(toggle_flag, "src", &record.flags.svg)?;
        doc.set_attribute(toggle_flag, "alt", &record.name.common)?;
        doc.set_text_content(toggle_value, &calling_code_label(&record.idd))?;

        let active_id = self
            .entry
            .and_then(|node| doc.get_attribute(node, "id"))
            .unwrap_or_default()
            .to_string();
        doc.set_attribute(toggle, "aria-activedescendant", &active_id)?;

        doc.set_attribute(input, "value", &record.cca2)?;

        log::debug!("selected {} ({:?})", record.cca2, self.entry);
        Ok(())
    }

    /// Drop the entry reference when the list it belonged to is rebuilt.
    pub(crate) fn forget_entry(&mut self) {
        self.entry = None;
    }
}

/// Text shown on the toggle for a calling code.
///
/// Countries sharing a root across many area codes (`+1` with hundreds of
/// suffixes) show the root only; otherwise root and the single suffix are
/// joined.
pub fn calling_code_label(code: &CallingCode) -> String {
    match code.suffixes.as_slice() {
        [single] => format!("{}{single}", code.root),
        _ => code.root.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostPage;
    use dialcode_providers::{CountryName, Flags};

    fn country(cca2: &str, root: &str, suffixes: &[&str]) -> CountryRecord {
        CountryRecord {
            cca2: cca2.to_string(),
            cca3: String::new(),
            name: CountryName {
                common: format!("Country {cca2}"),
                official: String::new(),
            },
            flags: Flags {
                png: String::new(),
                svg: format!("https://flagcdn.com/{}.svg", cca2.to_lowercase()),
                alt: None,
            },
            flag: None,
            idd: CallingCode::new(root, suffixes.iter().copied()),
        }
    }

    fn entry(doc: &mut Document, host: &HostConfig, id: &str) -> NodeId {
        let inner = host.inner_list(doc).unwrap();
        doc.create_child(inner, "a", &[("class", "prefix-dropdown_item"), ("id", id)])
            .unwrap()
    }

    #[test]
    fn label_joins_single_suffix() {
        assert_eq!(calling_code_label(&CallingCode::new("+3", ["3"])), "+33");
        assert_eq!(calling_code_label(&CallingCode::new("+4", ["9"])), "+49");
    }

    #[test]
    fn label_uses_root_for_many_or_no_suffixes() {
        assert_eq!(calling_code_label(&CallingCode::new("+1", ["201", "202"])), "+1");
        assert_eq!(calling_code_label(&CallingCode::new("+7", Vec::<String>::new())), "+7");
        assert_eq!(calling_code_label(&CallingCode::default()), "");
    }

    #[test]
    fn set_selected_updates_toggle_input_and_entry() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let catalog = vec![country("FR", "+3", &["3"])];
        let fr = entry(&mut doc, &host, "country-option-0");

        let mut selection = SelectionState::new();
        selection
            .set_selected(&mut doc, &host, &catalog, 0, Some(fr))
            .unwrap();

        let toggle = host.toggle(&doc).unwrap();
        assert_eq!(doc.text_content(value_element(&doc, toggle).unwrap()), "+33");
        assert_eq!(
            doc.get_attribute(flag_element(&doc, toggle).unwrap(), "src"),
            Some("https://flagcdn.com/fr.svg")
        );
        assert_eq!(doc.get_attribute(toggle, "aria-activedescendant"), Some("country-option-0"));
        assert_eq!(doc.get_attribute(host.country_input(&doc).unwrap(), "value"), Some("FR"));
        assert!(doc.has_class(fr, "w--current"));
        assert_eq!(doc.get_attribute(fr, "aria-selected"), Some("true"));
        assert_eq!(selection.country(), Some(0));
        assert_eq!(selection.entry(), Some(fr));
    }

    #[test]
    fn reselecting_moves_the_marker() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let catalog = vec![country("DE", "+4", &["9"]), country("FR", "+3", &["3"])];
        let de = entry(&mut doc, &host, "country-option-0");
        let fr = entry(&mut doc, &host, "country-option-1");

        let mut selection = SelectionState::new();
        selection.set_selected(&mut doc, &host, &catalog, 0, Some(de)).unwrap();
        selection.set_selected(&mut doc, &host, &catalog, 1, Some(fr)).unwrap();

        assert!(!doc.has_class(de, "w--current"));
        assert_eq!(doc.get_attribute(de, "aria-selected"), Some("false"));
        assert!(doc.has_class(fr, "w--current"));
        assert_eq!(doc.get_attribute(fr, "aria-selected"), Some("true"));
    }

    #[test]
    fn selecting_without_entry_clears_active_descendant() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let catalog = vec![country("US", "+1", &["201", "202"])];
        let us = entry(&mut doc, &host, "country-option-0");

        let mut selection = SelectionState::new();
        selection.set_selected(&mut doc, &host, &catalog, 0, Some(us)).unwrap();
        selection.set_selected(&mut doc, &host, &catalog, 0, None).unwrap();

        let toggle = host.toggle(&doc).unwrap();
        assert_eq!(doc.get_attribute(toggle, "aria-activedescendant"), Some(""));
        assert_eq!(selection.entry(), None);
        assert!(!doc.has_class(us, "w--current"));
        assert_eq!(doc.text_content(value_element(&doc, toggle).unwrap()), "+1");
    }

    #[test]
    fn missing_input_changes_nothing() {
        let host = HostConfig::default().with_input_name("absent");
        let (mut doc, _) = HostPage::standard(HostConfig::default()).into_parts();
        let catalog = vec![country("FR", "+3", &["3"])];
        let fr = entry(&mut doc, &host, "country-option-0");

        let mut selection = SelectionState::new();
        let err = selection
            .set_selected(&mut doc, &host, &catalog, 0, Some(fr))
            .unwrap_err();

        assert_eq!(err, PickerError::MissingElement("country code input"));
        assert_eq!(selection, SelectionState::new());
        assert!(!doc.has_class(fr, "w--current"));
        let toggle = host.toggle(&doc).unwrap();
        assert_eq!(doc.text_content(value_element(&doc, toggle).unwrap()), "+");
    }

    #[test]
    fn unknown_country_is_rejected() {
        let (mut doc, host) = HostPage::standard(HostConfig::default()).into_parts();
        let mut selection = SelectionState::new();
        assert_eq!(
            selection.set_selected(&mut doc, &host, &[], 4, None),
            Err(PickerError::UnknownCountry(4))
        );
    }
}
