//! The page structure the picker attaches to.
//!
//! The picker does not build its own markup. It expects the host page to
//! provide:
//!
//! ```text
//! #w-dropdown-toggle-0                 toggle control
//!   [data-element=flag]                selected flag image
//!   [data-element=value]               selected calling code
//! #w-dropdown-list-0                   list container (receives the open class)
//!   div                                inner list
//!     a.prefix-dropdown_item           single template entry
//!       [data-element=flag]
//!       [data-element=value]
//! input[name=countryCode]              hidden form field
//! ```
//!
//! Every id, class and name is configurable through [`HostConfig`].

use dialcode_dom::{Document, NodeId, Selector};

use crate::error::PickerError;

/// Names of the host elements and classes the picker works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub toggle_id: String,
    pub list_id: String,
    /// Class carried by every list entry, template included.
    pub item_class: String,
    /// Class the host dropdown puts on the container (and toggle) while open.
    pub open_class: String,
    /// Class marking the selected entry.
    pub current_class: String,
    /// `name` of the hidden input receiving the two-letter code.
    pub input_name: String,
    /// Entry ids are this prefix followed by the entry's sorted index.
    pub option_id_prefix: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            toggle_id: "w-dropdown-toggle-0".to_string(),
            list_id: "w-dropdown-list-0".to_string(),
            item_class: "prefix-dropdown_item".to_string(),
            open_class: "w--open".to_string(),
            current_class: "w--current".to_string(),
            input_name: "countryCode".to_string(),
            option_id_prefix: "country-option-".to_string(),
        }
    }
}

impl HostConfig {
    pub fn with_toggle_id(mut self, id: impl Into<String>) -> Self {
        self.toggle_id = id.into();
        self
    }

    pub fn with_list_id(mut self, id: impl Into<String>) -> Self {
        self.list_id = id.into();
        self
    }

    pub fn with_item_class(mut self, class: impl Into<String>) -> Self {
        self.item_class = class.into();
        self
    }

    pub fn with_open_class(mut self, class: impl Into<String>) -> Self {
        self.open_class = class.into();
        self
    }

    pub fn with_current_class(mut self, class: impl Into<String>) -> Self {
        self.current_class = class.into();
        self
    }

    pub fn with_input_name(mut self, name: impl Into<String>) -> Self {
        self.input_name = name.into();
        self
    }

    pub fn with_option_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.option_id_prefix = prefix.into();
        self
    }

    pub fn option_id(&self, index: usize) -> String {
        format!("{}{index}", self.option_id_prefix)
    }

    pub fn item_selector(&self) -> Selector {
        Selector::class(self.item_class.clone())
    }

    // --- Element lookups ---

    pub fn toggle(&self, doc: &Document) -> Result<NodeId, PickerError> {
        doc.get_element_by_id(&self.toggle_id)
            .ok_or(PickerError::MissingElement("dropdown toggle"))
    }

    pub fn list_container(&self, doc: &Document) -> Result<NodeId, PickerError> {
        doc.get_element_by_id(&self.list_id)
            .ok_or(PickerError::MissingElement("prefix list"))
    }

    /// The first `div` inside the container; entries are its children.
    pub fn inner_list(&self, doc: &Document) -> Result<NodeId, PickerError> {
        let container = self.list_container(doc)?;
        doc.query_selector(container, &Selector::tag("div"))
            .ok_or(PickerError::MissingElement("prefix list"))
    }

    pub fn country_input(&self, doc: &Document) -> Result<NodeId, PickerError> {
        let selector =
            Selector::tag("input").and(Selector::attr_eq("name", self.input_name.clone()));
        doc.query_selector(doc.root(), &selector)
            .ok_or(PickerError::MissingElement("country code input"))
    }

    pub fn is_entry(&self, doc: &Document, node: NodeId) -> bool {
        doc.matches(node, &self.item_selector())
    }
}

/// `[data-element=flag]` inside `scope`.
pub fn flag_element(doc: &Document, scope: NodeId) -> Option<NodeId> {
    doc.query_selector(scope, &Selector::attr_eq("data-element", "flag"))
}

/// `[data-element=value]` inside `scope`.
pub fn value_element(doc: &Document, scope: NodeId) -> Option<NodeId> {
    doc.query_selector(scope, &Selector::attr_eq("data-element", "value"))
}

/// A host document paired with the names used to find things in it.
#[derive(Debug)]
pub struct HostPage {
    pub document: Document,
    pub config: HostConfig,
}

impl HostPage {
    pub fn new(document: Document, config: HostConfig) -> Self {
        Self { document, config }
    }

    /// Build the page structure a Webflow-style dropdown form ships with:
    /// toggle, list container holding one template entry, and the hidden
    /// country-code input.
    pub fn standard(config: HostConfig) -> Self {
        let mut document = Document::new();
        // Fresh ids from this document's own arena never fail.
        if let Err(e) = build_standard(&mut document, &config) {
            log::error!("failed to build host page: {e}");
        }
        Self { document, config }
    }

    pub fn into_parts(self) -> (Document, HostConfig) {
        (self.document, self.config)
    }
}

fn build_standard(doc: &mut Document, config: &HostConfig) -> Result<(), PickerError> {
    let body = doc.root();
    let form = doc.create_child(body, "form", &[("id", "phone-form")])?;
    let dropdown = doc.create_child(form, "div", &[("class", "prefix-dropdown w-dropdown")])?;

    let toggle = doc.create_child(
        dropdown,
        "div",
        &[
            ("id", config.toggle_id.as_str()),
            ("class", "prefix-dropdown_toggle w-dropdown-toggle"),
            ("tabindex", "0"),
        ],
    )?;
    doc.create_child(toggle, "img", &[("data-element", "flag"), ("src", ""), ("alt", "")])?;
    let toggle_value = doc.create_child(toggle, "div", &[("data-element", "value")])?;
    doc.set_text_content(toggle_value, "+")?;

    let container = doc.create_child(
        dropdown,
        "nav",
        &[
            ("id", config.list_id.as_str()),
            ("class", "prefix-dropdown_list w-dropdown-list"),
        ],
    )?;
    let inner = doc.create_child(container, "div", &[("class", "prefix-dropdown_list-inner")])?;
    let item_class = format!("{} w-dropdown-link", config.item_class);
    let template = doc.create_child(
        inner,
        "a",
        &[("class", item_class.as_str()), ("href", "#"), ("tabindex", "-1")],
    )?;
    doc.create_child(template, "img", &[("data-element", "flag"), ("src", ""), ("alt", "")])?;
    let template_value = doc.create_child(template, "div", &[("data-element", "value")])?;
    doc.set_text_content(template_value, "XX")?;

    doc.create_child(
        form,
        "input",
        &[("type", "hidden"), ("name", config.input_name.as_str()), ("value", "")],
    )?;
    Ok(())
}
