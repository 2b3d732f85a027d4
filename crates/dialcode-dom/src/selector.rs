//! A small structural selector language, enough for the host page contract.

use crate::node::Element;

/// Matches elements by tag, id, class, or attribute.
///
/// Selectors compose with [`Selector::and`]:
///
/// ```
/// use dialcode_dom::Selector;
///
/// // input[name=countryCode]
/// let input = Selector::tag("input").and(Selector::attr_eq("name", "countryCode"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Element with the given tag name.
    Tag(String),
    /// Element whose `id` attribute equals the value.
    Id(String),
    /// Element whose class list contains the value.
    Class(String),
    /// Element carrying the attribute, optionally with an exact value.
    Attr {
        name: String,
        value: Option<String>,
    },
    /// Every inner selector must match.
    All(Vec<Selector>),
    /// At least one inner selector must match.
    Any(Vec<Selector>),
}

impl Selector {
    pub fn tag(tag: impl Into<String>) -> Self {
        Selector::Tag(tag.into().to_ascii_lowercase())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }

    pub fn attr(name: impl Into<String>) -> Self {
        Selector::Attr {
            name: name.into(),
            value: None,
        }
    }

    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Selector::Attr {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Combine with another selector; both must match.
    pub fn and(self, other: Selector) -> Self {
        match self {
            Selector::All(mut parts) => {
                parts.push(other);
                Selector::All(parts)
            }
            first => Selector::All(vec![first, other]),
        }
    }

    /// Combine with another selector; either may match.
    pub fn or(self, other: Selector) -> Self {
        match self {
            Selector::Any(mut parts) => {
                parts.push(other);
                Selector::Any(parts)
            }
            first => Selector::Any(vec![first, other]),
        }
    }

    /// Whether `element` satisfies this selector.
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Tag(tag) => element.tag() == tag,
            Selector::Id(id) => element.attribute("id") == Some(id.as_str()),
            Selector::Class(class) => element.has_class(class),
            Selector::Attr { name, value } => match (element.attribute(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
            Selector::All(parts) => parts.iter().all(|s| s.matches(element)),
            Selector::Any(parts) => parts.iter().any(|s| s.matches(element)),
        }
    }
}
