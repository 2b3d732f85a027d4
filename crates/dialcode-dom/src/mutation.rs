//! Attribute mutation observers.
//!
//! Observers queue [`MutationRecord`]s on the document; whoever owns the
//! observer takes them with
//! [`Document::take_records`](crate::Document::take_records) after the
//! update that produced them. Nothing is delivered re-entrantly.

use crate::node::NodeId;

/// Handle returned by [`Document::observe`](crate::Document::observe).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) usize);

/// What an observer wants to hear about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationObserverInit {
    /// Record attribute changes on the target.
    pub attributes: bool,
    /// Keep the previous attribute value in each record.
    pub attribute_old_value: bool,
    /// Only record these attribute names (all when `None`).
    pub attribute_filter: Option<Vec<String>>,
}

impl MutationObserverInit {
    /// Observe every attribute of the target.
    pub fn attributes() -> Self {
        Self {
            attributes: true,
            ..Self::default()
        }
    }
}

/// A single attribute change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: NodeId,
    pub attribute_name: String,
    pub old_value: Option<String>,
}

#[derive(Debug)]
pub(crate) struct Observer {
    pub(crate) target: NodeId,
    pub(crate) init: MutationObserverInit,
    pub(crate) records: Vec<MutationRecord>,
    pub(crate) connected: bool,
}

impl Observer {
    pub(crate) fn wants(&self, target: NodeId, attribute: &str) -> bool {
        if !self.connected || !self.init.attributes || self.target != target {
            return false;
        }
        match &self.init.attribute_filter {
            Some(filter) => filter.iter().any(|a| a.eq_ignore_ascii_case(attribute)),
            None => true,
        }
    }
}
