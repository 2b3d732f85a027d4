//! Keyboard handling inside the open list.

use dialcode_dom::{Document, Key, KeyboardEvent, NodeId};

use crate::error::PickerError;
use crate::host::{value_element, HostConfig};

/// What the picker has to do after the navigator handled a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Nothing beyond what the navigator already did (possibly nothing).
    None,
    /// Focus moved to this entry.
    Focused(NodeId),
    /// Click this entry.
    Activate(NodeId),
    /// Focus left the list; the list should close.
    Release,
}

/// The entry keyboard actions apply to: the focused element when it is an
/// entry, otherwise the first entry.
pub fn focused_entry(doc: &Document, host: &HostConfig) -> Result<Option<NodeId>, PickerError> {
    if let Some(active) = doc.active_element() {
        if host.is_entry(doc, active) {
            return Ok(Some(active));
        }
    }
    let inner = host.inner_list(doc)?;
    Ok(doc.query_selector(inner, &host.item_selector()))
}

/// First entry, in list order, whose code starts with `query`.
pub fn search_country(doc: &Document, host: &HostConfig, query: &str) -> Option<NodeId> {
    let inner = host.inner_list(doc).ok()?;
    doc.query_selector_all(inner, &host.item_selector())
        .into_iter()
        .find(|item| {
            value_element(doc, *item)
                .is_some_and(|label| doc.text_content(label).starts_with(query))
        })
}

/// Handle a `keydown` delivered to the list container.
///
/// The host's default key handling is always suppressed. Arrow keys move
/// focus between neighbouring entries and stop at either end; Enter and
/// Space activate; Tab blurs the entry and releases the list; a single
/// letter jumps to the first code starting with it.
pub fn on_key_down(
    doc: &mut Document,
    host: &HostConfig,
    event: &mut KeyboardEvent,
) -> Result<NavAction, PickerError> {
    event.prevent_default();

    if let Some(letter) = event.key().letter() {
        let query = letter.to_ascii_uppercase().to_string();
        return match search_country(doc, host, &query) {
            Some(item) => {
                doc.focus(item)?;
                Ok(NavAction::Focused(item))
            }
            None => Ok(NavAction::None),
        };
    }

    let Some(current) = focused_entry(doc, host)? else {
        return Ok(NavAction::None);
    };

    match event.key() {
        Key::ArrowDown => {
            let next = doc.next_element_sibling(current);
            step(doc, host, next)
        }
        Key::ArrowUp => {
            let previous = doc.previous_element_sibling(current);
            step(doc, host, previous)
        }
        Key::Enter | Key::Space => Ok(NavAction::Activate(current)),
        Key::Tab => {
            doc.blur(current);
            Ok(NavAction::Release)
        }
        _ => Ok(NavAction::None),
    }
}

fn step(
    doc: &mut Document,
    host: &HostConfig,
    target: Option<NodeId>,
) -> Result<NavAction, PickerError> {
    match target.filter(|node| host.is_entry(doc, *node)) {
        Some(node) => {
            doc.focus(node)?;
            Ok(NavAction::Focused(node))
        }
        None => Ok(NavAction::None),
    }
}
