//! Open/close of the host dropdown.
//!
//! The page's dropdown marks its open state with a class on both the list
//! container and the toggle. These helpers flip that class the same way; the
//! [`watcher`](crate::watcher) reacts to the resulting class mutation.

use dialcode_dom::Document;

use crate::error::PickerError;
use crate::host::HostConfig;

pub fn is_open(doc: &Document, host: &HostConfig) -> bool {
    host.list_container(doc)
        .is_ok_and(|container| doc.has_class(container, &host.open_class))
}

pub fn open_list(doc: &mut Document, host: &HostConfig) -> Result<(), PickerError> {
    let container = host.list_container(doc)?;
    let toggle = host.toggle(doc)?;
    doc.add_class(toggle, &host.open_class)?;
    doc.add_class(container, &host.open_class)?;
    Ok(())
}

/// Close the list, optionally returning focus to the toggle.
pub fn close_list(
    doc: &mut Document,
    host: &HostConfig,
    focus_toggle: bool,
) -> Result<(), PickerError> {
    let container = host.list_container(doc)?;
    let toggle = host.toggle(doc)?;
    doc.remove_class(toggle, &host.open_class)?;
    doc.remove_class(container, &host.open_class)?;
    if focus_toggle {
        doc.focus(toggle)?;
    }
    Ok(())
}

/// Flip the list; returns whether it is open afterwards.
pub fn toggle_list(doc: &mut Document, host: &HostConfig) -> Result<bool, PickerError> {
    if is_open(doc, host) {
        close_list(doc, host, true)?;
        Ok(false)
    } else {
        open_list(doc, host)?;
        Ok(true)
    }
}
