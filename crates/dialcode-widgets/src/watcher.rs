//! Keeps focus and ARIA state in step with the list's open class.

use dialcode_dom::{
    Document, MutationObserverInit, ObserverId, ScrollBehavior, ScrollBlock,
    ScrollIntoViewOptions,
};

use crate::error::PickerError;
use crate::host::HostConfig;
use crate::selection::SelectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchState {
    #[default]
    Closed,
    Open,
}

/// Observes `class` changes on the list container.
///
/// Records queue up in the document while an update runs; the owner calls
/// [`process`](OpenCloseWatcher::process) afterwards. Only a change of
/// open-ness triggers work, so unrelated class edits are ignored.
#[derive(Debug)]
pub struct OpenCloseWatcher {
    observer: ObserverId,
    state: WatchState,
}

impl OpenCloseWatcher {
    pub fn attach(doc: &mut Document, host: &HostConfig) -> Result<Self, PickerError> {
        let container = host.list_container(doc)?;
        let state = if doc.has_class(container, &host.open_class) {
            WatchState::Open
        } else {
            WatchState::Closed
        };
        let observer = doc.observe(
            container,
            MutationObserverInit {
                attributes: true,
                attribute_old_value: true,
                attribute_filter: Some(vec!["class".to_string()]),
            },
        );
        Ok(Self { observer, state })
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Whether mutations are waiting for [`process`](Self::process).
    pub fn has_pending(&self, doc: &Document) -> bool {
        doc.has_records(self.observer)
    }

    /// Consume queued mutations and run the transition they imply, if any.
    pub fn process(
        &mut self,
        doc: &mut Document,
        host: &HostConfig,
        selection: &SelectionState,
    ) -> Result<Option<WatchState>, PickerError> {
        let records = doc.take_records(self.observer);
        if !records.iter().any(|r| r.attribute_name == "class") {
            return Ok(None);
        }

        let container = host.list_container(doc)?;
        let toggle = host.toggle(doc)?;
        let observed = if doc.has_class(container, &host.open_class) {
            WatchState::Open
        } else {
            WatchState::Closed
        };
        if observed == self.state {
            return Ok(None);
        }

        self.mark_selected(doc, host, selection)?;
        match observed {
            WatchState::Open => {
                if let Some(entry) = selection.entry() {
                    doc.scroll_into_view(
                        entry,
                        ScrollIntoViewOptions {
                            behavior: ScrollBehavior::Smooth,
                            block: ScrollBlock::Start,
                        },
                    )?;
                }
                doc.set_attribute(container, "aria-hidden", "false")?;
                doc.set_attribute(toggle, "aria-expanded", "true")?;
            }
            WatchState::Closed => {
                doc.focus(toggle)?;
                doc.set_attribute(container, "aria-hidden", "true")?;
                doc.set_attribute(toggle, "aria-expanded", "false")?;
            }
        }

        log::debug!("prefix list {:?} -> {observed:?}", self.state);
        self.state = observed;
        Ok(Some(observed))
    }

    /// Stop observing; queued records are dropped.
    pub fn detach(self, doc: &mut Document) {
        doc.disconnect(self.observer);
    }

    fn mark_selected(
        &self,
        doc: &mut Document,
        host: &HostConfig,
        selection: &SelectionState,
    ) -> Result<(), PickerError> {
        let Some(entry) = selection.entry() else {
            return Ok(());
        };
        doc.focus(entry)?;
        doc.add_class(entry, &host.current_class)?;
        doc.set_attribute(entry, "tabindex", "0")?;
        doc.set_attribute(entry, "aria-selected", "true")?;
        Ok(())
    }
}
