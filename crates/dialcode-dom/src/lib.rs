//! Host document model for **dialcode**.
//!
//! The picker widget does not own the page it lives in: it attaches to an
//! existing element structure, clones a template entry, moves focus, flips
//! ARIA attributes and listens for class changes on the list container.
//! `dialcode-dom` is the small document model those operations run against.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Document`] | Element arena with tree edits, queries, focus and scrolling |
//! | [`Selector`] | Tag / id / class / attribute matching |
//! | [`MutationObserverInit`], [`MutationRecord`] | Attribute change notification |
//! | [`KeyboardEvent`], [`Key`] | `keydown` payloads with `prevent_default` |

mod document;
mod error;
mod event;
mod mutation;
mod node;
mod selector;

pub use document::Document;
pub use error::DomError;
pub use event::{Key, KeyboardEvent, ScrollBehavior, ScrollBlock, ScrollIntoViewOptions};
pub use mutation::{MutationObserverInit, MutationRecord, ObserverId};
pub use node::{Element, NodeId};
pub use selector::Selector;
