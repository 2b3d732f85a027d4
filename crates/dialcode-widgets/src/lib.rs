//! The country calling-code picker for **dialcode**.
//!
//! [`CountryPicker`] implements [`dialcode_core::Component`]; it drives a
//! host page held in a [`dialcode_dom::Document`] and draws a terminal view
//! of it with [`ratatui`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`picker`] | The component: loading, key routing, view |
//! | [`renderer`] | Builds one list entry per country from the template |
//! | [`selection`] | Current choice and its reflection on toggle and input |
//! | [`navigator`] | Arrow, Enter/Space, Tab and type-ahead handling |
//! | [`watcher`] | Focus and ARIA upkeep on open/close |
//! | [`dropdown`] | Opening and closing the host dropdown |
//! | [`host`] | Element names and the standard host page |
//! | [`key`] | Terminal key translation and key help |

pub mod dropdown;
pub mod error;
pub mod host;
pub mod key;
pub mod navigator;
pub mod picker;
pub mod renderer;
pub mod selection;
pub mod watcher;

pub use error::PickerError;
pub use host::{HostConfig, HostPage};
pub use picker::{CountryPicker, LoadState, Message, PickerFlags, PickerStyle};
pub use renderer::{ListEntry, ListRenderer};
pub use selection::{calling_code_label, SelectionState};
pub use watcher::{OpenCloseWatcher, WatchState};
