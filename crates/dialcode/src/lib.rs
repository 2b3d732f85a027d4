//! **dialcode** -- an accessible country calling-code picker for [`ratatui`].
//!
//! This umbrella crate re-exports the whole stack from a single dependency:
//!
//! ```toml
//! [dependencies]
//! dialcode = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * Everything public in [`dialcode_core`] is available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Program`], [`run_with`], etc.).
//! * [`dom`] is the in-memory host document the picker drives.
//! * [`providers`] holds the catalog and caller-location sources, both
//!   HTTP-backed and fixed.
//! * [`widgets`] holds [`CountryPicker`](widgets::CountryPicker) and its parts.
//! * [`ratatui`], [`crossterm`] and [`tokio`] are re-exported for downstream
//!   crates and the demo.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use dialcode::providers::{StaticCatalog, StaticLocation};
//! use dialcode::widgets::{CountryPicker, HostConfig, HostPage, Message, PickerFlags};
//! use dialcode::{Command, Component, Model};
//!
//! struct App { picker: CountryPicker }
//!
//! impl Model for App {
//!     type Message = Message;
//!     type Flags = PickerFlags;
//!
//!     fn init(flags: PickerFlags) -> (Self, Command<Message>) {
//!         let (picker, cmd) = CountryPicker::new(flags);
//!         (App { picker }, cmd)
//!     }
//!     fn update(&mut self, msg: Message) -> Command<Message> {
//!         self.picker.update(msg)
//!     }
//!     fn view(&self, frame: &mut ratatui::Frame) {
//!         self.picker.view(frame, frame.area());
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let flags = PickerFlags::new(
//!         HostPage::standard(HostConfig::default()),
//!         Arc::new(StaticCatalog::sample()),
//!         Arc::new(StaticLocation::country("FR")),
//!     );
//!     dialcode::run::<App>(flags).await.unwrap();
//! }
//! ```

pub use dialcode_core::*;

pub mod dom {
    pub use dialcode_dom::*;
}

pub mod providers {
    pub use dialcode_providers::*;
}

pub mod widgets {
    pub use dialcode_widgets::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;
