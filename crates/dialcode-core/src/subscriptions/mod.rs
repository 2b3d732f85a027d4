//! Built-in subscription sources.

mod terminal;

pub use terminal::{terminal_events, TerminalEvents};
