//! Terminal runtime for **dialcode** widgets.
//!
//! The runtime follows the [Elm Architecture]: state lives in a [`Model`],
//! every change arrives as a message through [`Model::update`], and side
//! effects are described as [`Command`]s instead of being performed inline.
//! That keeps each update a single, uninterrupted step on one loop, which is
//! what the country picker relies on to order DOM changes, observer
//! notifications and fetched data.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Sub-model rendering into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Immediate message, async work, batch, quit |
//! | [`Subscription`] | Long-lived event source such as terminal input |
//! | [`Program`] | Drives a [`Model`] on a real terminal |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for tests |
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use simplelog::LevelFilter;
pub use subscription::{Subscription, SubscriptionId};
pub use subscriptions::terminal_events;

/// Run a model with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run a model with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
