use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that draws into a caller-chosen [`Rect`].
///
/// A parent [`Model`](crate::Model) wraps the component's message type in one
/// of its own variants and lifts commands with [`Command::map`]:
///
/// ```rust,ignore
/// enum AppMsg { Picker(PickerMsg), Quit }
///
/// fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///     match msg {
///         AppMsg::Picker(m) => self.picker.update(m).map(AppMsg::Picker),
///         AppMsg::Quit => Command::quit(),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    type Message: Send + 'static;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render inside `area` only.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Subscriptions for the parent to merge into its own list.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Input routing hint for parents hosting several components.
    fn focused(&self) -> bool {
        false
    }
}
