use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime calls [`init`](Model::init) once, renders with
/// [`view`](Model::view), and then feeds every message through
/// [`update`](Model::update), re-rendering and re-reconciling
/// [`subscriptions`](Model::subscriptions) after each one.
///
/// ```rust,ignore
/// use dialcode_core::{Command, Model};
///
/// struct Demo { picker: CountryPicker }
///
/// impl Model for Demo {
///     type Message = PickerMsg;
///     type Flags = PickerFlags;
///
///     fn init(flags: PickerFlags) -> (Self, Command<PickerMsg>) {
///         let (picker, cmd) = CountryPicker::new(flags);
///         (Demo { picker }, cmd)
///     }
///
///     fn update(&mut self, msg: PickerMsg) -> Command<PickerMsg> {
///         self.picker.update(msg)
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.picker.view(frame, frame.area());
///     }
/// }
/// ```
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// Every event that can change the application state.
    type Message: Send + 'static;

    /// Startup data handed to [`Model::init`]; `()` when there is none.
    type Flags: Send + 'static;

    /// Build the initial state and the command for startup work, such as the
    /// first data fetch.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Apply one message and describe the follow-up work.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw the current state. Must not mutate anything.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions that should be running in the current state.
    ///
    /// The runtime diffs the returned list against the active set by
    /// [`SubscriptionId`](crate::SubscriptionId).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
