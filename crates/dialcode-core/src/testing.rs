use crate::command::{Command, CommandInner};
use crate::model::Model;
use futures::future::BoxFuture;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless harness that drives a [`Model`] without a terminal.
///
/// Immediate messages ([`Command::message`]) are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages). Futures from
/// [`Command::perform`] are parked; [`settle`](TestProgram::settle) awaits
/// them and keeps going until nothing is left in flight.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Demo>::new(flags);
/// prog.settle().await;                       // catalog + location arrive
/// prog.send(Msg::Key(KeyCode::Down.into()));
/// prog.drain_messages();                     // watcher follow-ups
/// assert!(prog.render_string(40, 10).contains("+33"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    pending_futures: Vec<BoxFuture<'static, M::Message>>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and park whatever it returns.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            pending_futures: Vec::new(),
            quit_requested: false,
        };
        program.collect(init_cmd);
        program
    }

    /// One update cycle. Follow-up commands are queued, not run.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Feed queued immediate messages back into `update` until none remain.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Await every parked future, deliver the results, and repeat until the
    /// model is idle.
    pub async fn settle(&mut self) {
        loop {
            self.drain_messages();
            if self.pending_futures.is_empty() {
                break;
            }
            let futures: Vec<_> = self.pending_futures.drain(..).collect();
            for msg in futures::future::join_all(futures).await {
                self.send(msg);
            }
        }
    }

    pub fn pending_futures(&self) -> usize {
        self.pending_futures.len()
    }

    /// Whether any processed command asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Render into an off-screen buffer of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| self.model.view(frame))
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render and flatten the buffer to text, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y + 1 < area.bottom() {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.pending_messages.push(msg),
            CommandInner::Quit => self.quit_requested = true,
            CommandInner::Future(fut) => self.pending_futures.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    struct Loader {
        items: Vec<String>,
        log: Vec<&'static str>,
    }

    #[derive(Debug)]
    enum LoaderMsg {
        Fetch,
        Loaded(Vec<String>),
        Announce,
        Done,
    }

    impl Model for Loader {
        type Message = LoaderMsg;
        type Flags = bool;

        fn init(fetch_now: bool) -> (Self, Command<LoaderMsg>) {
            let model = Loader {
                items: Vec::new(),
                log: Vec::new(),
            };
            let cmd = if fetch_now {
                Command::message(LoaderMsg::Fetch)
            } else {
                Command::none()
            };
            (model, cmd)
        }

        fn update(&mut self, msg: LoaderMsg) -> Command<LoaderMsg> {
            match msg {
                LoaderMsg::Fetch => {
                    self.log.push("fetch");
                    Command::perform(
                        async { vec!["CA".to_string(), "FR".to_string()] },
                        LoaderMsg::Loaded,
                    )
                }
                LoaderMsg::Loaded(items) => {
                    self.log.push("loaded");
                    self.items = items;
                    Command::message(LoaderMsg::Announce)
                }
                LoaderMsg::Announce => {
                    self.log.push("announce");
                    Command::none()
                }
                LoaderMsg::Done => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(self.items.join(",")), frame.area());
        }
    }

    #[test]
    fn init_message_waits_for_drain() {
        let mut prog = TestProgram::<Loader>::new(true);
        assert!(prog.model().log.is_empty());
        prog.drain_messages();
        assert_eq!(prog.model().log, vec!["fetch"]);
        assert_eq!(prog.pending_futures(), 1);
    }

    #[tokio::test]
    async fn settle_runs_futures_and_follow_ups() {
        let mut prog = TestProgram::<Loader>::new(true);
        prog.settle().await;
        assert_eq!(prog.model().log, vec!["fetch", "loaded", "announce"]);
        assert_eq!(prog.pending_futures(), 0);
        assert_eq!(prog.render_string(10, 1).trim_end(), "CA,FR");
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Loader>::new(false);
        assert!(!prog.quit_requested());
        prog.send(LoaderMsg::Done);
        assert!(prog.quit_requested());
    }
}
