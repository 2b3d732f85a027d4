use crate::command::{Command, CommandInner};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor, execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::io::{self, stderr, Stderr};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Upper bound on messages handled between two frames.
const MAX_BURST: usize = 64;
const BURST_WINDOW: Duration = Duration::from_micros(200);

/// Errors from setting up, running, or tearing down a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to install file logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Configuration for a [`Program`].
///
/// The UI is drawn on stderr so that stdout stays free for whatever the
/// application prints once the picker is done.
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     title: Some("Choose your country".into()),
///     log_file: Some("dialcode.log".into()),
///     log_level: LevelFilter::Debug,
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Redraw cap in frames per second, clamped to 1..=120.
    pub fps: u32,
    pub alt_screen: bool,
    pub title: Option<String>,
    /// Restore the terminal before a panic message is printed.
    pub catch_panics: bool,
    /// Stop when SIGINT arrives (raw mode normally turns ctrl+c into a key).
    pub handle_signals: bool,
    /// Append `log` records to this file while the UI owns the terminal.
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            alt_screen: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

/// Puts the terminal into UI mode and takes it out again when dropped.
struct TerminalGuard {
    alt_screen: bool,
}

impl TerminalGuard {
    fn enter(options: &ProgramOptions) -> io::Result<Self> {
        if options.catch_panics {
            install_panic_hook(options.alt_screen);
        }
        enable_raw_mode()?;
        let guard = Self {
            alt_screen: options.alt_screen,
        };
        let mut out = stderr();
        if guard.alt_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        if let Some(title) = &options.title {
            execute!(out, SetTitle(title))?;
        }
        execute!(out, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal(self.alt_screen);
    }
}

fn install_panic_hook(alt_screen: bool) {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal(alt_screen);
            previous(info);
        }));
    });
}

/// Every step runs even when an earlier one fails.
fn restore_terminal(alt_screen: bool) {
    let mut out = stderr();
    let _ = execute!(out, cursor::Show);
    if alt_screen {
        let _ = execute!(out, LeaveAlternateScreen);
    }
    if let Err(e) = disable_raw_mode() {
        log::error!("could not leave raw mode: {e}");
    }
}

fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), ProgramError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(level, config, file)?;
    Ok(())
}

/// Drives a [`Model`] against the terminal until it returns
/// [`Command::quit`] or SIGINT arrives.
///
/// All `update` calls happen on the task that runs [`run`](Program::run),
/// one message at a time. Futures from [`Command::perform`] are spawned and
/// their results come back through the same queue, so a model never sees
/// two updates interleave.
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stderr>>,
    queue_tx: mpsc::UnboundedSender<M::Message>,
    queue_rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    options: ProgramOptions,
    dirty: bool,
    quitting: bool,
    // Declared last so the terminal is restored after everything else drops.
    _guard: TerminalGuard,
}

impl<M: Model> Program<M> {
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Install the logger (if asked), enter UI mode, and start the model.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(path) = &options.log_file {
            init_file_logger(path, options.log_level)?;
        }

        let guard = TerminalGuard::enter(&options)?;
        let terminal = Terminal::new(CrosstermBackend::new(stderr()))?;
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (model, init_cmd) = M::init(flags);

        let mut program = Self {
            model,
            terminal,
            subscriptions: SubscriptionManager::new(queue_tx.clone()),
            queue_tx,
            queue_rx,
            options,
            dirty: true,
            quitting: false,
            _guard: guard,
        };
        log::debug!("program started");

        program.dispatch(init_cmd);
        program.sync_subscriptions();
        Ok(program)
    }

    /// Run until quit and hand back the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let outcome = self.event_loop().await;
        self.subscriptions.shutdown();
        log::debug!("program stopped");
        outcome?;
        Ok(self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.draw()?;

        let period = Duration::from_secs_f64(1.0 / f64::from(self.options.fps.clamp(1, 120)));
        let mut frames = tokio::time::interval(period);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let watch_sigint = self.options.handle_signals;

        while !self.quitting {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if watch_sigint => {
                    log::info!("interrupted");
                    break;
                }

                Some(msg) = self.queue_rx.recv() => {
                    self.step(msg);
                    self.drain_burst();
                }

                _ = frames.tick() => {
                    if self.dirty {
                        self.draw()?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Handle whatever else is already queued, within a short window, so a
    /// message and its immediate follow-ups land in the same frame.
    fn drain_burst(&mut self) {
        let until = Instant::now() + BURST_WINDOW;
        for _ in 0..MAX_BURST {
            if self.quitting || Instant::now() >= until {
                break;
            }
            match self.queue_rx.try_recv() {
                Ok(msg) => self.step(msg),
                Err(_) => break,
            }
        }
    }

    fn step(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dispatch(cmd);
        self.sync_subscriptions();
        self.dirty = true;
    }

    fn sync_subscriptions(&mut self) {
        let wanted = self.model.subscriptions();
        self.subscriptions.reconcile(wanted);
    }

    fn dispatch(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Quit => self.quitting = true,
            CommandInner::Message(msg) => self.enqueue(msg),
            CommandInner::Future(fut) => {
                let tx = self.queue_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(fut.await);
                });
            }
            CommandInner::Batch(cmds) => cmds.into_iter().for_each(|cmd| self.dispatch(cmd)),
        }
    }

    fn enqueue(&self, msg: M::Message) {
        if self.queue_tx.send(msg).is_err() {
            log::warn!("message dropped: queue closed");
        }
    }

    fn draw(&mut self) -> Result<(), ProgramError> {
        let model = &self.model;
        self.terminal.draw(|frame| model.view(frame))?;
        self.dirty = false;
        Ok(())
    }
}
