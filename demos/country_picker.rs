//! # Country Picker
//!
//! Drives the standard host page with a [`CountryPicker`]:
//! - the catalog and the caller's location load concurrently on startup
//! - ↓ / Enter / Space opens the list, letters jump, Enter chooses
//! - Tab or Esc closes the list, `q` quits while it is closed
//!
//! Records go to `dialcode.log`. Pass `--offline` to use the bundled
//! catalog and a fixed French location instead of the network.
//!
//! Run with: `cargo run --example country_picker [-- --offline]`

use std::sync::Arc;

use dialcode::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dialcode::providers::{
    CallerLocationProvider, CountryCatalogProvider, IpApiClient, ProviderConfig,
    RestCountriesClient, StaticCatalog, StaticLocation,
};
use dialcode::ratatui::layout::{Constraint, Layout};
use dialcode::ratatui::style::{Color, Modifier, Style};
use dialcode::ratatui::Frame;
use dialcode::widgets::{CountryPicker, HostConfig, HostPage, Message, PickerFlags, PickerStyle};
use dialcode::{
    terminal_events, Command, Component, LevelFilter, Model, ProgramOptions, Subscription,
    TerminalEvent,
};

struct App {
    picker: CountryPicker,
}

#[derive(Debug)]
enum Msg {
    Picker(Message),
    Key(KeyEvent),
    Quit,
}

impl Model for App {
    type Message = Msg;
    type Flags = PickerFlags;

    fn init(flags: PickerFlags) -> (Self, Command<Msg>) {
        let (picker, cmd) = CountryPicker::new(flags);
        (App { picker }, cmd.map(Msg::Picker))
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key) if key.code == KeyCode::Char('q') && !self.picker.is_open() => {
                Command::quit()
            }
            Msg::Key(key) => self.picker.update(Message::KeyPress(key)).map(Msg::Picker),
            Msg::Picker(Message::Selected {
                country_code,
                calling_code,
            }) => {
                log::info!("picked {country_code} ({calling_code})");
                Command::none()
            }
            Msg::Picker(m) => self.picker.update(m).map(Msg::Picker),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [area] = Layout::horizontal([Constraint::Max(64)]).areas(frame.area());
        self.picker.view(frame, area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        vec![terminal_events(|ev| match ev {
            TerminalEvent::Key(key)
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Msg::Quit)
            }
            TerminalEvent::Key(key) => Some(Msg::Key(key)),
            _ => None,
        })]
    }
}

#[dialcode::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let offline = std::env::args().any(|arg| arg == "--offline");

    let (catalog, location): (Arc<dyn CountryCatalogProvider>, Arc<dyn CallerLocationProvider>) =
        if offline {
            (
                Arc::new(StaticCatalog::sample()),
                Arc::new(StaticLocation::country("FR")),
            )
        } else {
            let config = ProviderConfig::default();
            (
                Arc::new(RestCountriesClient::new(&config)?),
                Arc::new(IpApiClient::new(&config)?),
            )
        };

    let flags = PickerFlags::new(HostPage::standard(HostConfig::default()), catalog, location)
        .with_max_visible(10)
        .with_style(PickerStyle {
            entry_current: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ..PickerStyle::default()
        });
    let options = ProgramOptions {
        title: Some("dialcode".to_string()),
        log_file: Some("dialcode.log".into()),
        log_level: LevelFilter::Debug,
        ..ProgramOptions::default()
    };

    let app = dialcode::run_with::<App>(flags, options).await?;
    match app.picker.selected_country() {
        Some(country) => println!(
            "{} {} (countryCode={})",
            country.name.common,
            app.picker.calling_code().unwrap_or_default(),
            app.picker.input_value()
        ),
        None => println!("no country selected"),
    }
    Ok(())
}
