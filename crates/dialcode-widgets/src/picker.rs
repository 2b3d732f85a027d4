//! The country calling-code picker component.
//!
//! [`CountryPicker`] owns a host [`Document`] and drives it: it bootstraps
//! the ARIA attributes, fetches the catalog and caller location
//! concurrently, renders one list entry per country, and routes keys and
//! clicks to the navigator and the selection. Class changes on the list
//! container are picked up by the [`OpenCloseWatcher`] through a follow-up
//! [`Message::AttributesChanged`] after every update that caused them.
//!
//! The terminal view is a projection of the document: the toggle label,
//! the entries in document order, and the hidden input's value.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use dialcode_core::command::Command;
use dialcode_core::component::Component;
use dialcode_dom::{Document, Key, KeyboardEvent, NodeId};
use dialcode_providers::{
    CallerLocation, CallerLocationProvider, CountryCatalogProvider, CountryRecord,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::dropdown;
use crate::error::PickerError;
use crate::host::{value_element, HostConfig, HostPage};
use crate::key::{bindings, dom_key};
use crate::navigator::{self, NavAction};
use crate::renderer::{ListEntry, ListRenderer};
use crate::selection::SelectionState;
use crate::watcher::{OpenCloseWatcher, WatchState};

/// Everything the picker needs to start.
pub struct PickerFlags {
    pub page: HostPage,
    pub catalog: Arc<dyn CountryCatalogProvider>,
    pub location: Arc<dyn CallerLocationProvider>,
    /// Rows of the open list shown at once.
    pub max_visible: usize,
    pub style: PickerStyle,
}

impl PickerFlags {
    pub fn new(
        page: HostPage,
        catalog: Arc<dyn CountryCatalogProvider>,
        location: Arc<dyn CallerLocationProvider>,
    ) -> Self {
        Self {
            page,
            catalog,
            location,
            max_visible: 8,
            style: PickerStyle::default(),
        }
    }

    pub fn with_max_visible(mut self, rows: usize) -> Self {
        self.max_visible = rows.max(1);
        self
    }

    pub fn with_style(mut self, style: PickerStyle) -> Self {
        self.style = style;
        self
    }
}

/// Messages for the picker component.
#[derive(Debug)]
pub enum Message {
    /// Catalog and caller location arrived.
    Loaded(Vec<CountryRecord>, Option<CallerLocation>),
    /// A terminal key press; chords are ignored.
    KeyPress(KeyEvent),
    /// A key already in DOM form.
    Key(Key),
    /// A click on a document node.
    Click(NodeId),
    Open,
    Close,
    Toggle,
    /// The list container's attributes changed; let the watcher run.
    AttributesChanged,
    /// Emitted after the user picked a country. The picker ignores it;
    /// parents may intercept it.
    Selected {
        country_code: String,
        calling_code: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// The host page lacks an element the picker needs.
    Failed,
}

/// Style configuration for the picker.
#[derive(Debug, Clone)]
pub struct PickerStyle {
    pub toggle: Style,
    pub toggle_focused: Style,
    pub entry: Style,
    pub entry_focused: Style,
    pub entry_current: Style,
    pub hint: Style,
}

impl Default for PickerStyle {
    fn default() -> Self {
        Self {
            toggle: Style::default(),
            toggle_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            entry: Style::default(),
            entry_focused: Style::default().add_modifier(Modifier::REVERSED),
            entry_current: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::DarkGray),
        }
    }
}

pub struct CountryPicker {
    doc: Document,
    host: HostConfig,
    countries: Vec<CountryRecord>,
    renderer: ListRenderer,
    selection: SelectionState,
    watcher: Option<OpenCloseWatcher>,
    load_state: LoadState,
    style: PickerStyle,
    max_visible: usize,
    list_offset: usize,
}

impl CountryPicker {
    /// Attach to the page and start loading.
    ///
    /// The returned command fetches the catalog and the caller location
    /// side by side and resolves to [`Message::Loaded`]. When the page is
    /// missing the toggle or the list, nothing is fetched and the picker
    /// stays [`LoadState::Failed`].
    pub fn new(flags: PickerFlags) -> (Self, Command<Message>) {
        let PickerFlags {
            page,
            catalog,
            location,
            max_visible,
            style,
        } = flags;
        let (doc, host) = page.into_parts();
        let mut picker = Self {
            doc,
            host,
            countries: Vec::new(),
            renderer: ListRenderer::new(),
            selection: SelectionState::new(),
            watcher: None,
            load_state: LoadState::Loading,
            style,
            max_visible: max_visible.max(1),
            list_offset: 0,
        };

        if let Err(e) = picker.attach() {
            log::error!("country picker not attached: {e}");
            picker.load_state = LoadState::Failed;
            return (picker, Command::none());
        }

        let cmd = Command::perform(
            async move { futures::join!(catalog.fetch_all(), location.fetch_location()) },
            |(countries, location)| Message::Loaded(countries, location),
        );
        (picker, cmd)
    }

    fn attach(&mut self) -> Result<(), PickerError> {
        let toggle = self.host.toggle(&self.doc)?;
        let container = self.host.list_container(&self.doc)?;

        self.doc.set_attribute(toggle, "role", "combobox")?;
        self.doc.set_attribute(toggle, "aria-haspopup", "listbox")?;
        self.doc.set_attribute(toggle, "aria-expanded", "false")?;
        self.doc.set_attribute(toggle, "aria-controls", &self.host.list_id)?;
        self.doc.set_attribute(container, "role", "listbox")?;
        self.doc.set_attribute(container, "aria-hidden", "true")?;
        self.doc.focus(toggle)?;

        self.watcher = Some(OpenCloseWatcher::attach(&mut self.doc, &self.host)?);
        Ok(())
    }

    // --- Accessors ---

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn host(&self) -> &HostConfig {
        &self.host
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn entries(&self) -> &[ListEntry] {
        self.renderer.entries()
    }

    /// The catalog, sorted by two-letter code once loaded.
    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    pub fn selected_country(&self) -> Option<&CountryRecord> {
        self.selection.country().and_then(|i| self.countries.get(i))
    }

    /// The label the toggle currently shows, e.g. `+33`.
    pub fn calling_code(&self) -> Option<String> {
        let toggle = self.host.toggle(&self.doc).ok()?;
        value_element(&self.doc, toggle).map(|label| self.doc.text_content(label))
    }

    /// The hidden input's value; empty until something is selected.
    pub fn input_value(&self) -> String {
        self.host
            .country_input(&self.doc)
            .ok()
            .and_then(|input| self.doc.get_attribute(input, "value"))
            .unwrap_or_default()
            .to_string()
    }

    pub fn is_open(&self) -> bool {
        dropdown::is_open(&self.doc, &self.host)
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn watch_state(&self) -> Option<WatchState> {
        self.watcher.as_ref().map(|w| w.state())
    }

    // --- Update helpers ---

    fn load(&mut self, countries: Vec<CountryRecord>, location: Option<CallerLocation>) {
        self.countries = countries;
        if self.countries.is_empty() {
            log::warn!("country catalog is empty");
        }
        match &location {
            Some(loc) => log::info!("caller located in {}", loc.country_code),
            None => log::warn!("User location not found"),
        }

        match self.renderer.populate(
            &mut self.doc,
            &self.host,
            &mut self.countries,
            location.as_ref(),
            &mut self.selection,
        ) {
            Ok(_) => {
                self.load_state = LoadState::Ready;
                if location.is_some() && self.selection.country().is_none() {
                    log::warn!("Default selected country not found");
                }
            }
            Err(e) => {
                log::error!("could not render the country list: {e}");
                self.load_state = LoadState::Failed;
            }
        }
        self.list_offset = 0;
    }

    fn handle_key(&mut self, key: Key) -> Command<Message> {
        if self.load_state != LoadState::Ready {
            return Command::none();
        }

        if !self.is_open() {
            let toggle_focused = match (self.host.toggle(&self.doc), self.doc.active_element()) {
                (Ok(toggle), Some(active)) => toggle == active,
                (Ok(_), None) => true,
                (Err(_), _) => false,
            };
            if toggle_focused && matches!(key, Key::Enter | Key::Space | Key::ArrowDown) {
                report(dropdown::open_list(&mut self.doc, &self.host));
            }
            return Command::none();
        }

        if key == Key::Escape {
            report(dropdown::close_list(&mut self.doc, &self.host, true));
            return Command::none();
        }

        let mut event = KeyboardEvent::new(key);
        match navigator::on_key_down(&mut self.doc, &self.host, &mut event) {
            Ok(NavAction::Activate(node)) => self.activate(node),
            Ok(NavAction::Release) => {
                report(dropdown::close_list(&mut self.doc, &self.host, false));
                Command::none()
            }
            Ok(NavAction::Focused(_) | NavAction::None) => Command::none(),
            Err(e) => {
                log::error!("key handling failed: {e}");
                Command::none()
            }
        }
    }

    /// Select the country behind `node` and close the list.
    fn activate(&mut self, node: NodeId) -> Command<Message> {
        let Some(entry) = self.renderer.entry_for(node).cloned() else {
            log::debug!("click outside the country list ignored");
            return Command::none();
        };

        report(dropdown::close_list(&mut self.doc, &self.host, true));
        if let Err(e) = self.selection.set_selected(
            &mut self.doc,
            &self.host,
            &self.countries,
            entry.country,
            Some(entry.node),
        ) {
            log::error!("could not select country: {e}");
            return Command::none();
        }

        match (self.selected_country(), self.calling_code()) {
            (Some(record), Some(calling_code)) => {
                log::info!("selected {} ({calling_code})", record.cca2);
                Command::message(Message::Selected {
                    country_code: record.cca2.clone(),
                    calling_code,
                })
            }
            _ => Command::none(),
        }
    }

    fn process_attributes(&mut self) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        match watcher.process(&mut self.doc, &self.host, &self.selection) {
            Ok(Some(WatchState::Open)) => self.follow_scroll(),
            Ok(_) => {}
            Err(e) => log::error!("open/close handling failed: {e}"),
        }
    }

    /// Entry nodes in document order.
    fn rows(&self) -> Vec<NodeId> {
        let Ok(inner) = self.host.inner_list(&self.doc) else {
            return Vec::new();
        };
        self.doc
            .children(inner)
            .iter()
            .copied()
            .filter(|node| self.host.is_entry(&self.doc, *node))
            .collect()
    }

    fn max_offset(&self, rows: usize) -> usize {
        rows.saturating_sub(self.max_visible)
    }

    /// Put the most recently scrolled-to entry at the top of the list.
    fn follow_scroll(&mut self) {
        let Some((target, _)) = self.doc.last_scroll() else {
            return;
        };
        let rows = self.rows();
        if let Some(index) = rows.iter().position(|n| *n == target) {
            self.list_offset = index.min(self.max_offset(rows.len()));
        }
    }

    /// Keep the focused entry inside the visible window.
    fn follow_focus(&mut self) {
        let rows = self.rows();
        let focused = self
            .doc
            .active_element()
            .and_then(|active| rows.iter().position(|n| *n == active));
        if let Some(index) = focused {
            if index < self.list_offset {
                self.list_offset = index;
            } else if index >= self.list_offset + self.max_visible {
                self.list_offset = index + 1 - self.max_visible;
            }
        }
        self.list_offset = self.list_offset.min(self.max_offset(rows.len()));
    }

    /// Run the watcher on the next turn if this update touched its target.
    fn with_watcher_follow_up(&self, cmd: Command<Message>) -> Command<Message> {
        match &self.watcher {
            Some(watcher) if watcher.has_pending(&self.doc) => {
                Command::batch([Command::message(Message::AttributesChanged), cmd])
            }
            _ => cmd,
        }
    }

    // --- View helpers ---

    fn toggle_line(&self) -> Line<'static> {
        let focused = self
            .host
            .toggle(&self.doc)
            .is_ok_and(|toggle| self.doc.active_element() == Some(toggle));
        let style = if focused {
            self.style.toggle_focused
        } else {
            self.style.toggle
        };
        let flag = self
            .selected_country()
            .and_then(|c| c.flag.clone())
            .unwrap_or_else(|| "  ".to_string());
        let label = self.calling_code().unwrap_or_default();
        let arrow = if self.is_open() { "▴" } else { "▾" };
        Line::from(Span::styled(format!("{flag} {label} {arrow}"), style))
    }

    fn entry_line(&self, node: NodeId, width: usize) -> Line<'static> {
        let focused = self.doc.active_element() == Some(node);
        let current = self.doc.has_class(node, &self.host.current_class);
        let style = match (focused, current) {
            (true, _) => self.style.entry_focused,
            (false, true) => self.style.entry_current,
            (false, false) => self.style.entry,
        };

        let code = value_element(&self.doc, node)
            .map(|label| self.doc.text_content(label))
            .unwrap_or_default();
        let record = self
            .renderer
            .entry_for(node)
            .and_then(|entry| self.countries.get(entry.country));
        let flag = record.and_then(|r| r.flag.clone()).unwrap_or_else(|| "  ".to_string());
        let name = record.map(|r| r.name.common.as_str()).unwrap_or_default();
        let marker = if focused { "▸" } else { " " };
        let check = if current { "✓" } else { " " };

        let text = format!("{marker} {flag} {code:<2} {name} {check}");
        Line::from(Span::styled(fit(&text, width), style))
    }

    fn footer_line(&self) -> Line<'static> {
        let text = match self.load_state {
            LoadState::Loading => "Loading countries…".to_string(),
            LoadState::Failed => "Country list unavailable".to_string(),
            LoadState::Ready => {
                let keys: Vec<String> = bindings(self.is_open())
                    .iter()
                    .map(|b| format!("{} {}", b.keys, b.description))
                    .collect();
                format!("{} · countryCode={}", keys.join(" · "), self.input_value())
            }
        };
        Line::from(Span::styled(text, self.style.hint))
    }
}

/// Truncate `text` to `width` columns and pad it to exactly that width.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    let pad = width.saturating_sub(out.width());
    out.push_str(&" ".repeat(pad));
    out
}

fn report(result: Result<(), PickerError>) {
    if let Err(e) = result {
        log::error!("dropdown update failed: {e}");
    }
}

impl Component for CountryPicker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let cmd = match msg {
            Message::Loaded(countries, location) => {
                self.load(countries, location);
                Command::none()
            }
            Message::KeyPress(event) => match dom_key(&event) {
                Some(key) => self.handle_key(key),
                None => Command::none(),
            },
            Message::Key(key) => self.handle_key(key),
            Message::Click(node) => self.activate(node),
            Message::Open => {
                report(dropdown::open_list(&mut self.doc, &self.host));
                Command::none()
            }
            Message::Close => {
                report(dropdown::close_list(&mut self.doc, &self.host, true));
                Command::none()
            }
            Message::Toggle => {
                if let Err(e) = dropdown::toggle_list(&mut self.doc, &self.host) {
                    log::error!("dropdown update failed: {e}");
                }
                Command::none()
            }
            Message::AttributesChanged => {
                self.process_attributes();
                Command::none()
            }
            Message::Selected { .. } => Command::none(),
        };
        self.follow_focus();
        self.with_watcher_follow_up(cmd)
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let rows = if self.is_open() { self.rows() } else { Vec::new() };
        let visible = rows.len().min(self.max_visible);
        let list_height = if visible == 0 { 0 } else { visible as u16 + 2 };

        let [toggle_area, list_area, _, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(list_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let toggle =
            Paragraph::new(self.toggle_line()).block(Block::bordered().title(" Country code "));
        frame.render_widget(toggle, toggle_area);

        if visible > 0 && list_area.height > 2 {
            let block = Block::bordered();
            let inner = block.inner(list_area);
            frame.render_widget(block, list_area);

            let width = inner.width as usize;
            for (i, node) in rows
                .iter()
                .skip(self.list_offset)
                .take(inner.height as usize)
                .enumerate()
            {
                let row = Rect {
                    y: inner.y + i as u16,
                    height: 1,
                    ..inner
                };
                frame.render_widget(Paragraph::new(self.entry_line(*node, width)), row);
            }
        }

        frame.render_widget(Paragraph::new(self.footer_line()), footer_area);
    }

    fn focused(&self) -> bool {
        true
    }
}
