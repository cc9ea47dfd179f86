//! Application state and event loop

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};
use tracing::{info, warn};

use crate::config::Config;
use crate::services::{Aggregator, RangePolicy, RecordStore, SqliteStore};
use crate::types::{format_date, parse_date, DenseSeries, Record, Result};

use super::theme::Theme;
use super::widgets::{
    chart::ChartView,
    delete_confirm::{DeleteConfirmPopup, DeleteConfirmState},
    help::HelpPopup,
    record_form::{FormMode, RecordFormPopup, RecordFormState},
    records::{max_scroll_offset_for, scroll_to_show, RecordsView},
    tabs::Tab,
};

/// Popup drawn over the current view. Only one is open at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Form(RecordFormState),
    ConfirmDelete(DeleteConfirmState),
}

/// Message shown on the bottom line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    None,
    Info(String),
    Error(String),
}

/// One chart tab: its own anchor date and the series derived from it
struct ChartState {
    policy: RangePolicy,
    anchor: NaiveDate,
    series: DenseSeries,
}

/// Main application
pub struct App<S: RecordStore> {
    store: S,
    today: NaiveDate,
    charts: Vec<ChartState>,
    records: Vec<Record>,
    current_tab: Tab,
    selected: usize,
    scroll: usize,
    overlay: Overlay,
    status: Status,
    theme: Theme,
    should_quit: bool,
}

impl<S: RecordStore> App<S> {
    /// Create the app and load every view from the store
    pub fn new(store: S, today: NaiveDate, theme: Theme) -> Self {
        let charts = RangePolicy::all()
            .iter()
            .map(|&policy| ChartState {
                policy,
                anchor: today,
                series: Aggregator::aggregate(&[], policy.derive(today)),
            })
            .collect();

        let mut app = Self {
            store,
            today,
            charts,
            records: Vec::new(),
            current_tab: Tab::default(),
            selected: 0,
            scroll: 0,
            overlay: Overlay::None,
            status: Status::None,
            theme,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Recompute the record list and every chart from the store. A
    /// successful reload clears an earlier error message.
    fn refresh(&mut self) {
        match self.reload() {
            Ok(()) => {
                if matches!(self.status, Status::Error(_)) {
                    self.status = Status::None;
                }
            }
            Err(e) => {
                warn!("failed to load records: {}", e);
                self.status = Status::Error(e.to_string());
            }
        }
    }

    /// Advance the date used by `t` and the add form, e.g. past midnight
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    fn reload(&mut self) -> Result<()> {
        self.records = self.store.fetch_all()?;
        for chart in &mut self.charts {
            let range = chart.policy.derive(chart.anchor);
            let records = self.store.fetch_in_range(range)?;
            chart.series = Aggregator::aggregate(&records, range);
        }
        self.clamp_selection();
        Ok(())
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
        self.scroll = scroll_to_show(
            self.selected,
            self.scroll.min(max_scroll_offset_for(self.records.len())),
        );
    }

    fn select_date(&mut self, date: NaiveDate) {
        if let Some(index) = self.records.iter().position(|r| r.date == date) {
            self.selected = index;
            self.clamp_selection();
        }
    }

    fn chart(&self, policy: RangePolicy) -> Option<&ChartState> {
        self.charts.iter().find(|c| c.policy == policy)
    }

    fn chart_mut(&mut self, policy: RangePolicy) -> Option<&mut ChartState> {
        self.charts.iter_mut().find(|c| c.policy == policy)
    }

    fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                match self.overlay {
                    Overlay::None => self.handle_main_key(key),
                    Overlay::Help => self.handle_help_key(key),
                    Overlay::Form(_) => self.handle_form_key(key),
                    Overlay::ConfirmDelete(_) => self.handle_confirm_key(key),
                }
            }
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.current_tab = self.current_tab.next();
            }
            KeyCode::BackTab => {
                self.current_tab = self.current_tab.prev();
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.current_tab = tab;
                }
            }
            KeyCode::Char('?') => {
                self.overlay = Overlay::Help;
            }
            KeyCode::Char('a') => {
                self.overlay = Overlay::Form(RecordFormState::add(self.today));
            }
            KeyCode::Left | KeyCode::Char('h') => self.shift_period(-1),
            KeyCode::Right | KeyCode::Char('l') => self.shift_period(1),
            KeyCode::Char('t') => self.reset_period(),
            KeyCode::Up | KeyCode::Char('k') if self.current_tab == Tab::Records => {
                self.selected = self.selected.saturating_sub(1);
                self.clamp_selection();
            }
            KeyCode::Down | KeyCode::Char('j') if self.current_tab == Tab::Records => {
                self.selected += 1;
                self.clamp_selection();
            }
            KeyCode::Char('e') | KeyCode::Enter if self.current_tab == Tab::Records => {
                if let Some(record) = self.selected_record() {
                    self.overlay = Overlay::Form(RecordFormState::edit(record));
                }
            }
            KeyCode::Char('x') | KeyCode::Delete if self.current_tab == Tab::Records => {
                if let Some(record) = self.selected_record() {
                    self.overlay = Overlay::ConfirmDelete(DeleteConfirmState::new(record.date));
                }
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Overlay::Form(form) = &mut self.overlay else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.overlay = Overlay::None,
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Overlay::ConfirmDelete(confirm) = &mut self.overlay else {
            return;
        };
        match key.code {
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Char('h')
            | KeyCode::Char('l')
            | KeyCode::Tab
            | KeyCode::BackTab => confirm.toggle(),
            KeyCode::Enter => {
                let (date, confirmed) = (confirm.date, confirm.confirmed());
                self.overlay = Overlay::None;
                if confirmed {
                    self.delete_record(date);
                }
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let date = confirm.date;
                self.overlay = Overlay::None;
                self.delete_record(date);
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.overlay = Overlay::None;
            }
            _ => {}
        }
    }

    /// Validate and persist the open form. On failure the form stays open
    /// with the message and nothing is written.
    fn submit_form(&mut self) {
        let Overlay::Form(form) = &mut self.overlay else {
            return;
        };
        let record = match form.validate() {
            Ok(record) => record,
            Err(e) => {
                form.error = Some(e.to_string());
                return;
            }
        };

        let result = match form.mode {
            FormMode::Add => self.store.upsert(&record),
            FormMode::Edit { original } => self.store.update(original, &record),
        };

        match result {
            Ok(()) => {
                info!("saved record for {}", format_date(record.date));
                self.overlay = Overlay::None;
                self.status = Status::Info(format!(
                    "Saved {} eggs for {}",
                    record.count,
                    format_date(record.date)
                ));
                self.refresh();
                self.select_date(record.date);
            }
            Err(e) => {
                warn!("failed to save record: {}", e);
                form.error = Some(e.to_string());
            }
        }
    }

    fn delete_record(&mut self, date: NaiveDate) {
        let status = match self.store.delete(date) {
            Ok(true) => {
                info!("deleted record for {}", format_date(date));
                Status::Info(format!("Deleted record for {}", format_date(date)))
            }
            Ok(false) => Status::Error(format!("No record for {}", format_date(date))),
            Err(e) => {
                warn!("failed to delete record: {}", e);
                Status::Error(e.to_string())
            }
        };
        self.refresh();
        // A failed reload keeps its own message
        if !matches!(self.status, Status::Error(_)) {
            self.status = status;
        }
    }

    /// Move the current chart's anchor by whole periods
    fn shift_period(&mut self, steps: i32) {
        if let Some(policy) = self.current_tab.policy() {
            if let Some(chart) = self.chart_mut(policy) {
                chart.anchor = policy.shift(chart.anchor, steps);
            }
            self.refresh();
        }
    }

    fn reset_period(&mut self) {
        if let Some(policy) = self.current_tab.policy() {
            let today = self.today;
            if let Some(chart) = self.chart_mut(policy) {
                chart.anchor = today;
            }
            self.refresh();
        }
    }

    /// Whether the add form targets a date that already has a record
    fn form_replaces_existing(&self, form: &RecordFormState) -> bool {
        form.mode == FormMode::Add
            && parse_date(&form.date)
                .map(|date| self.records.iter().any(|r| r.date == date))
                .unwrap_or(false)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let (text, color) = match &self.status {
            Status::None => return,
            Status::Info(text) => (text, self.theme.muted()),
            Status::Error(text) => (text, self.theme.error()),
        };
        let text: String = text.chars().take(area.width as usize).collect();
        let x = area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
        let y = area.y + area.height - 1;
        buf.set_string(x, y, &text, Style::default().fg(color));
    }
}

impl<S: RecordStore> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.current_tab.policy() {
            Some(policy) => {
                if let Some(chart) = self.chart(policy) {
                    ChartView::new(&chart.series, policy, self.theme)
                        .with_tab(self.current_tab)
                        .render(area, buf);
                }
            }
            None => {
                let selected = (!self.records.is_empty()).then_some(self.selected);
                RecordsView::new(&self.records, self.scroll, self.theme)
                    .with_tab(self.current_tab)
                    .with_selected_index(selected)
                    .render(area, buf);
            }
        }

        self.render_status(area, buf);

        match &self.overlay {
            Overlay::None => {}
            Overlay::Help => {
                let popup_area = HelpPopup::centered_area(area);
                HelpPopup::new(self.theme).render(popup_area, buf);
            }
            Overlay::Form(form) => {
                let popup_area = RecordFormPopup::centered_area(area);
                RecordFormPopup::new(form, self.theme)
                    .with_replace_warning(self.form_replaces_existing(form))
                    .render(popup_area, buf);
            }
            Overlay::ConfirmDelete(confirm) => {
                let popup_area = DeleteConfirmPopup::centered_area(area);
                DeleteConfirmPopup::new(confirm, self.theme).render(popup_area, buf);
            }
        }
    }
}

/// Run the TUI application against the configured database
pub fn run(config: &Config) -> anyhow::Result<()> {
    let store = SqliteStore::open(&config.db_path)?;
    // Query the terminal background before raw mode swallows the reply
    let theme = Theme::detect();
    let mut app = App::new(store, Local::now().date_naive(), theme);

    info!("starting TUI");
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app);
    ratatui::restore();
    info!("TUI closed");
    result
}

fn run_app<S: RecordStore>(terminal: &mut DefaultTerminal, app: &mut App<S>) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        let ev = event::read()?;
        app.set_today(Local::now().date_naive());
        app.handle_event(ev);
    }

    Ok(())
}
