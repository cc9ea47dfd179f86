//! Records view widget - table of every stored record with a selection cursor

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::{format_date, Record};

/// Maximum content width (consistent with the chart views)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Visible rows for scrolling (excluding header)
pub const VISIBLE_ROWS: usize = 15;

/// Date column width includes 2 chars for the selection marker (▸ )
const DATE_WIDTH: usize = 14;
const COUNT_WIDTH: usize = 8;
const NOTE_MIN_WIDTH: usize = 20;
const NOTE_MAX_WIDTH: usize = 60;

/// Calculate maximum scroll offset for a given item count
pub fn max_scroll_offset_for(count: usize) -> usize {
    count.saturating_sub(VISIBLE_ROWS)
}

/// Scroll offset that keeps `selected` inside the visible window
pub fn scroll_to_show(selected: usize, scroll: usize) -> usize {
    if selected < scroll {
        selected
    } else if selected >= scroll + VISIBLE_ROWS {
        selected + 1 - VISIBLE_ROWS
    } else {
        scroll
    }
}

/// Truncate to `width` characters (UTF-8 safe), marking the cut with …
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Records view widget
pub struct RecordsView<'a> {
    records: &'a [Record],
    scroll_offset: usize,
    selected_index: Option<usize>,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> RecordsView<'a> {
    pub fn new(records: &'a [Record], scroll_offset: usize, theme: Theme) -> Self {
        Self {
            records,
            scroll_offset,
            selected_index: None,
            selected_tab: Tab::Records,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }

    pub fn with_selected_index(mut self, selected_index: Option<usize>) -> Self {
        self.selected_index = selected_index;
        self
    }

    fn note_width(area_width: u16) -> usize {
        (area_width as usize)
            .saturating_sub(DATE_WIDTH + COUNT_WIDTH + 2)
            .clamp(NOTE_MIN_WIDTH, NOTE_MAX_WIDTH)
    }

    fn table_width(area_width: u16) -> u16 {
        (DATE_WIDTH + COUNT_WIDTH + 2 + Self::note_width(area_width)) as u16
    }
}

impl Widget for RecordsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let visible_rows = self.records.len().clamp(1, VISIBLE_ROWS) as u16;
        let chunks = Layout::vertical([
            Constraint::Length(1),            // Top padding
            Constraint::Length(1),            // Tabs
            Constraint::Length(1),            // Separator
            Constraint::Length(1),            // Record count
            Constraint::Length(1),            // Header
            Constraint::Length(visible_rows), // Rows
            Constraint::Length(1),            // Separator
            Constraint::Length(1),            // Keybindings
            Constraint::Min(0),               // Remaining space
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_count(chunks[3], buf);
        self.render_header(chunks[4], buf);
        self.render_rows(chunks[5], buf);
        self.render_separator(chunks[6], buf);
        self.render_keybindings(chunks[7], buf);
    }
}

impl RecordsView<'_> {
    fn table_area(area: Rect) -> Rect {
        let tw = Self::table_width(area.width);
        let offset = area.width.saturating_sub(tw) / 2;
        Rect {
            x: area.x + offset,
            y: area.y,
            width: tw.min(area.width),
            height: area.height,
        }
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let line = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &line,
            Style::default().fg(self.theme.muted()),
        );
    }

    fn render_count(&self, area: Rect, buf: &mut Buffer) {
        let label = match self.records.len() {
            1 => "1 record".to_string(),
            n => format!("{} records", n),
        };
        Paragraph::new(Line::from(Span::styled(
            label,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(area, buf);
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let header_style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        let note_width = Self::note_width(area.width);

        let header = Line::from(vec![
            Span::styled(
                format!("  {:<width$}", "Date", width = DATE_WIDTH - 2),
                header_style,
            ),
            Span::styled(format!("{:>width$}", "Count", width = COUNT_WIDTH), header_style),
            Span::raw("  "),
            Span::styled(format!("{:<width$}", "Note", width = note_width), header_style),
        ]);
        Paragraph::new(header)
            .alignment(Alignment::Left)
            .render(Self::table_area(area), buf);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        if self.records.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No records yet. Press a to add one.",
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        let table = Self::table_area(area);
        let note_width = Self::note_width(area.width);
        let start = self.scroll_offset.min(self.records.len());
        let end = (start + area.height as usize).min(self.records.len());

        for (i, record) in self.records[start..end].iter().enumerate() {
            let is_selected = self.selected_index == Some(start + i);
            let row = Rect {
                y: table.y + i as u16,
                height: 1,
                ..table
            };
            self.render_row(row, buf, record, note_width, is_selected);
        }
    }

    fn render_row(
        &self,
        area: Rect,
        buf: &mut Buffer,
        record: &Record,
        note_width: usize,
        is_selected: bool,
    ) {
        let selection_modifier = if is_selected {
            Modifier::BOLD | Modifier::REVERSED
        } else {
            Modifier::empty()
        };
        let marker = if is_selected { "▸ " } else { "  " };

        let line = Line::from(vec![
            Span::styled(
                format!("{}{:<width$}", marker, format_date(record.date), width = DATE_WIDTH - 2),
                Style::default()
                    .fg(self.theme.date())
                    .add_modifier(selection_modifier),
            ),
            Span::styled(
                format!("{:>width$}", record.count, width = COUNT_WIDTH),
                Style::default()
                    .fg(self.theme.count())
                    .add_modifier(selection_modifier),
            ),
            Span::raw("  "),
            Span::styled(
                format!(
                    "{:<width$}",
                    truncate(record.note_text(), note_width),
                    width = note_width
                ),
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(selection_modifier),
            ),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Left)
            .render(area, buf);
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let bindings = Paragraph::new(Line::from(vec![
            Span::styled("↑↓", Style::default().fg(self.theme.accent())),
            Span::styled(": Select", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("a", Style::default().fg(self.theme.accent())),
            Span::styled(": Add", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("e", Style::default().fg(self.theme.accent())),
            Span::styled(": Edit", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("x", Style::default().fg(self.theme.accent())),
            Span::styled(": Delete", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("?", Style::default().fg(self.theme.accent())),
            Span::styled(": Help", Style::default().fg(self.theme.muted())),
        ]))
        .alignment(Alignment::Center);

        bindings.render(area, buf);
    }
}
