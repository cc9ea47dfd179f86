//! Add/edit record popup with input validation

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;
use crate::types::{format_date, parse_count, parse_date, Record, Result};

/// Width and height of the form popup
const POPUP_WIDTH: u16 = 52;
const POPUP_HEIGHT: u16 = 12;

/// Longest accepted input per field
const DATE_MAX_LEN: usize = 10;
const COUNT_MAX_LEN: usize = 9;
const NOTE_MAX_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    /// Editing the record stored at `original`
    Edit { original: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Date,
    Count,
    Note,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Count,
            Self::Count => Self::Note,
            Self::Note => Self::Date,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Note,
            Self::Count => Self::Date,
            Self::Note => Self::Count,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Date => "Date:",
            Self::Count => "Egg count:",
            Self::Note => "Note:",
        }
    }

    fn max_len(self) -> usize {
        match self {
            Self::Date => DATE_MAX_LEN,
            Self::Count => COUNT_MAX_LEN,
            Self::Note => NOTE_MAX_LEN,
        }
    }
}

/// Editable text of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFormState {
    pub mode: FormMode,
    pub date: String,
    pub count: String,
    pub note: String,
    pub focus: FormField,
    /// Validation or save failure shown under the fields
    pub error: Option<String>,
}

impl RecordFormState {
    /// Empty form for a new record dated `today`, focused on the count
    pub fn add(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Add,
            date: format_date(today),
            count: String::new(),
            note: String::new(),
            focus: FormField::Count,
            error: None,
        }
    }

    /// Form prefilled with an existing record
    pub fn edit(record: &Record) -> Self {
        Self {
            mode: FormMode::Edit {
                original: record.date,
            },
            date: format_date(record.date),
            count: record.count.to_string(),
            note: record.note_text().to_string(),
            focus: FormField::Count,
            error: None,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Date => &mut self.date,
            FormField::Count => &mut self.count,
            FormField::Note => &mut self.note,
        }
    }

    fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Count => &self.count,
            FormField::Note => &self.note,
        }
    }

    pub fn push_char(&mut self, c: char) {
        let focus = self.focus;
        let value = self.field_mut(focus);
        if value.chars().count() < focus.max_len() && !c.is_control() {
            value.push(c);
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.field_mut(focus).pop();
        self.error = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Parse the fields into a record. Nothing is written on failure.
    pub fn validate(&self) -> Result<Record> {
        let date = parse_date(&self.date)?;
        let count = parse_count(&self.count)?;
        Ok(Record::new(date, count, Some(self.note.clone())))
    }

    fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => " Add Record ",
            FormMode::Edit { .. } => " Edit Record ",
        }
    }
}

/// Form popup overlay
pub struct RecordFormPopup<'a> {
    state: &'a RecordFormState,
    /// Set when an add would replace an existing record
    replaces_existing: bool,
    theme: Theme,
}

impl<'a> RecordFormPopup<'a> {
    pub fn new(state: &'a RecordFormState, theme: Theme) -> Self {
        Self {
            state,
            replaces_existing: false,
            theme,
        }
    }

    pub fn with_replace_warning(mut self, replaces_existing: bool) -> Self {
        self.replaces_existing = replaces_existing;
        self
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn render_field(&self, area: Rect, buf: &mut Buffer, field: FormField) {
        let focused = self.state.focus == field;
        let label_style = if focused {
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted())
        };
        let value = self.state.field(field);
        let placeholder = match field {
            FormField::Date => "dd.mm.yyyy",
            FormField::Count => "Egg count",
            FormField::Note => "Note (optional)",
        };

        let mut spans = vec![
            Span::styled(if focused { "▸ " } else { "  " }, label_style),
            Span::styled(format!("{:<12}", field.label()), label_style),
        ];
        if value.is_empty() && !focused {
            spans.push(Span::styled(placeholder, Style::default().fg(self.theme.muted())));
        } else {
            spans.push(Span::styled(value.to_string(), Style::default().fg(self.theme.text())));
        }
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(self.theme.accent())));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

impl Widget for RecordFormPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(self.state.title())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Date
            Constraint::Length(1), // [2] Count
            Constraint::Length(1), // [3] Note
            Constraint::Length(1), // [4] Padding
            Constraint::Length(1), // [5] Message
            Constraint::Length(1), // [6] Padding
            Constraint::Length(1), // [7] Key hints
            Constraint::Min(0),
        ])
        .split(inner);

        self.render_field(chunks[1], buf, FormField::Date);
        self.render_field(chunks[2], buf, FormField::Count);
        self.render_field(chunks[3], buf, FormField::Note);

        let message = if let Some(error) = &self.state.error {
            Some(Span::styled(error.clone(), Style::default().fg(self.theme.error())))
        } else if self.replaces_existing {
            Some(Span::styled(
                "Existing record for this date will be replaced.",
                Style::default().fg(self.theme.date()),
            ))
        } else {
            None
        };
        if let Some(message) = message {
            Paragraph::new(Line::from(message))
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
        }

        let hint_line = Line::from(vec![
            Span::styled(
                "Tab",
                Style::default()
                    .fg(self.theme.muted())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Next field  ", Style::default().fg(self.theme.muted())),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(self.theme.muted())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Save  ", Style::default().fg(self.theme.muted())),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(self.theme.muted())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Cancel", Style::default().fg(self.theme.muted())),
        ]);
        Paragraph::new(hint_line)
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }
}
