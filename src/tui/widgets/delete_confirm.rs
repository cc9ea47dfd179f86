//! Delete confirmation popup widget

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;
use crate::types::format_date;

/// Width and height of the delete confirm popup
const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 7;

/// State for the delete confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmState {
    pub date: NaiveDate,
    /// 0 = Yes, 1 = No (default)
    pub selection: u8,
}

impl DeleteConfirmState {
    /// New dialog for `date` with "No" preselected
    pub fn new(date: NaiveDate) -> Self {
        Self { date, selection: 1 }
    }

    pub fn toggle(&mut self) {
        self.selection = 1 - self.selection.min(1);
    }

    pub fn confirmed(&self) -> bool {
        self.selection == 0
    }
}

/// Delete confirmation popup overlay
pub struct DeleteConfirmPopup<'a> {
    state: &'a DeleteConfirmState,
    theme: Theme,
}

impl<'a> DeleteConfirmPopup<'a> {
    pub fn new(state: &'a DeleteConfirmState, theme: Theme) -> Self {
        Self { state, theme }
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

    fn button_style(&self, selected: bool) -> (&'static str, Style) {
        if selected {
            (
                "▸ ",
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(self.theme.muted()))
        }
    }
}

impl Widget for DeleteConfirmPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Delete Record ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Question
            Constraint::Length(1), // [2] Padding
            Constraint::Length(1), // [3] Buttons
            Constraint::Length(1), // [4] Key hints
        ])
        .split(inner);

        let question_line = Line::from(Span::styled(
            format!("Delete the record for {}?", format_date(self.state.date)),
            Style::default().fg(self.theme.text()),
        ));
        Paragraph::new(question_line)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let (yes_marker, yes_style) = self.button_style(self.state.selection == 0);
        let (no_marker, no_style) = self.button_style(self.state.selection == 1);

        let buttons_line = Line::from(vec![
            Span::styled(yes_marker, yes_style),
            Span::styled("Yes", yes_style),
            Span::styled("       ", Style::default()),
            Span::styled(no_marker, no_style),
            Span::styled("No", no_style),
        ]);
        Paragraph::new(buttons_line)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let hint_line = Line::from(vec![
            Span::styled(
                "←→",
                Style::default()
                    .fg(self.theme.muted())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Select  ", Style::default().fg(self.theme.muted())),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(self.theme.muted())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Confirm", Style::default().fg(self.theme.muted())),
        ]);
        Paragraph::new(hint_line)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
