//! Help popup widget - keyboard shortcuts and about text

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 48;
const POPUP_HEIGHT: u16 = 22;

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
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

    fn render_section_header(&self, area: Rect, sep: Rect, buf: &mut Buffer, title: &str) {
        let header = Line::from(vec![Span::styled(
            title.to_string(),
            Style::default()
                .fg(self.theme.date())
                .add_modifier(Modifier::BOLD),
        )]);
        Paragraph::new(header)
            .alignment(Alignment::Left)
            .render(area, buf);

        if sep.height > 0 {
            buf.set_string(
                sep.x,
                sep.y,
                "─".repeat(sep.width as usize),
                Style::default().fg(self.theme.muted()),
            );
        }
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let title = format!(" eggtrack v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] About
            Constraint::Length(1), // [2] Padding
            Constraint::Length(1), // [3] Navigation header
            Constraint::Length(1), // [4] Separator
            Constraint::Length(1), // [5] Tab/Shift+Tab
            Constraint::Length(1), // [6] 1-4
            Constraint::Length(1), // [7] Left/Right
            Constraint::Length(1), // [8] t
            Constraint::Length(1), // [9] Padding
            Constraint::Length(1), // [10] Records header
            Constraint::Length(1), // [11] Separator
            Constraint::Length(1), // [12] a
            Constraint::Length(1), // [13] Up/Down
            Constraint::Length(1), // [14] e / Enter
            Constraint::Length(1), // [15] x / Delete
            Constraint::Length(1), // [16] Padding
            Constraint::Length(1), // [17] q/Esc
            Constraint::Length(1), // [18] Close hint
            Constraint::Min(0),    // Remaining
        ])
        .split(inner);

        let about = Line::from(Span::styled(
            "Track the number of eggs laid over time.",
            Style::default().fg(self.theme.text()),
        ));
        Paragraph::new(about)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        self.render_section_header(chunks[3], chunks[4], buf, "Charts");
        render_keybinding(chunks[5], buf, "Tab / Shift+Tab", "Switch view", self.theme);
        render_keybinding(chunks[6], buf, "1-4", "Jump to view", self.theme);
        render_keybinding(chunks[7], buf, "Left/Right or h/l", "Previous/next period", self.theme);
        render_keybinding(chunks[8], buf, "t", "Back to today", self.theme);

        self.render_section_header(chunks[10], chunks[11], buf, "Records");
        render_keybinding(chunks[12], buf, "a", "Add record", self.theme);
        render_keybinding(chunks[13], buf, "Up/Down or j/k", "Select record", self.theme);
        render_keybinding(chunks[14], buf, "e / Enter", "Edit record", self.theme);
        render_keybinding(chunks[15], buf, "x / Delete", "Delete record", self.theme);

        render_keybinding(chunks[17], buf, "q / Esc", "Quit", self.theme);

        let hint = Line::from(vec![Span::styled(
            "Press ? to close",
            Style::default().fg(self.theme.muted()),
        )]);
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[18], buf);
    }
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(format!("  {:<20}", key), Style::default().fg(theme.accent())),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}
