//! View tabs and the tab bar drawn at the top of every view

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

use crate::services::RangePolicy;
use crate::tui::theme::Theme;

const TABS: [Tab; 4] = [Tab::Weekly, Tab::Monthly, Tab::Yearly, Tab::Records];

/// Divider between tab titles, one cell of padding on each side
const DIVIDER: &str = "│";

/// Views of the application, in number-key order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Records,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self.policy() {
            Some(policy) => policy.label(),
            None => "Records",
        }
    }

    pub fn all() -> &'static [Tab] {
        &TABS
    }

    fn index(self) -> usize {
        TABS.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next tab, wrapping
    pub fn next(self) -> Self {
        TABS[(self.index() + 1) % TABS.len()]
    }

    /// Previous tab, wrapping
    pub fn prev(self) -> Self {
        TABS[(self.index() + TABS.len() - 1) % TABS.len()]
    }

    /// Tab for number key `n` (1-based)
    pub fn from_number(n: u8) -> Option<Self> {
        usize::from(n).checked_sub(1).and_then(|i| TABS.get(i).copied())
    }

    /// Chart period shown by this tab, None for the record table
    pub fn policy(self) -> Option<RangePolicy> {
        match self {
            Self::Weekly => Some(RangePolicy::Week),
            Self::Monthly => Some(RangePolicy::Month),
            Self::Yearly => Some(RangePolicy::Year),
            Self::Records => None,
        }
    }

    /// Title as shown in the bar; the selected tab is bracketed
    fn title(self, selected: bool) -> String {
        if selected {
            format!("[{}]", self.label())
        } else {
            self.label().to_string()
        }
    }
}

/// Centered tab bar built on ratatui's `Tabs`
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }

    fn titles(&self) -> Vec<String> {
        TABS.iter().map(|t| t.title(*t == self.selected)).collect()
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let titles = self.titles();
        // Each title is padded by one cell on both sides, dividers sit between
        let width = titles.iter().map(|t| t.chars().count() + 2).sum::<usize>() + titles.len() - 1;
        let width = (width as u16).min(area.width);
        let bar_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height: 1,
        };

        let muted = Style::default().fg(self.theme.muted());
        Tabs::new(titles.into_iter().map(Line::from))
            .select(self.selected.index())
            .style(muted)
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD),
            )
            .divider(Span::styled(DIVIDER, muted))
            .render(bar_area, buf);
    }
}
