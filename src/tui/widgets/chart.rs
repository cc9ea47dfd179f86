//! Chart view widget - vertical bar chart of a zero-filled daily series

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::services::{Aggregator, RangePolicy};
use crate::tui::theme::Theme;
use crate::types::{format_date, DenseSeries, SeriesSummary};

/// Bar fill levels in eighths of a cell (index 0 = empty)
const EIGHTHS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Maximum content width (consistent with the records view)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Widest a single day's column may grow
const MAX_COLUMN_WIDTH: u16 = 8;

/// Column width at which every column gets its own dd.mm label
const PER_COLUMN_LABEL_WIDTH: u16 = 6;

/// Format a horizontal bar based on value ratio
/// Example: value=500, max=1000, width=8 → "▓▓▓▓░░░░"
pub fn format_sparkline(value: u64, max: u64, width: usize) -> String {
    if max == 0 || width == 0 {
        return "░".repeat(width);
    }
    let ratio = value as f64 / max as f64;
    let filled = (ratio * width as f64).round() as usize;
    let filled = filled.min(width); // Clamp to prevent overflow when ratio > 1.0
    let empty = width.saturating_sub(filled);
    format!("{}{}", "▓".repeat(filled), "░".repeat(empty))
}

/// Reduce `values` to at most `columns` entries, keeping the maximum of
/// each consecutive bucket so single-day peaks stay visible.
pub fn column_values(values: &[u32], columns: usize) -> Vec<u32> {
    if columns == 0 {
        return Vec::new();
    }
    if values.len() <= columns {
        return values.to_vec();
    }

    (0..columns)
        .map(|i| {
            let start = i * values.len() / columns;
            let end = ((i + 1) * values.len() / columns).max(start + 1);
            values[start..end].iter().copied().max().unwrap_or(0)
        })
        .collect()
}

/// Bar height in eighths of a row for a plot `rows` tall
pub fn bar_eighths(value: u32, max: u32, rows: u16) -> u32 {
    if max == 0 || rows == 0 {
        return 0;
    }
    let total = u32::from(rows) * 8;
    let scaled = (f64::from(value) / f64::from(max) * f64::from(total)).round() as u32;
    // Non-zero values always show at least a sliver
    if value > 0 {
        scaled.clamp(1, total)
    } else {
        0
    }
}

/// One-line chart footer
pub fn format_summary(summary: &SeriesSummary) -> String {
    format!(
        "Total {}  ·  Max {}  ·  Recorded {}/{} days  ·  Avg {:.1}/day",
        summary.total, summary.max, summary.recorded_days, summary.days, summary.daily_average
    )
}

/// Horizontal placement of the plot inside its area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlotGeometry {
    /// Width of the y-axis labels
    label_width: u16,
    /// First column of the bars
    plot_x: u16,
    columns: usize,
    column_width: u16,
    /// True when several days share a column
    bucketed: bool,
}

impl PlotGeometry {
    fn new(area: Rect, series_len: usize, max: u32) -> Self {
        let label_width = max.to_string().len() as u16;
        let plot_x = area.x + label_width + 1;
        let plot_width = area.width.saturating_sub(label_width + 1);
        let columns = series_len.min(plot_width as usize);
        let column_width = if columns == 0 {
            1
        } else {
            (plot_width / columns as u16).clamp(1, MAX_COLUMN_WIDTH)
        };

        Self {
            label_width,
            plot_x,
            columns,
            column_width,
            bucketed: columns < series_len,
        }
    }

    /// Visible bar width, leaving a one-cell gap on wide columns
    fn bar_width(&self) -> u16 {
        if self.column_width >= 3 {
            self.column_width - 1
        } else {
            self.column_width
        }
    }

    fn column_x(&self, index: usize) -> u16 {
        self.plot_x + index as u16 * self.column_width
    }
}

/// Chart view widget
pub struct ChartView<'a> {
    series: &'a DenseSeries,
    policy: RangePolicy,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> ChartView<'a> {
    pub fn new(series: &'a DenseSeries, policy: RangePolicy, theme: Theme) -> Self {
        Self {
            series,
            policy,
            selected_tab: Tab::Weekly,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }
}

impl Widget for ChartView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // Top padding
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Title
            Constraint::Length(1), // Padding
            Constraint::Min(3),    // Bars
            Constraint::Length(1), // X-axis labels
            Constraint::Length(1), // Summary
            Constraint::Length(1), // Separator
            Constraint::Length(1), // Keybindings
            Constraint::Length(1), // Status line (drawn by the app)
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_title(chunks[3], buf);

        let max = self.series.values().max().unwrap_or(0);
        let geometry = PlotGeometry::new(chunks[5], self.series.len(), max);
        self.render_bars(chunks[5], buf, geometry, max);
        self.render_x_labels(chunks[6], buf, geometry);
        self.render_summary(chunks[7], buf);
        self.render_separator(chunks[8], buf);
        self.render_keybindings(chunks[9], buf);
    }
}

impl ChartView<'_> {
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

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let title = Line::from(Span::styled(
            self.policy.title(self.series.range),
            Style::default()
                .fg(self.theme.date())
                .add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_bars(&self, area: Rect, buf: &mut Buffer, geometry: PlotGeometry, max: u32) {
        if area.height == 0 || area.width <= geometry.label_width + 1 {
            return;
        }

        let axis_style = Style::default().fg(self.theme.axis());
        let axis_x = area.x + geometry.label_width;
        let bottom = area.y + area.height - 1;

        // Y axis, anchored at zero
        for y in area.y..=bottom {
            buf.set_string(axis_x, y, "│", axis_style);
        }
        let max_label = format!("{:>width$}", max, width = geometry.label_width as usize);
        buf.set_string(area.x, area.y, &max_label, axis_style);
        let zero_label = format!("{:>width$}", 0, width = geometry.label_width as usize);
        buf.set_string(area.x, bottom, &zero_label, axis_style);

        if max == 0 {
            let message = "No records in this period";
            let plot_width = area.width.saturating_sub(geometry.label_width + 1);
            let x = geometry.plot_x + plot_width.saturating_sub(message.len() as u16) / 2;
            buf.set_string(x, area.y + area.height / 2, message, axis_style);
            return;
        }

        let values: Vec<u32> = self.series.values().collect();
        let columns = column_values(&values, geometry.columns);
        let bar_width = geometry.bar_width() as usize;

        for (i, value) in columns.iter().enumerate() {
            let color = if *value == max {
                self.theme.peak()
            } else {
                self.theme.bar()
            };
            let bar_style = Style::default().fg(color);
            let eighths = bar_eighths(*value, max, area.height);
            let x = geometry.column_x(i);
            for row in 0..area.height {
                let filled = eighths.saturating_sub(u32::from(row) * 8).min(8) as usize;
                if filled == 0 {
                    break;
                }
                buf.set_string(x, bottom - row, EIGHTHS[filled].repeat(bar_width), bar_style);
            }
        }
    }

    fn render_x_labels(&self, area: Rect, buf: &mut Buffer, geometry: PlotGeometry) {
        if geometry.columns == 0 || area.height == 0 {
            return;
        }
        let style = Style::default().fg(self.theme.muted());

        if !geometry.bucketed && geometry.column_width >= PER_COLUMN_LABEL_WIDTH {
            for (i, point) in self.series.points.iter().enumerate() {
                let label = point.date.format("%d.%m").to_string();
                buf.set_string(geometry.column_x(i), area.y, &label, style);
            }
            return;
        }

        let start = format_date(self.series.range.start());
        let end = format_date(self.series.range.end());
        let span_end = geometry.column_x(geometry.columns);
        buf.set_string(geometry.plot_x, area.y, &start, style);
        let end_x = span_end.saturating_sub(end.len() as u16);
        if end_x > geometry.plot_x + start.len() as u16 {
            buf.set_string(end_x, area.y, &end, style);
        }
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        let summary = Aggregator::summarize(self.series);
        let line = Line::from(Span::styled(
            format_summary(&summary),
            Style::default().fg(self.theme.count()),
        ));
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let bindings = Paragraph::new(Line::from(vec![
            Span::styled("←→", Style::default().fg(self.theme.accent())),
            Span::styled(": Period", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("t", Style::default().fg(self.theme.accent())),
            Span::styled(": Today", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("a", Style::default().fg(self.theme.accent())),
            Span::styled(": Add", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("Tab", Style::default().fg(self.theme.accent())),
            Span::styled(": Switch view", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("?", Style::default().fg(self.theme.accent())),
            Span::styled(": Help", Style::default().fg(self.theme.muted())),
        ]))
        .alignment(Alignment::Center);

        bindings.render(area, buf);
    }
}
