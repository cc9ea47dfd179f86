//! Terminal theme detection and the two color palettes

use ratatui::style::Color;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors for one background
struct Palette {
    text: Color,
    accent: Color,
    muted: Color,
    axis: Color,
    date: Color,
    count: Color,
    bar: Color,
    peak: Color,
    error: Color,
}

const DARK: Palette = Palette {
    text: Color::White,
    accent: Color::Cyan,
    muted: Color::DarkGray,
    axis: Color::Gray,
    date: Color::Indexed(180), // eggshell tan
    count: Color::Indexed(215),
    bar: Color::Indexed(220), // yolk
    peak: Color::Indexed(208),
    error: Color::Red,
};

const LIGHT: Palette = Palette {
    text: Color::Black,
    accent: Color::Indexed(25),
    muted: Color::Gray,
    axis: Color::DarkGray,
    date: Color::Indexed(94),
    count: Color::Indexed(130),
    bar: Color::Indexed(178),
    peak: Color::Indexed(166),
    error: Color::Indexed(124),
};

impl Theme {
    /// Pick a palette from the terminal background luminance. Call before
    /// `ratatui::init`: the query needs cooked mode. Defaults to Dark.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }

    pub fn text(self) -> Color {
        self.palette().text
    }

    /// Selected tab, key names, focused form field
    pub fn accent(self) -> Color {
        self.palette().accent
    }

    /// Separators, hints, inactive tabs
    pub fn muted(self) -> Color {
        self.palette().muted
    }

    /// Chart y axis and its 0/max labels
    pub fn axis(self) -> Color {
        self.palette().axis
    }

    pub fn date(self) -> Color {
        self.palette().date
    }

    /// Egg counts in the table and chart footer
    pub fn count(self) -> Color {
        self.palette().count
    }

    /// Chart bars
    pub fn bar(self) -> Color {
        self.palette().bar
    }

    /// Bars reaching the period's maximum
    pub fn peak(self) -> Color {
        self.palette().peak
    }

    pub fn error(self) -> Color {
        self.palette().error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_text_contrasts_with_background() {
        assert_eq!(Theme::Dark.text(), Color::White);
        assert_eq!(Theme::Light.text(), Color::Black);
    }

    #[test]
    fn test_peak_bars_stand_out() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_ne!(theme.bar(), theme.peak());
            assert_ne!(theme.axis(), theme.bar());
        }
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Dark.bar(), Theme::Light.bar());
        assert_ne!(Theme::Dark.accent(), Theme::Light.accent());
    }
}
