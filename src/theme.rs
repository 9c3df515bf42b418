use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Application color theme.
///
/// Holds color values directly, independent of any specific palette. Use the
/// factory functions like [`Theme::catppuccin_mocha`] for pre-configured
/// themes.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub base: Color,
    pub surface0: Color,
    pub surface1: Color,
    pub surface2: Color,
    pub overlay0: Color,
    pub text: Color,
    pub subtext0: Color,
    pub subtext1: Color,
    pub peach: Color,
    pub yellow: Color,
    pub red: Color,
    pub mauve: Color,
    pub lavender: Color,
    pub border_type: BorderType,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let colors = &flavor.colors;
        Self {
            base: catppuccin_to_color(&colors.base),
            surface0: catppuccin_to_color(&colors.surface0),
            surface1: catppuccin_to_color(&colors.surface1),
            surface2: catppuccin_to_color(&colors.surface2),
            overlay0: catppuccin_to_color(&colors.overlay0),
            text: catppuccin_to_color(&colors.text),
            subtext0: catppuccin_to_color(&colors.subtext0),
            subtext1: catppuccin_to_color(&colors.subtext1),
            peach: catppuccin_to_color(&colors.peach),
            yellow: catppuccin_to_color(&colors.yellow),
            red: catppuccin_to_color(&colors.red),
            mauve: catppuccin_to_color(&colors.mauve),
            lavender: catppuccin_to_color(&colors.lavender),
            border_type: BorderType::Rounded,
        }
    }

    #[must_use]
    pub const fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    #[must_use]
    pub const fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    #[must_use]
    pub const fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    #[must_use]
    pub const fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    #[must_use]
    pub const fn base(&self) -> Color {
        self.base
    }

    #[must_use]
    pub const fn surface0(&self) -> Color {
        self.surface0
    }

    #[must_use]
    pub const fn surface2(&self) -> Color {
        self.surface2
    }

    #[must_use]
    pub const fn overlay0(&self) -> Color {
        self.overlay0
    }

    #[must_use]
    pub const fn text(&self) -> Color {
        self.text
    }

    #[must_use]
    pub const fn subtext0(&self) -> Color {
        self.subtext0
    }

    #[must_use]
    pub const fn subtext1(&self) -> Color {
        self.subtext1
    }

    #[must_use]
    pub const fn peach(&self) -> Color {
        self.peach
    }

    #[must_use]
    pub const fn yellow(&self) -> Color {
        self.yellow
    }

    #[must_use]
    pub const fn mauve(&self) -> Color {
        self.mauve
    }

    #[must_use]
    pub const fn lavender(&self) -> Color {
        self.lavender
    }

    // Semantic accessors

    #[must_use]
    pub const fn error(&self) -> Color {
        self.red
    }

    #[must_use]
    pub const fn border(&self) -> Color {
        self.surface1
    }

    #[must_use]
    pub const fn border_focused(&self) -> Color {
        self.lavender
    }

    #[must_use]
    pub const fn header(&self) -> Color {
        self.yellow
    }

    #[must_use]
    pub const fn selection_bg(&self) -> Color {
        self.surface1
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

/// A named theme.
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    pub name: &'static str,
    pub theme: Theme,
}

impl ThemeInfo {
    const fn new(name: &'static str, theme: Theme) -> Self {
        Self { name, theme }
    }
}

/// All built-in themes.
#[must_use]
pub fn available_themes() -> Vec<ThemeInfo> {
    vec![
        ThemeInfo::new("Catppuccin Mocha", Theme::catppuccin_mocha()),
        ThemeInfo::new("Catppuccin Macchiato", Theme::catppuccin_macchiato()),
        ThemeInfo::new("Catppuccin Frappé", Theme::catppuccin_frappe()),
        ThemeInfo::new("Catppuccin Latte", Theme::catppuccin_latte()),
    ]
}

/// Look up a theme by its full name or its final word ("mocha", "latte"),
/// case-insensitively. Unknown names fall back to the default theme.
#[must_use]
pub fn theme_from_name(name: &str) -> Theme {
    let wanted = name.to_lowercase();
    available_themes()
        .into_iter()
        .find(|info| {
            let full = info.name.to_lowercase();
            full == wanted || full.ends_with(&format!(" {wanted}"))
        })
        .map_or_else(Theme::default, |info| info.theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_themes_by_full_name() {
        let theme = theme_from_name("Catppuccin Latte");

        assert_eq!(theme.base, Theme::catppuccin_latte().base);
    }

    #[test]
    fn finds_themes_by_flavor_shorthand() {
        let theme = theme_from_name("macchiato");

        assert_eq!(theme.base, Theme::catppuccin_macchiato().base);
    }

    #[test]
    fn unknown_names_fall_back_to_the_default() {
        let theme = theme_from_name("solarized");

        assert_eq!(theme.base, Theme::default().base);
    }
}
