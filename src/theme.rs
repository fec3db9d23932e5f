use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Resolved palette for the gallery UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub variant: ThemeVariant,
    pub foreground: Color,
    pub foreground_dim: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub primary: Color,
    pub error: Color,
    pub photographer: Color,
    pub photo_meta: Color,
    pub placeholder: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub spinner: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            variant: ThemeVariant::Dark,
            foreground: Color::White,
            foreground_dim: Color::DarkGray,
            border: Color::DarkGray,
            selection_bg: Color::Rgb(45, 50, 60),
            primary: Color::Cyan,
            error: Color::Red,
            photographer: Color::White,
            photo_meta: Color::Yellow,
            placeholder: Color::DarkGray,
            status_bar_bg: Color::Cyan,
            status_bar_fg: Color::Black,
            spinner: Color::Cyan,
        }
    }

    pub fn light() -> Self {
        Self {
            variant: ThemeVariant::Light,
            foreground: Color::Black,
            foreground_dim: Color::Gray,
            border: Color::Gray,
            selection_bg: Color::Rgb(220, 225, 235),
            primary: Color::Blue,
            error: Color::Red,
            photographer: Color::Black,
            photo_meta: Color::Magenta,
            placeholder: Color::Gray,
            status_bar_bg: Color::Blue,
            status_bar_fg: Color::White,
            spinner: Color::Blue,
        }
    }

    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.foreground_dim)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .bg(self.status_bar_bg)
            .fg(self.status_bar_fg)
    }

    pub fn spinner_style(&self) -> Style {
        Style::default().fg(self.spinner)
    }
}

/// Guesses the terminal's background by luma. Falls back to dark when the
/// terminal does not answer the query.
pub fn detect_terminal_theme() -> ThemeVariant {
    match terminal_light::luma() {
        Ok(luma) if luma > 0.6 => ThemeVariant::Light,
        _ => ThemeVariant::Dark,
    }
}
