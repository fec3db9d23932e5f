use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::Theme;

/// Builder for rendering a consistent status bar.
///
/// The layout is `[Label] Position | Help Text`.
pub struct StatusBar<'a> {
    theme: &'a Theme,
    label: &'a str,
    position: Option<(usize, usize)>,
    help_text: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            label: "",
            position: None,
            help_text: "",
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn position(mut self, current: usize, total: usize) -> Self {
        self.position = Some((current, total));
        self
    }

    pub fn help(mut self, text: &'a str) -> Self {
        self.help_text = text;
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.label),
                self.theme.status_bar_style(),
            ),
            Span::raw(" "),
        ];

        if let Some((current, total)) = self.position {
            spans.push(Span::styled(
                format!("{}/{}", current, total),
                self.theme.dim_style(),
            ));
            spans.push(Span::raw(" | "));
        }

        spans.push(Span::styled(
            self.help_text.to_string(),
            self.theme.dim_style(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crate::views::tests::render_to_string;

    #[test]
    fn status_bar_full() {
        let theme = Theme::dark();
        let output = render_to_string(60, 1, |frame| {
            StatusBar::new(&theme)
                .label("Curated")
                .position(5, 100)
                .help("j/k:nav  ?:help")
                .render(frame, frame.area());
        });

        assert!(output.contains("Curated"));
        assert!(output.contains("5/100"));
        assert!(output.contains("j/k:nav"));
    }

    #[test]
    fn status_bar_minimal() {
        let theme = Theme::dark();
        let output = render_to_string(40, 1, |frame| {
            StatusBar::new(&theme)
                .label("Curated")
                .help("q:quit")
                .render(frame, frame.area());
        });

        assert!(output.contains("Curated"));
        assert!(output.contains("q:quit"));
        assert!(!output.contains('|'));
    }
}
