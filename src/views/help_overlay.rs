//! Help overlay view showing keybindings.

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::app::App;

const ITEMS: &[(&str, &str)] = &[
    ("j / ↓", "Next photo"),
    ("k / ↑", "Previous photo"),
    ("g / G", "First / last photo"),
    ("o / Enter", "Open photo page in browser"),
    ("r", "Refresh gallery"),
    ("`", "Toggle debug pane"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if !app.show_help {
        return;
    }

    // Dim the underlying content
    let buf = frame.buffer_mut();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = &mut buf[(x, y)];
            cell.set_style(cell.style().add_modifier(Modifier::DIM));
        }
    }

    let theme = &app.theme;

    let key_width = ITEMS.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let label_width = ITEMS.iter().map(|(_, l)| l.len()).max().unwrap_or(0);
    let popup_width = ((key_width + 2 + label_width) + 2 + 4) as u16;
    let popup_height = (ITEMS.len() + 4) as u16;

    let popup_width = popup_width.min(area.width.saturating_sub(4));
    let popup_height = popup_height.min(area.height.saturating_sub(4));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = ITEMS
        .iter()
        .map(|(keys, label)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>width$}", keys, width = key_width),
                    theme.dim_style(),
                ),
                Span::raw("  "),
                Span::raw(*label),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title("Help")
            .title_style(theme.title_style())
            .padding(Padding::uniform(1)),
    );

    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
