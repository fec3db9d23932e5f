use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthChar;

use crate::api::Photo;
use crate::app::{App, PER_PAGE};
use crate::theme::Theme;
use crate::views::common::render_error;
use crate::views::spinner::spinner_frame;
use crate::views::status_bar::StatusBar;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(0),    // Photo list
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    render_photo_list(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![
        Span::styled("Pexels · Curated", theme.title_style()),
        Span::styled(
            format!("  {} photos", app.photos.len()),
            theme.dim_style(),
        ),
    ];

    if app.load.should_show_spinner() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            spinner_frame(app.load.loading_start),
            theme.spinner_style(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_photo_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    if let Some(err) = &app.load.error {
        render_error(frame, err, theme, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title("Photos");
    let inner_width = area.width.saturating_sub(2) as usize;

    let lines = content_lines(app, inner_width);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.scroll_offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Builds the full content: photo rows, skeleton placeholders while a fetch
/// is outstanding, then the sentinel row. Line count always matches
/// [`App::content_rows`] so the trigger measures exactly what is drawn.
fn content_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let mut lines = Vec::with_capacity(app.content_rows());

    for (i, photo) in app.photos.iter().enumerate() {
        let selected = i == app.selected_index;
        lines.extend(photo_lines(photo, i + 1, selected, theme, width));
    }

    if app.load.in_flight {
        for _ in 0..PER_PAGE {
            lines.push(Line::styled(
                "░".repeat(24.min(width)),
                theme.placeholder,
            ));
            lines.push(Line::styled(
                format!("     {}", "░".repeat(14.min(width))),
                theme.placeholder,
            ));
        }
    }

    lines.push(sentinel_line(app));
    lines
}

fn photo_lines(
    photo: &Photo,
    rank: usize,
    selected: bool,
    theme: &Theme,
    width: usize,
) -> [Line<'static>; 2] {
    let base = if selected {
        theme.selection_style()
    } else {
        Default::default()
    };

    let title = Line::from(vec![
        Span::styled(format!("{:>3}. ", rank), theme.dim_style()),
        Span::styled(
            photo.photographer.clone(),
            base.fg(theme.photographer),
        ),
        Span::styled(
            format!("  {}×{}", photo.width, photo.height),
            base.fg(theme.photo_meta),
        ),
    ])
    .style(base);

    let caption = Line::from(vec![
        Span::raw("     "),
        Span::styled(
            truncate_to_width(photo.caption(), width.saturating_sub(5)),
            theme.dim_style(),
        ),
    ])
    .style(base);

    [title, caption]
}

fn sentinel_line(app: &App) -> Line<'static> {
    if app.load.has_more {
        // The sentinel itself: an empty row whose only job is to be seen.
        Line::from("")
    } else {
        Line::styled("· end of curated feed ·", app.theme.dim_style())
    }
}

fn truncate_to_width(s: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.show_help {
        "j/k:nav  g/G:top/bottom  o:open  r:refresh  `:debug  q:quit  ?:hide"
    } else {
        "o:open  ?:help  q:quit"
    };

    let mut bar = StatusBar::new(&app.theme).label("Curated").help(help_text);
    if !app.photos.is_empty() {
        bar = bar.position(app.selected_index + 1, app.photos.len());
    }
    bar.render(frame, area);
}
