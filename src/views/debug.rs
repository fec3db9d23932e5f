use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .title(" Debug ")
        .borders(Borders::ALL)
        .border_style(theme.border_style());

    let mut lines = Vec::new();

    // Running tasks
    let task_count = app.debug.running_tasks.len();
    lines.push(Line::from(vec![
        Span::styled("Tasks: ", theme.dim_style()),
        Span::styled(
            task_count.to_string(),
            if task_count > 0 {
                theme.title_style()
            } else {
                Default::default()
            },
        ),
    ]));

    for task in &app.debug.running_tasks {
        let elapsed = task.started_at.elapsed();
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", task.id), theme.dim_style()),
            Span::raw(task.description.clone()),
            Span::styled(format!(" ({:.1?})", elapsed), theme.dim_style()),
        ]));
    }

    if !app.debug.running_tasks.is_empty() {
        lines.push(Line::from(""));
    }

    // Recent log entries, newest first, limited to the pane height
    let available_lines = area.height.saturating_sub(3) as usize;
    let log_lines = available_lines.saturating_sub(app.debug.running_tasks.len() + 1);

    for entry in app.debug.log.iter().rev().take(log_lines) {
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.message),
            theme.dim_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
