mod api;
mod app;
mod cli;
mod event;
mod keys;
mod settings;
mod theme;
mod trigger;
mod tui;
mod views;

#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::Frame;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use api::Client;
use app::{App, Message};
use cli::Cli;
use event::Event;
use settings::Settings;
use theme::{Theme, ThemeVariant};
use tui::Tui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = settings::config_dir(cli.config_dir.as_ref());
    let settings = config_dir
        .as_ref()
        .map(|dir| {
            let path = settings::settings_path(dir);
            Settings::load(&path).unwrap_or_else(|e| {
                eprintln!("Warning: {}", e);
                Settings::default()
            })
        })
        .unwrap_or_default();

    let _log_guard = init_logging(&cli, config_dir.as_ref());

    let api_key = settings::resolve_api_key(
        cli.api_key.as_deref(),
        std::env::var(settings::API_KEY_ENV).ok(),
        &settings,
    )
    .with_context(|| {
        format!(
            "No Pexels API key found. Pass --api-key, set {}, or add api_key to settings.toml",
            settings::API_KEY_ENV
        )
    })?;

    let variant = if cli.dark {
        ThemeVariant::Dark
    } else if cli.light {
        ThemeVariant::Light
    } else {
        theme::detect_terminal_theme()
    };

    let result = run_tui(Theme::for_variant(variant), Client::new(api_key)).await;

    if cli.verbose && let Some(dir) = &config_dir {
        eprintln!("Logs: {}", settings::log_dir(dir).display());
    }
    result
}

fn init_logging(cli: &Cli, config_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let dir = config_dir?;
    let log_dir = settings::log_dir(dir);
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::never(log_dir, "pix.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let default_filter = if cli.verbose { "pix=debug" } else { "pix=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    info!("logging initialized");
    Some(guard)
}

async fn run_tui(theme: Theme, client: Client) -> Result<()> {
    let mut terminal = tui::init()?;
    let result = event_loop(&mut terminal, theme, client).await;
    tui::restore()?;
    result
}

async fn event_loop(terminal: &mut Tui, theme: Theme, client: Client) -> Result<()> {
    let mut app = App::new(theme, client);
    let mut events = event::EventHandler::new(250);
    let mut last_height: Option<u16> = None;

    app.load_gallery();

    loop {
        terminal.draw(|frame| render(&app, frame))?;

        // Track gallery height changes; the debug pane eats into the list.
        let height = terminal.size()?.height;
        let gallery_height = if app.debug.visible {
            height.saturating_sub(DEBUG_PANE_HEIGHT)
        } else {
            height
        };
        if last_height != Some(gallery_height) {
            last_height = Some(gallery_height);
            app.update(Message::UpdateViewportHeight(gallery_height));
        }

        // Poll async results (non-blocking)
        while let Ok(result) = app.result_rx.try_recv() {
            app.handle_async_result(result);
        }

        // Sample the sentinel against what was just drawn; firings advance
        // the page from here.
        app.observe_sentinel();

        if app.should_quit {
            break;
        }

        match events.next().await? {
            Event::Key(key) => {
                if let Some(msg) = keys::handle_key(key, &app) {
                    app.update(msg);
                }
            }
            Event::Tick | Event::Resize => {}
        }
    }

    Ok(())
}

const DEBUG_PANE_HEIGHT: u16 = 10;

fn render(app: &App, frame: &mut Frame) {
    use ratatui::layout::{Constraint, Layout};

    let area = frame.area();

    let (main_area, debug_area) = if app.debug.visible {
        let chunks = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(DEBUG_PANE_HEIGHT),
        ])
        .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    views::gallery::render(frame, app, main_area);

    if let Some(debug_area) = debug_area {
        views::debug::render(frame, app, debug_area);
    }

    views::help_overlay::render(frame, app, area);
}
