// TUI event loop and terminal management
use crate::{capture, App, InputMode, SurfaceCapture};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use profilescope_core::{ProfileResolver, Resolution};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::{debug, warn};

const TICK: Duration = Duration::from_millis(100);

pub async fn run_tui(
    mut app: App,
    resolver: Arc<ProfileResolver>,
    mut snapshots: Box<dyn SurfaceCapture>,
    developer_url: String,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(
        &mut terminal,
        &mut app,
        resolver,
        snapshots.as_mut(),
        &developer_url,
    )
    .await;

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    resolver: Arc<ProfileResolver>,
    snapshots: &mut dyn SurfaceCapture,
    developer_url: &str,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<(u64, Resolution)>();

    loop {
        // Apply any lookups that finished since the last frame
        while let Ok((request, outcome)) = rx.try_recv() {
            app.complete_lookup(request, outcome);
        }

        terminal.draw(|f| crate::ui::render(f, &*app))?;

        // Poll with a timeout so finished lookups show up without a keypress
        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.input_mode {
                InputMode::Searching => match key.code {
                    KeyCode::Enter => {
                        if let Some((request, identifier)) = app.begin_lookup() {
                            app.enter_normal_mode();
                            spawn_lookup(resolver.clone(), tx.clone(), request, identifier);
                        }
                    }
                    KeyCode::Char(c) => {
                        app.search_input.push(c);
                    }
                    KeyCode::Backspace => {
                        app.search_input.pop();
                    }
                    KeyCode::Esc => {
                        app.enter_normal_mode();
                    }
                    _ => {}
                },
                InputMode::Normal => {
                    app.clear_status();
                    match key.code {
                        KeyCode::Char('q') => app.quit(),
                        KeyCode::Char('/') | KeyCode::Char('i') => app.enter_search_mode(),
                        KeyCode::Char('m') => app.toggle_explanation(),
                        KeyCode::Char('s') => capture::export_snapshot(app, snapshots),
                        KeyCode::Char('o') => open_url(app, developer_url),
                        KeyCode::Char('p') => {
                            if let Some(url) = app.profile().and_then(|p| p.record.html_url.clone()) {
                                open_url(app, &url);
                            }
                        }
                        KeyCode::Enter => {
                            // Re-run the current query
                            if let Some((request, identifier)) = app.begin_lookup() {
                                spawn_lookup(resolver.clone(), tx.clone(), request, identifier);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Run one resolution in the background and report it with its request number
fn spawn_lookup(
    resolver: Arc<ProfileResolver>,
    tx: mpsc::UnboundedSender<(u64, Resolution)>,
    request: u64,
    identifier: String,
) {
    debug!("Starting lookup #{} for {}", request, identifier);
    tokio::spawn(async move {
        if let Some(outcome) = resolver.resolve(&identifier).await {
            // The receiver is gone once the UI has quit
            let _ = tx.send((request, outcome));
        }
    });
}

fn open_url(app: &mut App, url: &str) {
    if let Err(e) = open::that(url) {
        warn!("Failed to open {}: {}", url, e);
        app.status_message = Some(format!("Failed to open browser: {}", e));
    }
}
