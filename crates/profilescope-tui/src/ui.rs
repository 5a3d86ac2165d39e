// UI rendering logic
use crate::{App, InputMode, SessionState};
use profilescope_core::{metrics, ResolvedProfile};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
    Frame,
};

/// Width of the offscreen surface used for snapshots
pub const SNAPSHOT_WIDTH: u16 = 72;

const CHART_HEIGHT: u16 = 12;
const METRICS_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_search_input(frame, app, chunks[1]);

    match &app.state {
        SessionState::Idle => render_idle(frame, chunks[2]),
        SessionState::Loading => render_loading(frame, chunks[2]),
        SessionState::Failure(message) => render_error(frame, message, chunks[2]),
        SessionState::Success(_) => {
            let area = card_area(app, chunks[2]);
            render_card(frame.buffer_mut(), area, app);
        }
    }

    render_status_bar(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "profilescope",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "Evaluate a GitHub profile from its key public metrics",
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default(),
    };

    let input = Paragraph::new(app.search_input.as_str())
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("User or organization (e.g. octocat)")
                .border_style(input_style),
        );

    frame.render_widget(input, area);

    // Show cursor when in search mode
    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((
            area.x + app.search_input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from("Type a username, an organization or a profile URL and press ENTER."),
        Line::from(""),
        Line::from(Span::styled(
            "Score = 2x repos + 3x followers",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new(vec![
        Line::from(Span::styled("Loading...", Style::default().fg(Color::Yellow))),
        Line::from(Span::styled("░░░░░░░░░░░░░░░░░░░░", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("░░░░░░░░░░░░", Style::default().fg(Color::DarkGray))),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(placeholder, area);
}

fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Center the card horizontally and clamp it to the available space
fn card_area(app: &App, available: Rect) -> Rect {
    let width = SNAPSHOT_WIDTH.min(available.width);
    let height = card_height(app).min(available.height);
    let x = available.x + (available.width - width) / 2;
    Rect::new(x, available.y, width, height)
}

/// Rows the card needs, including its border
pub fn card_height(app: &App) -> u16 {
    let summary = app.profile().map(summary_lines).map_or(0, |l| l.len() as u16);
    let explanation = if app.show_explanation {
        explanation_lines().len() as u16
    } else {
        0
    };
    let chrome = if app.chrome_visible { 1 } else { 0 };

    2 + summary + CHART_HEIGHT + METRICS_HEIGHT + explanation + chrome
}

/// Render the result card into any buffer, on screen or offscreen
pub fn render_card(buf: &mut Buffer, area: Rect, app: &App) {
    let Some(profile) = app.profile() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(format!(" {} ", profile.record.login));
    let inner = block.inner(area);
    block.render(area, buf);

    let summary = summary_lines(profile);
    let explanation = if app.show_explanation {
        explanation_lines()
    } else {
        Vec::new()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary.len() as u16),
            Constraint::Length(CHART_HEIGHT),
            Constraint::Length(METRICS_HEIGHT),
            Constraint::Length(explanation.len() as u16),
            Constraint::Length(if app.chrome_visible { 1 } else { 0 }),
        ])
        .split(inner);

    Paragraph::new(summary).render(chunks[0], buf);
    render_chart(buf, chunks[1], profile);
    Paragraph::new(metric_lines(app, profile)).render(chunks[2], buf);

    if !explanation.is_empty() {
        Paragraph::new(explanation)
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);
    }

    if app.chrome_visible {
        Paragraph::new(chrome_line(app)).render(chunks[4], buf);
    }
}

fn summary_lines(profile: &ResolvedProfile) -> Vec<Line<'static>> {
    let record = &profile.record;
    let label = Style::default().fg(Color::Gray);

    let mut counts = vec![
        Span::raw("▤ "),
        Span::styled(
            record.repos().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Repos", label),
    ];

    // Organizations have no meaningful follower count
    if let Some(followers) = profile.visible_followers() {
        counts.push(Span::raw("   ♟ "));
        counts.push(Span::styled(
            followers.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
        counts.push(Span::styled(" Followers", label));
    }

    counts.push(Span::raw("   ✎ "));
    counts.push(Span::styled(
        record.gists().to_string(),
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    ));
    counts.push(Span::styled(" Gists", label));

    vec![
        Line::from(vec![
            Span::raw("◎ "),
            Span::styled(record.avatar_url.clone(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled(
                record.login.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({})", profile.kind), label),
        ]),
        Line::from(vec![Span::raw("● "), Span::raw(record.display_name().to_string())]),
        Line::from(counts),
    ]
}

fn render_chart(buf: &mut Buffer, area: Rect, profile: &ResolvedProfile) {
    let series = metrics::chart_series(&profile.record);
    let points: Vec<(f64, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let y_max = (series.max_value() * 1.1).max(1.0);

    let dataset = Dataset::default()
        .name(series.title)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::LightRed))
        .data(&points);

    let axis_style = Style::default().fg(Color::Gray);
    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::TOP).title("Metrics chart"))
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 2.0])
                .labels(series.labels.iter().map(|l| Span::raw(*l)).collect::<Vec<_>>()),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(format!("{:.0}", y_max))]),
        );

    chart.render(area, buf);
}

fn metric_lines(app: &App, profile: &ResolvedProfile) -> Vec<Line<'static>> {
    let derived = metrics::derive_metrics(&profile.record);
    let series = metrics::chart_series(&profile.record);

    vec![
        Line::from(vec![
            Span::raw("★ Score: "),
            Span::styled(
                metrics::format_score(derived.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("$ Valuation: "),
            Span::styled(
                metrics::format_valuation(derived.valuation, app.thousands_separator),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            crate::sparkline::series_sparkline(&series),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn explanation_lines() -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Metric explanation:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for (name, text) in metrics::EXPLANATION {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", name), Style::default().fg(Color::Cyan)),
            Span::styled(*text, Style::default().fg(Color::Gray)),
        ]));
    }

    lines
}

fn chrome_line(app: &App) -> Line<'static> {
    let more = if app.show_explanation {
        "show less"
    } else {
        "show more"
    };

    Line::from(Span::styled(
        format!(
            "[s] save snapshot  [m] {}  [p] open profile  [o] visit developer",
            more
        ),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Render the card alone into an offscreen buffer sized to fit it
pub fn render_offscreen(app: &App) -> Buffer {
    let area = Rect::new(0, 0, SNAPSHOT_WIDTH, card_height(app));
    let mut buf = Buffer::empty(area);
    render_card(&mut buf, area, app);
    buf
}

/// Plain-text rows of a buffer, trailing blanks trimmed
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = buf.area.width.max(1) as usize;
    buf.content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(message) = &app.status_message {
        Span::styled(message.clone(), Style::default().fg(Color::Cyan))
    } else if let Some(error) = app.error() {
        Span::styled(error.to_string(), Style::default().fg(Color::Red))
    } else {
        match app.input_mode {
            InputMode::Searching => Span::styled(
                "SEARCH MODE | ENTER: look up | ESC: normal mode",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Normal => {
                if app.can_export() {
                    Span::raw("/: search | m: explain | s: snapshot | p: profile | o: developer | q: quit")
                } else {
                    Span::raw("/: search | o: developer | q: quit")
                }
            }
        }
    };

    let paragraph = Paragraph::new(Line::from(status));
    frame.render_widget(paragraph, area);
}
