//! TUI rendering.

pub mod audit;
pub mod blocks;
pub mod config;
pub mod documents;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::{App, InputMode, MiningJob, MiningState, StatusKind, Tab};

/// Render the full interface for the active tab, plus any overlay.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(8),    // Active view
            Constraint::Length(3), // Status + keys
        ])
        .split(frame.area());

    render_tab_bar(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Documents => documents::render(frame, app, chunks[1]),
        Tab::Blocks => blocks::render(frame, app, chunks[1]),
        Tab::Config => config::render(frame, app, chunks[1]),
        Tab::Audit => audit::render(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
    render_overlays(frame, app);
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in [Tab::Documents, Tab::Blocks, Tab::Config, Tab::Audit]
        .iter()
        .enumerate()
    {
        let style = if *tab == app.active_tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("[{}] {}", i + 1, tab.title()), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::raw("│ "));
    let user = if app.identity.is_authenticated() {
        Span::styled(
            app.identity.user_name.clone(),
            Style::default().fg(Color::Cyan),
        )
    } else {
        Span::styled("not authenticated", Style::default().fg(Color::Red))
    };
    spans.push(user);

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" DocVault "),
    );
    frame.render_widget(bar, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => Color::Green,
                StatusKind::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(" ● ", Style::default().fg(color)),
                Span::raw(status.message.clone()),
            ])
        }
        None => keys_hint(app.active_tab),
    };
    let bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}

fn keys_hint(tab: Tab) -> Line<'static> {
    let keys: &[(&str, &str)] = match tab {
        Tab::Documents => &[
            ("space", "select"),
            ("a/c", "all/none"),
            ("d", "download"),
            ("x", "delete"),
            ("u", "upload"),
            ("m", "assemble+mine"),
            ("r", "refresh"),
            ("q", "quit"),
        ],
        Tab::Blocks => &[
            ("m", "mine next"),
            ("v", "validate"),
            ("r", "refresh"),
            ("q", "quit"),
        ],
        Tab::Config => &[("r", "refresh"), ("q", "quit")],
        Tab::Audit => &[("C", "clear logs"), ("r", "refresh"), ("q", "quit")],
    };
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(
            format!(" [{key}] "),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!("{label} ")));
    }
    Line::from(spans)
}

fn render_overlays(frame: &mut Frame, app: &App) {
    match app.miner.state() {
        MiningState::Requesting(job) => {
            let text = match job {
                MiningJob::AssembleAndMine => "Assembling and mining a new block...",
                MiningJob::MineBlock(_) => "Mining block...",
            };
            popup(
                frame,
                " Mining in progress ",
                &format!("{text}\n\nThis can take a while; please wait."),
                Color::Cyan,
            );
        }
        MiningState::Success(_) => popup(
            frame,
            " Mining complete ",
            "The block was mined successfully.\n\nPress any key to continue.",
            Color::Green,
        ),
        MiningState::Failed(_, error) => popup(
            frame,
            " Mining failed ",
            &format!("{error}\n\nPress any key to continue."),
            Color::Red,
        ),
        MiningState::Idle => {}
    }

    match &app.input {
        InputMode::UploadPath(path) => popup(
            frame,
            " Upload ",
            &format!("Path to file: {path}█\n\n[enter] upload  [esc] cancel"),
            Color::Yellow,
        ),
        InputMode::ConfirmClearAudit => popup(
            frame,
            " Clear audit logs ",
            "This deletes every audit entry on the backend.\n\n[y] confirm  [any other key] cancel",
            Color::Red,
        ),
        InputMode::Normal => {}
    }
}

fn popup(frame: &mut Frame, title: &str, text: &str, color: Color) {
    let area = centered_rect(50, 7, frame.area());
    frame.render_widget(Clear, area);
    let widget = Paragraph::new(text.to_string())
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(widget, area);
}

/// A fixed-height rect centered in `area`, `percent_x` wide.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// Format a byte count for table display.
pub(crate) fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

pub(crate) fn format_time(time: chrono::DateTime<chrono::Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(512), "0.5 KB");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
