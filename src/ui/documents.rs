//! Documents view: the pending/sealed document table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::domain::{can_assemble, App, Scope};
use crate::transfer;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_gate_header(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
}

/// Pending count against the batch threshold, and whether a block may be
/// assembled right now.
fn render_gate_header(frame: &mut Frame, app: &App, area: Rect) {
    let pending = app.store.pending_count();
    let mut spans = vec![
        Span::styled(" DOCUMENTS ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("total: {}", app.store.all().len()),
            Style::default().fg(Color::White),
        ),
        Span::raw(" │ "),
    ];
    match app.config {
        Some(config) => {
            let ready = can_assemble(pending, config.max_docs);
            spans.push(Span::styled(
                format!("pending: {}/{}", pending, config.max_docs),
                Style::default().fg(if ready { Color::Green } else { Color::Yellow }),
            ));
            spans.push(Span::raw(" │ "));
            if ready {
                spans.push(Span::styled(
                    "ready to assemble",
                    Style::default().fg(Color::Green),
                ));
            } else {
                spans.push(Span::styled(
                    format!(
                        "{} more needed",
                        config.max_docs as usize - pending
                    ),
                    Style::default().fg(Color::Yellow),
                ));
            }
        }
        None => {
            spans.push(Span::styled(
                format!("pending: {pending}"),
                Style::default().fg(Color::White),
            ));
            spans.push(Span::raw(" │ config not loaded"));
        }
    }
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("selected: {}", app.selection.count(Scope::Pending)),
        Style::default().fg(Color::Cyan),
    ));

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Batch "));
    frame.render_widget(header, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![" Sel", "Id", "Type", "Created", "Size", "Status"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

    let rows: Vec<Row> = app
        .store
        .all()
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let style = if i == app.docs_cursor {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            let marker = if app.selection.is_selected(Scope::Pending, doc.id) {
                " [x]"
            } else {
                " [ ]"
            };
            let status = match doc.block_id {
                None => "pending".to_string(),
                Some(block_id) => format!("block #{block_id}"),
            };
            Row::new(vec![
                marker.to_string(),
                doc.id.to_string(),
                transfer::display_name(&doc.file_type).to_string(),
                super::format_time(doc.created_at),
                super::format_size(doc.size),
                status,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(20),
        Constraint::Length(11),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Documents ")
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(table, area);
}
