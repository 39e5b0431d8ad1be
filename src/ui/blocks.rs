//! Blocks view: chain listing, validation verdict, per-block documents.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::domain::{first_unmined, App};
use crate::transfer;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Chain verdict
            Constraint::Min(5),         // Block table
            Constraint::Percentage(35), // Selected block documents
        ])
        .split(area);

    render_verdict(frame, app, chunks[0]);
    render_block_table(frame, app, chunks[1]);
    render_block_documents(frame, app, chunks[2]);
}

fn render_verdict(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" CHAIN ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("blocks: {}", app.blocks.len()),
            Style::default().fg(Color::White),
        ),
        Span::raw(" │ "),
    ];
    match app.validation.is_valid() {
        Some(true) => spans.push(Span::styled("chain valid", Style::default().fg(Color::Green))),
        Some(false) => spans.push(Span::styled(
            format!("chain INVALID ({} errors)", app.validation.errors().len()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled(
            "not validated yet",
            Style::default().fg(Color::Gray),
        )),
    }
    if let Some(at) = app.validation.checked_at() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("checked {}", super::format_time(at)),
            Style::default().fg(Color::Gray),
        ));
    }

    let verdict = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Validation "),
    );
    frame.render_widget(verdict, area);
}

fn render_block_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![" Id", "Created", "Docs", "Status", "Hash", "Ms", "Error"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

    let mineable = first_unmined(&app.blocks).map(|b| b.id);

    let rows: Vec<Row> = app
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let style = if i == app.blocks_cursor {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            let status = if block.is_mined {
                "✓ mined".to_string()
            } else if mineable == Some(block.id) {
                "● next to mine".to_string()
            } else {
                "waiting".to_string()
            };
            let error = app
                .validation
                .error_for(block.id)
                .unwrap_or("")
                .to_string();
            Row::new(vec![
                format!(" {}", block.id),
                super::format_time(block.created_at),
                format!("{:>4}", block.documents.len()),
                status,
                block.short_hash(),
                block
                    .milliseconds
                    .map(|ms| ms.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                error,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(20),
        Constraint::Length(6),
        Constraint::Length(15),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Blocks ")
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(table, area);
}

/// Documents sealed inside the block under the cursor.
fn render_block_documents(frame: &mut Frame, app: &App, area: Rect) {
    let Some(block) = app.blocks.get(app.blocks_cursor) else {
        let empty = Paragraph::new("no block selected")
            .block(Block::default().borders(Borders::ALL).title(" Documents "));
        frame.render_widget(empty, area);
        return;
    };

    let header = Row::new(vec![" Id", "Type", "Created", "Size"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

    let rows: Vec<Row> = block
        .documents
        .iter()
        .map(|doc| {
            Row::new(vec![
                format!(" {}", doc.id),
                transfer::display_name(&doc.file_type).to_string(),
                super::format_time(doc.created_at),
                super::format_size(doc.size),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(20),
        Constraint::Length(11),
    ];

    let title = format!(" Block #{} documents ", block.id);
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}
