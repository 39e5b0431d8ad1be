//! Backend audit-trail view.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::domain::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.audit_logs.is_empty() {
        let empty = Paragraph::new("no audit entries")
            .block(Block::default().borders(Borders::ALL).title(" Audit log "));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![" #", "Description", "Date"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

    let rows: Vec<Row> = app
        .audit_logs
        .iter()
        .enumerate()
        .map(|(i, log)| {
            Row::new(vec![
                format!(" {}", i + 1),
                log.description.clone(),
                super::format_time(log.created_at),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(30),
        Constraint::Length(20),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Audit log ({} entries) ", app.audit_logs.len()))
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(table, area);
}
