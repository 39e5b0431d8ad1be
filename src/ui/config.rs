//! Read-only system configuration view. Editing lives in the admin
//! surface, not in this client.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::domain::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(config) = app.config else {
        let empty = Paragraph::new("system configuration not loaded; press r to retry")
            .block(Block::default().borders(Borders::ALL).title(" Config "));
        frame.render_widget(empty, area);
        return;
    };

    let header = Row::new(vec![" Setting", "Value"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .height(1);

    let rows = vec![
        Row::new(vec![
            " Batch threshold (documents per block)".to_string(),
            config.max_docs.to_string(),
        ]),
        Row::new(vec![
            " Advertised process time (seconds)".to_string(),
            config.process_time.to_string(),
        ]),
        Row::new(vec![
            " Mining difficulty (leading zeros)".to_string(),
            config.quantity_of_zeros.to_string(),
        ]),
    ];

    let widths = [Constraint::Length(42), Constraint::Min(8)];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" System configuration (read-only) ")
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(table, area);
}
