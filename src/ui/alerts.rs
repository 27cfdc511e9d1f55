//! Alerts view rendering.
//!
//! Displays active threshold violations with a selection for
//! acknowledgement.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Render the Alerts view as a selectable table of violations.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let filtered = app.filtered_alerts();

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let title = format!(
        " Active Violations ({}/{}) [a:acknowledge]{} ",
        filtered.len(),
        app.alerts.len(),
        filter_info,
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.alert));

    if filtered.is_empty() {
        let message = if app.alerts.is_empty() {
            "All systems normal."
        } else {
            "No alerts match the current filter."
        };
        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(format!("  {}", message))])
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Topic"),
        Cell::from("Violation"),
        Cell::from("Actual"),
        Cell::from("Limit"),
        Cell::from("Time"),
    ])
    .height(1)
    .style(app.theme.header);

    let alert_style = Style::default().fg(app.theme.alert);

    let rows: Vec<Row> = filtered
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.topic.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(a.violated_key.clone()).style(alert_style),
                Cell::from(format!("{:.1}", a.actual_value)).style(alert_style),
                Cell::from(format!("{:.1}", a.threshold_value)),
                Cell::from(a.timestamp.format("%m-%d %H:%M:%S").to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),    // Topic
        Constraint::Fill(2),    // Violation
        Constraint::Fill(1),    // Actual
        Constraint::Fill(1),    // Limit
        Constraint::Min(15),    // Time
    ];

    let selected = app.selected_alert.min(filtered.len().saturating_sub(1));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
