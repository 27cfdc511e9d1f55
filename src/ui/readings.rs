//! Readings view rendering.
//!
//! Displays the sensor history as a filterable, paginated table.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::PageView;

/// Render the Readings view: the history table plus a pagination footer.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(6),    // Table
        Constraint::Length(1), // Pagination footer
    ])
    .split(area);

    let filtered = app.filtered_readings();
    let view = PageView::compute(filtered.len(), app.page);

    render_table(frame, app, chunks[0], &filtered, view);
    render_footer(frame, app, chunks[1], view);
}

fn render_table(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    filtered: &[&crate::source::Reading],
    view: PageView,
) {
    let header = Row::new(vec![
        Cell::from("Topic"),
        Cell::from("Temp"),
        Cell::from("Hum"),
        Cell::from("Volt"),
        Cell::from("Time"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = filtered[view.start..view.end]
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.topic.clone()).style(Style::default().fg(app.theme.highlight)),
                Cell::from(format!("{:.2}", r.temperature)),
                Cell::from(format!("{:.2}", r.humidity)),
                Cell::from(format!("{:.2}", r.voltage)),
                Cell::from(r.timestamp.format("%H:%M:%S").to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3), // Topic - gets the largest share
        Constraint::Fill(1), // Temp
        Constraint::Fill(1), // Hum
        Constraint::Fill(1), // Volt
        Constraint::Min(9),  // Time - fixed for HH:MM:SS
    ];

    // Build title with filter info
    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let title = format!(
        " Sensor History ({}/{}) [t:{}]{} ",
        view.total,
        app.readings.len(),
        app.topic_filter_label(),
        filter_info,
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect, view: PageView) {
    let enabled = Style::default().fg(app.theme.highlight);
    let disabled = Style::default().add_modifier(Modifier::DIM);

    let line = Line::from(vec![
        Span::raw(format!(" {} | Page {}/{} ", view.summary(), view.page, view.pages)),
        Span::styled("◀ p:prev", if view.has_prev() { enabled } else { disabled }),
        Span::raw("  "),
        Span::styled("n:next ▶", if view.has_next() { enabled } else { disabled }),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
