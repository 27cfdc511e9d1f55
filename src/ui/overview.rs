//! Overview rendering.
//!
//! Displays stat cards for the latest sample and a trend chart over the
//! newest readings.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::TrendSeries;

/// Render the Overview: three stat cards over the telemetry trend chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(5), // Stat cards
        Constraint::Min(8),    // Trend chart
    ])
    .split(area);

    render_cards(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let latest = app.latest_reading();

    let (temperature, temperature_hot) = match latest {
        Some(r) => (
            format!("{:.1}°C", r.temperature),
            r.temperature > app.thresholds.temperature_warn,
        ),
        None => ("--".to_string(), false),
    };
    let (humidity, humidity_high) = match latest {
        Some(r) => (
            format!("{:.1}%", r.humidity),
            r.humidity > app.thresholds.humidity_warn,
        ),
        None => ("--".to_string(), false),
    };

    render_card(frame, app, cards[0], "Temperature", &temperature, temperature_hot);
    render_card(frame, app, cards[1], "Humidity", &humidity, humidity_high);
    render_card(
        frame,
        app,
        cards[2],
        "Total Packets",
        &app.readings.len().to_string(),
        false,
    );
}

fn render_card(frame: &mut Frame, app: &App, area: Rect, title: &str, value: &str, alarmed: bool) {
    let (border_style, value_style) = if alarmed {
        (
            Style::default().fg(app.theme.alert),
            Style::default().fg(app.theme.alert).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(app.theme.border),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(value.to_string())])
        .alignment(Alignment::Center)
        .style(value_style)
        .block(block);

    frame.render_widget(paragraph, area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Live Telemetry Trends ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let series = TrendSeries::from_readings(&app.readings);
    if series.len() < 2 {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from("Waiting for data..."),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let datasets = vec![
        Dataset::default()
            .name("temperature")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.temperature))
            .data(&series.temperature),
        Dataset::default()
            .name("humidity")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(app.theme.humidity))
            .data(&series.humidity),
    ];

    let y_bounds = series.y_bounds();
    let y_labels = vec![
        format!("{:.0}", y_bounds[0]),
        format!("{:.0}", (y_bounds[0] + y_bounds[1]) / 2.0),
        format!("{:.0}", y_bounds[1]),
    ];

    // The x axis is an index over the window; labels would add nothing
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(series.x_bounds())
                .style(Style::default().fg(app.theme.border)),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(y_labels)
                .style(Style::default().fg(app.theme.border)),
        );

    frame.render_widget(chart, area);
}
