//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, the help
//! overlay and the toast overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::unique_topics;

/// Render the header bar with a feed overview.
///
/// Displays: status indicator, reading/alert counts, topic count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if app.last_updated.is_none() {
        let line = Line::from(vec![
            Span::styled(
                " SENSORWATCH ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let topics = unique_topics(&app.readings).len();

    // Overall status indicator: red while violations are active
    let status_style = if app.alerts.is_empty() {
        Style::default().fg(app.theme.ok)
    } else {
        Style::default().fg(app.theme.alert).add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled(" ● ", status_style),
        Span::styled("SENSORWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", app.readings.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" readings │ "),
        if app.alerts.is_empty() {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        } else {
            Span::styled(format!("{}", app.alerts.len()), status_style)
        },
        Span::raw(" alerts │ "),
        Span::raw(format!("{} topics", topics)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view; the Alerts tab carries the live
/// alert count.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Overview "),
        Line::from(" 2:Readings "),
        Line::from(format!(" 3:Alerts ({}) ", app.alerts.len())),
    ];

    let selected = match app.current_view {
        View::Overview => 0,
        View::Readings => 1,
        View::Alerts => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, available controls; falls
/// back to the fetch error when the backend is unreachable.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Context-sensitive controls
    let controls = match app.current_view {
        View::Overview => "Tab:switch ?:help q:quit",
        View::Readings => {
            if app.filter_active {
                "Type to search | Enter:apply Esc:cancel"
            } else {
                "/:search t:topic p/n:page e:export ?:help q:quit"
            }
        }
        View::Alerts => {
            if app.filter_active {
                "Type to search | Enter:apply Esc:cancel"
            } else {
                "/:search j/k:select a:acknowledge ?:help q:quit"
            }
        }
    };

    let status = match (&app.last_updated, &app.load_error) {
        (Some(updated), None) => format!(
            " {} | Updated {:.1}s ago | {}",
            app.source_description(),
            updated.elapsed().as_secs_f64(),
            controls,
        ),
        (Some(updated), Some(err)) => format!(
            " {} | Error: {} (showing data from {:.1}s ago) | {}",
            app.source_description(),
            err,
            updated.elapsed().as_secs_f64(),
            controls,
        ),
        (None, Some(err)) => format!(" {} | Error: {} | q:quit", app.source_description(), err),
        (None, None) => format!(" {} | Loading... | q:quit", app.source_description()),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render active toasts stacked in the top-right corner, newest on top.
pub fn render_toasts(frame: &mut Frame, app: &mut App, area: Rect) {
    let toasts = app.active_toasts();
    if toasts.is_empty() {
        return;
    }

    let width = 40u16.min(area.width.saturating_sub(2));
    let x = area.right().saturating_sub(width + 1);
    let mut y = area.y + 2;

    for toast in toasts.iter().rev() {
        if y + 3 > area.bottom() {
            break;
        }
        let rect = Rect::new(x, y, width, 3);
        let style = app.theme.toast_style(toast.kind);

        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(style);
        let paragraph = Paragraph::new(toast.text.clone()).style(style).block(block);
        frame.render_widget(paragraph, rect);

        y += 3;
    }
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  Tab         Next view"),
        Line::from("  1/2/3       Jump to a view"),
        Line::from("  Esc         Back to overview"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Readings",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Search by topic"),
        Line::from("  t         Cycle topic filter"),
        Line::from("  c         Clear search"),
        Line::from("  n/p       Next/previous page"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Alerts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ↑/↓ j/k   Select alert"),
        Line::from("  a/Enter   Acknowledge"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
