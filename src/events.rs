use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, ToastKind, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Readings),
        KeyCode::Char('3') => app.set_view(View::Alerts),

        // Left/right cycle views; up/down drive the alert selection
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::Up | KeyCode::Char('k') => {
            if app.current_view == View::Alerts {
                app.select_prev_alert();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.current_view == View::Alerts {
                app.select_next_alert();
            }
        }

        // Pagination (Readings view)
        KeyCode::Char('n') | KeyCode::PageDown => {
            if app.current_view == View::Readings {
                app.next_page();
            }
        }
        KeyCode::Char('p') | KeyCode::PageUp => {
            if app.current_view == View::Readings {
                app.prev_page();
            }
        }

        // Acknowledge the selected alert
        KeyCode::Char('a') | KeyCode::Enter => {
            if app.current_view == View::Alerts {
                app.acknowledge_selected();
            }
        }

        // Topic filter cycling (Readings view)
        KeyCode::Char('t') => {
            if app.current_view == View::Readings {
                app.cycle_topic_filter();
            }
        }

        // Filter (start typing to search by topic)
        KeyCode::Char('/') => {
            if app.current_view != View::Overview {
                app.start_filter();
            }
        }

        // Clear filter
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("sensorwatch_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.push_toast(
                        format!("Exported to {}", export_path.display()),
                        ToastKind::Info,
                    );
                }
                Err(e) => {
                    app.push_toast(format!("Export failed: {}", e), ToastKind::Alert);
                }
            }
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Back to the overview
        KeyCode::Esc | KeyCode::Backspace => app.set_view(View::Overview),

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    // Content rows start after header (1) + tabs (1) + block border (1) +
    // table header (1)
    const CONTENT_START_ROW: u16 = 4;

    match mouse.kind {
        // Scroll wheel: pages in the readings table, selection in alerts
        MouseEventKind::ScrollUp => match app.current_view {
            View::Readings => app.prev_page(),
            View::Alerts => app.select_prev_alert(),
            View::Overview => {}
        },
        MouseEventKind::ScrollDown => match app.current_view {
            View::Readings => app.next_page(),
            View::Alerts => app.select_next_alert(),
            View::Overview => {}
        },

        // Click to select an alert row, or a tab
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            if app.current_view == View::Alerts && clicked_row >= CONTENT_START_ROW {
                let item_row = (clicked_row - CONTENT_START_ROW) as usize;
                app.select_alert(item_row);
            }

            // Tab clicks (row 1, after the header). Approximate positions:
            // Overview (0-12), Readings (13-26), Alerts (27-40)
            if clicked_row == 1 {
                let col = mouse.column;
                if col < 13 {
                    app.set_view(View::Overview);
                } else if col < 27 {
                    app.set_view(View::Readings);
                } else if col < 41 {
                    app.set_view(View::Alerts);
                }
            }
        }

        _ => {}
    }
}
