//! UI rendering for the Bucketlist TUI.
//!
//! This is the view layer: every function here derives what it draws from
//! the current [`AppState`] and holds no state of its own. Sort order and
//! aggregate statistics come from the [`view`](crate::view) module on every
//! frame.
//!
//! Screen composition, top to bottom:
//!
//! ```text
//! header    title, welcome line, progress gauge (hidden when empty)
//! banner    error message, only while an error is active
//! input     the draft text field
//! list      loading / empty-state / item rows
//! footer    key hints
//! ```
//!
//! The delete confirmation prompt renders last, as a centered overlay.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::app::AppState;
use crate::view;

/// Renders a full frame from the current application state.
pub fn render(frame: &mut Frame, state: &AppState) {
    let has_error = state.controller.error.is_some();

    let mut constraints = vec![Constraint::Length(4)];
    if has_error {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut next = 0;
    render_header(frame, chunks[next], state);
    next += 1;

    if has_error {
        render_error_banner(frame, chunks[next], state);
        next += 1;
    }

    render_input(frame, chunks[next], state);
    next += 1;

    render_list(frame, chunks[next], state);
    next += 1;

    render_footer(frame, chunks[next], state);

    if state.controller.is_confirming_delete() {
        render_confirm_dialog(frame, frame.area(), state);
    }
}

/// Renders the header: title, welcome line, and (when the list is
/// non-empty) the completion stats gauge.
fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(state.theme.border)
        .title(Span::styled(" My Bucket List ", state.theme.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let welcome = match &state.controller.user {
        Some(user) => format!("Welcome, {}!", user.username),
        None => "Not signed in".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(welcome, state.theme.text_secondary)),
        rows[0],
    );

    let items = &state.controller.items;
    let total = view::total_count(items);
    if total > 0 {
        let completed = view::completed_count(items);
        let gauge = Gauge::default()
            .gauge_style(state.theme.gauge)
            .ratio(view::progress(items))
            .label(format!("{completed} of {total} completed"));
        frame.render_widget(gauge, rows[1]);
    } else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Dreams worth chasing, adventures worth having",
                state.theme.text_muted,
            )),
            rows[1],
        );
    }
}

/// Renders the single-slot error banner.
fn render_error_banner(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = state.controller.error.as_deref().unwrap_or_default();

    let banner = Paragraph::new(Line::from(vec![
        Span::styled(message, state.theme.error),
        Span::styled("  (Esc to dismiss)", state.theme.text_muted),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(state.theme.error),
    );
    frame.render_widget(banner, area);
}

/// Renders the draft input field.
fn render_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let input = Paragraph::new(Line::from(vec![
        Span::styled(state.controller.draft.as_str(), state.theme.input),
        Span::styled("_", state.theme.text_muted),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(state.theme.border)
            .title(Span::styled(
                " What's your next adventure? ",
                state.theme.text_secondary,
            )),
    );
    frame.render_widget(input, area);
}

/// Renders the list area: loading, empty state, or the item rows.
fn render_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(state.theme.border);

    if state.controller.loading {
        let loading = Paragraph::new("Loading your bucket list...")
            .alignment(Alignment::Center)
            .style(state.theme.text_secondary)
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let items = &state.controller.items;
    if view::is_empty_state(items, state.controller.loading) {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled("Your bucket list is empty!", state.theme.title),
            Line::styled(
                "Start adding your dreams and adventures above.",
                state.theme.text_secondary,
            ),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<ListItem> = view::sorted(items)
        .iter()
        .map(|item| {
            let (symbol, title_style) = if item.completed {
                (state.symbols.checked, state.theme.item_completed)
            } else {
                (state.symbols.unchecked, state.theme.text_primary)
            };

            let mut meta = vec![Span::styled(
                format!("   Added: {}", item.created_at.format("%Y-%m-%d")),
                state.theme.text_muted,
            )];
            if item.completed {
                meta.push(Span::styled(
                    format!("  {} Completed!", state.symbols.badge),
                    state.theme.badge,
                ));
            }

            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(format!("{symbol} ")),
                    Span::styled(item.title.clone(), title_style),
                ]),
                Line::from(meta),
            ])
        })
        .collect();

    let cursor = format!("{} ", state.symbols.cursor);
    let list = List::new(rows)
        .block(block)
        .highlight_style(state.theme.selected)
        .highlight_symbol(&cursor);

    let mut list_state = ListState::default();
    list_state.select(state.selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Renders the key-hint footer.
fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = Paragraph::new(Span::styled(
        " Enter add | Up/Down select | Tab toggle | Ctrl-D delete | Esc dismiss | Ctrl-O sign out | Ctrl-C quit",
        state.theme.text_muted,
    ));
    frame.render_widget(hints, area);
}

/// Renders the delete confirmation prompt as a centered overlay.
fn render_confirm_dialog(frame: &mut Frame, area: Rect, state: &AppState) {
    let dialog_area = centered_rect(50, 5, area);

    frame.render_widget(Clear, dialog_area);

    let dialog = Paragraph::new(vec![
        Line::from("Are you sure you want to delete this item?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", state.theme.title),
            Span::raw(" delete    "),
            Span::styled("[n]", state.theme.title),
            Span::raw(" cancel"),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(state.theme.error)
            .title(Span::styled(" Confirm delete ", state.theme.title)),
    );
    frame.render_widget(dialog, dialog_area);
}

/// Returns a rect of the given size centered within `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::api::ApiClient;
    use crate::controller::ListController;
    use crate::session::{AuthClient, SessionUser};
    use crate::types::BucketItem;

    fn offline_controller() -> ListController {
        let api = ApiClient::new(
            "http://127.0.0.1:9".to_string(),
            "test-token".to_string(),
            Duration::from_secs(1),
        );
        let auth = AuthClient::new("http://127.0.0.1:9".to_string(), Duration::from_secs(1));
        ListController::new(api, auth, "test-token".to_string())
    }

    fn item(id: &str, title: &str, completed: bool) -> BucketItem {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        BucketItem {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            completed,
            created_at: created,
            updated_at: created,
            owner: None,
        }
    }

    fn rendered_text(state: &AppState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn loading_state_renders_loading_message() {
        let controller = offline_controller();
        let state = AppState::new(controller);

        let text = rendered_text(&state);
        assert!(text.contains("Loading your bucket list..."));
        assert!(!text.contains("Your bucket list is empty!"));
    }

    #[test]
    fn empty_list_renders_empty_state_not_grid() {
        let mut controller = offline_controller();
        controller.loading = false;
        let state = AppState::new(controller);

        let text = rendered_text(&state);
        assert!(text.contains("Your bucket list is empty!"));
        assert!(text.contains("Start adding your dreams"));
    }

    #[test]
    fn items_render_with_stats_gauge() {
        let mut controller = offline_controller();
        controller.loading = false;
        controller.items = vec![
            item("a", "Visit Japan", true),
            item("b", "Learn to surf", false),
        ];
        controller.user = Some(SessionUser {
            username: "alice".to_string(),
            user_id: None,
        });
        let state = AppState::new(controller);

        let text = rendered_text(&state);
        assert!(text.contains("Welcome, alice!"));
        assert!(text.contains("1 of 2 completed"));
        assert!(text.contains("Visit Japan"));
        assert!(text.contains("Learn to surf"));
        assert!(text.contains("Completed!"));
    }

    #[test]
    fn error_banner_renders_with_dismiss_hint() {
        let mut controller = offline_controller();
        controller.loading = false;
        controller.error = Some("Failed to load your bucket list".to_string());
        let state = AppState::new(controller);

        let text = rendered_text(&state);
        assert!(text.contains("Failed to load your bucket list"));
        assert!(text.contains("(Esc to dismiss)"));
    }

    #[test]
    fn confirmation_prompt_renders_as_overlay() {
        let mut controller = offline_controller();
        controller.loading = false;
        controller.items = vec![item("a", "Visit Japan", false)];
        controller.request_delete("a");
        let state = AppState::new(controller);

        let text = rendered_text(&state);
        assert!(text.contains("Are you sure you want to delete this item?"));
    }

    #[test]
    fn draft_text_appears_in_input() {
        let mut controller = offline_controller();
        controller.loading = false;
        controller.draft = "Climb Kilimanjaro".to_string();
        let state = AppState::new(controller);

        let text = rendered_text(&state);
        assert!(text.contains("Climb Kilimanjaro"));
        assert!(text.contains("What's your next adventure?"));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered_rect(50, 5, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
