use crate::app::AppState;

use super::types::{ActionId, CommandOutcome};

pub(crate) fn focus_next(app: &mut AppState, link_count: usize) -> CommandOutcome {
    app.status.last_action_id = Some(ActionId::FocusNext);
    if link_count == 0 {
        app.focus = None;
        app.status.message = "no links on this page".to_string();
        return CommandOutcome::Noop;
    }

    let next = match app.focus {
        Some(idx) if idx + 1 < link_count => idx + 1,
        _ => 0,
    };
    app.focus = Some(next);
    app.status.message = format!("link {}/{link_count}", next + 1);
    CommandOutcome::Applied
}

pub(crate) fn focus_prev(app: &mut AppState, link_count: usize) -> CommandOutcome {
    app.status.last_action_id = Some(ActionId::FocusPrev);
    if link_count == 0 {
        app.focus = None;
        app.status.message = "no links on this page".to_string();
        return CommandOutcome::Noop;
    }

    let prev = match app.focus {
        Some(idx) if idx > 0 && idx < link_count => idx - 1,
        _ => link_count - 1,
    };
    app.focus = Some(prev);
    app.status.message = format!("link {}/{link_count}", prev + 1);
    CommandOutcome::Applied
}

pub(crate) fn set_debug_status_visible(app: &mut AppState, visible: bool) -> CommandOutcome {
    app.status.last_action_id = Some(ActionId::DebugToggle);
    if app.debug_status_visible == visible {
        let state = if visible { "on" } else { "off" };
        app.status.message = format!("debug status unchanged ({state})");
        return CommandOutcome::Noop;
    }

    app.debug_status_visible = visible;
    let state = if visible { "on" } else { "off" };
    app.status.message = format!("debug status: {state}");
    CommandOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::{focus_next, focus_prev, set_debug_status_visible};
    use crate::app::AppState;
    use crate::command::CommandOutcome;

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut app = AppState::default();
        assert_eq!(focus_next(&mut app, 3), CommandOutcome::Applied);
        assert_eq!(app.focus, Some(0));
        focus_next(&mut app, 3);
        focus_next(&mut app, 3);
        focus_next(&mut app, 3);
        assert_eq!(app.focus, Some(0));

        focus_prev(&mut app, 3);
        assert_eq!(app.focus, Some(2));
        assert_eq!(app.status.message, "link 3/3");
    }

    #[test]
    fn focus_is_cleared_without_links() {
        let mut app = AppState {
            focus: Some(4),
            ..AppState::default()
        };
        assert_eq!(focus_prev(&mut app, 0), CommandOutcome::Noop);
        assert_eq!(app.focus, None);
    }

    #[test]
    fn stale_focus_restarts_from_the_ends() {
        let mut app = AppState {
            focus: Some(9),
            ..AppState::default()
        };
        focus_next(&mut app, 2);
        assert_eq!(app.focus, Some(0));

        app.focus = Some(9);
        focus_prev(&mut app, 2);
        assert_eq!(app.focus, Some(1));
    }

    #[test]
    fn debug_status_reports_noop_when_unchanged() {
        let mut app = AppState::default();
        assert_eq!(set_debug_status_visible(&mut app, false), CommandOutcome::Noop);
        assert_eq!(set_debug_status_visible(&mut app, true), CommandOutcome::Applied);
        assert!(app.debug_status_visible);
    }
}
