use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::data::FaultKind;

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
    // Windows terminals also report releases
    if key.kind == KeyEventKind::Release {
        return;
    }

    // A notification blocks everything until dismissed
    if app.current_notification().is_some() {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
        ) {
            app.dismiss_notification();
        }
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Fault injection, direct
        KeyCode::Char(c @ '1'..='3') => {
            let index = (c as usize) - ('1' as usize);
            app.trigger_fault(FaultKind::ALL[index]);
        }

        // Fault injection, via the selected button
        KeyCode::Left | KeyCode::Char('h') => app.select_prev_fault(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.select_next_fault(),
        KeyCode::BackTab => app.select_prev_fault(),
        KeyCode::Enter => app.trigger_selected_fault(),

        // Timeline navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.current_notification().is_some() || app.show_help {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;

    use crate::app::tests::app_with;
    use crate::controller::tests::FakeBackend;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    async fn settle(app: &mut App) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.refresh();
    }

    #[tokio::test]
    async fn test_number_keys_toggle_faults() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());

        press(&mut app, KeyCode::Char('1'));
        settle(&mut app).await;
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('3'));
        settle(&mut app).await;

        assert_eq!(
            *backend.toggles.lock().unwrap(),
            vec![FaultKind::Error, FaultKind::Unhealthy]
        );

        app.into_dashboard().teardown().await;
    }

    #[tokio::test]
    async fn test_enter_triggers_selected_button() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(*backend.toggles.lock().unwrap(), vec![FaultKind::Latency]);

        app.into_dashboard().teardown().await;
    }

    #[tokio::test]
    async fn test_notification_blocks_other_keys() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());

        press(&mut app, KeyCode::Char('2'));
        settle(&mut app).await;
        assert!(app.current_notification().is_some());

        // Neither another toggle nor help gets through while the modal is up
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('?'));
        settle(&mut app).await;
        assert_eq!(backend.toggles.lock().unwrap().len(), 1);
        assert!(!app.show_help);

        // 'q' dismisses the modal instead of quitting
        press(&mut app, KeyCode::Char('q'));
        assert!(app.current_notification().is_none());
        assert!(app.running);

        app.into_dashboard().teardown().await;
    }

    #[tokio::test]
    async fn test_help_closes_on_any_key() {
        let mut app = app_with(Arc::new(FakeBackend::default()));

        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.show_help);
        assert!(app.running);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        app.into_dashboard().teardown().await;
    }
}
