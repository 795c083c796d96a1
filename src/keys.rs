//! Translation of terminal key events into navigation events.

use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::Event;

/// Translate a terminal event. Key releases and focus/paste events are
/// dropped.
pub fn translate_event(event: TermEvent, filtering: bool) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(map_key(key, filtering)),
        TermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        TermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}

/// Map a key press to a navigation event. While the list filter is being
/// typed only `ctrl+c` keeps its meaning; every other key goes to the list.
pub fn map_key(key: KeyEvent, filtering: bool) -> Event {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Event::Quit;
    }
    if filtering || ctrl {
        return Event::Key(key);
    }

    match key.code {
        KeyCode::Char('q') => Event::Quit,
        KeyCode::Enter => Event::Select,
        KeyCode::Char('b') | KeyCode::Backspace => Event::Back,
        KeyCode::Char('p') => Event::Print,
        _ => Event::Key(key),
    }
}
