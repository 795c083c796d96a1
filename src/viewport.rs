//! Vertical scrolling window over the usage document.
//!
//! The viewport only tracks geometry (content height, window height and
//! offset); the document itself is rendered each frame and windowed by
//! `ui::render`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Lines scrolled per mouse wheel notch.
pub const MOUSE_WHEEL_DELTA: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    content_height: usize,
    y_offset: usize,
    /// Whether mouse wheel events scroll the viewport.
    pub mouse_wheel_enabled: bool,
}

impl Viewport {
    pub fn new(mouse_wheel_enabled: bool) -> Self {
        Self {
            mouse_wheel_enabled,
            ..Default::default()
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.clamp_offset();
    }

    pub fn set_content_height(&mut self, content_height: usize) {
        self.content_height = content_height;
        self.clamp_offset();
    }

    /// Set the offset, clamped to the scrollable range.
    pub fn set_y_offset(&mut self, offset: usize) {
        self.y_offset = offset.min(self.max_y_offset());
    }

    pub fn max_y_offset(&self) -> usize {
        self.content_height.saturating_sub(self.height)
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.set_y_offset(self.y_offset.saturating_add(n));
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.set_y_offset(self.y_offset.saturating_sub(n));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down((self.height / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.height / 2).max(1));
    }

    /// Handle a scroll key. Returns whether the viewport used it.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('f') if !ctrl => {
                self.page_down()
            }
            KeyCode::PageUp | KeyCode::Char('v') if !ctrl => self.page_up(),
            KeyCode::Char('d') => self.half_page_down(),
            KeyCode::Char('u') => self.half_page_up(),
            KeyCode::Char('j') if ctrl => self.scroll_down(1),
            KeyCode::Char('k') if ctrl => self.scroll_up(1),
            _ => return false,
        }
        true
    }

    /// Handle a mouse event. Returns whether the viewport used it.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        if !self.mouse_wheel_enabled {
            return false;
        }
        match event.kind {
            MouseEventKind::ScrollDown => self.scroll_down(MOUSE_WHEEL_DELTA),
            MouseEventKind::ScrollUp => self.scroll_up(MOUSE_WHEEL_DELTA),
            _ => return false,
        }
        true
    }

    fn clamp_offset(&mut self) {
        self.y_offset = self.y_offset.min(self.max_y_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn viewport(height: usize, content: usize) -> Viewport {
        let mut vp = Viewport::new(true);
        vp.set_content_height(content);
        vp.set_height(height);
        vp
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_offset_is_clamped() {
        let mut vp = viewport(10, 25);
        vp.set_y_offset(100);
        assert_eq!(vp.y_offset(), 15);
        assert_eq!(vp.y_offset(), vp.max_y_offset());
        vp.scroll_up(100);
        assert_eq!(vp.y_offset(), 0);
    }

    #[test]
    fn test_no_scroll_when_content_fits() {
        let mut vp = viewport(10, 8);
        vp.page_down();
        assert_eq!(vp.y_offset(), 0);
    }

    #[test]
    fn test_key_map() {
        let mut vp = viewport(10, 100);
        assert!(vp.handle_key(key(KeyCode::Char('f'), KeyModifiers::NONE)));
        assert_eq!(vp.y_offset(), 10);
        assert!(vp.handle_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL)));
        assert_eq!(vp.y_offset(), 15);
        assert!(vp.handle_key(key(KeyCode::Char('j'), KeyModifiers::CONTROL)));
        assert_eq!(vp.y_offset(), 16);
        assert!(vp.handle_key(key(KeyCode::Char('k'), KeyModifiers::CONTROL)));
        assert!(vp.handle_key(key(KeyCode::Char('u'), KeyModifiers::NONE)));
        assert_eq!(vp.y_offset(), 10);
        assert!(vp.handle_key(key(KeyCode::PageUp, KeyModifiers::NONE)));
        assert_eq!(vp.y_offset(), 0);
    }

    #[test]
    fn test_list_keys_are_not_used() {
        let mut vp = viewport(10, 100);
        assert!(!vp.handle_key(key(KeyCode::Char('j'), KeyModifiers::NONE)));
        assert!(!vp.handle_key(key(KeyCode::Down, KeyModifiers::NONE)));
        assert_eq!(vp.y_offset(), 0);
    }

    #[test]
    fn test_mouse_wheel() {
        let mut vp = viewport(10, 100);
        assert!(vp.handle_mouse(wheel(MouseEventKind::ScrollDown)));
        assert_eq!(vp.y_offset(), MOUSE_WHEEL_DELTA);
        assert!(vp.handle_mouse(wheel(MouseEventKind::ScrollUp)));
        assert_eq!(vp.y_offset(), 0);

        vp.mouse_wheel_enabled = false;
        assert!(!vp.handle_mouse(wheel(MouseEventKind::ScrollDown)));
        assert_eq!(vp.y_offset(), 0);
    }

    #[test]
    fn test_shrinking_content_pulls_offset_back() {
        let mut vp = viewport(10, 100);
        vp.set_y_offset(80);
        vp.set_content_height(30);
        assert_eq!(vp.y_offset(), 20);
    }
}
