use ratatui_themes::ThemeName;

use crate::styles::Styles;

pub const DEFAULT_WIDTH: u16 = 100;

/// Session configuration, fixed for the lifetime of a help screen.
/// Only rendering reads these; navigation never does.
#[derive(Debug, Clone)]
pub struct Options {
    /// Draw a border around the usage document.
    pub show_border: bool,
    /// Width of the usage document in columns.
    pub width: u16,
    /// Use the alternate screen instead of an inline viewport.
    pub alt_screen: bool,
    /// Capture the mouse so the wheel scrolls the viewport.
    pub mouse_scroll: bool,
    /// Theme to derive styles from. `None` keeps the default styles.
    pub theme: Option<ThemeName>,
    /// Caller supplied styles. Take precedence over `theme`.
    pub styles: Option<Styles>,
    /// Shown above the usage document, e.g. the error that caused the
    /// usage to be displayed.
    pub error_message: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            show_border: true,
            width: DEFAULT_WIDTH,
            alt_screen: false,
            mouse_scroll: true,
            theme: None,
            styles: None,
            error_message: None,
        }
    }
}

impl Options {
    pub fn with_border(mut self, show: bool) -> Self {
        self.show_border = show;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn with_alt_screen(mut self, alt_screen: bool) -> Self {
        self.alt_screen = alt_screen;
        self
    }

    pub fn with_mouse_scroll(mut self, mouse_scroll: bool) -> Self {
        self.mouse_scroll = mouse_scroll;
        self
    }

    pub fn with_theme(mut self, theme: ThemeName) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Empty messages are ignored.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.error_message = if message.trim().is_empty() {
            None
        } else {
            Some(message)
        };
        self
    }

    pub fn styles(&self) -> Styles {
        if let Some(styles) = &self.styles {
            return styles.clone();
        }
        match &self.theme {
            Some(theme) => Styles::from_palette(&theme.palette()),
            None => Styles::default(),
        }
    }
}
