//! Style set for the help screen.
//!
//! The defaults reproduce the classic purple/teal look; any
//! `ratatui_themes` palette can be mapped onto the same roles instead.

use ratatui::style::{Color, Modifier, Style};
use ratatui_themes::ThemePalette;

/// Default colors.
mod colors {
    use ratatui::style::Color;

    pub const PURPLE: Color = Color::Rgb(0x7e, 0x2f, 0xcc);
    pub const DARK_GREY: Color = Color::Rgb(0x35, 0x3c, 0x3b);
    pub const LIGHT_TEAL: Color = Color::Rgb(0x03, 0xda, 0xc5);
    pub const WHITE: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
    pub const RED: Color = Color::Rgb(0xf4, 0x53, 0x53);
}

/// One `Style` per visual role of the usage document.
#[derive(Debug, Clone, PartialEq)]
pub struct Styles {
    /// Border drawn around the whole document.
    pub border: Style,
    pub title: Style,
    pub sub_title: Style,
    /// Section headers ("Usage:", "Flags:", ...).
    pub section: Style,
    pub text: Style,
    pub selected_item: Style,
    pub item: Style,
    /// Footer help lines.
    pub info: Style,
    pub error_text: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            border: Style::default().fg(colors::LIGHT_TEAL),
            title: Style::default()
                .fg(colors::PURPLE)
                .add_modifier(Modifier::BOLD),
            sub_title: Style::default().fg(colors::WHITE),
            section: Style::default()
                .fg(colors::LIGHT_TEAL)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            text: Style::default()
                .fg(colors::WHITE)
                .add_modifier(Modifier::BOLD),
            selected_item: Style::default().fg(colors::WHITE).bg(colors::PURPLE),
            item: Style::default()
                .fg(colors::WHITE)
                .add_modifier(Modifier::BOLD),
            info: Style::default()
                .fg(colors::DARK_GREY)
                .add_modifier(Modifier::BOLD),
            error_text: Style::default()
                .fg(colors::RED)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Styles {
    /// Map a theme palette onto the document roles.
    pub fn from_palette(p: &ThemePalette) -> Self {
        let selected_bg = match p.selection {
            Color::Rgb(r, g, b) => Color::Rgb(r, g, b),
            _ => Color::Rgb(40, 40, 60),
        };

        Self {
            border: Style::default().fg(p.info),
            title: Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            sub_title: Style::default().fg(p.fg),
            section: Style::default()
                .fg(p.info)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            text: Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
            selected_item: Style::default().fg(p.fg).bg(selected_bg),
            item: Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
            info: Style::default().fg(p.muted).add_modifier(Modifier::BOLD),
            error_text: Style::default().fg(p.error).add_modifier(Modifier::BOLD),
        }
    }
}
