use ratatui::style::{Color, Modifier, Style};

use crate::domain::theme::Theme;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub done: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(0xfa, 0xfa, 0xfa),
                surface: Color::White,
                text: Color::Rgb(0x48, 0x4b, 0x6a),
                muted: Color::Rgb(0x9a, 0x9a, 0xb0),
                accent: Color::Rgb(0x3a, 0x7b, 0xfd),
                done: Color::Rgb(0xd2, 0xd3, 0xdb),
            },
            Theme::Dark => Self {
                background: Color::Rgb(0x17, 0x18, 0x23),
                surface: Color::Rgb(0x25, 0x27, 0x3c),
                text: Color::Rgb(0xc8, 0xcb, 0xe7),
                muted: Color::Rgb(0x5b, 0x5e, 0x7e),
                accent: Color::Rgb(0x3a, 0x7b, 0xfd),
                done: Color::Rgb(0x4d, 0x50, 0x67),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.surface)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.surface)
            .add_modifier(Modifier::BOLD)
    }

    pub fn completed(&self) -> Style {
        Style::default()
            .fg(self.done)
            .bg(self.surface)
            .add_modifier(Modifier::CROSSED_OUT)
    }
}
