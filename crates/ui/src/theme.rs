use ratatui::style::{Color, Modifier, Style};

/// Iceberg color theme for the dashchat TUI
///
/// Based on iceberg.vim color scheme (https://github.com/cocopon/iceberg.vim)
#[derive(Debug, Clone, Copy)]
pub struct Theme;

/// Resolved colors handed to renderers and components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub bg: Color,
    pub fg: Color,
    pub panel_bg: Color,
    pub active: Color,
    pub muted: Color,
    pub blue: Color,
    pub cyan: Color,
    pub purple: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub border: Color,
}

impl Theme {
    /// Primary background: deep blue-black (fills terminal)
    pub const BG: Color = Color::Rgb(22, 24, 33);

    /// Foreground: light blue-gray (primary text)
    pub const FG: Color = Color::Rgb(198, 200, 209);

    /// Secondary background: panels, cards, input
    pub const PANEL_BG: Color = Color::Rgb(30, 33, 50);

    /// Hover/active states
    pub const ACTIVE: Color = Color::Rgb(39, 44, 66);

    pub const BLUE: Color = Color::Rgb(132, 160, 198);
    pub const CYAN: Color = Color::Rgb(137, 184, 194);
    pub const PURPLE: Color = Color::Rgb(160, 147, 199);
    pub const GREEN: Color = Color::Rgb(180, 190, 130);
    pub const YELLOW: Color = Color::Rgb(226, 164, 120);

    /// Errors
    pub const RED: Color = Color::Rgb(226, 120, 120);

    /// Muted text: dimmed foreground
    pub const MUTED: Color = Color::Rgb(107, 112, 137);

    pub const BORDER: Color = Color::Rgb(60, 65, 90);

    pub fn palette() -> ThemePalette {
        ThemePalette {
            bg: Self::BG,
            fg: Self::FG,
            panel_bg: Self::PANEL_BG,
            active: Self::ACTIVE,
            muted: Self::MUTED,
            blue: Self::BLUE,
            cyan: Self::CYAN,
            purple: Self::PURPLE,
            green: Self::GREEN,
            yellow: Self::YELLOW,
            red: Self::RED,
            border: Self::BORDER,
        }
    }

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Keyboard hint, e.g. `[Ctrl+O]`
    pub fn key_hint() -> Style {
        Style::default().fg(Self::BLUE).add_modifier(Modifier::BOLD)
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Theme::palette()
    }
}
