//! Centralized theme configuration for all UI components.
//!
//! Use `theme::module::CONSTANT` in render files rather than hardcoding colors.

use ratatui::style::{Color, Modifier, Style};

/// Core color palette - shared base colors.
pub mod palette {
    use super::*;

    pub const TEXT: Color = Color::Rgb(236, 236, 244);
    pub const TEXT_DIM: Color = Color::Rgb(90, 92, 119);
    pub const TEXT_MUTED: Color = Color::Rgb(130, 133, 158);

    pub const BG_HIGHLIGHT: Color = Color::Rgb(55, 55, 85);

    pub const WARNING: Color = Color::Rgb(255, 217, 61);
    pub const ERROR: Color = Color::Rgb(224, 108, 117);
    pub const CYAN: Color = Color::Rgb(0, 217, 255);
    pub const PURPLE: Color = Color::Rgb(189, 147, 249);

    pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
}

/// Search input field styles
pub mod input {
    use super::*;

    pub const BORDER: Color = palette::CYAN;
    pub const CURSOR: Style = palette::CURSOR;
}

/// Suggestion panel styles
pub mod suggestions {
    use super::*;

    pub const BORDER: Color = palette::TEXT_DIM;
    pub const TITLE: Color = palette::PURPLE;
    pub const NAME: Style = Style::new().fg(palette::TEXT).add_modifier(Modifier::BOLD);
    pub const ALIASES: Style = Style::new().fg(palette::TEXT_MUTED);
    pub const SELECTED_BG: Color = palette::BG_HIGHLIGHT;
    pub const MESSAGE: Color = palette::TEXT_MUTED;
    pub const LOADING: Color = palette::CYAN;
    pub const ERROR: Color = palette::ERROR;
}

/// Help line (bottom status bar) styles
pub mod help_line {
    use super::*;

    pub const KEY: Color = palette::TEXT_MUTED;
    pub const DESCRIPTION: Color = palette::TEXT_DIM;
    pub const SEPARATOR: Color = palette::TEXT_DIM;
    pub const WARNING: Color = palette::WARNING;
}
