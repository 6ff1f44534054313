//! Monochrome grayscale palette

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_dim: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub border_focus: Color,
    /// The lyric line being sung.
    pub lyric_active: Color,
    pub playing: Color,
    pub error: Color,
}

impl Palette {
    pub const MONO: Self = Self {
        bg_primary: Color::Rgb(0, 0, 0),          // #000000
        fg_primary: Color::Rgb(255, 255, 255),   // #ffffff
        fg_secondary: Color::Rgb(136, 136, 136), // #888888
        fg_dim: Color::Rgb(88, 88, 88),          // #585858
        accent: Color::Rgb(255, 255, 255),       // #ffffff
        accent_alt: Color::Rgb(200, 200, 200),   // #c8c8c8
        border: Color::Rgb(64, 64, 64),          // #404040
        border_focus: Color::Rgb(160, 160, 160), // #a0a0a0
        lyric_active: Color::Rgb(255, 214, 102), // #ffd666
        playing: Color::Rgb(255, 255, 255),      // #ffffff
        error: Color::Rgb(255, 120, 120),        // #ff7878
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::MONO
    }
}
