//! Theme: monochrome palette, Nerd Font glyphs, rounded borders

pub mod icons;
pub mod palette;

pub use icons::{Icons, LoadingSpinner};
pub use palette::Palette;

use crate::player::VolumeLevel;
use ratatui::symbols::border;

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub icons: Icons,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::MONO,
            icons: Icons::nerd(),
        }
    }

    pub fn border_set(&self) -> border::Set<'static> {
        border::ROUNDED
    }

    pub fn volume_icon(&self, level: VolumeLevel) -> &'static str {
        match level {
            VolumeLevel::Muted => self.icons.volume_mute,
            VolumeLevel::Low => self.icons.volume_low,
            VolumeLevel::Medium => self.icons.volume_medium,
            VolumeLevel::High => self.icons.volume_high,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_theme() -> Theme {
    Theme::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_icons_distinct_per_level() {
        let theme = get_theme();
        let icons = [
            theme.volume_icon(VolumeLevel::Muted),
            theme.volume_icon(VolumeLevel::Low),
            theme.volume_icon(VolumeLevel::Medium),
            theme.volume_icon(VolumeLevel::High),
        ];
        for (i, a) in icons.iter().enumerate() {
            for b in &icons[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(LoadingSpinner::frame(0), LoadingSpinner::frame(32));
        assert_ne!(LoadingSpinner::frame(0), LoadingSpinner::frame(4));
    }
}
