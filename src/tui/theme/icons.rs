//! Nerd Font glyphs. Needs a patched font (https://www.nerdfonts.com)

#[derive(Debug, Clone)]
pub struct Icons {
    pub play: &'static str,
    pub pause: &'static str,
    pub next: &'static str,
    pub prev: &'static str,

    pub volume_mute: &'static str,
    pub volume_low: &'static str,
    pub volume_medium: &'static str,
    pub volume_high: &'static str,

    pub repeat: &'static str,
    pub repeat_one: &'static str,

    pub home: &'static str,
    pub song: &'static str,
    pub account: &'static str,
    pub help: &'static str,

    pub success: &'static str,
    pub error: &'static str,
    pub cloud: &'static str,
    pub local: &'static str,

    pub music: &'static str,
    pub lyrics: &'static str,
    pub comment: &'static str,
    pub star: &'static str,

    pub selected: &'static str,
    pub unselected: &'static str,

    pub progress_full: &'static str,
    pub progress_empty: &'static str,
    pub progress_head: &'static str,

    pub bullet: &'static str,
}

impl Icons {
    pub const fn nerd() -> Self {
        Self {
            play: "\u{f04b}",          // nf-fa-play
            pause: "\u{f04c}",         // nf-fa-pause
            next: "\u{f051}",          // nf-fa-step_forward
            prev: "\u{f048}",          // nf-fa-step_backward

            volume_mute: "\u{f0581}",  // nf-md-volume_off
            volume_low: "\u{f057f}",   // nf-md-volume_low
            volume_medium: "\u{f0580}", // nf-md-volume_medium
            volume_high: "\u{f057e}",  // nf-md-volume_high

            repeat: "\u{f0456}",       // nf-md-repeat
            repeat_one: "\u{f0458}",   // nf-md-repeat_once

            home: "\u{f015}",          // nf-fa-home
            song: "\u{f001}",          // nf-fa-music
            account: "\u{f007}",       // nf-fa-user
            help: "\u{f059}",          // nf-fa-question_circle

            success: "\u{f00c}",       // nf-fa-check
            error: "\u{f00d}",         // nf-fa-times
            cloud: "\u{f0c2}",         // nf-fa-cloud
            local: "\u{f07b}",         // nf-fa-folder

            music: "\u{f001}",         // nf-fa-music
            lyrics: "\u{f15c}",        // nf-fa-file_text_o
            comment: "\u{f075}",       // nf-fa-comment
            star: "\u{f005}",          // nf-fa-star

            selected: "\u{f054}",      // nf-fa-chevron_right
            unselected: " ",

            progress_full: "━",
            progress_empty: "─",
            progress_head: "●",

            bullet: "•",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

pub struct LoadingSpinner;

impl LoadingSpinner {
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = (tick / 4) as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
