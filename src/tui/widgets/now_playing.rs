//! Player bar: current track, seekable progress bar, controls, volume

use crate::app::state::{AppState, ToastKind};
use crate::player::PlaybackMode;
use crate::tui::theme::{Icons, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{format_time, pad_horizontal, truncate_str};

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Player ", icons.music))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let padded = pad_horizontal(inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title - artist
            Constraint::Length(1), // Progress bar
            Constraint::Length(1), // Time + controls + volume
            Constraint::Min(0),    // Toast or status
        ])
        .split(padded);

    let content_width = padded.width as usize;
    let playback = state.playback.state();

    let title_line = match state.now_playing_track() {
        Some(track) => Line::from(vec![
            Span::styled(
                truncate_str(track.display_title(), content_width / 2),
                Style::default()
                    .fg(theme.palette.fg_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", truncate_str(track.display_artist(), content_width / 2)),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ]),
        None => Line::from(Span::styled(
            "Not playing",
            Style::default().fg(theme.palette.fg_dim),
        )),
    };
    frame.render_widget(Paragraph::new(title_line), rows[0]);

    let bar_area = rows[1];
    let bar_style = if playback.user_seeking {
        Style::default().fg(theme.palette.lyric_active)
    } else {
        Style::default().fg(theme.palette.accent)
    };
    let bar = render_progress_bar(bar_area.width as usize, playback.progress_ratio(), icons);
    frame.render_widget(Paragraph::new(Line::from(Span::styled(bar, bar_style))), bar_area);
    if playback.loaded && bar_area.width > 0 {
        state.hit.progress = Some(bar_area);
    }

    let play_icon = if playback.playing { icons.pause } else { icons.play };
    let mode_icon = match state.playback.mode() {
        PlaybackMode::Continuous => icons.repeat,
        PlaybackMode::Single => icons.repeat_one,
    };
    let controls = Line::from(vec![
        Span::styled(
            format!(
                "{}/{}",
                format_time(playback.seek_bar_secs),
                format_time(playback.duration_secs)
            ),
            Style::default().fg(theme.palette.fg_secondary),
        ),
        Span::raw("  "),
        Span::styled(icons.prev, Style::default().fg(theme.palette.fg_secondary)),
        Span::raw(" "),
        Span::styled(play_icon, Style::default().fg(theme.palette.playing)),
        Span::raw(" "),
        Span::styled(icons.next, Style::default().fg(theme.palette.fg_secondary)),
        Span::raw("  "),
        Span::styled(
            theme.volume_icon(state.playback.volume_level()),
            Style::default().fg(theme.palette.fg_secondary),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{:.0}%", playback.volume * 100.0),
            Style::default().fg(theme.palette.fg_secondary),
        ),
        Span::raw("  "),
        Span::styled(mode_icon, Style::default().fg(theme.palette.accent_alt)),
    ]);
    frame.render_widget(Paragraph::new(controls), rows[2]);

    let footer = match &state.toast {
        Some(toast) if !toast.is_expired() => {
            let (prefix, color) = match toast.kind {
                ToastKind::Success => (icons.success, theme.palette.playing),
                ToastKind::Error => (icons.error, theme.palette.error),
            };
            Line::from(vec![
                Span::styled(format!("{prefix} "), Style::default().fg(color)),
                Span::styled(
                    truncate_str(&toast.message, content_width.saturating_sub(3)),
                    Style::default().fg(color),
                ),
            ])
        }
        _ => Line::from(Span::styled(
            truncate_str(&state.status, content_width),
            Style::default().fg(theme.palette.fg_dim),
        )),
    };
    frame.render_widget(Paragraph::new(footer), rows[3]);
}

fn render_progress_bar(width: usize, ratio: f64, icons: &Icons) -> String {
    if width < 3 {
        return String::new();
    }

    // Head lands on the last cell at ratio 1.0, matching the click mapping.
    let filled = ((width - 1) as f64 * ratio).round() as usize;
    let empty = width.saturating_sub(filled + 1);

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push_str(icons.progress_full);
    }
    bar.push_str(icons.progress_head);
    for _ in 0..empty {
        bar.push_str(icons.progress_empty);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_width_is_stable() {
        let icons = Icons::nerd();
        for ratio in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(render_progress_bar(20, ratio, &icons).chars().count(), 20);
        }
        assert!(render_progress_bar(20, 0.0, &icons).starts_with(icons.progress_head));
        assert!(render_progress_bar(20, 1.0, &icons).ends_with(icons.progress_head));
        assert!(render_progress_bar(2, 0.5, &icons).is_empty());
    }
}
