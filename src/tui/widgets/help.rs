//! Help screen showing keybindings

use crate::tui::theme::{Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left_content = vec![
        section_header("Navigation", &theme),
        keybind("Tab / S-Tab", "Next / previous screen", &theme),
        keybind("1 2 3 ?", "Home, Song, Account, Help", &theme),
        keybind("j / k", "Move down / up", &theme),
        keybind("g / G", "Top / bottom", &theme),
        keybind("Ctrl+d / u", "Page down / up", &theme),
        keybind("Enter", "Open selected track", &theme),
        keybind("< / >", "Browse featured", &theme),
        keybind("f", "Play featured track", &theme),
        keybind("r", "Refresh current screen", &theme),
        Line::default(),
        section_header("Playback", &theme),
        keybind("Space", "Play / pause", &theme),
        keybind("n / p", "Next / previous track", &theme),
        keybind("[ / ]", "Seek -10s / +10s", &theme),
        keybind("s", "Seek mode (h/l, Enter)", &theme),
        keybind("+ / -", "Volume up / down", &theme),
        keybind("m", "Mute", &theme),
    ];
    frame.render_widget(
        Paragraph::new(left_content).wrap(Wrap { trim: false }),
        cols[0],
    );

    let right_content = vec![
        section_header("Song", &theme),
        keybind("o", "Switch lyrics / comments", &theme),
        keybind("Enter", "Seek to centered lyric", &theme),
        keybind("click", "Seek to lyric line", &theme),
        keybind("c", "Write a comment", &theme),
        keybind("C", "Reload comments", &theme),
        keybind("Esc", "Back to Home", &theme),
        Line::default(),
        section_header("Account", &theme),
        keybind("Tab", "Next field", &theme),
        keybind("F2", "Log in / register", &theme),
        keybind("L", "Log out", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("q", "Quit", &theme),
        keybind("Ctrl+c", "Quit from anywhere", &theme),
    ];
    frame.render_widget(
        Paragraph::new(right_content).wrap(Wrap { trim: false }),
        cols[1],
    );
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {title} ━━"),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{key:12}"),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
