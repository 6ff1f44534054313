//! Root layout: sidebar, active screen, player bar and the alert overlay

use crate::app::state::{AppState, HitAreas, Screen};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{account, centered, help, home, now_playing, sidebar, song};

/// ┌──────────┬─────────────────────────────────────────┐
/// │  Menu    │           Home / Song / Account / Help  │
/// │          │                                         │
/// ├──────────┴─────────────────────────────────────────┤
/// │ Player: title, progress, controls, volume, toast   │
/// └────────────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let root = frame.area();
    // Widgets record their regions again below.
    state.hit = HitAreas::default();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(7)])
        .split(root);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(40)])
        .split(rows[0]);

    sidebar::render(frame, state, top_cols[0]);
    render_main_content(frame, state, top_cols[1]);
    now_playing::render(frame, state, rows[1]);

    if state.alert.is_some() {
        render_alert(frame, state, root);
    }
}

fn render_main_content(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let title = match state.screen {
        Screen::Home => format!(" {} Home ", icons.home),
        Screen::Song => format!(" {} Now Viewing ", icons.song),
        Screen::Account => format!(" {} Account ", icons.account),
        Screen::Help => format!(" {} Keybinds ", icons.help),
    };

    let main = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = main.inner(area);
    frame.render_widget(main, area);

    match state.screen {
        Screen::Home => home::render(frame, state, inner),
        Screen::Song => song::render(frame, state, inner),
        Screen::Account => account::render(frame, state, inner),
        Screen::Help => help::render(frame, inner),
    }
}

fn render_alert(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(alert) = &state.alert else {
        return;
    };
    let theme = get_theme();

    let width = (alert.message.chars().count() as u16 + 6).clamp(30, 60);
    let popup = centered(area, width, 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.error))
        .title(format!(" {} Notice ", theme.icons.error))
        .title_style(
            Style::default()
                .fg(theme.palette.error)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            alert.message.as_str(),
            Style::default().fg(theme.palette.fg_primary),
        )),
        Line::default(),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(theme.palette.fg_dim),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
