use crate::api::StreamSource;
use crate::app::state::{AppState, Screen};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::truncate_str;

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(" Menu ")
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(inner);

    let items: Vec<ListItem> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| {
            let is_selected = i == state.sidebar_selected;
            let (icon, label) = match screen {
                Screen::Home => (icons.home, "Home"),
                Screen::Song => (icons.song, "Song"),
                Screen::Account => (icons.account, "Account"),
                Screen::Help => (icons.help, "Help"),
            };

            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };
            let icon_style = if is_selected {
                Style::default().fg(theme.palette.accent)
            } else {
                Style::default().fg(theme.palette.fg_secondary)
            };
            let prefix = if is_selected { icons.selected } else { icons.unselected };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, icon_style),
                Span::raw(" "),
                Span::styled(icon, icon_style),
                Span::raw(" "),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.sidebar_selected.min(Screen::ALL.len() - 1)));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("");
    frame.render_stateful_widget(list, parts[0], &mut list_state);

    // User badge and source
    let width = parts[1].width as usize;
    let user_line = match &state.user {
        Some(user) => Line::from(vec![
            Span::styled(
                format!("{} ", icons.account),
                Style::default().fg(theme.palette.accent),
            ),
            Span::styled(
                truncate_str(&user.nickname, width.saturating_sub(2)),
                Style::default().fg(theme.palette.fg_primary),
            ),
        ]),
        None => Line::from(Span::styled(
            "not logged in",
            Style::default().fg(theme.palette.fg_dim),
        )),
    };
    let source_icon = match state.source {
        StreamSource::Local => icons.local,
        StreamSource::Cloud => icons.cloud,
    };
    let source_line = Line::from(Span::styled(
        format!("{} {}", source_icon, state.source.label()),
        Style::default().fg(theme.palette.fg_secondary),
    ));

    frame.render_widget(
        Paragraph::new(vec![Line::default(), user_line, source_line]),
        parts[1],
    );
}
