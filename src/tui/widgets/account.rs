use crate::app::state::{AccountField, AccountMode, AppState};
use crate::tui::theme::{LoadingSpinner, Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::centered;

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    match &state.user {
        Some(user) => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("{} {}", theme.icons.account, user.nickname),
                    Style::default()
                        .fg(theme.palette.fg_primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    user.email.clone(),
                    Style::default().fg(theme.palette.fg_secondary),
                )),
                Line::default(),
                hint("L", "log out", &theme),
                hint("r", "refresh session", &theme),
            ];
            frame.render_widget(Paragraph::new(lines), centered(area, 40, 5));
        }
        None => render_form(frame, state, &theme, centered(area, 44, 12)),
    }
}

fn render_form(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let form = &state.account;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(2),
        ])
        .split(area);

    let heading = Line::from(vec![
        Span::styled(
            form.mode.label(),
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            match form.mode {
                AccountMode::Login => "   F2: register instead",
                AccountMode::Register => "   F2: log in instead",
            },
            Style::default().fg(theme.palette.fg_dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(heading), rows[0]);

    let masked = "*".repeat(form.password.chars().count());
    field(
        frame,
        theme,
        " Account ",
        &form.account,
        form.field == AccountField::Account,
        rows[1],
    );
    field(
        frame,
        theme,
        " Password ",
        &masked,
        form.field == AccountField::Password,
        rows[2],
    );

    let footer = if form.submitting {
        Line::from(format!("{} Submitting...", LoadingSpinner::frame(state.tick)))
    } else {
        hint("Enter", "submit   Tab: next field   Esc: back", theme)
    };
    frame.render_widget(Paragraph::new(footer), rows[3]);
}

fn field(frame: &mut Frame, theme: &Theme, title: &str, value: &str, focused: bool, area: Rect) {
    let border = if focused {
        theme.palette.border_focus
    } else {
        theme.palette.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border))
        .title(title.to_string());
    let cursor = if focused { "▏" } else { "" };
    frame.render_widget(
        Paragraph::new(format!("{value}{cursor}"))
            .style(Style::default().fg(theme.palette.fg_primary))
            .block(block),
        area,
    );
}

fn hint(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{key}: "),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_secondary)),
    ])
}
