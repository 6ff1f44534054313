//! Song screen: track metadata, synced lyrics, comments

use crate::app::state::{AppState, SongFocus};
use crate::tui::theme::{LoadingSpinner, Theme, get_theme};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{pad_horizontal, truncate_str};

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();

    if state.song.track.is_none() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Pick a track on the Home screen",
                Style::default().fg(theme.palette.fg_secondary),
            ))),
            area,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_meta(frame, state, &theme, rows[0]);
    render_lyrics(frame, state, &theme, cols[0]);
    render_comments(frame, state, &theme, cols[1]);
}

fn render_meta(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let song = &state.song;
    let width = area.width as usize;
    let album = if song.album().is_empty() {
        String::new()
    } else {
        format!("  {}  {}", theme.icons.bullet, song.album())
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_str(song.title(), width),
            Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(song.artist().to_string(), Style::default().fg(theme.palette.fg_secondary)),
            Span::styled(album, Style::default().fg(theme.palette.fg_dim)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn panel<'a>(theme: &Theme, title: String, focused: bool) -> Block<'a> {
    let border = if focused {
        theme.palette.border_focus
    } else {
        theme.palette.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent))
}

fn render_lyrics(frame: &mut Frame, state: &mut AppState, theme: &Theme, area: Rect) {
    let focused = state.song.focus == SongFocus::Lyrics;
    let block = panel(theme, format!(" {} Lyrics ", theme.icons.lyrics), focused);
    let inner = pad_horizontal(block.inner(area));
    frame.render_widget(block, area);

    let placeholder = |text: String| {
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(theme.palette.fg_secondary),
        )))
        .alignment(Alignment::Center)
    };

    let Some(sync) = state.song.lyrics.as_mut() else {
        let text = if state.song.lyrics_loading {
            format!("{} Loading lyrics...", LoadingSpinner::frame(state.tick))
        } else {
            "No lyrics available".to_string()
        };
        frame.render_widget(placeholder(text), inner);
        return;
    };

    if sync.lyrics().is_empty() {
        frame.render_widget(placeholder("No lyrics available".to_string()), inner);
        return;
    }

    sync.set_viewport(inner.height as usize);
    state.hit.lyrics = Some(inner);

    let width = inner.width.saturating_sub(2) as usize;
    let active = sync.active();
    let lines: Vec<Line> = sync
        .lyrics()
        .lines
        .iter()
        .enumerate()
        .skip(sync.scroll_offset())
        .take(sync.viewport())
        .map(|(i, line)| {
            if Some(i) == active {
                let style = Style::default()
                    .fg(theme.palette.lyric_active)
                    .add_modifier(Modifier::BOLD);
                Line::from(vec![
                    Span::styled("♪ ", style),
                    Span::styled(truncate_str(&line.text, width), style),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        truncate_str(&line.text, width),
                        Style::default().fg(theme.palette.fg_secondary),
                    ),
                ])
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_comments(frame: &mut Frame, state: &AppState, theme: &Theme, area: Rect) {
    let song = &state.song;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let title = format!(" {} Comments ({}) ", theme.icons.comment, song.comments.len());
    let block = panel(theme, title, song.focus == SongFocus::Comments);
    let inner = pad_horizontal(block.inner(parts[0]));
    frame.render_widget(block, parts[0]);

    if song.comments_loading && song.comments.is_empty() {
        let spinner = LoadingSpinner::frame(state.tick);
        frame.render_widget(
            Paragraph::new(format!("{spinner} Loading comments..."))
                .style(Style::default().fg(theme.palette.fg_secondary)),
            inner,
        );
    } else if song.comments.is_empty() {
        frame.render_widget(
            Paragraph::new("No comments yet").style(Style::default().fg(theme.palette.fg_dim)),
            inner,
        );
    } else {
        let lines: Vec<Line> = song
            .comments
            .iter()
            .skip(song.comments_scroll)
            .flat_map(|c| {
                [
                    Line::from(vec![
                        Span::styled(
                            c.author().to_string(),
                            Style::default()
                                .fg(theme.palette.accent_alt)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}", c.posted_at()),
                            Style::default().fg(theme.palette.fg_dim),
                        ),
                    ]),
                    Line::from(Span::styled(
                        c.content.clone(),
                        Style::default().fg(theme.palette.fg_primary),
                    )),
                    Line::default(),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    let editing = song.focus == SongFocus::CommentInput;
    let input_block = panel(theme, " Write a comment ".to_string(), editing);
    let prompt = if song.posting_comment {
        format!("{} {}", song.comment_draft, LoadingSpinner::frame(state.tick))
    } else if editing {
        format!("{}▏", song.comment_draft)
    } else if state.user.is_none() {
        "log in to comment".to_string()
    } else {
        "press c to comment".to_string()
    };
    let style = if editing {
        Style::default().fg(theme.palette.fg_primary)
    } else {
        Style::default().fg(theme.palette.fg_dim)
    };
    frame.render_widget(
        Paragraph::new(Line::from(prompt)).style(style).block(input_block),
        parts[1],
    );
}
