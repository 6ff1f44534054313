//! Home screen: featured carousel above the full track list

use crate::app::state::AppState;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::truncate_str;

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    render_carousel(frame, state, sections[0]);
    render_track_list(frame, state, sections[1]);
}

fn render_carousel(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;
    let carousel = &state.carousel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Featured ", icons.star))
        .title_style(Style::default().fg(theme.palette.accent_alt));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(slide) = carousel.current() else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Nothing featured yet",
                Style::default().fg(theme.palette.fg_dim),
            ))),
            inner,
        );
        return;
    };

    let width = inner.width as usize;
    let title = Line::from(vec![
        Span::styled(format!("{} ", icons.music), Style::default().fg(theme.palette.accent)),
        Span::styled(
            truncate_str(slide.display_title(), width.saturating_sub(2)),
            Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let artist = Line::from(Span::styled(
        truncate_str(slide.display_artist(), width),
        Style::default().fg(theme.palette.fg_secondary),
    ));

    let dots: Vec<Span> = (0..carousel.slides().len())
        .map(|i| {
            let style = if i == carousel.index() {
                Style::default().fg(theme.palette.accent)
            } else {
                Style::default().fg(theme.palette.fg_dim)
            };
            Span::styled(format!("{} ", icons.bullet), style)
        })
        .chain([Span::styled(
            "  < > browse  f play",
            Style::default().fg(theme.palette.fg_dim),
        )])
        .collect();

    frame.render_widget(Paragraph::new(vec![title, artist, Line::from(dots)]), inner);
}

fn render_track_list(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    if state.library.loading && state.playlist.is_empty() {
        let spinner = LoadingSpinner::frame(state.tick);
        let loading = Paragraph::new(Line::from(format!("{spinner} Loading tracks...")))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(loading, area);
        return;
    }

    if state.playlist.is_empty() {
        let msg = if state.status.is_empty() {
            "No tracks found"
        } else {
            state.status.as_str()
        };
        let empty = Paragraph::new(Line::from(msg.to_string()))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(empty, area);
        return;
    }

    let visible_height = area.height as usize;
    state.library.clamp(state.playlist.len());
    state.library.update_scroll(visible_height);

    let cursor = &state.library;
    let playing = state.playlist.current_index();
    let width = area.width.saturating_sub(14) as usize;

    let items: Vec<ListItem> = state
        .playlist
        .tracks()
        .iter()
        .enumerate()
        .skip(cursor.scroll_offset)
        .take(visible_height)
        .map(|(i, track)| {
            let is_selected = i == cursor.selected;
            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };
            let marker = if playing == Some(i) { icons.play } else { " " };
            let label = format!("{} - {}", track.display_title(), track.display_artist());
            let tag = if track.has_lyrics { " lyrics" } else { " no lyrics" };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(theme.palette.playing)),
                Span::styled(truncate_str(&label, width), style),
                Span::styled(tag, Style::default().fg(theme.palette.fg_dim)),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(cursor.selected.saturating_sub(cursor.scroll_offset)));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{f054} ");
    frame.render_stateful_widget(list, area, &mut list_state);

    // Scroll position indicator
    if state.playlist.len() > visible_height {
        let pos_text = format!("{}/{}", cursor.selected + 1, state.playlist.len());
        let pos_len = pos_text.len() as u16;
        let pos_x = area.x + area.width.saturating_sub(pos_len);
        if pos_x > area.x {
            frame.render_widget(
                Paragraph::new(pos_text).style(Style::default().fg(theme.palette.fg_secondary)),
                Rect::new(pos_x, area.y + area.height.saturating_sub(1), pos_len, 1),
            );
        }
    }
}
