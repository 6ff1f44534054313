use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Screen, SongFocus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        loop {
            if !event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            let ev = match event::read() {
                Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => InputEvent::Mouse(m),
                Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                _ => continue,
            };
            if tx.blocking_send(Event::Input(ev)).is_err() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => map_mouse(state, m),
        InputEvent::Key(k) => map_key(state, k),
    }
}

fn map_mouse(state: &AppState, m: MouseEvent) -> Option<Action> {
    if state.alert.is_some() {
        return None;
    }
    let seeking = state.playback.state().user_seeking;

    match m.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(fraction) = state.hit.progress_fraction(m.column, m.row) {
                return Some(Action::SeekBarTo(fraction));
            }
            state
                .hit
                .lyrics_row(m.column, m.row)
                .map(Action::LyricsClickRow)
        }
        MouseEventKind::Drag(MouseButton::Left) if seeking => {
            let area = state.hit.progress?;
            // Dragging off the bar still tracks the column.
            let column = m.column.clamp(area.x, area.x + area.width.saturating_sub(1));
            state
                .hit
                .progress_fraction(column, area.y)
                .map(Action::SeekBarTo)
        }
        MouseEventKind::Up(MouseButton::Left) if seeking => Some(Action::CommitSeek),
        MouseEventKind::ScrollUp => {
            if state.hit.lyrics_row(m.column, m.row).is_some() {
                Some(Action::LyricsScroll(-1))
            } else {
                Some(Action::ListUp)
            }
        }
        MouseEventKind::ScrollDown => {
            if state.hit.lyrics_row(m.column, m.row).is_some() {
                Some(Action::LyricsScroll(1))
            } else {
                Some(Action::ListDown)
            }
        }
        _ => None,
    }
}

fn map_key(state: &AppState, k: KeyEvent) -> Option<Action> {
    if state.alert.is_some() {
        return Some(Action::DismissAlert);
    }

    if state.playback.state().user_seeking {
        return match k.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::SeekBarStep(-1.0)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::SeekBarStep(1.0)),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('s') => Some(Action::CommitSeek),
            _ => None,
        };
    }

    if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if state.is_typing() {
        return map_text_input(state, k);
    }

    match state.screen {
        Screen::Home => map_home(k).or_else(|| map_global(k)),
        Screen::Song => map_song(state, k).or_else(|| map_global(k)),
        Screen::Account => map_account(k).or_else(|| map_global(k)),
        Screen::Help => map_global(k),
    }
}

/// Keys that work the same on every screen.
fn map_global(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),

        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Char('1') => Some(Action::SetScreen(Screen::Home)),
        KeyCode::Char('2') => Some(Action::SetScreen(Screen::Song)),
        KeyCode::Char('3') => Some(Action::SetScreen(Screen::Account)),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::SetScreen(Screen::Help)),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SidebarUp),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SidebarDown),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageDown),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char('r') => Some(Action::Refresh),

        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('=') | KeyCode::Char('+') => Some(Action::VolumeUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::VolumeDown),
        KeyCode::Char('m') => Some(Action::ToggleMute),
        KeyCode::Char(']') => Some(Action::SeekForward),
        KeyCode::Char('[') => Some(Action::SeekBack),
        KeyCode::Char('s') => Some(Action::BeginSeek),
        KeyCode::Char('n') => Some(Action::PlayNext),
        KeyCode::Char('p') => Some(Action::PlayPrev),
        _ => None,
    }
}

fn map_home(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Char('<') | KeyCode::Char(',') => Some(Action::CarouselPrev),
        KeyCode::Char('>') | KeyCode::Char('.') => Some(Action::CarouselNext),
        KeyCode::Char('f') => Some(Action::PlayCarouselSlide),
        _ => None,
    }
}

fn map_song(state: &AppState, k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc => Some(Action::SetScreen(Screen::Home)),
        KeyCode::Char('c') => Some(Action::StartComment),
        KeyCode::Char('C') => Some(Action::ReloadComments),
        KeyCode::Char('o') => Some(Action::SongFocusNext),
        KeyCode::Enter if state.song.focus == SongFocus::Lyrics => Some(Action::SeekToCenterLine),
        _ => None,
    }
}

fn map_account(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('L') => Some(Action::Logout),
        KeyCode::Esc => Some(Action::SetScreen(Screen::Home)),
        _ => None,
    }
}

/// Keys while a text field has focus.
fn map_text_input(state: &AppState, k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab | KeyCode::BackTab if state.screen == Screen::Account => {
            Some(Action::AccountFieldNext)
        }
        KeyCode::F(2) if state.screen == Screen::Account => Some(Action::ToggleAccountMode),
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::InputChar(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{Alert, HitAreas};
    use crate::player::{PlaybackController, PlaybackMode};
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn playing_state() -> AppState {
        let mut playback = PlaybackController::new(0.8, PlaybackMode::Continuous);
        playback.load("u".into(), Vec::new());
        playback.on_duration(100.0);
        let mut state = AppState::new(Default::default(), playback);
        state.hit = HitAreas {
            lyrics: Some(Rect::new(20, 2, 40, 10)),
            progress: Some(Rect::new(0, 30, 101, 1)),
        };
        state
    }

    #[test]
    fn test_alert_swallows_keys() {
        let mut state = AppState::default();
        state.alert = Some(Alert { message: "x".into() });
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::DismissAlert));
    }

    #[test]
    fn test_account_screen_types_when_logged_out() {
        let mut state = AppState::default();
        state.set_screen(Screen::Account);
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::InputChar('q')));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Tab)), Some(Action::AccountFieldNext));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Enter)), Some(Action::Submit));
    }

    #[test]
    fn test_seek_gesture_keys() {
        let mut state = playing_state();
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('s'))), Some(Action::BeginSeek));
        state.playback.begin_user_seek();
        assert_eq!(map_input_to_action(&state, key(KeyCode::Right)), Some(Action::SeekBarStep(1.0)));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Enter)), Some(Action::CommitSeek));
    }

    #[test]
    fn test_mouse_progress_bar_gesture() {
        let mut state = playing_state();
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 50, 30);
        assert_eq!(map_input_to_action(&state, down), Some(Action::SeekBarTo(0.5)));

        state.playback.begin_user_seek();
        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 200, 12);
        assert_eq!(map_input_to_action(&state, drag), Some(Action::SeekBarTo(1.0)));
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 200, 12);
        assert_eq!(map_input_to_action(&state, up), Some(Action::CommitSeek));
    }

    #[test]
    fn test_mouse_over_lyrics() {
        let state = playing_state();
        let click = mouse(MouseEventKind::Down(MouseButton::Left), 25, 5);
        assert_eq!(map_input_to_action(&state, click), Some(Action::LyricsClickRow(3)));
        let wheel = mouse(MouseEventKind::ScrollDown, 25, 5);
        assert_eq!(map_input_to_action(&state, wheel), Some(Action::LyricsScroll(1)));
        let elsewhere = mouse(MouseEventKind::ScrollDown, 0, 0);
        assert_eq!(map_input_to_action(&state, elsewhere), Some(Action::ListDown));
    }
}
