pub mod account;
pub mod help;
pub mod home;
pub mod now_playing;
pub mod root;
pub mod sidebar;
pub mod song;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Shortens `s` to `max_len` characters, ending in "..." when cut.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// `mm:ss`, or `--:--` when unknown.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "--:--".to_string();
    }
    let total = secs.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// One column of horizontal padding on each side.
pub fn pad_horizontal(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area)[1]
}

/// A rectangle of the given size centered inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hello", 2), "he");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(125.9), "02:05");
        assert_eq!(format_time(f64::NAN), "--:--");
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered(area, 40, 6);
        assert_eq!(r, Rect::new(20, 9, 40, 6));
        let clipped = centered(Rect::new(5, 5, 10, 3), 40, 6);
        assert_eq!(clipped, Rect::new(5, 5, 10, 3));
    }
}
