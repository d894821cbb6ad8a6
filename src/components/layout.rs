//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// Home screen layout areas
pub struct HomeLayout {
    pub nav: Rect,
    pub content: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the home screen layout: section nav on the left, scrolled
/// content on the right, help bar along the bottom
pub fn calculate_home_layout(area: Rect) -> HomeLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(main_chunks[0]);

    HomeLayout {
        nav: horizontal_chunks[0],
        content: horizontal_chunks[1],
        help: main_chunks[1],
    }
}

/// Truncate a string to a display width, appending an ellipsis when cut
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();

    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_strings_pass_through() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_long_strings_get_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_wide_chars_count_double() {
        // Each CJK glyph occupies two cells
        assert_eq!(truncate_to_width("日本語テスト", 5), "日本…");
    }

    #[test]
    fn test_popup_never_exceeds_area() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_popup(area, 40, 20);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
    }
}
