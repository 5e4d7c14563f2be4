//! Width-aware text helpers.
//!
//! All widths are display columns, not bytes or chars: East-Asian wide
//! characters count as 2, combining marks as 0. Strings already wider than
//! the requested width are returned unchanged, never truncated.

use unicode_width::UnicodeWidthStr;

/// Display width of a string in terminal columns.
///
/// # Example
///
/// ```rust
/// use tabula::display_width;
///
/// assert_eq!(display_width("abc"), 3);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Pads on the left (right-aligns) to the given display width.
pub fn pad_left(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - w), s)
}

/// Pads on the right (left-aligns) to the given display width.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - w))
}

/// Pads on both sides (centers) to the given display width.
///
/// An odd leftover column goes to the right side.
pub fn pad_center(s: &str, width: usize) -> String {
    let w = display_width(s);
    if w >= width {
        return s.to_string();
    }
    let total = width - w;
    let left = total / 2;
    let right = total - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}
