//! Shared rendering helpers.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A rect of at most `width` x `height`, centered inside `area`.
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Render a single-line text input in the `> value_` style.
///
/// The trailing underscore marks the focused field; passwords render as
/// bullets. The cursor always sits at the end of the value.
pub(super) fn input_line(value: &str, focused: bool, masked: bool, style: Style) -> Line<'static> {
    let shown: String = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(Span::styled(format!("> {}{}", shown, cursor), style))
}

/// Truncate a string to the given display width, appending an ellipsis
/// when something was cut. Width-aware, so wide characters don't overflow
/// the cell budget.
pub(super) fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1); // room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
