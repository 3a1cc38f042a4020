//! Custom [`upon`] functions for drawing text charts.
//!
//! All of them can be called either way: `bar(count, max)` or
//! `{{ count|bar: max }}`.

use upon::Engine;

/// Width of a full bar, in characters.
pub const BAR_WIDTH: usize = 30;

/// A horizontal bar proportional to `count / max`.
///
/// Any non-zero count draws at least one cell so small values stay visible.
fn bar(count: usize, max: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let cells = (count.min(max) * BAR_WIDTH).div_ceil(max).max(1);
    "█".repeat(cells)
}

/// Shortens `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// `"s"` unless `n` is exactly one.
fn plural(n: i64) -> String {
    if n == 1 { String::new() } else { "s".to_string() }
}

/// Left-aligns `s` in a column `width` characters wide.
fn pad(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

pub(crate) fn configure(engine: &mut Engine<'_>) {
    engine.add_function("bar", bar);
    engine.add_function("truncate", truncate);
    engine.add_function("plural", plural);
    engine.add_function("pad", pad);
}
