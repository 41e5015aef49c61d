//! Reply formatting.
//!
//! Tutor replies are shown wrapped to a fixed width and analysed with
//! punctuation stripped.

/// Default display width of a reply line, in characters
pub const DEFAULT_WRAP_WIDTH: usize = 180;

/// Characters removed before linguistic analysis
pub const ANALYSIS_STRIP_CHARS: [char; 7] = [',', '.', '!', '?', '¿', '[', ']'];

/// Cut `text` into consecutive `max_width`-character lines.
///
/// Text that already fits is returned unchanged. Breaks ignore word
/// boundaries and may fall mid-word. Widths are counted in characters, so a
/// multi-byte character is never split.
pub fn wrap_for_display(text: &str, max_width: usize) -> String {
    if max_width == 0 || text.chars().count() <= max_width {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_width)
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove sentence punctuation and brackets, then trim.
pub fn strip_for_analysis(text: &str) -> String {
    text.chars()
        .filter(|c| !ANALYSIS_STRIP_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Short single-line preview of `text` for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let kept: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
