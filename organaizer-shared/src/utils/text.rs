// SPDX-License-Identifier: GPL-3.0-only
//! Character-offset string helpers.
//!
//! Page offsets count `char`s, never bytes, so every splice goes through here.

/// Number of characters in `s`.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of character `char_idx`, clamped to the end of `s`.
#[must_use]
pub fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte_idx, _)| byte_idx)
}

/// Characters `start..end` of `s`, clamped.
#[must_use]
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_index(s, start);
    let end_byte = byte_index(s, end.max(start));
    &s[start_byte..end_byte]
}

/// Replace characters `start..end` of `s` with `insert`.
#[must_use]
pub fn splice(s: &str, start: usize, end: usize, insert: &str) -> String {
    let start_byte = byte_index(s, start);
    let end_byte = byte_index(s, end.max(start));
    let mut out = String::with_capacity(s.len() - (end_byte - start_byte) + insert.len());
    out.push_str(&s[..start_byte]);
    out.push_str(insert);
    out.push_str(&s[end_byte..]);
    out
}

/// Drop every empty or whitespace-only line. Returns the text and the number of lines removed.
///
/// Kept lines are untouched and a trailing line break survives.
#[must_use]
pub fn remove_empty_lines(text: &str) -> (String, usize) {
    let mut removed = 0;
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let keep = !line.trim().is_empty();
            if !keep {
                removed += 1;
            }
            keep
        })
        .collect();
    let mut cleaned = kept.join("\n");
    if !kept.is_empty() && text.ends_with('\n') {
        cleaned.push('\n');
    }
    (cleaned, removed)
}
