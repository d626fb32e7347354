//! Plain-text helpers for transcript rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Make message text safe to print.
///
/// Control characters other than tab and newline are replaced with their
/// Unicode Control Picture (`\x07` becomes `␇`), which also defuses ANSI
/// escape sequences since ESC itself becomes visible. Carriage returns are
/// dropped.
pub fn sanitize_for_display(text: &str) -> String {
    if !needs_sanitization(text) {
        return text.to_string();
    }

    text.chars()
        .filter(|&c| c != '\r')
        .map(|c| match c {
            '\t' | '\n' => c,
            '\x7F' => '␡',
            c if (c as u32) < 0x20 => char::from_u32(0x2400 + c as u32).unwrap_or('?'),
            c => c,
        })
        .collect()
}

/// Whether [`sanitize_for_display`] would change `text`.
pub fn needs_sanitization(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_control() && c != '\t' && c != '\n')
}

/// Display width of `text` in terminal cells.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wrap `text` to lines of at most `max_width` cells.
///
/// Breaks at spaces where possible; words longer than a line are split.
/// Existing newlines are kept and blank lines survive as empty strings.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for source in text.split('\n') {
        let source = source.replace('\t', "    ");
        let mut current = String::new();
        let mut current_width = 0;

        for word in source.split_inclusive(' ') {
            let word_width = display_width(word);
            let trimmed_width = display_width(word.trim_end());

            if current_width > 0 && current_width + trimmed_width > max_width {
                lines.push(current.trim_end().to_string());
                current.clear();
                current_width = 0;
            }

            if trimmed_width > max_width {
                for c in word.chars() {
                    let w = c.width().unwrap_or(0);
                    if current_width + w > max_width && current_width > 0 {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(c);
                    current_width += w;
                }
            } else {
                current.push_str(word);
                current_width += word_width;
            }
        }

        lines.push(current.trim_end().to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_control_characters() {
        assert_eq!(sanitize_for_display("bell\x07!"), "bell␇!");
        assert_eq!(sanitize_for_display("red\x1B[31m"), "red␛[31m");
        assert_eq!(sanitize_for_display("a\r\nb"), "a\nb");
        assert_eq!(sanitize_for_display("x\x7Fy"), "x␡y");
    }

    #[test]
    fn test_sanitize_keeps_clean_text() {
        let clean = "Hello,\tworld\nsecond line";
        assert!(!needs_sanitization(clean));
        assert_eq!(sanitize_for_display(clean), clean);
    }

    #[test]
    fn test_wrap_text_at_spaces() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_text_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        assert_eq!(wrap_text("one\n\ntwo", 20), vec!["one", "", "two"]);
    }

    #[test]
    fn test_wrap_text_counts_wide_characters() {
        let lines = wrap_text("你好世界", 4);
        assert_eq!(lines, vec!["你好", "世界"]);
    }
}
