use unicode_width::UnicodeWidthStr;

/// Calculates the display width of a string in terminal columns.
///
/// CJK characters and emoji count as two columns, combining marks as zero.
///
/// ```
/// use blogfeed::util::display_width;
///
/// assert_eq!(display_width("Hello"), 5);
/// assert_eq!(display_width("你好"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Greedily word-wraps one line of text to `width` columns.
///
/// Words are never split, neither in the middle nor at hyphens: a word wider
/// than `width` gets a line of its own. The whitespace between words on the
/// same output line is kept as written, as is the indentation in front of the
/// first word. Whitespace where a break falls is dropped, as is trailing
/// whitespace, so a blank line produces no output lines at all.
///
/// ```
/// use blogfeed::util::wrap_line;
///
/// assert_eq!(wrap_line("one two three", 7), vec!["one two", "three"]);
/// assert_eq!(wrap_line("  a  b", 80), vec!["  a  b"]);
/// assert!(wrap_line("   ", 80).is_empty());
/// ```
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for (gap, word) in words_with_gaps(line) {
        let gap_width = gap.chars().count();
        let word_width = display_width(word);

        if lines.is_empty() && current.is_empty() {
            current.push_str(gap);
            current.push_str(word);
            current_width = gap_width + word_width;
        } else if current_width + gap_width + word_width <= width {
            current.push_str(gap);
            current.push_str(word);
            current_width += gap_width + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Splits `line` into words, each paired with the whitespace run before it.
/// Trailing whitespace is not yielded.
fn words_with_gaps(line: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = line;
    std::iter::from_fn(move || {
        let word_start = rest.find(|c: char| !c.is_whitespace())?;
        let (gap, tail) = rest.split_at(word_start);
        let word_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, remaining) = tail.split_at(word_end);
        rest = remaining;
        Some((gap, word))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_line_unchanged() {
        assert_eq!(wrap_line("<p>Hello world.</p>", 80), vec!["<p>Hello world.</p>"]);
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        let line = "aaaa bbbb cccc dddd";
        assert_eq!(wrap_line(line, 9), vec!["aaaa bbbb", "cccc dddd"]);
    }

    #[test]
    fn test_exact_fit_stays_on_one_line() {
        assert_eq!(wrap_line("abc def", 7), vec!["abc def"]);
        assert_eq!(wrap_line("abc def", 6), vec!["abc", "def"]);
    }

    #[test]
    fn test_long_word_not_broken() {
        let url = "https://example.com/a/very/long/path/that/does/not/fit";
        assert_eq!(wrap_line(&format!("see {url} now"), 20), vec!["see", url, "now"]);
    }

    #[test]
    fn test_hyphenated_word_not_broken() {
        let line = "a well-known-and-very-long-hyphenated-phrase";
        assert_eq!(
            wrap_line(line, 12),
            vec!["a", "well-known-and-very-long-hyphenated-phrase"]
        );
    }

    #[test]
    fn test_blank_line_yields_nothing() {
        assert!(wrap_line("", 80).is_empty());
        assert!(wrap_line(" \t ", 80).is_empty());
    }

    #[test]
    fn test_whitespace_runs_kept_within_a_line() {
        assert_eq!(wrap_line("  a   b\tc  ", 80), vec!["  a   b\tc"]);
        assert_eq!(
            wrap_line(r#"<span class="x  y">hi</span>"#, 80),
            vec![r#"<span class="x  y">hi</span>"#]
        );
    }

    #[test]
    fn test_leading_indentation_kept_on_first_line_only() {
        assert_eq!(
            wrap_line("    let total = first + second;", 16),
            vec!["    let total =", "first + second;"]
        );
    }

    #[test]
    fn test_gap_at_break_dropped() {
        assert_eq!(wrap_line("aaaa     bbbb", 6), vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn test_cjk_measured_by_display_width() {
        // Each CJK character is two columns wide
        assert_eq!(wrap_line("你好 世界", 4), vec!["你好", "世界"]);
    }

    proptest! {
        #[test]
        fn prop_lines_fit_unless_single_word(text in "[a-z ]{0,300}", width in 1usize..100) {
            for line in wrap_line(&text, width) {
                prop_assert!(display_width(&line) <= width || !line.trim().contains(' '));
            }
        }

        #[test]
        fn prop_words_preserved_in_order(text in "[a-z\\- ]{0,300}", width in 1usize..100) {
            let wrapped = wrap_line(&text, width).join(" ");
            let original: Vec<&str> = text.split_whitespace().collect();
            let rewrapped: Vec<&str> = wrapped.split_whitespace().collect();
            prop_assert_eq!(original, rewrapped);
        }
    }
}
