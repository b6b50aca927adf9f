//! Trait for measuring the terminal width of text.

use unicode_width::UnicodeWidthStr;

/// Measures how many terminal columns a run of text occupies.
///
/// The renderer never counts bytes or chars for layout; every width decision
/// goes through this trait, so wide CJK glyphs and emoji keep the box aligned.
///
/// # Example
///
/// ```
/// use boxdiff::WidthProvider;
///
/// struct Monospace;
///
/// impl WidthProvider for Monospace {
///     fn text_width(&self, text: &str) -> usize {
///         text.chars().count()
///     }
/// }
///
/// assert_eq!(Monospace.text_width("abc"), 3);
/// ```
pub trait WidthProvider: Send + Sync {
    /// Rendered column width of `text`.
    fn text_width(&self, text: &str) -> usize;

    /// Longest prefix of `text` whose width does not exceed `max_width`.
    ///
    /// Returns the prefix and its width. Prefixes are measured as a whole, so
    /// multi-codepoint sequences are not split into individually measured chars.
    fn fit_prefix<'t>(&self, text: &'t str, max_width: usize) -> (&'t str, usize) {
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(idx, _)| idx)
            .skip(1)
            .chain(std::iter::once(text.len()))
            .collect();

        // number of chars taken; 0 means the empty prefix
        let (mut lo, mut hi) = (0usize, boundaries.len());
        while lo < hi {
            let mid = (lo + hi).div_ceil(2);
            if self.text_width(&text[..boundaries[mid - 1]]) <= max_width {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }

        let prefix = if lo == 0 { "" } else { &text[..boundaries[lo - 1]] };
        (prefix, self.text_width(prefix))
    }
}

/// Default provider backed by the Unicode East Asian Width tables.
///
/// A tab counts as one column: content is copied verbatim, so a tab stays a
/// single character in the row rather than being expanded.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWidths;

impl WidthProvider for UnicodeWidths {
    fn text_width(&self, text: &str) -> usize {
        let tabs = text.matches('\t').count();
        if tabs == 0 {
            return UnicodeWidthStr::width(text);
        }
        text.split('\t').map(UnicodeWidthStr::width).sum::<usize>() + tabs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_widths() {
        assert_eq!(UnicodeWidths.text_width("abc"), 3);
        assert_eq!(UnicodeWidths.text_width("日本"), 4);
        assert_eq!(UnicodeWidths.text_width("─┼│"), 3);
        assert_eq!(UnicodeWidths.text_width(""), 0);
    }

    #[test]
    fn test_tab_is_one_column() {
        assert_eq!(UnicodeWidths.text_width("\t"), 1);
        assert_eq!(UnicodeWidths.text_width("\tfoo\tbar"), 8);
        assert_eq!(UnicodeWidths.text_width("日\t"), 3);
    }

    #[test]
    fn test_fit_prefix_ascii() {
        assert_eq!(UnicodeWidths.fit_prefix("abcdef", 4), ("abcd", 4));
        assert_eq!(UnicodeWidths.fit_prefix("abc", 10), ("abc", 3));
        assert_eq!(UnicodeWidths.fit_prefix("abc", 0), ("", 0));
    }

    #[test]
    fn test_fit_prefix_wide_chars() {
        // a wide char that would straddle the limit is left out
        assert_eq!(UnicodeWidths.fit_prefix("a日本", 4), ("a日", 3));
        assert_eq!(UnicodeWidths.fit_prefix("日本", 1), ("", 0));
    }
}
