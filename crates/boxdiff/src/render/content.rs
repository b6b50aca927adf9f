//! Wrap and pad one logical line into fixed-width content cells.

use super::symbols::WRAP_MARKER;
use crate::traits::WidthProvider;

/// Content cells for one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Wrapped {
    /// Each segment is exactly the content width wide.
    pub segments: Vec<String>,
    /// Whether the line needed more than one segment.
    pub wrapped: bool,
}

/// Splits content into segments that fit the content column.
pub(crate) struct ContentFormatter<'a, W: WidthProvider + ?Sized> {
    widths: &'a W,
    width: usize,
}

impl<'a, W: WidthProvider + ?Sized> ContentFormatter<'a, W> {
    pub fn new(widths: &'a W, width: usize) -> Self {
        Self { widths, width }
    }

    /// Wrap `content` into padded segments.
    ///
    /// A segment that continues on the next row holds `width - 1` columns of
    /// text followed by the wrap marker. The final segment is padded with
    /// spaces to the full width.
    pub fn format(&self, content: &str) -> Wrapped {
        let mut rest = content;
        let mut segments = Vec::new();
        let mut wrapped = false;

        loop {
            let rest_width = self.widths.text_width(rest);
            if rest_width <= self.width {
                segments.push(pad(rest, rest_width, self.width));
                break;
            }

            wrapped = true;
            let (mut head, mut head_width) =
                self.widths.fit_prefix(rest, self.width.saturating_sub(1));
            if head.is_empty() {
                // a single glyph wider than the column still has to go somewhere
                let end = rest.chars().next().map_or(rest.len(), char::len_utf8);
                head = &rest[..end];
                head_width = self.widths.text_width(head);
            }

            let mut segment = String::with_capacity(head.len() + 4);
            segment.push_str(head);
            segment.push(WRAP_MARKER);
            segments.push(pad(&segment, head_width + 1, self.width));
            rest = &rest[head.len()..];
        }

        Wrapped { segments, wrapped }
    }
}

fn pad(text: &str, text_width: usize, width: usize) -> String {
    format!("{text}{}", " ".repeat(width.saturating_sub(text_width)))
}
