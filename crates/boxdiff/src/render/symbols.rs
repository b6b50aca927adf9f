//! Glyphs used in the rendered table and the legend that explains them.

/// Marks a segment that continues on the next row.
pub(crate) const WRAP_MARKER: char = '↩';
/// Replaces a space in a whitespace-only change.
pub(crate) const SPACE_GLYPH: char = '·';
/// Replaces a tab in a whitespace-only change.
pub(crate) const TAB_GLYPH: char = '→';
/// Cut-off marker for text that does not fit.
pub(crate) const ELLIPSIS: char = '…';
/// Introduces the hunk context in a separator.
pub(crate) const CONTEXT_MARKER: char = '⌁';

/// Symbols that appeared in one render call.
///
/// Only the symbols set here end up in the legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsedSymbols {
    pub minus: bool,
    pub plus: bool,
    pub space: bool,
    pub tab: bool,
    pub wrap: bool,
}

impl UsedSymbols {
    /// Whether anything needs explaining.
    pub fn any(&self) -> bool {
        self.minus || self.plus || self.space || self.tab || self.wrap
    }

    /// Legend entries for the used symbols, in a fixed order.
    pub(crate) fn legend_entries(&self) -> Vec<String> {
        [
            (self.minus, '-', "del"),
            (self.plus, '+', "add"),
            (self.space, SPACE_GLYPH, "space"),
            (self.tab, TAB_GLYPH, "tab"),
            (self.wrap, WRAP_MARKER, "wrap"),
        ]
        .into_iter()
        .filter(|(used, _, _)| *used)
        .map(|(_, glyph, label)| format!("{glyph} {label}"))
        .collect()
    }
}
