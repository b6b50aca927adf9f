//! Make whitespace-only edits visible.

use super::symbols::{UsedSymbols, SPACE_GLYPH, TAB_GLYPH};
use crate::model::ModificationPair;
use std::borrow::Cow;

/// Both sides of a modification, ready for display.
///
/// When the pair differs only in spaces and tabs, those characters are
/// replaced by glyphs on both sides and the matching symbol flags are set.
/// Any other pair is returned untouched.
pub(crate) fn visualize<'p>(
    pair: &'p ModificationPair,
    symbols: &mut UsedSymbols,
) -> (Cow<'p, str>, Cow<'p, str>) {
    if !pair.is_whitespace_only() {
        return (
            Cow::Borrowed(pair.old_content.as_str()),
            Cow::Borrowed(pair.new_content.as_str()),
        );
    }

    (
        reveal(&pair.old_content, symbols),
        reveal(&pair.new_content, symbols),
    )
}

fn reveal<'t>(text: &'t str, symbols: &mut UsedSymbols) -> Cow<'t, str> {
    if !text.contains([' ', '\t']) {
        return Cow::Borrowed(text);
    }

    let revealed = text
        .chars()
        .map(|c| match c {
            ' ' => {
                symbols.space = true;
                SPACE_GLYPH
            }
            '\t' => {
                symbols.tab = true;
                TAB_GLYPH
            }
            other => other,
        })
        .collect::<String>();
    Cow::Owned(revealed)
}
