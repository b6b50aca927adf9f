//! Border, info box and legend lines.

use super::symbols::ELLIPSIS;
use crate::model::Commit;
use crate::traits::WidthProvider;

const H: &str = "─";
const V: char = '│';
const DOUBLE_H: &str = "═";
const DOUBLE_V: char = '║';

/// Room taken by `│ ` and ` │` around info box text.
const INFO_PADDING: usize = 4;

const LEGEND_TITLE: &str = "┌─ Legend ";
const LEGEND_GAP: &str = "  ";

/// Draws every line that is not a content row. All lines are exactly
/// `box_width` columns wide.
pub(crate) struct BoxDrawer<'a, W: WidthProvider + ?Sized> {
    widths: &'a W,
    box_width: usize,
}

impl<'a, W: WidthProvider + ?Sized> BoxDrawer<'a, W> {
    pub fn new(widths: &'a W, box_width: usize) -> Self {
        Self { widths, box_width }
    }

    /// `┌──┬── text ───┐`, opens a table with a file name.
    pub fn top_border(&self, line_number_width: usize, text: &str) -> String {
        self.embedded_border('┌', '┬', '┐', line_number_width, text)
    }

    /// `├──┼── text ───┤`, a later file or a hunk separator inside a table.
    pub fn divider(&self, line_number_width: usize, text: &str) -> String {
        self.embedded_border('├', '┼', '┤', line_number_width, text)
    }

    /// `└──┴──────────┘`
    pub fn bottom_border(&self, line_number_width: usize) -> String {
        let rule = self.box_width.saturating_sub(line_number_width + 3);
        format!("└{}┴{}┘", H.repeat(line_number_width), H.repeat(rule))
    }

    /// Single-line box with one row per entry of `rows`.
    pub fn info_box(&self, rows: &[String]) -> Vec<String> {
        let inner = self.box_width.saturating_sub(2);
        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(format!("┌{}┐", H.repeat(inner)));
        lines.extend(rows.iter().map(|row| self.text_row(V, row)));
        lines.push(format!("└{}┘", H.repeat(inner)));
        lines
    }

    /// Double-line box announcing the commit that owns what follows.
    pub fn commit_box(&self, commit: &Commit) -> Vec<String> {
        let inner = self.box_width.saturating_sub(2);
        let mut lines = vec![format!("╔{}╗", DOUBLE_H.repeat(inner))];
        lines.push(self.text_row(DOUBLE_V, &format!("COMMIT {}", commit.short_hash())));
        if !commit.subject.is_empty() {
            lines.push(self.text_row(DOUBLE_V, &commit.subject));
        }
        if !commit.body.is_empty() {
            lines.extend(commit.body.lines().map(|l| self.text_row(DOUBLE_V, l)));
        }
        lines.push(format!("╚{}╝", DOUBLE_H.repeat(inner)));
        lines
    }

    /// Titled box listing legend entries, packed into as few rows as fit.
    pub fn legend_box(&self, entries: &[String]) -> Vec<String> {
        let capacity = self.box_width.saturating_sub(INFO_PADDING);
        let mut rows: Vec<String> = Vec::new();
        let mut current = String::new();

        for entry in entries {
            if current.is_empty() {
                current.push_str(entry);
                continue;
            }
            let joined = self.widths.text_width(&current)
                + LEGEND_GAP.len()
                + self.widths.text_width(entry);
            if joined <= capacity {
                current.push_str(LEGEND_GAP);
                current.push_str(entry);
            } else {
                rows.push(std::mem::take(&mut current));
                current.push_str(entry);
            }
        }
        if !current.is_empty() {
            rows.push(current);
        }

        let title_width = self.widths.text_width(LEGEND_TITLE);
        let fill = self.box_width.saturating_sub(title_width + 1);
        let mut lines = vec![format!("{LEGEND_TITLE}{}┐", H.repeat(fill))];
        lines.extend(rows.iter().map(|row| self.text_row(V, row)));
        lines.push(format!("└{}┘", H.repeat(self.box_width.saturating_sub(2))));
        lines
    }

    /// Fit `text` into `max_width` columns, cutting with an ellipsis.
    pub fn fit_text(&self, text: &str, max_width: usize) -> (String, usize) {
        let width = self.widths.text_width(text);
        if width <= max_width {
            return (text.to_string(), width);
        }
        if max_width == 0 {
            return (String::new(), 0);
        }

        let (head, head_width) = self.widths.fit_prefix(text, max_width - 1);
        (format!("{head}{ELLIPSIS}"), head_width + 1)
    }

    fn embedded_border(
        &self,
        left: char,
        junction: char,
        right: char,
        line_number_width: usize,
        text: &str,
    ) -> String {
        let available = self.box_width.saturating_sub(2 + line_number_width + 3);
        let (text, text_width) = self.fit_text(text, available);
        format!(
            "{left}{}{junction}{H}{H}{text}{}{right}",
            H.repeat(line_number_width),
            H.repeat(available.saturating_sub(text_width)),
        )
    }

    fn text_row(&self, edge: char, text: &str) -> String {
        let inner = self.box_width.saturating_sub(INFO_PADDING);
        let (text, text_width) = self.fit_text(text, inner);
        format!(
            "{edge} {text}{} {edge}",
            " ".repeat(inner.saturating_sub(text_width))
        )
    }
}
