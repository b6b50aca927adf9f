//! Lay a parsed diff out as a fixed-width, box-drawn two-column table.
//!
//! Every emitted line is exactly the configured box width (measured with the
//! [`WidthProvider`]). A content row looks like
//!
//! ```text
//! │ 12│+ let answer = 42;                 │
//! ```
//!
//! with the line number column on the left, a two-character indicator and
//! the wrapped content column on the right.

mod box_drawer;
mod content;
mod symbols;
mod whitespace;

pub use symbols::UsedSymbols;

use crate::model::{Commit, DiffHunk, ParsedDiff, ParsedLine};
use crate::traits::{UnicodeWidths, WidthProvider};
use box_drawer::BoxDrawer;
use content::ContentFormatter;
use symbols::CONTEXT_MARKER;

/// Box width used when nothing else is configured.
pub const DEFAULT_BOX_WIDTH: usize = 50;
/// Narrowest box the layout supports; smaller requests are raised to this.
pub const MIN_BOX_WIDTH: usize = 20;

const MIN_LINE_NUMBER_WIDTH: usize = 2;
const MAX_LINE_NUMBER_WIDTH: usize = 4;
/// Three borders plus the two indicator columns.
const ROW_OVERHEAD: usize = 5;

const INDICATOR_CONTEXT: &str = "  ";
const INDICATOR_DELETION: &str = "- ";
const INDICATOR_ADDITION: &str = "+ ";

/// Rendered text together with the symbols it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub text: String,
    pub symbols: UsedSymbols,
}

/// Renders a [`ParsedDiff`] into a box-drawn table.
///
/// # Example
///
/// ```
/// use boxdiff::{parse_diff, DiffRenderer, UnicodeWidths};
///
/// let diff = parse_diff("diff --git a/a.txt b/a.txt\n@@ -1,1 +1,1 @@\n-foo\n+bar\n");
/// let text = DiffRenderer::new(&UnicodeWidths).box_width(40).render(&diff);
/// assert!(text.contains("│ 1│- foo"));
/// assert!(text.contains("│ 1│+ bar"));
/// ```
pub struct DiffRenderer<'a, W: WidthProvider + ?Sized> {
    widths: &'a W,
    box_width: usize,
    show_legend: bool,
}

impl<'a, W: WidthProvider + ?Sized> DiffRenderer<'a, W> {
    /// Create a renderer with the default width and the legend enabled.
    pub fn new(widths: &'a W) -> Self {
        Self {
            widths,
            box_width: DEFAULT_BOX_WIDTH,
            show_legend: true,
        }
    }

    /// Set the total box width in columns.
    pub fn box_width(mut self, box_width: usize) -> Self {
        self.box_width = box_width;
        self
    }

    /// Enable or disable the trailing legend box.
    pub fn legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    /// Render `diff` to text.
    pub fn render(&self, diff: &ParsedDiff) -> String {
        self.render_output(diff).text
    }

    /// Render `diff`, also reporting which symbols were used.
    pub fn render_output(&self, diff: &ParsedDiff) -> RenderOutput {
        let box_width = if self.box_width < MIN_BOX_WIDTH {
            log::warn!(
                "Box width {} is below the minimum of {}, using {}",
                self.box_width,
                MIN_BOX_WIDTH,
                MIN_BOX_WIDTH
            );
            MIN_BOX_WIDTH
        } else {
            self.box_width
        };

        let mut pass = RenderPass::new(self.widths, box_width);
        pass.binary_files(diff);
        pass.pure_renames(diff);
        pass.hunks(diff);
        if self.show_legend {
            pass.legend();
        }

        log::debug!(
            "Rendered {} hunks into {} lines at width {}",
            diff.hunks.len(),
            pass.lines.len(),
            box_width
        );
        pass.finish()
    }
}

/// Render with the default [`UnicodeWidths`] provider and legend enabled.
pub fn render_diff(diff: &ParsedDiff, box_width: usize) -> String {
    DiffRenderer::new(&UnicodeWidths)
        .box_width(box_width)
        .render(diff)
}

/// Digits needed for the largest line number of `hunk`, clamped to `2..=4`.
pub fn line_number_width(hunk: &DiffHunk) -> usize {
    let digits = hunk.max_line_number().to_string().len();
    digits.clamp(MIN_LINE_NUMBER_WIDTH, MAX_LINE_NUMBER_WIDTH)
}

/// Width of the content column for a box and line number column.
pub fn content_width(box_width: usize, line_number_width: usize) -> usize {
    box_width.saturating_sub(line_number_width + ROW_OVERHEAD)
}

/// State of one render call.
struct RenderPass<'a, W: WidthProvider + ?Sized> {
    widths: &'a W,
    drawer: BoxDrawer<'a, W>,
    box_width: usize,
    lines: Vec<String>,
    symbols: UsedSymbols,
    last_commit: Option<String>,
}

impl<'a, W: WidthProvider + ?Sized> RenderPass<'a, W> {
    fn new(widths: &'a W, box_width: usize) -> Self {
        Self {
            widths,
            drawer: BoxDrawer::new(widths, box_width),
            box_width,
            lines: Vec::new(),
            symbols: UsedSymbols::default(),
            last_commit: None,
        }
    }

    fn binary_files(&mut self, diff: &ParsedDiff) {
        for path in &diff.binary_files {
            self.commit_header(diff.commit_for(path));
            let rows = [
                format!("FILE: {path} (binary)"),
                "Binary file changed".to_string(),
            ];
            self.lines.extend(self.drawer.info_box(&rows));
        }
    }

    fn pure_renames(&mut self, diff: &ParsedDiff) {
        for (new_path, old_path) in diff.pure_renames() {
            self.commit_header(diff.commit_for(new_path));
            let rows = [
                format!("FILE: {new_path} (renamed)"),
                format!("Renamed from: {old_path}"),
            ];
            self.lines.extend(self.drawer.info_box(&rows));
        }
    }

    fn hunks(&mut self, diff: &ParsedDiff) {
        let mut open_table: Option<usize> = None;
        let mut previous_file: Option<&str> = None;

        for hunk in &diff.hunks {
            let number_width = line_number_width(hunk);

            if let Some(commit) = self.switch_commit(hunk.commit.as_ref()) {
                // a commit box cannot sit inside an open table
                if let Some(width) = open_table.take() {
                    self.lines.push(self.drawer.bottom_border(width));
                }
                self.lines.extend(self.drawer.commit_box(commit));
            }

            let file_text = format!(" {} ", hunk.file);
            if open_table.is_none() {
                self.lines
                    .push(self.drawer.top_border(number_width, &file_text));
            } else if previous_file != Some(hunk.file.as_str()) {
                self.lines.push(self.drawer.divider(number_width, &file_text));
            } else {
                let context_text = if hunk.context.is_empty() {
                    String::new()
                } else {
                    format!(" {CONTEXT_MARKER} {} ", hunk.context)
                };
                self.lines
                    .push(self.drawer.divider(number_width, &context_text));
            }

            self.hunk_rows(hunk, number_width);
            open_table = Some(number_width);
            previous_file = Some(hunk.file.as_str());
        }

        if let Some(width) = open_table {
            self.lines.push(self.drawer.bottom_border(width));
        }
    }

    fn hunk_rows(&mut self, hunk: &DiffHunk, number_width: usize) {
        let formatter =
            ContentFormatter::new(self.widths, content_width(self.box_width, number_width));
        let mut old_line = hunk.old_start;
        let mut new_line = hunk.new_start;

        for line in &hunk.lines {
            match line {
                ParsedLine::Context(content) => {
                    self.print_row(&formatter, number_width, new_line, INDICATOR_CONTEXT, content);
                    old_line = old_line.saturating_add(1);
                    new_line = new_line.saturating_add(1);
                }
                ParsedLine::Deletion(content) => {
                    self.symbols.minus = true;
                    self.print_row(&formatter, number_width, old_line, INDICATOR_DELETION, content);
                    old_line = old_line.saturating_add(1);
                }
                ParsedLine::Addition(content) => {
                    self.symbols.plus = true;
                    self.print_row(&formatter, number_width, new_line, INDICATOR_ADDITION, content);
                    new_line = new_line.saturating_add(1);
                }
                ParsedLine::Modification(pair) => {
                    self.symbols.minus = true;
                    self.symbols.plus = true;
                    let (old_content, new_content) = whitespace::visualize(pair, &mut self.symbols);
                    self.print_row(
                        &formatter,
                        number_width,
                        old_line,
                        INDICATOR_DELETION,
                        &old_content,
                    );
                    self.print_row(
                        &formatter,
                        number_width,
                        new_line,
                        INDICATOR_ADDITION,
                        &new_content,
                    );
                    old_line = old_line.saturating_add(1);
                    new_line = new_line.saturating_add(1);
                }
            }
        }
    }

    fn print_row(
        &mut self,
        formatter: &ContentFormatter<'_, W>,
        number_width: usize,
        line_number: u32,
        indicator: &str,
        content: &str,
    ) {
        let wrapped = formatter.format(content);
        if wrapped.wrapped {
            self.symbols.wrap = true;
        }

        let number = format_line_number(line_number, number_width);
        let blank = " ".repeat(number_width);
        for (idx, segment) in wrapped.segments.iter().enumerate() {
            let row = if idx == 0 {
                format!("│{number}│{indicator}{segment}│")
            } else {
                format!("│{blank}│{INDICATOR_CONTEXT}{segment}│")
            };
            self.lines.push(row);
        }
    }

    fn legend(&mut self) {
        if !self.symbols.any() {
            return;
        }
        let entries = self.symbols.legend_entries();
        self.lines.extend(self.drawer.legend_box(&entries));
    }

    /// Print a commit box if `commit` differs from the previous item's.
    fn commit_header(&mut self, commit: Option<&Commit>) {
        if let Some(commit) = self.switch_commit(commit) {
            self.lines.extend(self.drawer.commit_box(commit));
        }
    }

    /// Track the owning commit; returns it when it changed.
    fn switch_commit<'c>(&mut self, commit: Option<&'c Commit>) -> Option<&'c Commit> {
        let hash = commit.map(|c| c.hash.as_str());
        if hash == self.last_commit.as_deref() {
            return None;
        }
        self.last_commit = hash.map(str::to_string);
        commit
    }

    fn finish(self) -> RenderOutput {
        RenderOutput {
            text: self.lines.join("\n"),
            symbols: self.symbols,
        }
    }
}

/// Right-aligned line number; numbers wider than the column keep their
/// leading digits.
fn format_line_number(line_number: u32, width: usize) -> String {
    let digits = line_number.to_string();
    if digits.len() > width {
        digits[..width].to_string()
    } else {
        format!("{digits:>width$}")
    }
}
