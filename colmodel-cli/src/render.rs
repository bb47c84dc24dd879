//! Plain-text rendering of a resolved column model.

use colmodel::{CellRef, HeadCell, ResolvedColumns};
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEPARATOR: &str = " | ";

/// Widest a column marked `ellipsis` may grow.
const ELLIPSIS_WIDTH: usize = 16;

/// Renders header rows and body rows as an aligned text grid.
pub struct TextTable<'a> {
    resolved: &'a ResolvedColumns<Value>,
    body: Vec<Vec<String>>,
    widths: Vec<usize>,
    ellipsis: Vec<bool>,
}

impl<'a> TextTable<'a> {
    pub fn new(resolved: &'a ResolvedColumns<Value>, rows: &[Value]) -> Self {
        let body: Vec<Vec<String>> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                resolved
                    .flat_columns
                    .iter()
                    .map(|column| column.render_cell(row, index).to_plain_text())
                    .collect()
            })
            .collect();

        let mut widths = vec![1; resolved.flat_columns.len()];
        for row in resolved.head_cells() {
            for cell in row.iter().filter(|cell| cell.col_span == 1) {
                if let Some(width) = widths.get_mut(cell.col_start) {
                    *width = (*width).max(title_of(cell).width());
                }
            }
        }
        for row in &body {
            for (width, text) in widths.iter_mut().zip(row) {
                *width = (*width).max(text.width());
            }
        }

        let ellipsis: Vec<bool> = resolved.flat_columns.iter().map(|c| c.ellipsis).collect();
        for (width, _) in widths.iter_mut().zip(&ellipsis).filter(|(_, e)| **e) {
            *width = (*width).min(ELLIPSIS_WIDTH);
        }

        Self {
            resolved,
            body,
            widths,
            ellipsis,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = (0..self.resolved.head_cells().len())
            .map(|row| self.header_line(row))
            .collect();

        let rule_width = self.span_width(0, self.widths.len().saturating_sub(1));
        lines.push("-".repeat(rule_width));

        for row in &self.body {
            let cells: Vec<String> = row
                .iter()
                .zip(self.widths.iter().zip(&self.ellipsis))
                .map(|(text, (width, ellipsis))| {
                    if *ellipsis {
                        ellipsize(text, *width)
                    } else {
                        pad(text, *width)
                    }
                })
                .collect();
            lines.push(cells.join(SEPARATOR).trim_end().to_string());
        }
        lines
    }

    fn header_line(&self, row: usize) -> String {
        let cells = &self.resolved.head_cells()[row];
        let slots = &self.resolved.head_matrix()[row];
        let mut parts = Vec::new();

        let mut slot = 0;
        while slot < self.widths.len() {
            match slots.get(slot).copied().flatten() {
                Some(CellRef { row: owner, index }) if owner == row => {
                    let cell = &cells[index];
                    let end = cell.col_end.min(self.widths.len() - 1).max(slot);
                    parts.push(pad(&title_of(cell), self.span_width(slot, end)));
                    slot = end + 1;
                }
                // Covered by a cell spanning down from above, or empty.
                _ => {
                    parts.push(" ".repeat(self.widths[slot]));
                    slot += 1;
                }
            }
        }
        parts.join(SEPARATOR).trim_end().to_string()
    }

    fn span_width(&self, start: usize, end: usize) -> usize {
        let Some(widths) = self.widths.get(start..=end) else {
            return 0;
        };
        widths.iter().sum::<usize>() + SEPARATOR.len() * widths.len().saturating_sub(1)
    }
}

/// One line per flat column: key, fixed side and width.
pub fn column_summary(resolved: &ResolvedColumns<Value>) -> Vec<String> {
    resolved
        .flat_columns
        .iter()
        .map(|column| {
            let key = column.key.as_ref().map(ToString::to_string).unwrap_or_default();
            let kind = if column.is_expand_column() { " (expand)" } else { "" };
            let fixed = column.fixed.map_or_else(|| "-".to_string(), |f| f.to_string());
            let width = column.width.map_or_else(|| "auto".to_string(), |w| w.to_string());
            format!("{key}{kind}  fixed={fixed}  width={width}")
        })
        .collect()
}

fn title_of(cell: &HeadCell<Value>) -> String {
    cell.title.clone().unwrap_or_default()
}

/// Pad or truncate `text` to exactly `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

/// Like [`pad`], but overlong text ends in `…`.
fn ellipsize(text: &str, width: usize) -> String {
    if text.width() <= width || width == 0 {
        return pad(text, width);
    }
    let mut out = pad(text, width - 1);
    out.push('…');
    out
}
