//! Header layout and column flattening.
//!
//! A column tree renders as one or more header rows. Each group spans the
//! columns of its descendants, and leaves stretch down to the last header
//! row. The body only uses the leaves, in left-to-right order.

use crate::column::{Column, FixedSide, Key, Record};

/// One cell of a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadCell<R> {
    pub key: Option<Key>,
    pub class_name: String,
    pub title: Option<String>,
    pub column: Column<R>,
    /// First leaf slot covered by this cell.
    pub col_start: usize,
    /// Last leaf slot covered by this cell (inclusive).
    pub col_end: usize,
    pub col_span: usize,
    pub row_span: usize,
    pub has_sub_columns: bool,
}

/// Position of a cell in the header rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub index: usize,
}

/// For every header row and leaf slot, the header cell covering it.
///
/// A slot refers to a cell of an upper row when that cell spans down, and is
/// `None` when no cell covers it.
pub type HeadMatrix = Vec<Vec<Option<CellRef>>>;

/// Output of a [`MatrixBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMatrix<R> {
    pub head_cells: Vec<Vec<HeadCell<R>>>,
    pub head_matrix: HeadMatrix,
    /// Leaf columns in visual order.
    pub flat_columns: Vec<Column<R>>,
}

/// Turns a column tree into header rows and flat leaf columns.
pub trait MatrixBuilder<R>: Send + Sync {
    fn build(&self, columns: &[Column<R>]) -> ColumnMatrix<R>;
}

/// Default [`MatrixBuilder`].
///
/// Leaves inherit the fixed side of their group unless they set their own,
/// `FixedSide::Pinned` resolves to the left, and leaves without a key get a
/// positional one (`-0`, `-1-0`, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertColumns;

impl<R: Record> MatrixBuilder<R> for ConvertColumns {
    fn build(&self, columns: &[Column<R>]) -> ColumnMatrix<R> {
        let head_cells = parse_header_rows(columns);
        let flat_columns = flatten_columns(columns, "", None);
        let head_matrix = build_head_matrix(&head_cells, flat_columns.len());
        ColumnMatrix {
            head_cells,
            head_matrix,
            flat_columns,
        }
    }
}

/// Lay out header rows for a column tree.
pub fn parse_header_rows<R: Record>(columns: &[Column<R>]) -> Vec<Vec<HeadCell<R>>> {
    let mut rows = Vec::new();
    fill_row_cells(&mut rows, columns, 0, 0);

    let row_count = rows.len();
    for (row_index, row) in rows.iter_mut().enumerate() {
        for cell in row.iter_mut() {
            cell.row_span = match cell.column.row_span {
                Some(span) => span,
                None if cell.has_sub_columns => 1,
                None => row_count - row_index,
            };
        }
    }
    rows
}

/// Push the cells of `columns` onto `rows[row_index]`, recursing into groups.
/// Returns the number of leaf slots covered.
fn fill_row_cells<R: Record>(
    rows: &mut Vec<Vec<HeadCell<R>>>,
    columns: &[Column<R>],
    col_index: usize,
    row_index: usize,
) -> usize {
    if rows.len() <= row_index {
        rows.resize_with(row_index + 1, Vec::new);
    }

    let mut current = col_index;
    for column in columns {
        let has_sub_columns = column.is_group();
        let mut col_span = 1;
        if has_sub_columns {
            col_span = fill_row_cells(rows, &column.children, current, row_index + 1);
        }
        if let Some(span) = column.col_span {
            col_span = span;
        }

        rows[row_index].push(HeadCell {
            key: column.key.clone(),
            class_name: column.class_name.clone().unwrap_or_default(),
            title: column.title.clone(),
            column: column.clone(),
            col_start: current,
            col_end: (current + col_span).saturating_sub(1),
            col_span,
            row_span: 1,
            has_sub_columns,
        });
        current += col_span;
    }
    current - col_index
}

/// Flatten a column tree to its leaves.
pub fn flatten_columns<R: Record>(
    columns: &[Column<R>],
    parent_key: &str,
    parent_fixed: Option<FixedSide>,
) -> Vec<Column<R>> {
    let mut leaves = Vec::new();
    for (index, column) in columns.iter().enumerate() {
        let fixed = column.fixed.or(parent_fixed).map(FixedSide::resolved);
        let merged_key = format!("{parent_key}-{index}");

        if column.is_group() {
            leaves.extend(flatten_columns(&column.children, &merged_key, fixed));
        } else {
            let mut leaf = column.clone();
            leaf.key.get_or_insert(Key::Str(merged_key));
            leaf.fixed = fixed;
            leaves.push(leaf);
        }
    }
    leaves
}

fn build_head_matrix<R>(rows: &[Vec<HeadCell<R>>], leaf_count: usize) -> HeadMatrix {
    let width = rows
        .iter()
        .flatten()
        .filter(|cell| cell.col_span > 0)
        .map(|cell| cell.col_end + 1)
        .max()
        .unwrap_or(0)
        .max(leaf_count);

    let mut matrix = vec![vec![None; width]; rows.len()];
    for (row_index, row) in rows.iter().enumerate() {
        for (index, cell) in row.iter().enumerate() {
            if cell.col_span == 0 {
                continue;
            }
            let row_end = (row_index + cell.row_span.max(1)).min(rows.len());
            for slots in &mut matrix[row_index..row_end] {
                for slot in &mut slots[cell.col_start..=cell.col_end] {
                    slot.get_or_insert(CellRef {
                        row: row_index,
                        index,
                    });
                }
            }
        }
    }
    matrix
}
