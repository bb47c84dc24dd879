//! Caller-supplied column transforms and the empty-table fallback.

use std::sync::Arc;

use crate::cell::Cell;
use crate::column::{Column, ColumnEntry, Record};

/// Rewrites the column list after the expand column is placed, e.g. to add
/// selection columns.
pub type TransformFn<R> = Arc<dyn Fn(Vec<ColumnEntry<R>>) -> Vec<ColumnEntry<R>> + Send + Sync>;

/// Apply `transform` and make sure at least one column remains.
///
/// Expand markers left in the output are dropped: by now the expand column
/// has been placed, and a bare marker has nothing to render.
pub fn apply_transform<R: Record>(
    columns: &[ColumnEntry<R>],
    transform: Option<&TransformFn<R>>,
) -> Vec<Column<R>> {
    let transformed = match transform {
        Some(transform) => transform(columns.to_vec()),
        None => columns.to_vec(),
    };

    let mut merged: Vec<Column<R>> = transformed
        .into_iter()
        .filter_map(ColumnEntry::into_column)
        .collect();

    if merged.is_empty() {
        merged.push(placeholder_column());
    }
    merged
}

/// Column rendering nothing, used when a table has no columns.
pub fn placeholder_column<R: Record>() -> Column<R> {
    Column::new().render(|_, _| Cell::Empty)
}
