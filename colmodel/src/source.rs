//! Column source normalization.

use crate::column::{Column, ColumnEntry};
use crate::element::{ColumnNode, convert_children_to_columns};

/// Where a table's columns are declared.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSource<'a, R> {
    Columns(&'a [ColumnEntry<R>]),
    Elements(&'a [ColumnNode<R>]),
}

impl<'a, R: Clone> ColumnSource<'a, R> {
    /// Pick the source in effect. An explicit column list wins over the
    /// element tree, even when empty.
    pub fn merged(
        columns: Option<&'a [ColumnEntry<R>]>,
        children: Option<&'a [ColumnNode<R>]>,
    ) -> Option<Self> {
        match (columns, children) {
            (Some(columns), _) => Some(ColumnSource::Columns(columns)),
            (None, Some(children)) => Some(ColumnSource::Elements(children)),
            (None, None) => None,
        }
    }

    pub fn into_entries(self) -> Vec<ColumnEntry<R>> {
        match self {
            ColumnSource::Columns(columns) => columns.to_vec(),
            ColumnSource::Elements(children) => convert_children_to_columns(children),
        }
    }
}

/// Merge the column sources into one list and drop hidden columns.
pub fn normalize_columns<R: Clone>(
    columns: Option<&[ColumnEntry<R>]>,
    children: Option<&[ColumnNode<R>]>,
) -> Vec<ColumnEntry<R>> {
    let merged = ColumnSource::merged(columns, children)
        .map(ColumnSource::into_entries)
        .unwrap_or_default();

    filter_hidden_columns(&merged)
}

/// Remove hidden columns, with their subtrees, at every depth.
pub fn filter_hidden_columns<R: Clone>(entries: &[ColumnEntry<R>]) -> Vec<ColumnEntry<R>> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            ColumnEntry::Column(column) => filter_column(column).map(ColumnEntry::Column),
            ColumnEntry::Expand => Some(ColumnEntry::Expand),
        })
        .collect()
}

fn filter_column<R: Clone>(column: &Column<R>) -> Option<Column<R>> {
    if column.hidden {
        return None;
    }

    if !column.is_group() {
        return Some(column.clone());
    }

    let children = column.children.iter().filter_map(filter_column).collect();
    Some(Column {
        children,
        ..column.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Key;
    use crate::element::ColumnElement;

    fn keys(entries: &[ColumnEntry<()>]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| match entry {
                ColumnEntry::Column(c) => c.key.as_ref().map(Key::to_string).unwrap_or_default(),
                ColumnEntry::Expand => "<expand>".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_columns_win_over_children() {
        let columns: Vec<ColumnEntry<()>> = vec![Column::new().key("a").into()];
        let children: Vec<ColumnNode<()>> = vec![ColumnElement::new(Column::new()).key("b").into()];

        let merged = normalize_columns(Some(columns.as_slice()), Some(children.as_slice()));
        assert_eq!(keys(&merged), vec!["a"]);

        let empty: Vec<ColumnEntry<()>> = Vec::new();
        let merged = normalize_columns(Some(empty.as_slice()), Some(children.as_slice()));
        assert!(merged.is_empty());
    }

    #[test]
    fn test_source_selection() {
        let columns: Vec<ColumnEntry<()>> = vec![Column::new().key("a").into()];
        let children: Vec<ColumnNode<()>> = vec![ColumnNode::text("x")];

        assert!(matches!(
            ColumnSource::merged(Some(columns.as_slice()), Some(children.as_slice())),
            Some(ColumnSource::Columns(_))
        ));
        assert!(matches!(
            ColumnSource::merged(None, Some(children.as_slice())),
            Some(ColumnSource::Elements(_))
        ));
        assert_eq!(ColumnSource::<()>::merged(None, None), None);
    }

    #[test]
    fn test_children_used_without_columns() {
        let children: Vec<ColumnNode<()>> = vec![ColumnElement::new(Column::new()).key("b").into()];
        let merged: Vec<ColumnEntry<()>> = normalize_columns(None, Some(children.as_slice()));
        assert_eq!(keys(&merged), vec!["b"]);
    }

    #[test]
    fn test_hidden_columns_removed_at_every_depth() {
        let columns: Vec<ColumnEntry<()>> = vec![
            Column::new().key("a").hidden(true).into(),
            ColumnEntry::Expand,
            Column::new()
                .key("group")
                .child(Column::new().key("b"))
                .child(Column::new().key("c").hidden(true))
                .into(),
        ];

        let filtered = filter_hidden_columns(&columns);
        assert_eq!(keys(&filtered), vec!["<expand>", "group"]);

        let group = filtered[1].as_column().unwrap();
        assert_eq!(group.children.len(), 1);
        assert_eq!(group.children[0].key, Some(Key::from("b")));
    }

    #[test]
    fn test_source_is_not_mutated() {
        let columns: Vec<ColumnEntry<()>> = vec![Column::new().key("a").hidden(true).into()];
        let _ = normalize_columns(Some(columns.as_slice()), None);
        assert_eq!(columns.len(), 1);
    }
}
