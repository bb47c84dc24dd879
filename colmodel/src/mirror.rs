//! Right-to-left mirroring of fixed sides.

use crate::column::{Column, Record};

/// Swap `fixed` left and right on every column. Nothing else changes.
///
/// Runs on flattened leaves: fixed sides are inherited from groups in logical
/// (left-to-right) order first.
pub fn revert_for_rtl<R: Record>(columns: &[Column<R>]) -> Vec<Column<R>> {
    columns
        .iter()
        .map(|column| Column {
            fixed: column.fixed.map(|side| side.mirrored()),
            ..column.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::FixedSide;

    fn sides(columns: &[Column<()>]) -> Vec<Option<FixedSide>> {
        columns.iter().map(|c| c.fixed).collect()
    }

    #[test]
    fn test_swaps_left_and_right() {
        let columns: Vec<Column<()>> = vec![
            Column::new().key("a").fixed(FixedSide::Left),
            Column::new().key("b"),
            Column::new().key("c").fixed(FixedSide::Right),
            Column::new().key("d").fixed(FixedSide::Pinned),
        ];

        let mirrored = revert_for_rtl(&columns);
        assert_eq!(
            sides(&mirrored),
            vec![
                Some(FixedSide::Right),
                None,
                Some(FixedSide::Left),
                Some(FixedSide::Pinned)
            ]
        );
        assert_eq!(mirrored[0].key, columns[0].key);
    }

    #[test]
    fn test_mirroring_twice_restores_sides() {
        let columns: Vec<Column<()>> = vec![
            Column::new().fixed(FixedSide::Left),
            Column::new(),
            Column::new().fixed(FixedSide::Right),
        ];
        assert_eq!(revert_for_rtl(&revert_for_rtl(&columns)), columns);
    }
}
