//! Detection of gaps in fixed column bands.
//!
//! Left-fixed columns must form a prefix of the flat column list and
//! right-fixed columns a suffix. A column inside either band that is not
//! fixed to that side breaks sticky rendering.

use crate::column::{Column, FixedSide};

/// Whether a non-fixed column sits inside a fixed band.
///
/// The two sides are scanned independently, each from its own anchor: the
/// last left-fixed column and the first right-fixed column.
pub fn has_gap_fixed<R>(columns: &[Column<R>]) -> bool {
    has_left_gap(columns) || has_right_gap(columns)
}

fn is_left(fixed: Option<FixedSide>) -> bool {
    fixed.is_some_and(FixedSide::is_left)
}

fn is_right(fixed: Option<FixedSide>) -> bool {
    fixed == Some(FixedSide::Right)
}

fn has_left_gap<R>(columns: &[Column<R>]) -> bool {
    let Some(last_left) = columns.iter().rposition(|c| is_left(c.fixed)) else {
        return false;
    };
    columns[..=last_left].iter().any(|c| !is_left(c.fixed))
}

fn has_right_gap<R>(columns: &[Column<R>]) -> bool {
    let Some(first_right) = columns.iter().position(|c| is_right(c.fixed)) else {
        return false;
    };
    columns[first_right..].iter().any(|c| !is_right(c.fixed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(sides: &[Option<FixedSide>]) -> Vec<Column<()>> {
        sides
            .iter()
            .map(|side| Column {
                fixed: *side,
                ..Column::new()
            })
            .collect()
    }

    const L: Option<FixedSide> = Some(FixedSide::Left);
    const R: Option<FixedSide> = Some(FixedSide::Right);
    const P: Option<FixedSide> = Some(FixedSide::Pinned);
    const N: Option<FixedSide> = None;

    #[test]
    fn test_no_fixed_columns() {
        assert!(!has_gap_fixed(&columns(&[N, N, N])));
        assert!(!has_gap_fixed(&columns(&[])));
    }

    #[test]
    fn test_contiguous_bands() {
        assert!(!has_gap_fixed(&columns(&[L, L, N, N, R])));
        assert!(!has_gap_fixed(&columns(&[L, P, N, R, R])));
        assert!(!has_gap_fixed(&columns(&[L, L, R])));
        assert!(!has_gap_fixed(&columns(&[R])));
    }

    #[test]
    fn test_left_gap() {
        assert!(has_gap_fixed(&columns(&[L, N, L])));
        assert!(has_gap_fixed(&columns(&[N, L])));
    }

    #[test]
    fn test_right_gap() {
        assert!(has_gap_fixed(&columns(&[R, N])));
        assert!(has_gap_fixed(&columns(&[N, R, N, R])));
        assert!(has_gap_fixed(&columns(&[R, L])));
    }

    #[test]
    fn test_pinned_inside_right_band_is_a_gap() {
        assert!(has_gap_fixed(&columns(&[N, R, P])));
    }
}
