//! Column width distribution.

use log::trace;

use crate::column::{Column, ColumnWidth, Record};

/// Assigns concrete widths to flat columns.
///
/// Returns the filled columns and the resulting scroll width.
pub trait WidthFiller<R>: Send + Sync {
    fn fill(
        &self,
        columns: &[Column<R>],
        scroll_width: Option<u32>,
        client_width: u32,
    ) -> (Vec<Column<R>>, Option<u32>);
}

/// Default [`WidthFiller`].
///
/// Only active when a positive scroll width is given. Columns without a width
/// share what is left of `max(scroll_width, client_width)`; if the table is
/// still narrower than that, every column grows proportionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillWidth;

impl<R: Record> WidthFiller<R> for FillWidth {
    fn fill(
        &self,
        columns: &[Column<R>],
        scroll_width: Option<u32>,
        client_width: u32,
    ) -> (Vec<Column<R>>, Option<u32>) {
        let Some(scroll_width) = scroll_width.filter(|width| *width > 0) else {
            return (columns.to_vec(), scroll_width);
        };

        let declared: Vec<Option<u32>> = columns
            .iter()
            .map(|column| column.width.and_then(|width| width.resolve(scroll_width)))
            .collect();

        let total_width: u64 = declared.iter().flatten().map(|w| u64::from(*w)).sum();
        let miss_count = declared.iter().filter(|w| w.is_none()).count() as u64;

        let max_fit_width = u64::from(scroll_width.max(client_width));
        let mut rest_width = max_fit_width.saturating_sub(total_width).max(miss_count);
        let mut rest_count = miss_count;
        let avg_width = if miss_count > 0 {
            rest_width / miss_count
        } else {
            0
        };

        let mut widths: Vec<u64> = Vec::with_capacity(columns.len());
        for width in &declared {
            match width {
                Some(width) => widths.push(u64::from(*width)),
                None => {
                    widths.push(if rest_count == 1 { rest_width } else { avg_width });
                    rest_width = rest_width.saturating_sub(avg_width);
                    rest_count -= 1;
                }
            }
        }

        let real_total: u64 = widths.iter().sum();
        if real_total > 0 && real_total < max_fit_width {
            let scale = max_fit_width as f64 / real_total as f64;
            let mut rest = max_fit_width;
            let last = widths.len() - 1;
            for (index, width) in widths.iter_mut().enumerate() {
                let scaled = (*width as f64 * scale).floor() as u64;
                let assigned = if index == last { rest } else { scaled };
                rest = rest.saturating_sub(scaled);
                *width = assigned;
            }
        }

        trace!("filled {} columns to {real_total}px (fit {max_fit_width}px)", columns.len());

        let filled = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| Column {
                width: Some(ColumnWidth::Px(clamp_px(*width))),
                ..column.clone()
            })
            .collect();

        (filled, Some(clamp_px(real_total.max(max_fit_width))))
    }
}

fn clamp_px(width: u64) -> u32 {
    u32::try_from(width).unwrap_or(u32::MAX)
}
