//! Column descriptors and the values they carry.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::WidthParseError;

/// Bound shared by every row record type a table can display.
pub trait Record: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Record for T {}

// =============================================================================
// Key
// =============================================================================

/// Identifies a column or a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Key::Str(value.to_string()), Key::Int)
    }
}

// =============================================================================
// Fixed side / direction
// =============================================================================

/// Sticky side of a column during horizontal scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedSide {
    Left,
    Right,
    /// Fixed without naming a side. Counts as left.
    Pinned,
}

impl FixedSide {
    /// Whether this side pins the column to the left edge.
    pub fn is_left(self) -> bool {
        matches!(self, FixedSide::Left | FixedSide::Pinned)
    }

    /// Swap left and right. `Pinned` is unchanged.
    pub fn mirrored(self) -> Self {
        match self {
            FixedSide::Left => FixedSide::Right,
            FixedSide::Right => FixedSide::Left,
            FixedSide::Pinned => FixedSide::Pinned,
        }
    }

    /// Resolve `Pinned` to the side it stands for.
    pub fn resolved(self) -> Self {
        match self {
            FixedSide::Pinned => FixedSide::Left,
            side => side,
        }
    }
}

impl fmt::Display for FixedSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FixedSide::Left => "left",
            FixedSide::Right => "right",
            FixedSide::Pinned => "true",
        })
    }
}

/// Writing direction of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

// =============================================================================
// Width
// =============================================================================

/// Declared width of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    /// Absolute width in pixels.
    Px(u32),
    /// Percentage of the table's scroll width.
    Percent(f32),
}

impl ColumnWidth {
    /// Resolve against the total scroll width. Returns `None` for zero widths,
    /// which count as missing.
    pub fn resolve(self, total: u32) -> Option<u32> {
        let px = match self {
            ColumnWidth::Px(px) => px,
            ColumnWidth::Percent(p) => (f64::from(total) * f64::from(p) / 100.0).floor() as u32,
        };
        (px > 0).then_some(px)
    }
}

impl FromStr for ColumnWidth {
    type Err = WidthParseError;

    /// Accepts `"120"`, `"120px"` and `"25%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(WidthParseError::Empty);
        }

        if let Some(percent) = s.strip_suffix('%') {
            return percent
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|p| p.is_finite() && *p >= 0.0)
                .map(ColumnWidth::Percent)
                .ok_or_else(|| WidthParseError::Invalid(s.to_string()));
        }

        let px = s.strip_suffix("px").unwrap_or(s).trim();
        px.parse::<u32>()
            .map(ColumnWidth::Px)
            .map_err(|_| WidthParseError::Invalid(s.to_string()))
    }
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnWidth::Px(px) => write!(f, "{px}px"),
            ColumnWidth::Percent(p) => write!(f, "{p}%"),
        }
    }
}

// =============================================================================
// Render
// =============================================================================

/// Body cell renderer: `(record, row_index) -> Cell`.
///
/// Compared by identity, so two columns built from the same renderer are equal.
pub struct Render<R>(Arc<dyn Fn(&R, usize) -> Cell + Send + Sync>);

impl<R> Render<R> {
    pub fn new(f: impl Fn(&R, usize) -> Cell + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, record: &R, index: usize) -> Cell {
        (self.0)(record, index)
    }
}

impl<R> Clone for Render<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R> PartialEq for Render<R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<R> fmt::Debug for Render<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Render(..)")
    }
}

// =============================================================================
// Column
// =============================================================================

/// Tag for columns the table synthesizes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Expand,
}

/// Table-internal column definition, carried alongside the public fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalColumn {
    /// Class applied to the `<col>` of this column.
    pub class_name: String,
    pub column_type: ColumnType,
}

/// A column descriptor.
///
/// A column with children is a group: it only renders a header cell spanning
/// its descendants and never a body cell.
///
/// # Example
///
/// ```ignore
/// let columns: Vec<ColumnEntry<User>> = vec![
///     Column::new().key("name").title("Name").fixed(FixedSide::Left).into(),
///     Column::new()
///         .title("Contact")
///         .child(Column::new().key("email").title("Email"))
///         .child(Column::new().key("phone").title("Phone"))
///         .into(),
///     ColumnEntry::Expand,
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column<R> {
    pub key: Option<Key>,
    pub title: Option<String>,
    /// Record field this column displays.
    pub data_index: Option<String>,
    pub class_name: Option<String>,
    pub fixed: Option<FixedSide>,
    pub width: Option<ColumnWidth>,
    pub hidden: bool,
    pub ellipsis: bool,
    /// Explicit header column span, overriding the computed one.
    pub col_span: Option<usize>,
    /// Explicit header row span, overriding the computed one.
    pub row_span: Option<usize>,
    pub render: Option<Render<R>>,
    pub internal: Option<InternalColumn>,
    pub children: Vec<Column<R>>,
}

impl<R> Default for Column<R> {
    fn default() -> Self {
        Self {
            key: None,
            title: None,
            data_index: None,
            class_name: None,
            fixed: None,
            width: None,
            hidden: false,
            ellipsis: false,
            col_span: None,
            row_span: None,
            render: None,
            internal: None,
            children: Vec::new(),
        }
    }
}

impl<R> Column<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn data_index(mut self, data_index: impl Into<String>) -> Self {
        self.data_index = Some(data_index.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn fixed(mut self, side: FixedSide) -> Self {
        self.fixed = Some(side);
        self
    }

    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn ellipsis(mut self, ellipsis: bool) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    pub fn col_span(mut self, span: usize) -> Self {
        self.col_span = Some(span);
        self
    }

    pub fn row_span(mut self, span: usize) -> Self {
        self.row_span = Some(span);
        self
    }

    pub fn render(mut self, f: impl Fn(&R, usize) -> Cell + Send + Sync + 'static) -> Self {
        self.render = Some(Render::new(f));
        self
    }

    /// Append a child column, turning this column into a group.
    pub fn child(mut self, child: Column<R>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Column<R>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_expand_column(&self) -> bool {
        self.internal
            .as_ref()
            .is_some_and(|internal| internal.column_type == ColumnType::Expand)
    }

    /// Render the body cell for `record`. Columns without a renderer render
    /// nothing.
    pub fn render_cell(&self, record: &R, index: usize) -> Cell {
        match &self.render {
            Some(render) => render.call(record, index),
            None => Cell::Empty,
        }
    }
}

// =============================================================================
// ColumnEntry
// =============================================================================

/// An entry of a top-level column list: a descriptor, or the marker for the
/// place where the expand column goes.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnEntry<R> {
    Column(Column<R>),
    /// Replaced by the expand column when the table is expandable.
    Expand,
}

impl<R> ColumnEntry<R> {
    pub fn is_expand(&self) -> bool {
        matches!(self, ColumnEntry::Expand)
    }

    pub fn as_column(&self) -> Option<&Column<R>> {
        match self {
            ColumnEntry::Column(column) => Some(column),
            ColumnEntry::Expand => None,
        }
    }

    pub fn into_column(self) -> Option<Column<R>> {
        match self {
            ColumnEntry::Column(column) => Some(column),
            ColumnEntry::Expand => None,
        }
    }

    /// Fixed side of the descriptor. The marker is never fixed.
    pub fn fixed(&self) -> Option<FixedSide> {
        self.as_column().and_then(|column| column.fixed)
    }
}

impl<R> From<Column<R>> for ColumnEntry<R> {
    fn from(column: Column<R>) -> Self {
        ColumnEntry::Column(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_width_forms() {
        assert_eq!("120".parse::<ColumnWidth>(), Ok(ColumnWidth::Px(120)));
        assert_eq!("120px".parse::<ColumnWidth>(), Ok(ColumnWidth::Px(120)));
        assert_eq!(" 25% ".parse::<ColumnWidth>(), Ok(ColumnWidth::Percent(25.0)));
    }

    #[test]
    fn test_parse_width_rejects_garbage() {
        assert_eq!("".parse::<ColumnWidth>(), Err(WidthParseError::Empty));
        assert_eq!(
            "wide".parse::<ColumnWidth>(),
            Err(WidthParseError::Invalid("wide".to_string()))
        );
        assert!("-5%".parse::<ColumnWidth>().is_err());
    }

    #[test]
    fn test_percent_width_resolves_against_total() {
        assert_eq!(ColumnWidth::Percent(25.0).resolve(1000), Some(250));
        assert_eq!(ColumnWidth::Px(0).resolve(1000), None);
    }

    #[test]
    fn test_key_from_index() {
        assert_eq!(Key::from(7usize), Key::Int(7));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_key_from_index_past_i64_keeps_digits() {
        assert_eq!(Key::from(usize::MAX), Key::Str(usize::MAX.to_string()));
    }

    #[test]
    fn test_fixed_side_mirror() {
        assert_eq!(FixedSide::Left.mirrored(), FixedSide::Right);
        assert_eq!(FixedSide::Right.mirrored(), FixedSide::Left);
        assert_eq!(FixedSide::Pinned.mirrored(), FixedSide::Pinned);
        assert!(FixedSide::Pinned.is_left());
    }

    #[test]
    fn test_render_compares_by_identity() {
        let a: Column<()> = Column::new().render(|_, _| Cell::Empty);
        let b = a.clone();
        let c: Column<()> = Column::new().render(|_, _| Cell::Empty);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
