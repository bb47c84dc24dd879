//! Column model resolution for table widgets.
//!
//! A table declares its columns either as a list of [`ColumnEntry`] values or
//! as a tree of declarative [`ColumnNode`] elements. [`ColumnResolver`] turns
//! that declaration into a render-ready model: the merged column tree, header
//! rows with spans, the flat list of leaf columns with concrete widths, and a
//! flag telling whether the fixed (sticky) columns form contiguous bands.
//!
//! # Example
//!
//! ```ignore
//! use colmodel::prelude::*;
//!
//! let input = ResolveInput::new()
//!     .columns(vec![
//!         Column::new().key("name").title("Name").fixed(FixedSide::Left).into(),
//!         Column::new().key("email").title("Email").into(),
//!     ])
//!     .expand(ExpandConfig::new().expandable(true))
//!     .client_width(800);
//!
//! let resolved = ColumnResolver::new().resolve(&input);
//! assert!(!resolved.has_gap_fixed);
//! ```

pub mod cell;
pub mod column;
pub mod config;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod expand;
pub mod gap;
pub mod matrix;
pub mod memo;
pub mod mirror;
pub mod resolver;
pub mod source;
pub mod transform;
pub mod width;

pub use cell::{Cell, ClickEvent, ExpandIcon};
pub use column::{
    Column, ColumnEntry, ColumnType, ColumnWidth, Direction, FixedSide, InternalColumn, Key,
    Record, Render,
};
pub use config::TableConfig;
pub use diagnostics::{CollectSink, Diagnostic, DiagnosticSink, Diagnostics, LogSink};
pub use element::{ColumnElement, ColumnNode};
pub use error::{ConfigError, WidthParseError};
pub use expand::{ExpandConfig, ExpandIconProps, default_expand_icon};
pub use gap::has_gap_fixed;
pub use matrix::{CellRef, ColumnMatrix, ConvertColumns, HeadCell, HeadMatrix, MatrixBuilder};
pub use memo::{ByPtr, Memo};
pub use mirror::revert_for_rtl;
pub use resolver::{ColumnResolver, ResolveInput, ResolvedColumns, resolve_columns};
pub use source::{ColumnSource, filter_hidden_columns, normalize_columns};
pub use transform::TransformFn;
pub use width::{FillWidth, WidthFiller};

/// Commonly used types for declaring and resolving columns.
pub mod prelude {
    pub use crate::cell::{Cell, ClickEvent};
    pub use crate::column::{Column, ColumnEntry, ColumnWidth, Direction, FixedSide, Key};
    pub use crate::element::{ColumnElement, ColumnNode};
    pub use crate::expand::ExpandConfig;
    pub use crate::resolver::{ColumnResolver, ResolveInput, ResolvedColumns};
}
