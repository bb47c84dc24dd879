//! Expand column injection.
//!
//! An expandable table gets a synthetic column holding the expand/collapse
//! control of each row. Its position comes from a [`ColumnEntry::Expand`]
//! marker in the column list or, for older callers, from
//! [`ExpandConfig::expand_icon_column_index`].

use std::collections::HashSet;
use std::sync::Arc;

use log::trace;

use crate::cell::{Cell, ExpandIcon};
use crate::column::{
    Column, ColumnEntry, ColumnType, ColumnWidth, FixedSide, InternalColumn, Key, Record,
};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Derives the key of a row: `(record, row_index) -> Key`.
pub type GetRowKey<R> = Arc<dyn Fn(&R, usize) -> Key + Send + Sync>;

/// Decides whether a single row can expand.
pub type RowExpandable<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Called when a row's expand control is triggered.
pub type TriggerExpand<R> = Arc<dyn Fn(&R) + Send + Sync>;

/// Builds the expand control of a row.
pub type ExpandIconFn<R> = Arc<dyn Fn(ExpandIconProps<'_, R>) -> Cell + Send + Sync>;

/// Arguments passed to the expand icon factory.
pub struct ExpandIconProps<'a, R> {
    pub prefix_cls: &'a str,
    pub expanded: bool,
    pub expandable: bool,
    pub record: &'a R,
    pub on_expand: TriggerExpand<R>,
}

/// Expand configuration of a table.
pub struct ExpandConfig<R> {
    pub expandable: bool,
    pub expanded_keys: Arc<HashSet<Key>>,
    pub get_row_key: GetRowKey<R>,
    pub on_trigger_expand: TriggerExpand<R>,
    pub expand_icon: ExpandIconFn<R>,
    /// Per-row expandability. Every row is expandable when unset.
    pub row_expandable: Option<RowExpandable<R>>,
    /// Deprecated insertion index of the expand column. Unset means 0; a
    /// negative index inserts no column.
    pub expand_icon_column_index: Option<isize>,
    /// Rows expand on click, so clicks on the icon itself must not reach the
    /// row as well.
    pub expand_row_by_click: bool,
    pub column_title: Option<String>,
    pub column_width: Option<ColumnWidth>,
    pub prefix_cls: String,
}

impl<R: Record> Default for ExpandConfig<R> {
    fn default() -> Self {
        Self {
            expandable: false,
            expanded_keys: Arc::new(HashSet::new()),
            get_row_key: Arc::new(|_: &R, index: usize| Key::from(index)),
            on_trigger_expand: Arc::new(|_: &R| {}),
            expand_icon: Arc::new(default_expand_icon::<R>),
            row_expandable: None,
            expand_icon_column_index: None,
            expand_row_by_click: false,
            column_title: None,
            column_width: None,
            prefix_cls: "rc-table".to_string(),
        }
    }
}

impl<R: Record> ExpandConfig<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    pub fn expanded_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.expanded_keys = Arc::new(keys.into_iter().collect());
        self
    }

    pub fn row_key(mut self, f: impl Fn(&R, usize) -> Key + Send + Sync + 'static) -> Self {
        self.get_row_key = Arc::new(f);
        self
    }

    pub fn on_expand(mut self, f: impl Fn(&R) + Send + Sync + 'static) -> Self {
        self.on_trigger_expand = Arc::new(f);
        self
    }

    pub fn icon(
        mut self,
        f: impl Fn(ExpandIconProps<'_, R>) -> Cell + Send + Sync + 'static,
    ) -> Self {
        self.expand_icon = Arc::new(f);
        self
    }

    pub fn row_expandable(mut self, f: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.row_expandable = Some(Arc::new(f));
        self
    }

    pub fn icon_column_index(mut self, index: isize) -> Self {
        self.expand_icon_column_index = Some(index);
        self
    }

    pub fn expand_row_by_click(mut self, enabled: bool) -> Self {
        self.expand_row_by_click = enabled;
        self
    }

    pub fn column_title(mut self, title: impl Into<String>) -> Self {
        self.column_title = Some(title.into());
        self
    }

    pub fn column_width(mut self, width: ColumnWidth) -> Self {
        self.column_width = Some(width);
        self
    }

    pub fn prefix_cls(mut self, prefix: impl Into<String>) -> Self {
        self.prefix_cls = prefix.into();
        self
    }
}

/// Default expand control: a collapsed/expanded toggle, or a spacer for rows
/// that cannot expand.
pub fn default_expand_icon<R: Record>(props: ExpandIconProps<'_, R>) -> Cell {
    let icon_cls = format!("{}-row-expand-icon", props.prefix_cls);

    if !props.expandable {
        return Cell::Icon(ExpandIcon::new(
            format!("{icon_cls} {icon_cls}-spaced"),
            props.expanded,
            false,
        ));
    }

    let state = if props.expanded { "expanded" } else { "collapsed" };
    let record = props.record.clone();
    let on_expand = props.on_expand;
    Cell::Icon(
        ExpandIcon::new(format!("{icon_cls} {icon_cls}-{state}"), props.expanded, true)
            .on_click(move || on_expand(&record)),
    )
}

/// Place the expand column in `base`, or strip expand markers when the table
/// is not expandable.
///
/// `table_fixed` is the fixed side requested for the table as a whole.
pub fn inject_expand_column<R: Record>(
    base: &[ColumnEntry<R>],
    config: &ExpandConfig<R>,
    table_fixed: Option<FixedSide>,
    diagnostics: &Diagnostics,
) -> Vec<ColumnEntry<R>> {
    if !config.expandable {
        if base.iter().any(ColumnEntry::is_expand) {
            diagnostics.report(Diagnostic::ExpandColumnWithoutExpandable);
        }
        return base.iter().filter(|entry| !entry.is_expand()).cloned().collect();
    }

    let hint = config.expand_icon_column_index;
    if hint.is_some_and(|index| index >= 0) {
        diagnostics.report(Diagnostic::DeprecatedExpandIconColumnIndex);
    }

    let mut columns = base.to_vec();

    if !columns.iter().any(ColumnEntry::is_expand) {
        // A negative index opts out of the column.
        if let Ok(index) = usize::try_from(hint.unwrap_or(0)) {
            columns.insert(index.min(columns.len()), ColumnEntry::Expand);
        }
    }

    if columns.iter().filter(|entry| entry.is_expand()).count() > 1 {
        diagnostics.report(Diagnostic::MultipleExpandColumns);
    }

    let expand_index = columns.iter().position(ColumnEntry::is_expand);
    let mut seen_expand = false;
    columns.retain(|entry| {
        if !entry.is_expand() {
            return true;
        }
        !std::mem::replace(&mut seen_expand, true)
    });

    let fixed = resolve_expand_fixed(base, expand_index, hint, table_fixed);
    trace!("expand column at {expand_index:?}, fixed {fixed:?}");

    let expand_column = build_expand_column(config, fixed);
    columns
        .into_iter()
        .map(|entry| match entry {
            ColumnEntry::Expand => ColumnEntry::Column(expand_column.clone()),
            column => column,
        })
        .collect()
}

/// Fixed side of the expand column.
///
/// The table's fixed intent wins at the boundaries: an unset or zero index
/// pins it left, an index equal to the column count pins it right. Elsewhere
/// it takes the side of the column that held its index before insertion.
fn resolve_expand_fixed<R>(
    base: &[ColumnEntry<R>],
    expand_index: Option<usize>,
    hint: Option<isize>,
    table_fixed: Option<FixedSide>,
) -> Option<FixedSide> {
    let at_start = matches!(hint, None | Some(0));
    let at_end = hint.is_some() && hint == isize::try_from(base.len()).ok();

    match table_fixed {
        Some(FixedSide::Left | FixedSide::Pinned) if at_start => Some(FixedSide::Left),
        Some(FixedSide::Right | FixedSide::Pinned) if at_end => Some(FixedSide::Right),
        _ => expand_index
            .and_then(|index| base.get(index))
            .and_then(ColumnEntry::fixed),
    }
}

fn build_expand_column<R: Record>(
    config: &ExpandConfig<R>,
    fixed: Option<FixedSide>,
) -> Column<R> {
    let prefix_cls = config.prefix_cls.clone();
    let expanded_keys = Arc::clone(&config.expanded_keys);
    let get_row_key = Arc::clone(&config.get_row_key);
    let row_expandable = config.row_expandable.clone();
    let expand_icon = Arc::clone(&config.expand_icon);
    let on_expand = Arc::clone(&config.on_trigger_expand);
    let expand_row_by_click = config.expand_row_by_click;

    let render = move |record: &R, index: usize| {
        let row_key = get_row_key(record, index);
        let expanded = expanded_keys.contains(&row_key);
        let expandable = row_expandable.as_ref().is_none_or(|f| f(record));

        let icon = expand_icon(ExpandIconProps {
            prefix_cls: &prefix_cls,
            expanded,
            expandable,
            record,
            on_expand: Arc::clone(&on_expand),
        });

        if expand_row_by_click {
            Cell::guard(icon)
        } else {
            icon
        }
    };

    let mut column = Column::new()
        .class_name(format!("{}-row-expand-icon-cell", config.prefix_cls))
        .render(render);
    column.title = config.column_title.clone();
    column.width = config.column_width;
    column.fixed = fixed;
    column.internal = Some(InternalColumn {
        class_name: format!("{}-expand-icon-col", config.prefix_cls),
        column_type: ColumnType::Expand,
    });
    column
}
