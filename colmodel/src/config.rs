//! JSON table configuration.
//!
//! Describes a table whose rows are plain JSON objects. Columns display the
//! record field named by `data_index`.
//!
//! ```json
//! {
//!   "columns": [
//!     { "key": "name", "title": "Name", "data_index": "name", "fixed": "left", "width": 120 },
//!     "EXPAND_COLUMN",
//!     { "title": "Contact", "children": [
//!       { "key": "email", "title": "Email", "data_index": "email", "width": "30%" }
//!     ] }
//!   ],
//!   "expandable": { "expanded_row_keys": ["1"], "column_width": 48 },
//!   "direction": "ltr",
//!   "scroll_width": 800,
//!   "client_width": 640,
//!   "row_key": "id",
//!   "rows": [{ "id": "1", "name": "Ada", "email": "ada@example.com" }]
//! }
//! ```

use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::cell::Cell;
use crate::column::{Column, ColumnEntry, ColumnWidth, Direction, FixedSide, Key};
use crate::element::{ColumnElement, ColumnNode};
use crate::error::ConfigError;
use crate::expand::ExpandConfig;
use crate::resolver::ResolveInput;

fn default_row_key() -> String {
    "key".to_string()
}

/// A table as described in a config file.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub columns: Option<Vec<ColumnSpec>>,
    /// Declarative column tree, used when `columns` is absent.
    #[serde(default)]
    pub elements: Option<Vec<NodeSpec>>,
    #[serde(default)]
    pub expandable: Option<ExpandSpec>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub fixed: Option<FixedSpec>,
    #[serde(default)]
    pub scroll_width: Option<u32>,
    #[serde(default)]
    pub client_width: u32,
    /// Record field holding the row key. Rows without it use their index.
    #[serde(default = "default_row_key")]
    pub row_key: String,
    #[serde(default)]
    pub rows: Vec<Value>,
}

/// An entry of the `columns` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Marker(Marker),
    Column(ColumnDef),
}

/// String markers allowed in the `columns` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Marker {
    #[serde(rename = "EXPAND_COLUMN")]
    Expand,
}

/// A column definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnDef {
    #[serde(default)]
    pub key: Option<Key>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub data_index: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub fixed: Option<FixedSpec>,
    #[serde(default)]
    pub width: Option<WidthSpec>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub ellipsis: bool,
    #[serde(default)]
    pub col_span: Option<usize>,
    #[serde(default)]
    pub row_span: Option<usize>,
    #[serde(default)]
    pub children: Vec<ColumnDef>,
}

/// A node of the `elements` tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Text(String),
    // Before `Element`: structs also deserialize from arrays.
    Fragment(Vec<NodeSpec>),
    Element(ElementSpec),
    Empty(()),
}

/// A column element: key, props and child nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    #[serde(default)]
    pub key: Option<Key>,
    #[serde(default)]
    pub props: ColumnDef,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

/// `"left"`, `"right"`, or a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FixedSpec {
    Flag(bool),
    Side(SideName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideName {
    Left,
    Right,
}

impl FixedSpec {
    pub fn to_side(self) -> Option<FixedSide> {
        match self {
            FixedSpec::Flag(true) => Some(FixedSide::Pinned),
            FixedSpec::Flag(false) => None,
            FixedSpec::Side(SideName::Left) => Some(FixedSide::Left),
            FixedSpec::Side(SideName::Right) => Some(FixedSide::Right),
        }
    }
}

/// A pixel count, or a string such as `"120px"` or `"25%"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WidthSpec {
    Px(u32),
    Text(String),
}

impl WidthSpec {
    fn parse(&self, column: &str) -> Result<ColumnWidth, ConfigError> {
        match self {
            WidthSpec::Px(px) => Ok(ColumnWidth::Px(*px)),
            WidthSpec::Text(text) => text.parse().map_err(|source| ConfigError::Width {
                column: column.to_string(),
                source,
            }),
        }
    }
}

/// Expand settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpandSpec {
    #[serde(default)]
    pub expanded_row_keys: Vec<Key>,
    #[serde(default)]
    pub expand_icon_column_index: Option<isize>,
    #[serde(default)]
    pub expand_row_by_click: bool,
    #[serde(default)]
    pub column_title: Option<String>,
    #[serde(default)]
    pub column_width: Option<WidthSpec>,
    /// Record field that must be truthy for a row to expand. Every row
    /// expands when unset.
    #[serde(default)]
    pub expandable_field: Option<String>,
    #[serde(default)]
    pub prefix_cls: Option<String>,
}

impl TableConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading table config from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Key of `record` at `index`, read from the configured key field.
    pub fn row_key_of(&self, record: &Value, index: usize) -> Key {
        record_key(record, &self.row_key, index)
    }

    /// Build the pipeline input for this table.
    pub fn to_input(&self) -> Result<ResolveInput<Value>, ConfigError> {
        let mut input = ResolveInput::new().direction(self.direction);

        if let Some(columns) = &self.columns {
            let entries = columns
                .iter()
                .enumerate()
                .map(|(index, spec)| match spec {
                    ColumnSpec::Marker(Marker::Expand) => Ok(ColumnEntry::Expand),
                    ColumnSpec::Column(def) => {
                        def.to_column(&index.to_string()).map(ColumnEntry::Column)
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            input = input.columns(entries);
        } else if let Some(elements) = &self.elements {
            input = input.children(nodes_from_specs(elements)?);
        }

        if let Some(expand) = &self.expandable {
            input = input.expand(expand.to_config(&self.row_key)?);
        }
        if let Some(side) = self.fixed.and_then(FixedSpec::to_side) {
            input = input.fixed(side);
        }
        if let Some(width) = self.scroll_width {
            input = input.scroll_width(width);
        }
        Ok(input.client_width(self.client_width))
    }
}

impl ColumnDef {
    /// Convert to a column. `path` names the column in errors when it has no
    /// key.
    pub fn to_column(&self, path: &str) -> Result<Column<Value>, ConfigError> {
        let name = self
            .key
            .as_ref()
            .map(Key::to_string)
            .unwrap_or_else(|| path.to_string());

        let mut column = Column::new()
            .hidden(self.hidden)
            .ellipsis(self.ellipsis);
        column.key = self.key.clone();
        column.title = self.title.clone();
        column.class_name = self.class_name.clone();
        column.fixed = self.fixed.and_then(FixedSpec::to_side);
        column.col_span = self.col_span;
        column.row_span = self.row_span;
        column.width = self.width.as_ref().map(|w| w.parse(&name)).transpose()?;

        if let Some(field) = &self.data_index {
            let field = field.clone();
            column = column
                .data_index(field.clone())
                .render(move |record: &Value, _| Cell::Text(display_value(record.get(&field))));
        }

        column.children = self
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| child.to_column(&format!("{name}.{index}")))
            .collect::<Result<_, _>>()?;
        Ok(column)
    }
}

impl ExpandSpec {
    fn to_config(&self, row_key: &str) -> Result<ExpandConfig<Value>, ConfigError> {
        let field = row_key.to_string();
        let mut config = ExpandConfig::new()
            .expandable(true)
            .expanded_keys(self.expanded_row_keys.iter().cloned())
            .row_key(move |record: &Value, index| record_key(record, &field, index))
            .expand_row_by_click(self.expand_row_by_click);

        if let Some(index) = self.expand_icon_column_index {
            config = config.icon_column_index(index);
        }
        if let Some(title) = &self.column_title {
            config = config.column_title(title.clone());
        }
        if let Some(width) = &self.column_width {
            config = config.column_width(width.parse("expand")?);
        }
        if let Some(prefix) = &self.prefix_cls {
            config = config.prefix_cls(prefix.clone());
        }
        if let Some(field) = &self.expandable_field {
            let field = field.clone();
            config = config.row_expandable(move |record: &Value| is_truthy(record.get(&field)));
        }
        Ok(config)
    }
}

fn nodes_from_specs(specs: &[NodeSpec]) -> Result<Vec<ColumnNode<Value>>, ConfigError> {
    specs
        .iter()
        .map(|spec| {
            Ok(match spec {
                NodeSpec::Text(text) => ColumnNode::Text(text.clone()),
                NodeSpec::Empty(()) => ColumnNode::Empty,
                NodeSpec::Fragment(inner) => ColumnNode::Fragment(nodes_from_specs(inner)?),
                NodeSpec::Element(element) => {
                    let name = element
                        .key
                        .as_ref()
                        .map(Key::to_string)
                        .unwrap_or_else(|| "element".to_string());
                    let props = ColumnDef {
                        children: Vec::new(),
                        ..element.props.clone()
                    }
                    .to_column(&name)?;

                    let mut node = ColumnElement::new(props)
                        .children(nodes_from_specs(&element.children)?);
                    node.key = element.key.clone();
                    ColumnNode::Element(node)
                }
            })
        })
        .collect()
}

fn record_key(record: &Value, field: &str, index: usize) -> Key {
    match record.get(field) {
        Some(Value::String(s)) => Key::Str(s.clone()),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Key::Int)
            .unwrap_or_else(|| Key::Str(n.to_string())),
        _ => Key::from(index),
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_spec_forms() {
        let parsed: Vec<FixedSpec> =
            serde_json::from_str(r#"["left", "right", true, false]"#).unwrap();
        let sides: Vec<_> = parsed.into_iter().map(FixedSpec::to_side).collect();
        assert_eq!(
            sides,
            vec![
                Some(FixedSide::Left),
                Some(FixedSide::Right),
                Some(FixedSide::Pinned),
                None
            ]
        );
    }

    #[test]
    fn test_marker_and_columns_parse() {
        let config = TableConfig::from_json_str(
            r#"{ "columns": [{ "key": "a", "width": "20%" }, "EXPAND_COLUMN"] }"#,
        )
        .unwrap();
        let columns = config.columns.as_ref().unwrap();
        assert!(matches!(columns[0], ColumnSpec::Column(_)));
        assert!(matches!(columns[1], ColumnSpec::Marker(Marker::Expand)));
    }

    #[test]
    fn test_invalid_width_names_column() {
        let config =
            TableConfig::from_json_str(r#"{ "columns": [{ "key": "price", "width": "wide" }] }"#)
                .unwrap();
        let err = config.to_input().err().unwrap();
        assert!(matches!(err, ConfigError::Width { ref column, .. } if column == "price"));
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_row_key_falls_back_to_index() {
        let config = TableConfig::from_json_str(r#"{ "row_key": "id" }"#).unwrap();
        let record: Value = serde_json::json!({ "id": 7 });
        assert_eq!(config.row_key_of(&record, 0), Key::Int(7));
        assert_eq!(config.row_key_of(&serde_json::json!({}), 3), Key::Int(3));
    }

    #[test]
    fn test_data_index_renders_field_text() {
        let def = ColumnDef {
            data_index: Some("name".to_string()),
            ..ColumnDef::default()
        };
        let column = def.to_column("0").unwrap();
        let record = serde_json::json!({ "name": "Ada", "age": 36 });
        assert_eq!(column.render_cell(&record, 0), Cell::text("Ada"));
    }
}
