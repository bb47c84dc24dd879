use colmodel::{Cell, ColumnResolver, ColumnWidth, ConfigError, FixedSide, Key, TableConfig};
use serde_json::json;

const TABLE: &str = r#"{
    "columns": [
        { "key": "name", "title": "Name", "data_index": "name", "fixed": "left", "width": 120 },
        "EXPAND_COLUMN",
        { "key": "contact", "title": "Contact", "children": [
            { "key": "email", "title": "Email", "data_index": "email", "width": "25%" },
            { "key": "phone", "title": "Phone", "data_index": "phone", "hidden": true }
        ] },
        { "key": "note", "title": "Note", "data_index": "note" }
    ],
    "expandable": {
        "expanded_row_keys": ["u1"],
        "column_width": 40,
        "expandable_field": "has_detail"
    },
    "scroll_width": 800,
    "client_width": 600,
    "row_key": "id",
    "rows": [
        { "id": "u1", "name": "Ada", "email": "ada@example.com", "has_detail": true },
        { "id": "u2", "name": "Grace", "email": "grace@example.com", "note": 3 }
    ]
}"#;

#[test]
fn test_config_resolves_columns() {
    let config = TableConfig::from_json_str(TABLE).unwrap();
    let input = config.to_input().unwrap();
    let resolved = ColumnResolver::new().resolve(&input);

    let keys: Vec<_> = resolved
        .flat_columns
        .iter()
        .map(|c| c.key.as_ref().map(Key::to_string))
        .collect();
    assert_eq!(
        keys,
        vec![
            Some("name".to_string()),
            Some("-1".to_string()),
            Some("email".to_string()),
            Some("note".to_string()),
        ]
    );

    // A placed marker has no fixed side of its own to inherit.
    assert_eq!(resolved.flat_columns[1].fixed, None);
    assert!(!resolved.has_gap_fixed);

    let widths: Vec<_> = resolved.flat_columns.iter().map(|c| c.width).collect();
    assert_eq!(
        widths,
        vec![
            Some(ColumnWidth::Px(120)),
            Some(ColumnWidth::Px(40)),
            Some(ColumnWidth::Px(200)),
            Some(ColumnWidth::Px(440)),
        ]
    );
}

#[test]
fn test_config_rows_render() {
    let config = TableConfig::from_json_str(TABLE).unwrap();
    let resolved = ColumnResolver::new().resolve(&config.to_input().unwrap());

    let rendered: Vec<Vec<String>> = config
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            resolved
                .flat_columns
                .iter()
                .map(|column| column.render_cell(row, index).to_plain_text())
                .collect()
        })
        .collect();

    assert_eq!(rendered[0], vec!["Ada", "-", "ada@example.com", ""]);
    assert_eq!(rendered[1], vec!["Grace", " ", "grace@example.com", "3"]);
}

#[test]
fn test_config_element_tree() {
    let config = TableConfig::from_json_str(
        r#"{
            "elements": [
                { "key": "a", "props": { "title": "A", "data_index": "a" } },
                "\n",
                null,
                [
                    { "key": "b", "props": { "title": "B", "fixed": true } },
                    { "key": "c", "props": { "title": "C", "hidden": true } }
                ],
                { "key": "g", "props": { "title": "Group" }, "children": [
                    { "key": "d", "props": { "title": "D" } }
                ] }
            ],
            "direction": "rtl"
        }"#,
    )
    .unwrap();

    let resolved = ColumnResolver::new().resolve(&config.to_input().unwrap());
    let layout: Vec<_> = resolved
        .flat_columns
        .iter()
        .map(|c| (c.key.as_ref().map(Key::to_string), c.fixed))
        .collect();
    assert_eq!(
        layout,
        vec![
            (Some("a".to_string()), None),
            (Some("b".to_string()), Some(FixedSide::Right)),
            (Some("d".to_string()), None),
        ]
    );
    assert!(resolved.has_gap_fixed);

    let record = json!({ "a": "x" });
    assert_eq!(resolved.flat_columns[0].render_cell(&record, 0), Cell::text("x"));
}

fn flat_keys(config: &str) -> Vec<Option<String>> {
    let config = TableConfig::from_json_str(config).unwrap();
    ColumnResolver::new()
        .resolve(&config.to_input().unwrap())
        .flat_columns
        .iter()
        .map(|c| c.key.as_ref().map(Key::to_string))
        .collect()
}

#[test]
fn test_config_fragment_starting_with_null() {
    let keys =
        flat_keys(r#"{ "elements": [[null, { "key": "x", "props": { "title": "X" } }]] }"#);
    assert_eq!(keys, vec![Some("x".to_string())]);
}

#[test]
fn test_config_fragment_starting_with_text() {
    let keys = flat_keys(
        r#"{ "elements": [["\n", { "key": "x", "props": { "title": "X" } }, "\n"]] }"#,
    );
    assert_eq!(keys, vec![Some("x".to_string())]);
}

#[test]
fn test_config_pinned_table_fixes_trailing_expand_column() {
    let config = TableConfig::from_json_str(
        r#"{
            "columns": [{ "key": "a" }, { "key": "b" }],
            "expandable": { "expand_icon_column_index": 2 },
            "fixed": true
        }"#,
    )
    .unwrap();

    let resolved = ColumnResolver::new().resolve(&config.to_input().unwrap());
    let sides: Vec<_> = resolved.flat_columns.iter().map(|c| c.fixed).collect();
    assert_eq!(sides, vec![None, None, Some(FixedSide::Right)]);
    assert!(resolved.flat_columns[2].is_expand_column());
    assert!(!resolved.has_gap_fixed);
}

#[test]
fn test_config_rejects_bad_json() {
    let err = TableConfig::from_json_str(r#"{ "columns": 3 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_config_load_missing_file() {
    let err = TableConfig::load("/nonexistent/table.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/table.json"));
}
