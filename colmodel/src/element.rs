//! Declarative column elements.
//!
//! Columns can be declared as a tree of elements instead of a descriptor list.
//! Each element carries its props as a [`Column`] plus a key and child nodes,
//! much like a UI element tree. [`convert_children_to_columns`] turns the tree
//! into descriptors so the rest of the pipeline only sees one shape.

use crate::column::{Column, ColumnEntry, Key};

/// A node of a declarative column tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnNode<R> {
    Element(ColumnElement<R>),
    /// Stray text. Not a column; skipped during conversion.
    Text(String),
    /// Placeholder for conditionally omitted nodes; skipped during conversion.
    Empty,
    /// Nodes spliced in place of the fragment.
    Fragment(Vec<ColumnNode<R>>),
}

impl<R> ColumnNode<R> {
    pub fn text(text: impl Into<String>) -> Self {
        ColumnNode::Text(text.into())
    }
}

impl<R> From<ColumnElement<R>> for ColumnNode<R> {
    fn from(element: ColumnElement<R>) -> Self {
        ColumnNode::Element(element)
    }
}

/// A column element: key, props and child nodes.
///
/// # Example
///
/// ```ignore
/// let tree: Vec<ColumnNode<User>> = vec![
///     ColumnElement::new(Column::new().title("Name")).key("name").into(),
///     ColumnElement::new(Column::new().title("Contact"))
///         .key("contact")
///         .child(ColumnElement::new(Column::new().title("Email")).key("email"))
///         .into(),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnElement<R> {
    pub key: Option<Key>,
    /// Column fields of this element. Children of the props are ignored;
    /// nesting is expressed through [`ColumnElement::children`].
    pub props: Column<R>,
    pub children: Vec<ColumnNode<R>>,
}

impl<R> ColumnElement<R> {
    pub fn new(props: Column<R>) -> Self {
        Self {
            key: None,
            props,
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn child(mut self, child: impl Into<ColumnNode<R>>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ColumnNode<R>>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Convert an element tree into column entries.
///
/// Only elements become columns; text and empty nodes are dropped and
/// fragments are flattened. An element's key becomes the column key.
pub fn convert_children_to_columns<R: Clone>(nodes: &[ColumnNode<R>]) -> Vec<ColumnEntry<R>> {
    convert_nodes(nodes).into_iter().map(ColumnEntry::Column).collect()
}

fn convert_nodes<R: Clone>(nodes: &[ColumnNode<R>]) -> Vec<Column<R>> {
    let mut columns = Vec::new();
    for node in nodes {
        match node {
            ColumnNode::Element(element) => columns.push(convert_element(element)),
            ColumnNode::Fragment(inner) => columns.extend(convert_nodes(inner)),
            ColumnNode::Text(_) | ColumnNode::Empty => {}
        }
    }
    columns
}

fn convert_element<R: Clone>(element: &ColumnElement<R>) -> Column<R> {
    let children = if element.children.is_empty() {
        Vec::new()
    } else {
        convert_nodes(&element.children)
    };

    Column {
        key: element.key.clone(),
        children,
        ..element.props.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::FixedSide;

    #[test]
    fn test_elements_become_columns() {
        let nodes: Vec<ColumnNode<()>> = vec![
            ColumnElement::new(Column::new().title("Name").fixed(FixedSide::Left))
                .key("name")
                .into(),
            ColumnNode::text("ignored"),
            ColumnNode::Empty,
            ColumnElement::new(Column::new().title("Email")).key("email").into(),
        ];

        let columns = convert_children_to_columns(&nodes);
        assert_eq!(columns.len(), 2);

        let name = columns[0].as_column().unwrap();
        assert_eq!(name.key, Some(Key::from("name")));
        assert_eq!(name.title.as_deref(), Some("Name"));
        assert_eq!(name.fixed, Some(FixedSide::Left));
        assert!(!name.is_group());
    }

    #[test]
    fn test_nested_elements_become_children() {
        let nodes: Vec<ColumnNode<()>> = vec![
            ColumnElement::new(Column::new().title("Contact"))
                .key("contact")
                .child(ColumnElement::new(Column::new().title("Email")).key("email"))
                .child(ColumnNode::Fragment(vec![
                    ColumnElement::new(Column::new().title("Phone")).key("phone").into(),
                ]))
                .into(),
        ];

        let columns = convert_children_to_columns(&nodes);
        let contact = columns[0].as_column().unwrap();
        let keys: Vec<_> = contact.children.iter().map(|c| c.key.clone()).collect();
        assert_eq!(keys, vec![Some(Key::from("email")), Some(Key::from("phone"))]);
    }

    #[test]
    fn test_props_children_are_not_element_children() {
        let props: Column<()> = Column::new().title("Group").child(Column::new().title("Stray"));
        let nodes: Vec<ColumnNode<()>> = vec![ColumnElement::new(props).key("group").into()];

        let columns = convert_children_to_columns(&nodes);
        assert!(!columns[0].as_column().unwrap().is_group());
    }
}
