//! Rendered body cell content.

use std::fmt;
use std::sync::Arc;

/// Handler run when a clickable cell node is clicked.
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// Expand/collapse control rendered in the expand column.
#[derive(Clone)]
pub struct ExpandIcon {
    pub class_name: String,
    pub expanded: bool,
    pub expandable: bool,
    on_click: Option<ClickHandler>,
}

impl ExpandIcon {
    pub fn new(class_name: impl Into<String>, expanded: bool, expandable: bool) -> Self {
        Self {
            class_name: class_name.into(),
            expanded,
            expandable,
            on_click: None,
        }
    }

    pub fn on_click(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }

    pub fn is_clickable(&self) -> bool {
        self.on_click.is_some()
    }

    fn click(&self) {
        if let Some(handler) = &self.on_click {
            handler();
        }
    }
}

impl fmt::Debug for ExpandIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandIcon")
            .field("class_name", &self.class_name)
            .field("expanded", &self.expanded)
            .field("expandable", &self.expandable)
            .field("clickable", &self.is_clickable())
            .finish()
    }
}

impl PartialEq for ExpandIcon {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
            && self.expanded == other.expanded
            && self.expandable == other.expandable
            && self.is_clickable() == other.is_clickable()
    }
}

/// Content of a body cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Icon(ExpandIcon),
    /// Stops click propagation at this node, so the row does not see clicks
    /// on the wrapped content.
    Guard(Box<Cell>),
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(text.into())
    }

    pub fn guard(inner: Cell) -> Self {
        Cell::Guard(Box::new(inner))
    }

    /// Dispatch a click on this cell, innermost node first.
    pub fn click(&self, event: &mut ClickEvent) {
        match self {
            Cell::Icon(icon) => icon.click(),
            Cell::Guard(inner) => {
                inner.click(event);
                event.stop_propagation();
            }
            Cell::Empty | Cell::Text(_) => {}
        }
    }

    /// Plain-text form, used by text renderers.
    pub fn to_plain_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Icon(icon) if !icon.expandable => " ".to_string(),
            Cell::Icon(icon) if icon.expanded => "-".to_string(),
            Cell::Icon(_) => "+".to_string(),
            Cell::Guard(inner) => inner.to_plain_text(),
        }
    }
}

/// A click travelling from a cell up to its row.
#[derive(Debug, Default)]
pub struct ClickEvent {
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_guard_stops_propagation_after_inner_click() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);
        let icon = ExpandIcon::new("icon", false, true).on_click(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let cell = Cell::guard(Cell::Icon(icon));

        let mut event = ClickEvent::new();
        cell.click(&mut event);

        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert!(event.is_propagation_stopped());
    }

    #[test]
    fn test_unguarded_icon_lets_click_bubble() {
        let cell = Cell::Icon(ExpandIcon::new("icon", true, true));
        let mut event = ClickEvent::new();
        cell.click(&mut event);
        assert!(!event.is_propagation_stopped());
        assert_eq!(cell.to_plain_text(), "-");
    }
}
