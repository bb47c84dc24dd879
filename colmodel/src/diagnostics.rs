//! Advisory warnings about contradictory column configuration.
//!
//! Diagnostics never change the resolved model. They are on by default in
//! debug builds and off in release builds.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use log::warn;

/// A configuration problem worth telling the developer about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Diagnostic {
    #[error(
        "`expand_icon_column_index` is deprecated. Please use `ColumnEntry::Expand` in `columns` instead."
    )]
    DeprecatedExpandIconColumnIndex,

    #[error("There exist more than one `ColumnEntry::Expand` in `columns`.")]
    MultipleExpandColumns,

    #[error("`expandable` is not set but there exists a `ColumnEntry::Expand` in `columns`.")]
    ExpandColumnWithoutExpandable,
}

/// Receiver of diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Logs each distinct diagnostic once through the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink {
    seen: Mutex<HashSet<Diagnostic>>,
}

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        let first = self
            .seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(diagnostic);
        if first {
            warn!("{diagnostic}");
        }
    }
}

/// Keeps every reported diagnostic, in order.
#[derive(Debug, Default)]
pub struct CollectSink {
    reports: Mutex<Vec<Diagnostic>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the diagnostics reported so far.
    pub fn reports(&self) -> Vec<Diagnostic> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for CollectSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}

/// Switchable handle to a [`DiagnosticSink`].
#[derive(Clone)]
pub struct Diagnostics {
    enabled: bool,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            sink: Arc::new(LogSink::default()),
        }
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Diagnostics {
    /// Enabled diagnostics reporting to `sink`.
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            enabled: true,
            sink,
        }
    }

    /// Diagnostics that report nothing.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        if self.enabled {
            self.sink.report(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_diagnostics_report_nothing() {
        let sink = Arc::new(CollectSink::new());
        let diagnostics = Diagnostics::new(sink.clone()).enabled(false);
        diagnostics.report(Diagnostic::MultipleExpandColumns);
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn test_collect_sink_keeps_order() {
        let sink = Arc::new(CollectSink::new());
        let diagnostics = Diagnostics::new(sink.clone());
        diagnostics.report(Diagnostic::DeprecatedExpandIconColumnIndex);
        diagnostics.report(Diagnostic::MultipleExpandColumns);
        assert_eq!(
            sink.reports(),
            vec![
                Diagnostic::DeprecatedExpandIconColumnIndex,
                Diagnostic::MultipleExpandColumns
            ]
        );
    }
}
