//! Failure reporting for the absent-on-failure client boundary
//!
//! Public client operations swallow errors and return `None` or an empty
//! collection. Before the error is discarded it is handed to a
//! [`DiagnosticSink`], which by default logs it through `tracing`.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::error::ClientError;

/// Receives every failure absorbed at a client boundary
pub trait DiagnosticSink: Send + Sync {
    /// `operation` is the public method name, e.g. `"fetch_properties"`
    fn report(&self, operation: &'static str, error: &ClientError);
}

/// Emits a `warn!` event per failure
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, operation: &'static str, error: &ClientError) {
        warn!(operation, cause = error.cause(), error = %error, "Lookup failed");
    }
}

/// A captured failure report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation: &'static str,
    pub cause: &'static str,
    pub message: String,
}

/// Keeps every report in memory
///
/// # Example
///
/// ```
/// use affinity_data_client::diagnostics::RecordingDiagnostics;
/// use affinity_data_client::{ClientConfig, RcsbClient};
/// use std::sync::Arc;
///
/// let sink = Arc::new(RecordingDiagnostics::new());
/// let client = RcsbClient::with_config(ClientConfig::new()).with_diagnostics(sink.clone());
/// assert!(sink.reports().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Diagnostic> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }

    /// Reports emitted by a single operation
    pub fn reports_for(&self, operation: &str) -> Vec<Diagnostic> {
        self.reports()
            .into_iter()
            .filter(|d| d.operation == operation)
            .collect()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&self, operation: &'static str, error: &ClientError) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(Diagnostic {
                operation,
                cause: error.cause(),
                message: error.to_string(),
            });
        }
    }
}

pub(crate) fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingDiagnostics)
}

/// Converts a tagged result into the public absent-on-failure shape
pub(crate) fn absorb<T>(
    sink: &dyn DiagnosticSink,
    operation: &'static str,
    result: crate::Result<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            sink.report(operation, &err);
            None
        }
    }
}
