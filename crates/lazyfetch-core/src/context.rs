// ── Composition-root dependencies ──
//
// Everything a fetcher needs from the surrounding application comes in
// through a `FetchContext` built once at startup. No ambient globals:
// the alert sink and the transport are explicit collaborators.

use std::fmt;
use std::sync::Arc;

use lazyfetch_api::Transport;

/// Side-channel sink for user-facing fetch failures.
///
/// The engine never propagates errors to callers; every failure is
/// normalized to a human-readable message and handed to this sink
/// (a toast/banner system in a UI, stderr in a CLI).
pub trait AlertSink: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Default sink: logs through `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn report_error(&self, message: &str) {
        tracing::warn!("fetch failed: {message}");
    }
}

/// Shared dependencies injected into every fetcher instance.
#[derive(Clone)]
pub struct FetchContext {
    pub transport: Arc<Transport>,
    pub alerts: Arc<dyn AlertSink>,
}

impl FetchContext {
    /// Build a context with the default `TracingSink`.
    pub fn new(transport: Transport) -> Self {
        Self {
            transport: Arc::new(transport),
            alerts: Arc::new(TracingSink),
        }
    }

    /// Replace the alert sink (e.g. a UI toast dispatcher).
    pub fn with_alerts(mut self, alerts: impl AlertSink + 'static) -> Self {
        self.alerts = Arc::new(alerts);
        self
    }
}

impl fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchContext").finish_non_exhaustive()
    }
}
