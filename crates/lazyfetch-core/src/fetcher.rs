// ── Non-paginated fetcher ──
//
// Fetch-once-until-reset semantics: the first successful response is
// held until the owner explicitly resets. A request sequence counter
// tags every in-flight fetch so a response that is no longer current
// (a newer fetch started, or the fetcher was reset) is discarded
// without touching state.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

use crate::context::FetchContext;
use crate::error::FetchError;
use crate::parser::ResponseParser;
use crate::state::FetchState;

/// Stateful accessor for a single non-paginated JSON GET endpoint.
pub struct ValueFetcher<T, P> {
    ctx: FetchContext,
    url: String,
    initial: T,
    parser: P,
    cancel: CancellationToken,
    seq: AtomicU64,
    state: watch::Sender<FetchState<T>>,
}

impl<T, P> ValueFetcher<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: ResponseParser<T>,
{
    pub fn new(ctx: FetchContext, url: impl Into<String>, initial: T, parser: P) -> Self {
        let (state, _) = watch::channel(FetchState::new(initial.clone()));
        Self {
            ctx,
            url: url.into(),
            initial,
            parser,
            cancel: CancellationToken::new(),
            seq: AtomicU64::new(0),
            state,
        }
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Clone of the current state.
    pub fn snapshot(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// State changes as an async stream.
    pub fn changes(&self) -> WatchStream<FetchState<T>> {
        WatchStream::new(self.state.subscribe())
    }

    /// Token honored by the transport for this fetcher's requests.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Fetch the endpoint, replacing held data on success.
    ///
    /// No-op once `has_loaded` is true (until `reset`). Failures are
    /// routed to the alert sink; state keeps its last-known-good value
    /// and `is_loading` always ends false. Returns `true` when a
    /// response was merged.
    pub async fn fetch(&self, params: &[(String, String)]) -> bool {
        if self.state.borrow().has_loaded {
            return false;
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.is_loading = true);

        match self.do_fetch(params).await {
            Ok(value) => {
                if !self.is_current(seq) {
                    return false;
                }
                self.state.send_modify(|s| {
                    s.data = value;
                    s.has_loaded = true;
                    s.is_loading = false;
                    s.fetched_at = Some(chrono::Utc::now());
                });
                true
            }
            Err(err) => {
                if !self.is_current(seq) {
                    return false;
                }
                if !err.is_cancelled() {
                    self.ctx.alerts.report_error(&err.user_message());
                }
                self.state.send_modify(|s| s.is_loading = false);
                false
            }
        }
    }

    async fn do_fetch(&self, params: &[(String, String)]) -> Result<T, FetchError> {
        let raw = self
            .ctx
            .transport
            .get_json(&self.url, params, &self.cancel)
            .await?;
        Ok(self.parser.parse(&raw)?)
    }

    /// A response is applied only if no newer fetch or reset superseded it.
    fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    // ── Caller-driven state control ──────────────────────────────────

    /// Restore initial data and clear the loaded flag. In-flight
    /// responses from before the reset are discarded when they land.
    pub fn reset(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        let initial = self.initial.clone();
        self.state.send_modify(|s| {
            s.data = initial;
            s.has_loaded = false;
            s.is_loading = false;
            s.fetched_at = None;
        });
    }

    /// Optimistic local mutation; triggers no network activity.
    pub fn set_data(&self, data: T) {
        self.state.send_modify(|s| s.data = data);
    }

    pub fn set_is_loading(&self, is_loading: bool) {
        self.state.send_modify(|s| s.is_loading = is_loading);
    }

    pub fn set_has_loaded(&self, has_loaded: bool) {
        self.state.send_modify(|s| s.has_loaded = has_loaded);
    }
}
