// ── Paginated collection fetcher ──
//
// Wraps one paginated JSON GET endpoint. Each successful page merges
// into held data under the configured merge policy; the server's
// pagination envelope drives the `has_more` gate. Only the pagination
// `next` field is interpreted here — the rest passes through for
// callers to display.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

use crate::context::FetchContext;
use crate::error::{FetchError, ParseError};
use crate::merge::{Merge, MergeMode};
use crate::page::Pagination;
use crate::parser::ResponseParser;
use crate::state::FetchState;

const DEFAULT_PER_PAGE: u32 = 20;

/// Stateful accessor for a single paginated JSON GET endpoint.
pub struct CollectionFetcher<T, P> {
    ctx: FetchContext,
    url: String,
    initial: T,
    parser: P,
    mode: MergeMode,
    per_page: u32,
    cancel: CancellationToken,
    seq: AtomicU64,
    state: watch::Sender<FetchState<T>>,
}

impl<T, P> CollectionFetcher<T, P>
where
    T: Merge + Clone + Send + Sync + 'static,
    P: ResponseParser<T>,
{
    pub fn new(ctx: FetchContext, url: impl Into<String>, initial: T, parser: P) -> Self {
        let (state, _) = watch::channel(FetchState::new(initial.clone()));
        Self {
            ctx,
            url: url.into(),
            initial,
            parser,
            mode: MergeMode::default(),
            per_page: DEFAULT_PER_PAGE,
            cancel: CancellationToken::new(),
            seq: AtomicU64::new(0),
            state,
        }
    }

    /// Merge policy for successive pages (default: replace).
    pub fn with_mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Page size sent as `per_page` on every request (default: 20).
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
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

    /// Fetch a page and merge it into held data.
    ///
    /// No-op when `has_loaded` is true and the server reported no
    /// further pages. The configured `per_page` rides on every request
    /// alongside `params`. Failures are routed to the alert sink with
    /// state left at last-known-good; `is_loading` always ends false.
    /// Returns `true` when a page was merged.
    pub async fn fetch(&self, params: &[(String, String)]) -> bool {
        {
            let s = self.state.borrow();
            if s.has_loaded && !s.has_more {
                return false;
            }
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.is_loading = true);

        match self.do_fetch(params).await {
            Ok((value, pagination)) => {
                if !self.is_current(seq) {
                    return false;
                }
                let mode = self.mode;
                self.state.send_modify(|s| {
                    match pagination {
                        Some(p) => {
                            s.has_more = p.has_next();
                            s.pagination = p;
                        }
                        // No envelope: the server cannot signal a further
                        // page, so the gate closes.
                        None => s.has_more = false,
                    }
                    s.data = s.data.clone().merge(value, mode);
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

    /// Fetch the next page indicated by the last pagination envelope,
    /// with `params` riding on the request.
    ///
    /// Before the first load this is a plain first-page fetch; once
    /// everything is loaded it is a no-op.
    pub async fn fetch_next(&self, params: &[(String, String)]) -> bool {
        let next = {
            let s = self.state.borrow();
            if s.has_loaded && !s.has_more {
                return false;
            }
            s.pagination.next
        };

        match next {
            Some(page) => {
                let mut query = params.to_vec();
                query.push(("page".into(), page.to_string()));
                self.fetch(&query).await
            }
            None => self.fetch(params).await,
        }
    }

    /// Walk pages until the server reports no more, or an invocation
    /// fails (failures are terminal per invocation; no retry). Returns
    /// the number of pages merged.
    pub async fn fetch_remaining(&self, params: &[(String, String)]) -> usize {
        let mut pages = 0;
        loop {
            if !self.fetch_next(params).await {
                break;
            }
            pages += 1;
            if !self.state.borrow().has_more {
                break;
            }
        }
        pages
    }

    async fn do_fetch(&self, params: &[(String, String)]) -> Result<(T, Option<Pagination>), FetchError> {
        let mut query: Vec<(String, String)> = params.to_vec();
        if !self.has_per_page(&query) {
            query.push(("per_page".into(), self.per_page.to_string()));
        }

        let raw = self
            .ctx
            .transport
            .get_json(&self.url, &query, &self.cancel)
            .await?;

        // Parse both halves before any state is touched: a malformed
        // envelope is as fatal as a malformed payload.
        let pagination = raw
            .get("pagination")
            .map(|p| {
                serde_json::from_value::<Pagination>(p.clone())
                    .map_err(|e| ParseError::new(format!("invalid pagination envelope: {e}")))
            })
            .transpose()?;
        let value = self.parser.parse(&raw)?;

        Ok((value, pagination))
    }

    /// A `per_page` supplied by the caller, either in `params` or baked
    /// into the endpoint URL, wins over the configured default.
    fn has_per_page(&self, params: &[(String, String)]) -> bool {
        params.iter().any(|(k, _)| k == "per_page")
            || url::Url::parse(&self.url)
                .is_ok_and(|u| u.query_pairs().any(|(k, _)| k == "per_page"))
    }

    /// A response is applied only if no newer fetch or reset superseded it.
    fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    // ── Caller-driven state control ──────────────────────────────────

    /// Restore initial data, clear the loaded flag, and re-open the
    /// `has_more` gate for a future refetch. In-flight responses from
    /// before the reset are discarded when they land.
    pub fn reset(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        let initial = self.initial.clone();
        self.state.send_modify(|s| {
            s.data = initial;
            s.has_loaded = false;
            s.is_loading = false;
            s.has_more = true;
            s.pagination = Pagination::default();
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

    pub fn set_has_more(&self, has_more: bool) {
        self.state.send_modify(|s| s.has_more = has_more);
    }

    pub fn set_has_loaded(&self, has_loaded: bool) {
        self.state.send_modify(|s| s.has_loaded = has_loaded);
    }
}
