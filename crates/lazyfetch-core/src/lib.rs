// lazyfetch-core: Stateful fetch engine between lazyfetch-api and consumers.

pub mod context;
pub mod error;
pub mod fetcher;
pub mod merge;
pub mod page;
pub mod paginated;
pub mod parser;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use context::{AlertSink, FetchContext, TracingSink};
pub use error::{FetchError, ParseError};
pub use fetcher::ValueFetcher;
pub use merge::{Merge, MergeMode};
pub use page::Pagination;
pub use paginated::CollectionFetcher;
pub use parser::{JsonParser, KeyedParser, ResponseParser};
pub use state::FetchState;
