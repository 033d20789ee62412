// lazyfetch-api: JSON-over-HTTP transport for the lazyfetch fetch engine.

pub mod error;
pub mod transport;

pub use error::Error;
pub use transport::{TlsMode, Transport, TransportConfig};
