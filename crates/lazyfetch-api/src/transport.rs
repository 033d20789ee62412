// Shared transport configuration and the JSON GET primitive.
//
// The fetch engine issues every request through a `Transport`, which
// owns the underlying `reqwest::Client`. Cancellation is an explicit
// token passed into each call and honored here, never inferred from a
// host framework's lifecycle.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed development servers).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    /// Default headers injected on every request (e.g. an API key).
    pub default_headers: Option<HeaderMap>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
            default_headers: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("lazyfetch/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        if let Some(ref headers) = self.default_headers {
            builder = builder.default_headers(headers.clone());
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

// ── Error response shape ─────────────────────────────────────────────

/// Best-effort error body: most JSON APIs put the human-readable
/// message under `error` or `message`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Transport ────────────────────────────────────────────────────────

/// Thin wrapper around `reqwest::Client` issuing JSON `GET`s.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    /// Build a transport from a `TransportConfig`.
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers/TLS).
    pub fn from_reqwest(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build the request URL by appending `params` onto `url`'s query
    /// string. Parameters already present on `url` are preserved.
    fn build_url(url: &str, params: &[(String, String)]) -> Result<Url, Error> {
        let mut url = Url::parse(url)?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Issue `GET <url>?<params...>` with `Accept: application/json`
    /// and parse the body as a `serde_json::Value`.
    ///
    /// The call races against `cancel`; a cancelled token yields
    /// `Error::Cancelled` and the connection is dropped.
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
        cancel: &CancellationToken,
    ) -> Result<serde_json::Value, Error> {
        let url = Self::build_url(url, params)?;
        debug!("GET {url}");

        let request = self
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        let fut = async {
            let resp = request.send().await?;
            Self::handle_response(resp).await
        };

        tokio::select! {
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = fut => result,
        }
    }

    async fn handle_response(resp: reqwest::Response) -> Result<serde_json::Value, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Decode {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn build_url_appends_params() {
        let url = Transport::build_url(
            "https://api.example.com/items",
            &[("page".into(), "2".into())],
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/items?page=2");
    }

    #[test]
    fn build_url_preserves_existing_query() {
        let url = Transport::build_url(
            "https://api.example.com/items?filter=active",
            &[("per_page".into(), "20".into())],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/items?filter=active&per_page=20"
        );
    }

    #[test]
    fn build_url_rejects_relative() {
        assert!(matches!(
            Transport::build_url("/items", &[]),
            Err(Error::InvalidUrl(_))
        ));
    }
}
