//! HTTP transport for the remote service.
//!
//! [`ApiTransport`] is the seam between orchestration and the network. The
//! production implementation, [`HttpTransport`], issues `GET` requests with
//! `reqwest`; tests substitute a scripted fake.

use super::query::QueryParams;
use crate::domain::error::{RecibosError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

/// Base URL of the service, validated once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Parses a base URL. A bare host such as `api.example.com/` gets `https://`.
    ///
    /// # Errors
    ///
    /// Returns [`RecibosError::Config`] if the URL is invalid or cannot carry paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use recibos::api::{QueryParams, ServiceUrl};
    ///
    /// let base = ServiceUrl::parse("api.example.com/v1")?;
    /// let params = QueryParams { desde: "250401".into(), hasta: "250430".into(), contribuyente: None };
    /// assert_eq!(
    ///     base.endpoint("recibos/reporte", &params).as_str(),
    ///     "https://api.example.com/v1/recibos/reporte?desde=250401&hasta=250430"
    /// );
    /// # Ok::<(), recibos::RecibosError>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{raw}")
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| RecibosError::Config(format!("invalid base URL {raw:?}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(RecibosError::Config(format!("base URL cannot carry paths: {raw:?}")));
        }
        Ok(Self(url))
    }

    /// Full URL for `path` (slash-separated, relative to the base) with `params`.
    #[must_use]
    pub fn endpoint(&self, path: &str, params: &QueryParams) -> Url {
        let mut url = self.0.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url.query_pairs_mut().extend_pairs(params.pairs());
        url
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Server-side PDF report URL for `prefix` (`<base><prefix>/reporte?...`).
///
/// Nothing is fetched; the URL is meant for an external browser.
#[must_use]
pub fn report_url(base: &ServiceUrl, prefix: &str, params: &QueryParams) -> String {
    base.endpoint(&format!("{prefix}/reporte"), params).to_string()
}

/// Async `GET`-and-decode access to the service.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Fetches `path` with `params` and returns the JSON body of a 2xx response.
    ///
    /// # Errors
    ///
    /// - [`RecibosError::Network`] on transport failure
    /// - [`RecibosError::Server`] on non-2xx status
    /// - [`RecibosError::Decode`] if the body is not JSON
    async fn get_json(&self, path: &str, params: &QueryParams) -> Result<Value>;
}

/// Body of a non-2xx response. `detail` may be a string or structured.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBody {
    fn into_detail(self) -> Option<String> {
        match self.detail? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: ServiceUrl,
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`RecibosError::Network`] if the HTTP client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn new(base: ServiceUrl) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("recibos/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RecibosError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { base, client })
    }

    #[must_use]
    pub const fn base(&self) -> &ServiceUrl {
        &self.base
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get_json(&self, path: &str, params: &QueryParams) -> Result<Value> {
        let url = self.base.endpoint(path, params);
        tracing::debug!(url = %url, "sending request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RecibosError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(ErrorBody::into_detail);
            tracing::debug!(url = %url, status = status.as_u16(), detail = ?detail, "request failed");
            return Err(RecibosError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| RecibosError::Decode(e.to_string()))?;
        tracing::debug!(url = %url, status = status.as_u16(), "request succeeded");
        Ok(body)
    }
}
