// Dedicated server API HTTP client
//
// Wraps `reqwest::Client` with Leaseweb URL construction, token injection,
// and response classification. Endpoint groups (servers, network, leases,
// catalog) are implemented as inherent methods in sibling files to keep this
// module focused on transport mechanics.

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::Page;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Header carrying the API token on every request.
pub const AUTH_HEADER: &str = "X-LSW-Auth";

/// Path prefix of the bare-metal API, relative to the host root.
const API_PREFIX: &str = "bareMetals/v2";

/// Page size used by every listing call.
pub const DEFAULT_PAGE_LIMIT: i32 = 50;

/// Everything needed to build a [`LeasewebClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme + host root, e.g. `https://api.leaseweb.com`.
    pub base_url: Url,
    pub token: SecretString,
    pub transport: TransportConfig,
}

/// Async client for the Leaseweb dedicated server API.
///
/// Stateless apart from immutable configuration, so a single instance is
/// shared (behind an `Arc`) by every concurrent caller.
#[derive(Debug, Clone)]
pub struct LeasewebClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LeasewebClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a [`ClientConfig`].
    ///
    /// Injects `X-LSW-Auth` as a sensitive default header on every request.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut token =
            HeaderValue::from_str(config.token.expose_secret()).map_err(|e| {
                Error::InvalidToken {
                    message: format!("invalid token header value: {e}"),
                }
            })?;
        token.set_sensitive(true);
        headers.insert(AUTH_HEADER, token);

        let http = config.transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(config.base_url.as_str())?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Append the `bareMetals/v2` prefix unless the caller already did.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::CannotBeABase(raw.to_owned()));
        }

        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with(API_PREFIX) {
            url.set_path(&path);
        } else {
            url.set_path(&format!("{path}/{API_PREFIX}"));
        }

        Ok(url)
    }

    /// The fully-prefixed API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append percent-encoded path segments onto the base URL.
    ///
    /// Server ids and IPs are opaque, so every segment is encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post_no_body(&self, segments: &[&str]) -> Result<(), Error> {
        let url = self.url(segments)?;
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(segments)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn put_no_response<B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(segments)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), Error> {
        let url = self.url(segments)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = body_preview(&body);
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Capture the response envelope. Message extraction is left to the
    /// caller so the raw body survives intact.
    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.ok();
        debug!(status = status.as_u16(), "API request failed");
        Error::api(status.as_u16(), body)
    }

    // ── Pagination helper ────────────────────────────────────────────

    /// Collect all pages into a single `Vec<T>`.
    pub async fn paginate_all<T, F, Fut>(&self, limit: i32, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(i64, i32) -> Fut,
        Fut: Future<Output = Result<Page<T>, Error>>,
    {
        let mut all = Vec::new();
        let mut offset: i64 = 0;

        loop {
            let page = fetch(offset, limit).await?;
            let received = page.data.len();
            all.extend(page.data);

            let limit_usize = usize::try_from(limit).unwrap_or(0);
            if received == 0
                || received < limit_usize
                || i64::try_from(all.len()).unwrap_or(i64::MAX) >= page.total_count
            {
                break;
            }

            offset += i64::try_from(received).unwrap_or(i64::MAX);
        }

        Ok(all)
    }
}

const BODY_PREVIEW_CHARS: usize = 200;

/// First 200 characters of `body`, cut on a character boundary.
fn body_preview(body: &str) -> &str {
    body.char_indices()
        .nth(BODY_PREVIEW_CHARS)
        .map_or(body, |(i, _)| &body[..i])
}
