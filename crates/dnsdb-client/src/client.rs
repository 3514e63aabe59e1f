//! Main DNSDB API client implementation.

use crate::api::LookupApi;
use crate::rate_limit::RateLimiter;
use crate::stream::RecordStream;
use dnsdb_core::{DnsdbError, LookupResult, RDataRecord, RRSetRecord, RateLimitStatus, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::tls::Version;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The DNSDB API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.dnsdb.info";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type requested from every endpoint
const API_FORMAT: &str = "application/json";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-api-key";

/// Main DNSDB API client
#[derive(Clone)]
pub struct DnsdbClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
    limiter: Arc<RateLimiter>,
}

impl DnsdbClient {
    /// Create a new client with the given API key using default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        DnsdbClientBuilder::new(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> DnsdbClientBuilder {
        DnsdbClientBuilder::new(api_key)
    }

    /// Access the `/lookup` endpoints
    #[must_use]
    pub const fn lookup(&self) -> LookupApi<'_> {
        LookupApi::new(self)
    }

    /// Quota tracker consulted before every request
    #[must_use]
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.inner.limiter
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Current quota of the API key, from `/lookup/rate_limit/`
    pub async fn rate_limit_query(&self) -> Result<RateLimitStatus> {
        self.lookup().rate_limit().await
    }

    /// All rrsets observed for `name`
    pub async fn rrset_query(&self, name: &str) -> LookupResult<RRSetRecord> {
        self.lookup().rrset(name).send().await
    }

    /// All records whose rdata matches `value`, interpreted as `format`
    /// (`name`, `ip` or `raw`)
    pub async fn rdata_query(&self, value: &str, format: &str) -> LookupResult<RDataRecord> {
        self.lookup().rdata(value, format).send().await
    }

    /// Build an endpoint URL from path segments and query parameters.
    ///
    /// Each segment is percent-encoded on its own, so a `/` inside a query
    /// value cannot change the endpoint.
    pub(crate) fn endpoint<'s>(
        &self,
        segments: impl IntoIterator<Item = &'s str>,
        params: &[(&str, String)],
    ) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DnsdbError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    /// GET an endpoint returning a single JSON object
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.execute(url).await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await.map_err(|e| DnsdbError::Io(e.to_string()))?;
            serde_json::from_slice(&body).map_err(DnsdbError::Json)
        } else {
            Err(Self::handle_error(status, response).await)
        }
    }

    /// GET an endpoint returning newline-delimited JSON.
    ///
    /// A 404 is how the lookup endpoints report "no results", so it yields
    /// an empty stream.
    pub(crate) async fn get_records<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<RecordStream<T>> {
        let response = self.execute(url).await?;
        let status = response.status();

        if status.is_success() {
            Ok(RecordStream::from_response(response))
        } else if status == StatusCode::NOT_FOUND {
            debug!("no results");
            Ok(RecordStream::from_reader(&b""[..]))
        } else {
            Err(Self::handle_error(status, response).await)
        }
    }

    /// Send a GET through the quota gate and record the quota it reports.
    async fn execute(&self, url: Url) -> Result<Response> {
        let limiter = &self.inner.limiter;
        if !limiter.allow() {
            warn!("quota exhausted, request not sent");
            return Err(DnsdbError::QuotaExceeded {
                limit: limiter.exhausted_limit(),
            });
        }

        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if let Err(e) = limiter.update(response.headers()) {
            if status.is_success() {
                return Err(e);
            }
            // The status error is what the caller needs to see here.
            warn!(error = %e, status = status.as_u16(), "unusable rate limit headers");
        }

        Ok(response)
    }

    fn transport_error(&self, e: &reqwest::Error) -> DnsdbError {
        if e.is_timeout() {
            DnsdbError::Timeout(self.inner.timeout.as_secs())
        } else if e.is_connect() {
            DnsdbError::Connection(e.to_string())
        } else {
            DnsdbError::Http(e.to_string())
        }
    }

    /// Convert an error response to a [`DnsdbError`]
    async fn handle_error(status: StatusCode, response: Response) -> DnsdbError {
        let body = response.text().await.unwrap_or_default();

        // Try to parse error message from JSON
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| body.trim().to_string());

        match status.as_u16() {
            401 | 403 => DnsdbError::Unauthorized,
            429 => {
                warn!("Rate limited by DNSDB API");
                DnsdbError::RateLimited
            }
            code => DnsdbError::Api { code, message },
        }
    }
}

impl std::fmt::Debug for DnsdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsdbClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("quota", &self.inner.limiter.snapshot())
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`DnsdbClient`]
pub struct DnsdbClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    https_only: bool,
    limiter: Option<Arc<RateLimiter>>,
}

impl DnsdbClientBuilder {
    /// Create a new builder with the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("dnsdb-rust/{}", env!("CARGO_PKG_VERSION")),
            https_only: true,
            limiter: None,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Refuse plain-HTTP base URLs (on by default)
    #[must_use]
    pub const fn https_only(mut self, enabled: bool) -> Self {
        self.https_only = enabled;
        self
    }

    /// Share a quota tracker with other clients
    #[must_use]
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Build the client.
    ///
    /// TLS is pinned to version 1.2 at both ends of the negotiable range.
    pub fn build(self) -> Result<DnsdbClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| DnsdbError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(DnsdbError::InvalidUrl(self.base_url));
        }

        let mut api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| DnsdbError::Config("API key contains invalid characters".into()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(API_FORMAT));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .min_tls_version(Version::TLS_1_2)
            .max_tls_version(Version::TLS_1_2)
            .https_only(self.https_only)
            .build()
            .map_err(|e| DnsdbError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(DnsdbClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                limiter: self.limiter.unwrap_or_default(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::{LIMIT_HEADER, REMAINING_HEADER};
    use dnsdb_core::{Quota, QuotaValue};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DnsdbClient {
        DnsdbClient::builder("test-key")
            .base_url(server.uri())
            .https_only(false)
            .build()
            .unwrap()
    }

    fn with_quota(template: ResponseTemplate, limit: &str, remaining: &str) -> ResponseTemplate {
        template
            .insert_header(LIMIT_HEADER, limit)
            .insert_header(REMAINING_HEADER, remaining)
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = DnsdbClient::builder("k")
            .base_url("https://api.example.net/")
            .build()
            .unwrap();
        let url = client
            .endpoint(["lookup", "rrset", "name", "a/b c"], &[])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example.net/lookup/rrset/name/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_params() {
        let client = DnsdbClient::builder("k")
            .base_url("https://proxy.example.net/dnsdb")
            .build()
            .unwrap();
        let url = client
            .endpoint(["lookup", "rate_limit", ""], &[("limit", "10".to_string())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://proxy.example.net/dnsdb/lookup/rate_limit/?limit=10"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = DnsdbClient::builder("k").base_url("not a url").build().unwrap_err();
        assert!(matches!(err, DnsdbError::InvalidUrl(_)));
        let err = DnsdbClient::builder("k").base_url("mailto:x@y").build().unwrap_err();
        assert!(matches!(err, DnsdbError::InvalidUrl(_)));
    }

    #[test]
    fn test_invalid_api_key() {
        let err = DnsdbClient::new("bad\nkey").unwrap_err();
        assert!(matches!(err, DnsdbError::Config(_)));
    }

    #[tokio::test]
    async fn test_sends_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lookup/rate_limit/"))
            .and(header("X-API-Key", "test-key"))
            .and(header("Accept", "application/json"))
            .respond_with(with_quota(
                ResponseTemplate::new(200).set_body_string(
                    r#"{"rate":{"reset":1433980800,"limit":1000,"remaining":999}}"#,
                ),
                "1000",
                "999",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let status = client.rate_limit_query().await.unwrap();
        assert_eq!(status.remaining, QuotaValue::Count(999));
        assert_eq!(
            client.rate_limiter().snapshot(),
            Some(Quota {
                limit: QuotaValue::Count(1000),
                remaining: QuotaValue::Count(999),
            })
        );
    }

    #[tokio::test]
    async fn test_bad_quota_header_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(with_quota(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"rate":{"reset":0,"limit":10,"remaining":9}}"#),
                "10",
                "nine",
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.rate_limit_query().await.unwrap_err();
        assert!(matches!(
            err,
            DnsdbError::RateLimitHeader { header: REMAINING_HEADER, .. }
        ));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string(r#"{"error":"Error: Bad API key"}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.rate_limit_query().await.unwrap_err();
        assert!(err.is_auth_error());
        // Headers were missing, but the status error wins and the tracker
        // is left alone.
        assert!(client.rate_limiter().snapshot().is_none());
    }

    #[tokio::test]
    async fn test_api_error_message_from_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(with_quota(
                ResponseTemplate::new(500).set_body_string(r#"{"error":"backend unavailable"}"#),
                "1000",
                "12",
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.rate_limit_query().await.unwrap_err();
        assert!(matches!(
            err,
            DnsdbError::Api { code: 500, ref message } if message == "backend unavailable"
        ));
        // Error responses still update the tracker.
        assert_eq!(
            client.rate_limiter().snapshot().map(|q| q.remaining),
            Some(QuotaValue::Count(12))
        );
    }

    #[tokio::test]
    async fn test_server_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(with_quota(ResponseTemplate::new(429), "1000", "0"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.rate_limit_query().await.unwrap_err();
        assert!(matches!(err, DnsdbError::RateLimited));
        assert!(err.is_retryable());
        assert!(!client.rate_limiter().allow());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = DnsdbClient::builder("k")
            .base_url("http://127.0.0.1:9")
            .https_only(false)
            .build()
            .unwrap();
        let err = client.rate_limit_query().await.unwrap_err();
        assert!(matches!(err, DnsdbError::Connection(_) | DnsdbError::Http(_)));
    }

    #[tokio::test]
    async fn test_https_only_rejects_plain_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = DnsdbClient::builder("k").base_url(server.uri()).build().unwrap();
        let err = client.rate_limit_query().await.unwrap_err();
        assert!(matches!(err, DnsdbError::Http(_)));
    }

    #[tokio::test]
    async fn test_shared_limiter_between_clients() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(with_quota(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"rate":{"reset":0,"limit":10,"remaining":0}}"#),
                "10",
                "0",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let limiter = Arc::new(RateLimiter::new());
        let build = || {
            DnsdbClient::builder("k")
                .base_url(server.uri())
                .https_only(false)
                .rate_limiter(limiter.clone())
                .build()
                .unwrap()
        };
        let first = build();
        let second = build();

        first.rate_limit_query().await.unwrap();
        let err = second.rate_limit_query().await.unwrap_err();
        assert!(matches!(
            err,
            DnsdbError::QuotaExceeded { limit: QuotaValue::Count(10) }
        ));
    }
}
