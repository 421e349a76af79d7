//! Shared HTTP request core.
//!
//! Every outbound SmartLead call goes through [`BaseClient::execute`]: it
//! owns the transport, attaches the API key, applies the configured
//! timeout, retries transient failures with exponential backoff, and
//! translates every failure mode into [`ApiError`]. Resource clients
//! never perform network I/O directly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use crate::config::Config;

/// Maximum backoff between attempts, regardless of the configured seed.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Which upstream host a request targets. Smart Senders lives on its own
/// API root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiHost {
    #[default]
    Main,
    SmartSenders,
}

/// One outbound call, built by a resource client and discarded once the
/// call resolves.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Resource path relative to the host's API root, without a leading
    /// slash.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Human label of the operation ("create campaign"), carried into
    /// every error raised for this call.
    pub label: &'static str,
    pub host: ApiHost,
    /// Whether the operation can be repeated without upstream side
    /// effects. Controls which failure classes are retried.
    pub idempotent: bool,
}

impl RequestDescriptor {
    fn new(method: HttpMethod, path: impl Into<String>, label: &'static str) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            label,
            host: ApiHost::Main,
            idempotent: !matches!(method, HttpMethod::Post),
        }
    }

    pub fn get(path: impl Into<String>, label: &'static str) -> Self {
        Self::new(HttpMethod::Get, path, label)
    }

    pub fn post(path: impl Into<String>, label: &'static str) -> Self {
        Self::new(HttpMethod::Post, path, label)
    }

    pub fn put(path: impl Into<String>, label: &'static str) -> Self {
        Self::new(HttpMethod::Put, path, label)
    }

    pub fn patch(path: impl Into<String>, label: &'static str) -> Self {
        Self::new(HttpMethod::Patch, path, label)
    }

    pub fn delete(path: impl Into<String>, label: &'static str) -> Self {
        Self::new(HttpMethod::Delete, path, label)
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Target the Smart Senders host instead of the main API.
    pub fn on_smart_senders(mut self) -> Self {
        self.host = ApiHost::SmartSenders;
        self
    }

    /// Mark a POST as safe to repeat (e.g. status toggles, which the
    /// upstream treats as idempotent writes).
    pub fn idempotent(mut self) -> Self {
        self.idempotent = true;
        self
    }
}

/// A request fully resolved against the configuration, ready for the
/// transport. The API key rides in `query`.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Raw outcome of a single HTTP attempt.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Failure before an HTTP status was received.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection was never established; the upstream cannot have
    /// processed the request.
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    /// Any other transport-level failure; upstream state is unknown.
    #[error("transport error: {0}")]
    Other(String),
}

/// Transport seam between the request core and the HTTP stack.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &PreparedRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by [`reqwest`].
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("smartlead-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<TransportResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url).query(&request.query);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .map_err(|e| TransportError::Other(e.to_string()))?;
                Ok(TransportResponse { status, body })
            }
            Err(e) if e.is_timeout() => Err(TransportError::Timeout),
            Err(e) if e.is_connect() => Err(TransportError::Connect(e.to_string())),
            Err(e) => Err(TransportError::Other(e.to_string())),
        }
    }
}

/// Backoff schedule for retries.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt (0 = fail fast).
    pub max_retries: u32,
    /// Delay before the first retry; doubled per subsequent retry.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay to sleep after `failed_attempts` attempts have failed.
    pub fn delay_for_attempt(&self, failed_attempts: u32) -> Duration {
        if failed_attempts == 0 {
            return Duration::ZERO;
        }
        let millis = self.base_delay.as_millis() as u64;
        let factor = 2u64.saturating_pow(failed_attempts.saturating_sub(1));
        Duration::from_millis(millis.saturating_mul(factor)).min(MAX_BACKOFF)
    }
}

/// How one failed attempt should be handled.
enum AttemptOutcome {
    Success(Value),
    Retry { reason: String, error: ApiError },
    Fatal(ApiError),
}

/// The shared request client.
///
/// Holds no mutable state across calls; concurrent `execute` calls each
/// own their request lifecycle and retry loop independently.
pub struct BaseClient {
    config: Arc<Config>,
    transport: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
}

impl BaseClient {
    /// Build a client with the production reqwest transport.
    pub fn new(config: Arc<Config>) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.timeout()).map_err(|e| {
            ApiError::Network {
                operation: "client construction".to_string(),
                attempts: 0,
                detail: e.to_string(),
            }
        })?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build a client on top of an arbitrary transport.
    ///
    /// Fails with [`ApiError::MissingApiKey`] before any network call if
    /// the configured key is blank.
    pub fn with_transport(
        config: Arc<Config>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        if config.api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        let policy = RetryPolicy {
            max_retries: config.max_retries,
            base_delay: config.retry_delay(),
        };
        Ok(Self { config, transport, policy })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue a call and return the parsed response body.
    ///
    /// Retry policy: network connect failures and HTTP 429 are always
    /// transient. HTTP 5xx and timeouts are transient only for idempotent
    /// operations; on a non-idempotent create the upstream may already
    /// have applied the write, so those are surfaced immediately instead
    /// of risking a duplicate. 4xx other than 429 is never retried.
    pub async fn execute(&self, request: RequestDescriptor) -> Result<Value, ApiError> {
        let prepared = self.prepare(&request);
        let max_attempts = self.policy.max_retries + 1;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            tracing::debug!(
                operation = request.label,
                method = request.method.as_str(),
                path = %request.path,
                attempt,
                "sending request"
            );

            let outcome = self.transport.send(&prepared).await;
            match self.classify(outcome, &request, attempt) {
                AttemptOutcome::Success(value) => return Ok(value),
                AttemptOutcome::Fatal(error) => return Err(error),
                AttemptOutcome::Retry { reason, error } => {
                    if attempt >= max_attempts {
                        return Err(error);
                    }
                    let delay = self.policy.delay_for_attempt(attempt);
                    tracing::warn!(
                        operation = request.label,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        reason = %reason,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Serialize `body` and issue the call. The common shape for POSTs
    /// whose body is a typed request struct.
    pub async fn execute_json<T: serde::Serialize + ?Sized>(
        &self,
        request: RequestDescriptor,
        body: &T,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode {
            operation: request.label.to_string(),
            detail: e.to_string(),
        })?;
        self.execute(request.json(body)).await
    }

    fn prepare(&self, request: &RequestDescriptor) -> PreparedRequest {
        let base = match request.host {
            ApiHost::Main => self.config.base_url.as_str(),
            ApiHost::SmartSenders => self.config.smart_senders_url.as_str(),
        };
        let url = format!("{}/{}", base.trim_end_matches('/'), request.path);

        let mut query = Vec::with_capacity(request.query.len() + 1);
        query.push(("api_key".to_string(), self.config.api_key.clone()));
        query.extend(request.query.iter().cloned());

        PreparedRequest { method: request.method, url, query, body: request.body.clone() }
    }

    fn classify(
        &self,
        outcome: Result<TransportResponse, TransportError>,
        request: &RequestDescriptor,
        attempt: u32,
    ) -> AttemptOutcome {
        match outcome {
            Ok(response) if (200..300).contains(&response.status) => {
                match parse_body(&response.body) {
                    Ok(value) => AttemptOutcome::Success(value),
                    Err(detail) => AttemptOutcome::Fatal(ApiError::Decode {
                        operation: request.label.to_string(),
                        detail,
                    }),
                }
            }
            Ok(response) => {
                let error = upstream_error(request.label, &response);
                // 429 means the upstream rejected the request before
                // processing it, so it is safe to retry even a create.
                if response.status == 429 || (response.status >= 500 && request.idempotent) {
                    AttemptOutcome::Retry {
                        reason: format!("HTTP {}", response.status),
                        error,
                    }
                } else {
                    AttemptOutcome::Fatal(error)
                }
            }
            Err(TransportError::Connect(detail)) => AttemptOutcome::Retry {
                reason: format!("connection failed: {detail}"),
                error: ApiError::Network {
                    operation: request.label.to_string(),
                    attempts: attempt,
                    detail,
                },
            },
            Err(TransportError::Timeout) => {
                let error = ApiError::Timeout { operation: request.label.to_string() };
                if request.idempotent {
                    AttemptOutcome::Retry { reason: "timeout".to_string(), error }
                } else {
                    AttemptOutcome::Fatal(error)
                }
            }
            Err(TransportError::Other(detail)) => {
                let error = ApiError::Network {
                    operation: request.label.to_string(),
                    attempts: attempt,
                    detail: detail.clone(),
                };
                if request.idempotent {
                    AttemptOutcome::Retry { reason: detail, error }
                } else {
                    AttemptOutcome::Fatal(error)
                }
            }
        }
    }
}

/// Parse a response body, treating an empty body as JSON null.
fn parse_body(body: &str) -> Result<Value, String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(trimmed).map_err(|e| e.to_string())
}

/// Build the upstream error for a non-2xx response, pulling the detail
/// out of the error payload when the upstream sent one.
fn upstream_error(label: &str, response: &TransportResponse) -> ApiError {
    let body = serde_json::from_str::<Value>(response.body.trim()).ok();
    let detail = body
        .as_ref()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(Value::as_str)
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| {
            let raw = response.body.trim();
            if raw.is_empty() {
                "no error detail from upstream".to_string()
            } else {
                raw.chars().take(200).collect()
            }
        });

    ApiError::Upstream {
        operation: label.to_string(),
        status: response.status,
        detail,
        body,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for exercising the retry loop without a
    //! network.

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Canned reply for one attempt.
    pub enum StubReply {
        Status(u16, &'static str),
        Json(u16, Value),
        Connect,
        Timeout,
    }

    /// Transport that pops one scripted reply per attempt and counts
    /// calls.
    pub struct StubTransport {
        replies: Mutex<VecDeque<StubReply>>,
        calls: AtomicU32,
    }

    impl StubTransport {
        pub fn new(replies: Vec<StubReply>) -> Arc<Self> {
            Arc::new(Self { replies: Mutex::new(replies.into()), calls: AtomicU32::new(0) })
        }

        /// A transport that answers every attempt with the same status
        /// and body.
        pub fn always(status: u16, body: &'static str, attempts: usize) -> Arc<Self> {
            Self::new((0..attempts).map(|_| StubReply::Status(status, body)).collect())
        }

        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn send(
            &self,
            _request: &PreparedRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("stub transport ran out of scripted replies");
            match reply {
                StubReply::Status(status, body) => {
                    Ok(TransportResponse { status, body: body.to_string() })
                }
                StubReply::Json(status, value) => {
                    Ok(TransportResponse { status, body: value.to_string() })
                }
                StubReply::Connect => Err(TransportError::Connect("connection refused".into())),
                StubReply::Timeout => Err(TransportError::Timeout),
            }
        }
    }

    /// A config with sub-millisecond backoff so retry tests stay fast.
    pub fn test_config() -> Arc<Config> {
        let mut config = Config::new("test-key").unwrap();
        config.retry_delay_ms = 1;
        Arc::new(config)
    }

    /// A base client wired to the given stub.
    pub fn test_client(transport: Arc<StubTransport>) -> BaseClient {
        BaseClient::with_transport(test_config(), transport).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{test_client, test_config, StubReply, StubTransport};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_api_key_fails_construction() {
        let mut config = Config::new("placeholder").unwrap();
        config.api_key = "   ".to_string();
        let transport = StubTransport::new(vec![]);
        let result = BaseClient::with_transport(Arc::new(config), transport.clone());

        assert!(matches!(result, Err(ApiError::MissingApiKey)));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_backoff_increases_and_caps() {
        let policy = RetryPolicy { max_retries: 10, base_delay: Duration::from_millis(1000) };

        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(4000));
        assert!(policy.delay_for_attempt(2) > policy.delay_for_attempt(1));
        assert_eq!(policy.delay_for_attempt(30), MAX_BACKOFF);
    }

    #[test]
    fn test_api_key_rides_in_query() {
        let transport = StubTransport::new(vec![]);
        let client = test_client(transport);
        let prepared =
            client.prepare(&RequestDescriptor::get("campaigns", "fetch all campaigns"));

        assert_eq!(prepared.url, "https://server.smartlead.ai/api/v1/campaigns");
        assert_eq!(prepared.query[0], ("api_key".to_string(), "test-key".to_string()));
    }

    #[test]
    fn test_smart_senders_host_selection() {
        let transport = StubTransport::new(vec![]);
        let client = test_client(transport);
        let prepared = client.prepare(
            &RequestDescriptor::get("get-domain-list", "fetch domain list").on_smart_senders(),
        );

        assert!(prepared.url.starts_with("https://smart-senders.smartlead.ai/api/v1/"));
    }

    #[tokio::test]
    async fn test_success_returns_raw_payload() {
        let transport = StubTransport::new(vec![StubReply::Json(200, json!({"id": 42}))]);
        let client = test_client(transport.clone());

        let value = client
            .execute(RequestDescriptor::get("campaigns/42", "fetch campaign"))
            .await
            .unwrap();

        assert_eq!(value, json!({"id": 42}));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_body_parses_as_null() {
        let transport = StubTransport::new(vec![StubReply::Status(200, "")]);
        let client = test_client(transport);

        let value = client
            .execute(RequestDescriptor::delete("campaigns/42", "delete campaign"))
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_404_not_retried() {
        let transport = StubTransport::new(vec![StubReply::Status(404, r#"{"message":"Campaign not found"}"#)]);
        let client = test_client(transport.clone());

        let err = client
            .execute(RequestDescriptor::get("campaigns/999", "fetch campaign"))
            .await
            .unwrap_err();

        assert_eq!(transport.calls(), 1);
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("fetch campaign"));
        assert!(err.to_string().contains("Campaign not found"));
    }

    #[tokio::test]
    async fn test_500_retried_until_exhaustion() {
        // 1 initial attempt + max_retries retries.
        let expected_attempts = test_config().max_retries + 1;
        let transport = StubTransport::always(500, "oops", expected_attempts as usize);
        let client = test_client(transport.clone());

        let err = client
            .execute(RequestDescriptor::get("campaigns", "fetch all campaigns"))
            .await
            .unwrap_err();

        assert_eq!(transport.calls(), expected_attempts);
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("fetch all campaigns"));
    }

    #[tokio::test]
    async fn test_429_then_success() {
        let transport = StubTransport::new(vec![
            StubReply::Status(429, r#"{"message":"rate limited"}"#),
            StubReply::Json(200, json!({"ok": true})),
        ]);
        let client = test_client(transport.clone());

        let value = client
            .execute(
                RequestDescriptor::post("campaigns/create", "create campaign")
                    .json(json!({"name": "x"})),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"ok": true}));
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_500_on_create_not_retried() {
        // The upstream may already have applied a non-idempotent write.
        let transport = StubTransport::always(500, "oops", 1);
        let client = test_client(transport.clone());

        let err = client
            .execute(
                RequestDescriptor::post("campaigns/create", "create campaign")
                    .json(json!({"name": "x"})),
            )
            .await
            .unwrap_err();

        assert_eq!(transport.calls(), 1);
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_connect_failure_retried_even_for_create() {
        // The connection never opened, so the create cannot have landed.
        let transport = StubTransport::new(vec![
            StubReply::Connect,
            StubReply::Json(200, json!({"id": 1})),
        ]);
        let client = test_client(transport.clone());

        let value = client
            .execute(
                RequestDescriptor::post("campaigns/create", "create campaign")
                    .json(json!({"name": "x"})),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"id": 1}));
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_timeout_on_create_surfaced_immediately() {
        let transport = StubTransport::new(vec![StubReply::Timeout]);
        let client = test_client(transport.clone());

        let err = client
            .execute(
                RequestDescriptor::post("campaigns/create", "create campaign")
                    .json(json!({"name": "x"})),
            )
            .await
            .unwrap_err();

        assert_eq!(transport.calls(), 1);
        assert!(matches!(err, ApiError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_network_failure_exhausts_then_surfaces() {
        let expected_attempts = test_config().max_retries + 1;
        let transport = StubTransport::new(
            (0..expected_attempts).map(|_| StubReply::Connect).collect(),
        );
        let client = test_client(transport.clone());

        let err = client
            .execute(RequestDescriptor::get("campaigns", "fetch all campaigns"))
            .await
            .unwrap_err();

        assert_eq!(transport.calls(), expected_attempts);
        assert!(matches!(err, ApiError::Network { .. }));
        assert!(err.to_string().contains("fetch all campaigns"));
    }
}
