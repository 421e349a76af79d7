//! Tool registry and response envelopes.
//!
//! Every tool handler is a boundary: arguments are validated against the
//! tool's typed parameter struct before any network call, and every
//! outcome - success or failure - leaves as a [`ToolEnvelope`], never as
//! a raw error.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ApiError, SmartleadClient};
use crate::mcp::protocol::ToolDescriptor;

mod analytics;
mod campaigns;
mod clients;
mod email_accounts;
mod leads;
mod smart_senders;
mod statistics;
mod webhooks;

/// Uniform response wrapper returned by every tool invocation.
///
/// Exactly one of the success or error shapes is produced per call:
/// `{success: true, message, data, summary?}` or
/// `{success: false, error, message, status_code?}`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Machine-readable error kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Upstream HTTP status, when the failure carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ToolEnvelope {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            summary: None,
            error: None,
            status_code: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            summary: None,
            error: Some(kind.into()),
            status_code: None,
        }
    }

    /// Rejected input; the upstream API was never contacted.
    pub fn validation_error(detail: impl Into<String>) -> Self {
        Self::failure("validation_error", format!("Invalid arguments: {}", detail.into()))
    }

    pub fn is_error(&self) -> bool {
        !self.success
    }

    /// Serialized form carried in the MCP text content block.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":"internal_error","message":"failed to encode response"}"#
                .to_string()
        })
    }
}

impl From<ApiError> for ToolEnvelope {
    fn from(err: ApiError) -> Self {
        let mut envelope = Self::failure(err.kind(), err.to_string());
        envelope.status_code = err.status();
        envelope
    }
}

/// Shorthand used by every handler to collapse a client call into an
/// envelope.
fn outcome(message: &str, result: Result<Value, ApiError>) -> ToolEnvelope {
    match result {
        Ok(data) => ToolEnvelope::success(message, data),
        Err(err) => err.into(),
    }
}

/// Argument struct for tools that take no input.
#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct NoParams {}

/// Render a payload field for a summary line. Only scalar fields are
/// worth echoing back.
fn field_display(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Count entries when the upstream returned a list, directly or under a
/// conventional wrapper key.
fn list_len(data: &Value) -> Option<usize> {
    if let Some(items) = data.as_array() {
        return Some(items.len());
    }
    data.get("data").and_then(Value::as_array).map(Vec::len)
}

/// Static metadata of one tool.
pub struct ToolSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl ToolSpec {
    pub fn new(name: &'static str, title: &'static str, description: &'static str) -> Self {
        Self { name, title, description }
    }
}

type ToolHandler = Arc<dyn Fn(Option<Value>) -> BoxFuture<'static, ToolEnvelope> + Send + Sync>;

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandler,
}

/// Name-indexed tool catalog. Iteration order is stable so `tools/list`
/// output does not shuffle between runs.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool whose arguments deserialize into `P`.
    ///
    /// The input schema is derived from `P`; arguments that fail to
    /// deserialize become a validation envelope without reaching the
    /// handler.
    pub fn register<P, F, Fut>(&mut self, spec: ToolSpec, handler: F)
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ToolEnvelope> + Send + 'static,
    {
        let schema = serde_json::to_value(schema_for!(P))
            .unwrap_or_else(|_| serde_json::json!({"type": "object"}));

        let descriptor = ToolDescriptor {
            name: spec.name.to_string(),
            title: Some(spec.title.to_string()),
            description: Some(spec.description.to_string()),
            input_schema: schema,
        };

        let boxed: ToolHandler = Arc::new(move |args: Option<Value>| {
            let args = args.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
            match serde_json::from_value::<P>(args) {
                Ok(params) => Box::pin(handler(params)) as BoxFuture<'static, ToolEnvelope>,
                Err(e) => {
                    let envelope = ToolEnvelope::validation_error(e.to_string());
                    Box::pin(async move { envelope }) as BoxFuture<'static, ToolEnvelope>
                }
            }
        });

        self.tools.insert(
            spec.name.to_string(),
            RegisteredTool { descriptor, handler: boxed },
        );
    }

    /// Descriptors for `tools/list`.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name. Unknown names come back as an error envelope,
    /// not a protocol error, so the calling client always sees the
    /// uniform shape.
    pub async fn dispatch(&self, name: &str, args: Option<Value>) -> ToolEnvelope {
        match self.tools.get(name) {
            Some(tool) => (tool.handler)(args).await,
            None => ToolEnvelope::failure("unknown_tool", format!("No such tool: {name}")),
        }
    }
}

/// Build the full SmartLead tool catalog over one client.
pub fn build_registry(client: Arc<SmartleadClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    campaigns::register(&mut registry, client.clone());
    leads::register(&mut registry, client.clone());
    analytics::register(&mut registry, client.clone());
    statistics::register(&mut registry, client.clone());
    email_accounts::register(&mut registry, client.clone());
    webhooks::register(&mut registry, client.clone());
    clients::register(&mut registry, client.clone());
    smart_senders::register(&mut registry, client);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{test_config, StubReply, StubTransport};
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, JsonSchema)]
    struct EchoParams {
        text: String,
    }

    fn echo_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register::<EchoParams, _, _>(
            ToolSpec::new("echo", "Echo", "Echo the input back"),
            |params| async move { ToolEnvelope::success("ok", json!({"echo": params.text})) },
        );
        registry
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let registry = echo_registry();
        let envelope = registry.dispatch("echo", Some(json!({"text": "hi"}))).await;
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(json!({"echo": "hi"})));
    }

    #[tokio::test]
    async fn test_dispatch_validation_error() {
        let registry = echo_registry();
        let envelope = registry.dispatch("echo", Some(json!({"text": 42}))).await;
        assert!(envelope.is_error());
        assert_eq!(envelope.error.as_deref(), Some("validation_error"));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let registry = echo_registry();
        let envelope = registry.dispatch("nope", None).await;
        assert!(envelope.is_error());
        assert_eq!(envelope.error.as_deref(), Some("unknown_tool"));
    }

    #[test]
    fn test_descriptor_schema_lists_required_field() {
        let registry = echo_registry();
        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 1);
        let schema = &descriptors[0].input_schema;
        assert!(schema["properties"]["text"].is_object());
    }

    #[test]
    fn test_envelope_json_shapes() {
        let ok = ToolEnvelope::success("done", json!({"id": 1})).with_summary("made 1");
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["summary"], "made 1");
        assert!(value.get("error").is_none());

        let err: ToolEnvelope = ApiError::Upstream {
            operation: "create campaign".to_string(),
            status: 404,
            detail: "nope".to_string(),
            body: None,
        }
        .into();
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "upstream_error");
        assert_eq!(value["status_code"], 404);
        assert!(value.get("data").is_none());
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_network_call() {
        let transport = StubTransport::new(vec![]);
        let client = Arc::new(
            SmartleadClient::with_transport(test_config(), transport.clone()).unwrap(),
        );
        let registry = build_registry(client);

        // Missing the required `name` field.
        let envelope =
            registry.dispatch("smartlead_create_campaign", Some(json!({}))).await;

        assert!(envelope.is_error());
        assert_eq!(envelope.error.as_deref(), Some("validation_error"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_valid_input_passes_payload_through() {
        let transport =
            StubTransport::new(vec![StubReply::Json(200, json!({"id": 7, "name": "Renewals"}))]);
        let client = Arc::new(
            SmartleadClient::with_transport(test_config(), transport.clone()).unwrap(),
        );
        let registry = build_registry(client);

        let envelope = registry
            .dispatch("smartlead_fetch_campaign", Some(json!({"campaign_id": 7})))
            .await;

        assert!(envelope.success);
        assert_eq!(envelope.data, Some(json!({"id": 7, "name": "Renewals"})));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_create_campaign_scenario() {
        let transport = StubTransport::new(vec![StubReply::Json(200, json!({"id": 42}))]);
        let client =
            Arc::new(SmartleadClient::with_transport(test_config(), transport).unwrap());
        let registry = build_registry(client);

        let envelope = registry
            .dispatch("smartlead_create_campaign", Some(json!({"name": "Q1 Outreach"})))
            .await;

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Campaign created successfully",
                "data": {"id": 42},
                "summary": "Campaign \"Q1 Outreach\" created with ID: 42"
            })
        );
    }
}
