//! MCP server over stdio.
//!
//! Line-delimited JSON-RPC: requests arrive on stdin, responses leave on
//! stdout through a single writer task. stderr carries logs only, so the
//! transport stays clean. Tool calls run on their own tasks; slow
//! upstream requests never block the read loop, and concurrent calls
//! each own their retry lifecycle.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use super::protocol::{
    CallToolParams, CallToolResult, IncomingMessage, InitializeResult, JsonRpcResponse,
    ListToolsResult, RequestId, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tools::ToolRegistry;

/// Error type for the serve loop.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("stdio error: {0}")]
    Io(#[from] std::io::Error),
}

/// The MCP server: a tool registry wired to stdio.
pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry: Arc::new(registry) }
    }

    /// Serve until stdin closes or a termination signal arrives.
    pub async fn run(self) -> Result<(), ServeError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        let (tx, mut rx) = mpsc::channel::<String>(64);
        let writer = tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(line) = rx.recv().await {
                if stdout.write_all(line.as_bytes()).await.is_err()
                    || stdout.write_all(b"\n").await.is_err()
                    || stdout.flush().await.is_err()
                {
                    break;
                }
            }
        });

        tracing::info!(tools = self.registry.len(), "MCP server listening on stdio");

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown signal received");
                    break;
                }
                line = lines.next_line() => {
                    match line? {
                        Some(line) if line.trim().is_empty() => {}
                        Some(line) => self.handle_line(&line, &tx).await,
                        None => {
                            tracing::info!("stdin closed");
                            break;
                        }
                    }
                }
            }
        }

        // Dropping the sender lets the writer drain and exit.
        drop(tx);
        let _ = writer.await;
        Ok(())
    }

    /// Parse and dispatch one incoming line.
    async fn handle_line(&self, line: &str, tx: &mpsc::Sender<String>) {
        let message: IncomingMessage = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable message");
                send(tx, &JsonRpcResponse::error(None, PARSE_ERROR, format!("invalid JSON: {e}")))
                    .await;
                return;
            }
        };

        if message.is_notification() {
            tracing::debug!(method = %message.method, "notification");
            return;
        }
        let Some(id) = message.id else { return };

        tracing::debug!(method = %message.method, "request");
        match message.method.as_str() {
            "initialize" => {
                send_result(tx, id, serde_json::to_value(InitializeResult::current())).await;
            }
            "ping" => {
                send(tx, &JsonRpcResponse::result(id, serde_json::json!({}))).await;
            }
            "tools/list" => {
                let result = ListToolsResult { tools: self.registry.descriptors() };
                send_result(tx, id, serde_json::to_value(result)).await;
            }
            "tools/call" => {
                let params: CallToolParams =
                    match serde_json::from_value(message.params.unwrap_or_default()) {
                        Ok(params) => params,
                        Err(e) => {
                            send(
                                tx,
                                &JsonRpcResponse::error(
                                    Some(id),
                                    INVALID_PARAMS,
                                    format!("invalid tools/call params: {e}"),
                                ),
                            )
                            .await;
                            return;
                        }
                    };

                let registry = self.registry.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    tracing::debug!(tool = %params.name, "tool call started");
                    let envelope = registry.dispatch(&params.name, params.arguments).await;
                    let result = CallToolResult::text(envelope.to_json(), envelope.is_error());
                    send_result(&tx, id, serde_json::to_value(result)).await;
                });
            }
            other => {
                send(
                    tx,
                    &JsonRpcResponse::error(
                        Some(id),
                        METHOD_NOT_FOUND,
                        format!("unknown method: {other}"),
                    ),
                )
                .await;
            }
        }
    }
}

async fn send_result(
    tx: &mpsc::Sender<String>,
    id: RequestId,
    result: Result<serde_json::Value, serde_json::Error>,
) {
    let response = match result {
        Ok(value) => JsonRpcResponse::result(id, value),
        Err(e) => JsonRpcResponse::error(Some(id), INTERNAL_ERROR, e.to_string()),
    };
    send(tx, &response).await;
}

async fn send(tx: &mpsc::Sender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(line) => {
            if tx.send(line).await.is_err() {
                tracing::warn!("writer task gone, dropping response");
            }
        }
        Err(e) => tracing::error!(error = %e, "failed to encode response"),
    }
}

/// Resolves on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolEnvelope, ToolSpec};
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Deserialize, JsonSchema)]
    struct PingParams {
        text: String,
    }

    fn test_server() -> McpServer {
        let mut registry = ToolRegistry::new();
        registry.register::<PingParams, _, _>(
            ToolSpec::new("test_echo", "Echo", "Echo the text argument"),
            |params| async move { ToolEnvelope::success("ok", json!({"echo": params.text})) },
        );
        McpServer::new(registry)
    }

    async fn roundtrip(server: &McpServer, line: &str) -> Value {
        let (tx, mut rx) = mpsc::channel(8);
        server.handle_line(line, &tx).await;
        let response = rx.recv().await.expect("expected a response");
        serde_json::from_str(&response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let server = test_server();
        let response =
            roundtrip(&server, r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#).await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["serverInfo"]["name"], "smartlead-mcp");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = test_server();
        let response =
            roundtrip(&server, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "test_echo");
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_tool_call_roundtrip() {
        let server = test_server();
        let line = r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"test_echo","arguments":{"text":"hi"}}}"#;
        let response = roundtrip(&server, line).await;

        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let envelope: Value = serde_json::from_str(text).unwrap();
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["data"]["echo"], "hi");
        assert!(response["result"].get("isError").is_none());
    }

    #[tokio::test]
    async fn test_tool_call_validation_error_is_enveloped() {
        let server = test_server();
        let line = r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"test_echo","arguments":{"text":7}}}"#;
        let response = roundtrip(&server, line).await;

        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let envelope: Value = serde_json::from_str(text).unwrap();
        assert_eq!(envelope["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = test_server();
        let response =
            roundtrip(&server, r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#).await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parse_error_has_null_id() {
        let server = test_server();
        let response = roundtrip(&server, "not json").await;
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert!(response["id"].is_null());
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = test_server();
        let (tx, mut rx) = mpsc::channel(8);
        server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#, &tx)
            .await;
        drop(tx);
        assert!(rx.recv().await.is_none());
    }
}
