//! Client (sub-account) management endpoints.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{BaseClient, RequestDescriptor};
use super::error::ApiError;

/// Body for adding a client to the workspace.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddClientBody {
    pub name: String,
    pub email: String,
    /// Permissions granted to the client, e.g. ["reply_master_inbox"],
    /// or ["full_access"].
    pub permission: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Initial password for the client login.
    pub password: String,
}

/// Client for the sub-account endpoints.
pub struct ClientsClient {
    base: Arc<BaseClient>,
}

impl ClientsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn add(&self, body: &AddClientBody) -> Result<Value, ApiError> {
        self.base
            .execute_json(RequestDescriptor::post("client/save", "add client"), body)
            .await
    }

    pub async fn list(&self) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get("client/", "fetch all clients"))
            .await
    }
}
