//! Campaign webhook endpoints.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{BaseClient, RequestDescriptor};
use super::error::ApiError;

/// Body for adding or updating a campaign webhook. Pass `id` to update
/// an existing one, omit it to create.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WebhookBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub webhook_url: String,
    /// Events that fire the webhook, e.g. ["EMAIL_SENT", "EMAIL_REPLY"].
    pub event_types: Vec<String>,
    /// Reply categories to filter on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// Client for the webhook endpoints.
pub struct WebhooksClient {
    base: Arc<BaseClient>,
}

impl WebhooksClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list_by_campaign(&self, campaign_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                format!("campaigns/{campaign_id}/webhooks"),
                "fetch campaign webhooks",
            ))
            .await
    }

    pub async fn upsert(&self, campaign_id: i64, body: &WebhookBody) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/webhooks"),
                    "upsert campaign webhook",
                )
                .idempotent(),
                body,
            )
            .await
    }

    pub async fn delete(&self, campaign_id: i64, webhook_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::delete(
                    format!("campaigns/{campaign_id}/webhooks"),
                    "delete campaign webhook",
                )
                .json(serde_json::json!({ "id": webhook_id })),
            )
            .await
    }
}
