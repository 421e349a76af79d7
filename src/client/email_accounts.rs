//! Email account (sender mailbox) endpoints.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{BaseClient, RequestDescriptor};
use super::error::ApiError;

/// SMTP/IMAP details for creating or updating an email account.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailAccountBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imap_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imap_port: Option<u16>,
    /// Daily sending cap for this mailbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_email_per_day: Option<u32>,
    /// Extra signature appended to outgoing mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_tracking_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
}

/// Warmup knobs for one mailbox.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WarmupBody {
    pub warmup_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_warmup_per_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rampup: Option<u32>,
    /// Target reply rate, percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_rate_percentage: Option<u32>,
}

/// Client for the email account endpoints.
pub struct EmailAccountsClient {
    base: Arc<BaseClient>,
}

impl EmailAccountsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self, offset: Option<u32>, limit: Option<u32>) -> Result<Value, ApiError> {
        let mut request =
            RequestDescriptor::get("email-accounts/", "fetch all email accounts");
        if let Some(offset) = offset {
            request = request.query("offset", offset);
        }
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        self.base.execute(request).await
    }

    pub async fn list_by_campaign(&self, campaign_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                format!("campaigns/{campaign_id}/email-accounts"),
                "fetch campaign email accounts",
            ))
            .await
    }

    pub async fn add_to_campaign(
        &self,
        campaign_id: i64,
        email_account_ids: &[i64],
    ) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/email-accounts"),
                    "add email accounts to campaign",
                )
                .idempotent()
                .json(serde_json::json!({ "email_account_ids": email_account_ids })),
            )
            .await
    }

    pub async fn remove_from_campaign(
        &self,
        campaign_id: i64,
        email_account_ids: &[i64],
    ) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::delete(
                    format!("campaigns/{campaign_id}/email-accounts"),
                    "remove email accounts from campaign",
                )
                .json(serde_json::json!({ "email_account_ids": email_account_ids })),
            )
            .await
    }

    pub async fn create(&self, body: &EmailAccountBody) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post("email-accounts/save", "create email account"),
                body,
            )
            .await
    }

    pub async fn update(
        &self,
        email_account_id: i64,
        body: &EmailAccountBody,
    ) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("email-accounts/{email_account_id}"),
                    "update email account",
                )
                .idempotent(),
                body,
            )
            .await
    }

    pub async fn get(&self, email_account_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                format!("email-accounts/{email_account_id}"),
                "fetch email account",
            ))
            .await
    }

    pub async fn update_warmup(
        &self,
        email_account_id: i64,
        body: &WarmupBody,
    ) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("email-accounts/{email_account_id}/warmup"),
                    "update email account warmup",
                )
                .idempotent(),
                body,
            )
            .await
    }

    /// Kick reconnection for every mailbox in a failed state.
    pub async fn reconnect_failed(&self) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::post(
                    "email-accounts/reconnect-failed-email-accounts",
                    "reconnect failed email accounts",
                )
                .idempotent(),
            )
            .await
    }
}
