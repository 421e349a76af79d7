//! Campaign management endpoints.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{BaseClient, RequestDescriptor};
use super::error::ApiError;

/// Body for creating a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateCampaignBody {
    /// Name of the new campaign.
    pub name: String,
    /// Client (sub-account) id to attach the campaign to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
}

/// Sending-window schedule for a campaign.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleBody {
    /// IANA timezone, e.g. "America/Los_Angeles".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Days of the week to send on (0 = Sunday .. 6 = Saturday).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_of_the_week: Option<Vec<u8>>,
    /// Hour to start sending, "HH:MM" 24h format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_hour: Option<String>,
    /// Hour to stop sending, "HH:MM" 24h format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_hour: Option<String>,
    /// Minimum minutes between two emails from the same mailbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_time_btw_emails: Option<u32>,
    /// Cap on new leads contacted per day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_leads_per_day: Option<u32>,
    /// ISO-8601 timestamp to begin the schedule at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_start_time: Option<String>,
}

/// General campaign settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SettingsBody {
    /// Tracking toggles, e.g. ["DONT_TRACK_EMAIL_OPEN"].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_settings: Option<Vec<String>>,
    /// When to stop contacting a lead, e.g. "REPLY_TO_AN_EMAIL".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_lead_settings: Option<String>,
    /// Unsubscribe footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribe_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_as_plain_text: Option<bool>,
    /// Percentage of delivered emails that get follow-ups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_percentage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    /// Match leads to mailboxes by ESP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_ai_esp_matching: Option<bool>,
}

/// Campaign run state accepted by the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Start,
    Paused,
    Stopped,
}

/// One step of an outreach sequence.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SequenceStep {
    /// Position of this step in the sequence, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq_number: Option<u32>,
    /// Days to wait after the previous step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq_delay_details: Option<SequenceDelay>,
    /// Email subject; blank continues the previous thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML body of the email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_body: Option<String>,
    /// A/B variants for this step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq_variants: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SequenceDelay {
    pub delay_in_days: u32,
}

/// Client for the campaign endpoints.
pub struct CampaignsClient {
    base: Arc<BaseClient>,
}

impl CampaignsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, body: &CreateCampaignBody) -> Result<Value, ApiError> {
        self.base
            .execute_json(RequestDescriptor::post("campaigns/create", "create campaign"), body)
            .await
    }

    pub async fn update_schedule(
        &self,
        campaign_id: i64,
        body: &ScheduleBody,
    ) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/schedule"),
                    "update campaign schedule",
                )
                .idempotent(),
                body,
            )
            .await
    }

    pub async fn update_settings(
        &self,
        campaign_id: i64,
        body: &SettingsBody,
    ) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/settings"),
                    "update campaign settings",
                )
                .idempotent(),
                body,
            )
            .await
    }

    pub async fn update_status(
        &self,
        campaign_id: i64,
        status: CampaignStatus,
    ) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/status"),
                    "update campaign status",
                )
                .idempotent(),
                &serde_json::json!({ "status": status }),
            )
            .await
    }

    pub async fn get(&self, campaign_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(format!("campaigns/{campaign_id}"), "fetch campaign"))
            .await
    }

    pub async fn list(&self) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get("campaigns", "fetch all campaigns"))
            .await
    }

    pub async fn delete(&self, campaign_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::delete(
                format!("campaigns/{campaign_id}"),
                "delete campaign",
            ))
            .await
    }

    pub async fn save_sequence(
        &self,
        campaign_id: i64,
        sequences: &[SequenceStep],
    ) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/sequences"),
                    "save campaign sequence",
                )
                .idempotent(),
                &serde_json::json!({ "sequences": sequences }),
            )
            .await
    }

    pub async fn get_sequence(&self, campaign_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                format!("campaigns/{campaign_id}/sequences"),
                "fetch campaign sequence",
            ))
            .await
    }

    /// All campaigns a lead belongs to.
    pub async fn by_lead(&self, lead_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                format!("leads/{lead_id}/campaigns"),
                "fetch campaigns by lead",
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_screaming_snake() {
        assert_eq!(serde_json::to_value(CampaignStatus::Start).unwrap(), "START");
        assert_eq!(serde_json::to_value(CampaignStatus::Paused).unwrap(), "PAUSED");
    }

    #[test]
    fn test_create_body_omits_absent_client_id() {
        let body = CreateCampaignBody { name: "Q1 Outreach".to_string(), client_id: None };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Q1 Outreach"}));
    }
}
