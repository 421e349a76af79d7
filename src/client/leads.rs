//! Lead management endpoints.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{BaseClient, RequestDescriptor};
use super::error::ApiError;

/// A lead as accepted by the add/update endpoints. Custom fields ride in
/// `custom_fields` verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LeadInput {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Value>,
}

/// Dedupe/validation settings applied when adding leads.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddLeadSettings {
    /// Skip leads already present in any campaign of this account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_global_block_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_unsubscribe_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_duplicate_leads_in_other_campaign: Option<bool>,
}

/// Body for replying to a lead from the master inbox.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReplyBody {
    /// Stats id of the message being replied to.
    pub email_stats_id: String,
    /// HTML body of the reply.
    pub email_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_email_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
}

/// Client for the lead endpoints.
pub struct LeadsClient {
    base: Arc<BaseClient>,
}

impl LeadsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list_by_campaign(
        &self,
        campaign_id: i64,
        offset: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let mut request = RequestDescriptor::get(
            format!("campaigns/{campaign_id}/leads"),
            "fetch leads by campaign",
        );
        if let Some(offset) = offset {
            request = request.query("offset", offset);
        }
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        self.base.execute(request).await
    }

    pub async fn fetch_categories(&self) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get("leads/fetch-categories", "fetch lead categories"))
            .await
    }

    pub async fn fetch_by_email(&self, email: &str) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get("leads/", "fetch lead by email").query("email", email))
            .await
    }

    pub async fn add_to_campaign(
        &self,
        campaign_id: i64,
        leads: &[LeadInput],
        settings: Option<&AddLeadSettings>,
    ) -> Result<Value, ApiError> {
        let mut body = serde_json::json!({ "lead_list": leads });
        if let Some(settings) = settings {
            body["settings"] = serde_json::to_value(settings).map_err(|e| ApiError::Encode {
                operation: "add leads to campaign".to_string(),
                detail: e.to_string(),
            })?;
        }
        self.base
            .execute(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/leads"),
                    "add leads to campaign",
                )
                .json(body),
            )
            .await
    }

    pub async fn resume(&self, campaign_id: i64, lead_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/leads/{lead_id}/resume"),
                    "resume lead",
                )
                .idempotent(),
            )
            .await
    }

    pub async fn pause(&self, campaign_id: i64, lead_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/leads/{lead_id}/pause"),
                    "pause lead",
                )
                .idempotent(),
            )
            .await
    }

    pub async fn delete_from_campaign(
        &self,
        campaign_id: i64,
        lead_id: i64,
    ) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::delete(
                format!("campaigns/{campaign_id}/leads/{lead_id}"),
                "delete lead from campaign",
            ))
            .await
    }

    pub async fn unsubscribe_from_campaign(
        &self,
        campaign_id: i64,
        lead_id: i64,
    ) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/leads/{lead_id}/unsubscribe"),
                    "unsubscribe lead from campaign",
                )
                .idempotent(),
            )
            .await
    }

    pub async fn unsubscribe_globally(&self, lead_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::post(
                    format!("leads/{lead_id}/unsubscribe"),
                    "unsubscribe lead from all campaigns",
                )
                .idempotent(),
            )
            .await
    }

    /// Add domains to the account-wide block list.
    pub async fn add_to_block_list(&self, domains: &[String]) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::post(
                    "leads/add-domain-block-list",
                    "add domains to block list",
                )
                .idempotent()
                .json(serde_json::json!({ "domain_block_list": domains })),
            )
            .await
    }

    pub async fn update(
        &self,
        campaign_id: i64,
        lead_id: i64,
        lead: &LeadInput,
    ) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/leads/{lead_id}"),
                    "update lead",
                )
                .idempotent(),
                &serde_json::json!({ "lead_input": lead }),
            )
            .await
    }

    pub async fn update_category(
        &self,
        campaign_id: i64,
        lead_id: i64,
        category_id: i64,
        pause_lead: Option<bool>,
    ) -> Result<Value, ApiError> {
        let mut body = serde_json::json!({ "category_id": category_id });
        if let Some(pause_lead) = pause_lead {
            body["pause_lead"] = Value::Bool(pause_lead);
        }
        self.base
            .execute(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/leads/{lead_id}/category"),
                    "update lead category",
                )
                .idempotent()
                .json(body),
            )
            .await
    }

    pub async fn message_history(
        &self,
        campaign_id: i64,
        lead_id: i64,
    ) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                format!("campaigns/{campaign_id}/leads/{lead_id}/message-history"),
                "fetch lead message history",
            ))
            .await
    }

    /// Reply within an existing thread; at-least-once semantics apply if
    /// the connection drops mid-flight.
    pub async fn reply_from_master_inbox(
        &self,
        campaign_id: i64,
        body: &ReplyBody,
    ) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post(
                    format!("campaigns/{campaign_id}/reply-email-thread"),
                    "reply to lead",
                ),
                body,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_input_minimal() {
        let lead: LeadInput = serde_json::from_value(serde_json::json!({
            "email": "jordan@example.com"
        }))
        .unwrap();
        assert_eq!(lead.email, "jordan@example.com");
        assert!(lead.first_name.is_none());
    }

    #[test]
    fn test_lead_input_round_trips_custom_fields() {
        let lead: LeadInput = serde_json::from_value(serde_json::json!({
            "email": "jordan@example.com",
            "custom_fields": {"plan": "pro"}
        }))
        .unwrap();
        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(value["custom_fields"]["plan"], "pro");
    }
}
