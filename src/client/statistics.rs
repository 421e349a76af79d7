//! Per-campaign statistics endpoints.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{BaseClient, RequestDescriptor};
use super::error::ApiError;

/// Filters accepted by the campaign statistics endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct StatisticsFilter {
    /// Pagination offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Page size, max 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Restrict to one step of the sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_sequence_number: Option<u32>,
    /// Filter by delivery status, e.g. "opened", "bounced".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_status: Option<String>,
}

/// Client for the campaign statistics endpoints.
pub struct StatisticsClient {
    base: Arc<BaseClient>,
}

impl StatisticsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn campaign_statistics(
        &self,
        campaign_id: i64,
        filter: &StatisticsFilter,
    ) -> Result<Value, ApiError> {
        let mut request = RequestDescriptor::get(
            format!("campaigns/{campaign_id}/statistics"),
            "fetch campaign statistics",
        );
        if let Some(offset) = filter.offset {
            request = request.query("offset", offset);
        }
        if let Some(limit) = filter.limit {
            request = request.query("limit", limit);
        }
        if let Some(seq) = filter.email_sequence_number {
            request = request.query("email_sequence_number", seq);
        }
        if let Some(ref status) = filter.email_status {
            request = request.query("email_status", status);
        }
        self.base.execute(request).await
    }

    pub async fn statistics_by_date(
        &self,
        campaign_id: i64,
        start_date: &str,
        end_date: &str,
    ) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::get(
                    format!("campaigns/{campaign_id}/analytics-by-date"),
                    "fetch campaign statistics by date",
                )
                .query("start_date", start_date)
                .query("end_date", end_date),
            )
            .await
    }

    /// Aggregate counts for the whole campaign.
    pub async fn top_level_analytics(&self, campaign_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                format!("campaigns/{campaign_id}/analytics"),
                "fetch campaign top-level analytics",
            ))
            .await
    }

    pub async fn lead_statistics(
        &self,
        campaign_id: i64,
        limit: Option<u32>,
    ) -> Result<Value, ApiError> {
        let mut request = RequestDescriptor::get(
            format!("campaigns/{campaign_id}/leads-statistics"),
            "fetch campaign lead statistics",
        );
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        self.base.execute(request).await
    }

    pub async fn mailbox_statistics(&self, campaign_id: i64) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                format!("campaigns/{campaign_id}/mailbox-statistics"),
                "fetch campaign mailbox statistics",
            ))
            .await
    }
}
