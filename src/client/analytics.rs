//! Workspace-wide analytics endpoints.
//!
//! These report across every campaign in the account; per-campaign
//! numbers live in [`super::statistics`].

use std::sync::Arc;

use serde_json::Value;

use super::base::{BaseClient, RequestDescriptor};
use super::error::ApiError;

/// Client for the global analytics endpoints.
pub struct AnalyticsClient {
    base: Arc<BaseClient>,
}

impl AnalyticsClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    fn date_range(
        request: RequestDescriptor,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> RequestDescriptor {
        let mut request = request;
        if let Some(start) = start_date {
            request = request.query("start_date", start);
        }
        if let Some(end) = end_date {
            request = request.query("end_date", end);
        }
        request
    }

    pub async fn campaign_list(&self) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                "analytics/campaign/list",
                "fetch analytics campaign list",
            ))
            .await
    }

    pub async fn client_list(&self) -> Result<Value, ApiError> {
        self.base
            .execute(RequestDescriptor::get(
                "analytics/client/list",
                "fetch analytics client list",
            ))
            .await
    }

    pub async fn client_month_wise_count(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = RequestDescriptor::get(
            "analytics/client/month-wise-count",
            "fetch month-wise client count",
        );
        self.base.execute(Self::date_range(request, start_date, end_date)).await
    }

    pub async fn overall_stats(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request =
            RequestDescriptor::get("analytics/overall-stats-v2", "fetch overall stats");
        self.base.execute(Self::date_range(request, start_date, end_date)).await
    }

    pub async fn day_wise_overall_stats(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = RequestDescriptor::get(
            "analytics/day-wise-overall-stats",
            "fetch day-wise overall stats",
        );
        self.base.execute(Self::date_range(request, start_date, end_date)).await
    }

    pub async fn mailbox_overall_stats(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = RequestDescriptor::get(
            "analytics/mailbox/overall-stats",
            "fetch mailbox health metrics",
        );
        self.base.execute(Self::date_range(request, start_date, end_date)).await
    }
}
