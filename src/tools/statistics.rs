//! Per-campaign statistics tools.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use super::{outcome, ToolRegistry, ToolSpec};
use crate::client::{SmartleadClient, StatisticsFilter};

#[derive(Debug, Deserialize, JsonSchema)]
struct CampaignIdParams {
    /// Campaign id.
    campaign_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct StatisticsParams {
    /// Campaign id.
    campaign_id: i64,
    #[serde(flatten)]
    filter: StatisticsFilter,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct StatisticsByDateParams {
    /// Campaign id.
    campaign_id: i64,
    /// Range start, YYYY-MM-DD.
    start_date: String,
    /// Range end, YYYY-MM-DD.
    end_date: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LeadStatisticsParams {
    /// Campaign id.
    campaign_id: i64,
    /// Max rows to return.
    limit: Option<u32>,
}

pub(super) fn register(registry: &mut ToolRegistry, client: Arc<SmartleadClient>) {
    let c = client.clone();
    registry.register::<StatisticsParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign_statistics",
            "Fetch Campaign Statistics",
            "Per-email send, open and reply data for a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign statistics retrieved successfully",
                    c.statistics.campaign_statistics(params.campaign_id, &params.filter).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<StatisticsByDateParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign_statistics_by_date",
            "Fetch Campaign Statistics By Date",
            "Campaign statistics restricted to a date range.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign statistics retrieved successfully",
                    c.statistics
                        .statistics_by_date(
                            params.campaign_id,
                            &params.start_date,
                            &params.end_date,
                        )
                        .await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<CampaignIdParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign_analytics",
            "Fetch Campaign Analytics",
            "Top-level aggregate counts for one campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign analytics retrieved successfully",
                    c.statistics.top_level_analytics(params.campaign_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<LeadStatisticsParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign_lead_statistics",
            "Fetch Campaign Lead Statistics",
            "Per-lead engagement statistics for a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Lead statistics retrieved successfully",
                    c.statistics.lead_statistics(params.campaign_id, params.limit).await,
                )
            }
        },
    );

    let c = client;
    registry.register::<CampaignIdParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign_mailbox_statistics",
            "Fetch Campaign Mailbox Statistics",
            "Per-mailbox sending statistics for a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Mailbox statistics retrieved successfully",
                    c.statistics.mailbox_statistics(params.campaign_id).await,
                )
            }
        },
    );
}
