//! Workspace analytics tools.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use super::{outcome, NoParams, ToolRegistry, ToolSpec};
use crate::client::SmartleadClient;

#[derive(Debug, Deserialize, JsonSchema)]
struct DateRangeParams {
    /// Range start, YYYY-MM-DD.
    start_date: Option<String>,
    /// Range end, YYYY-MM-DD.
    end_date: Option<String>,
}

pub(super) fn register(registry: &mut ToolRegistry, client: Arc<SmartleadClient>) {
    let c = client.clone();
    registry.register::<NoParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_analytics_campaign_list",
            "Fetch Analytics Campaign List",
            "List campaigns available for analytics queries.",
        ),
        move |_params| {
            let c = c.clone();
            async move {
                outcome("Campaign list retrieved successfully", c.analytics.campaign_list().await)
            }
        },
    );

    let c = client.clone();
    registry.register::<NoParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_analytics_client_list",
            "Fetch Analytics Client List",
            "List clients available for analytics queries.",
        ),
        move |_params| {
            let c = c.clone();
            async move {
                outcome("Client list retrieved successfully", c.analytics.client_list().await)
            }
        },
    );

    let c = client.clone();
    registry.register::<DateRangeParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_analytics_client_month_wise_count",
            "Fetch Month-Wise Client Count",
            "Month-by-month client counts for the workspace.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Client counts retrieved successfully",
                    c.analytics
                        .client_month_wise_count(
                            params.start_date.as_deref(),
                            params.end_date.as_deref(),
                        )
                        .await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<DateRangeParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_analytics_overall_stats",
            "Fetch Overall Stats",
            "Workspace-wide sending and reply totals.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Overall stats retrieved successfully",
                    c.analytics
                        .overall_stats(params.start_date.as_deref(), params.end_date.as_deref())
                        .await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<DateRangeParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_analytics_day_wise_stats",
            "Fetch Day-Wise Stats",
            "Per-day sending and reply totals across the workspace.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Day-wise stats retrieved successfully",
                    c.analytics
                        .day_wise_overall_stats(
                            params.start_date.as_deref(),
                            params.end_date.as_deref(),
                        )
                        .await,
                )
            }
        },
    );

    let c = client;
    registry.register::<DateRangeParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_analytics_mailbox_health",
            "Fetch Mailbox Health Metrics",
            "Deliverability health metrics per mailbox.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Mailbox health metrics retrieved successfully",
                    c.analytics
                        .mailbox_overall_stats(
                            params.start_date.as_deref(),
                            params.end_date.as_deref(),
                        )
                        .await,
                )
            }
        },
    );
}
