//! Campaign webhook tools.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use super::{outcome, ToolRegistry, ToolSpec};
use crate::client::{SmartleadClient, WebhookBody};

#[derive(Debug, Deserialize, JsonSchema)]
struct CampaignIdParams {
    /// Campaign id.
    campaign_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpsertWebhookParams {
    /// Campaign id.
    campaign_id: i64,
    #[serde(flatten)]
    webhook: WebhookBody,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DeleteWebhookParams {
    /// Campaign id.
    campaign_id: i64,
    /// Webhook id.
    webhook_id: i64,
}

pub(super) fn register(registry: &mut ToolRegistry, client: Arc<SmartleadClient>) {
    let c = client.clone();
    registry.register::<CampaignIdParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign_webhooks",
            "Fetch Campaign Webhooks",
            "List the webhooks registered on a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Webhooks retrieved successfully",
                    c.webhooks.list_by_campaign(params.campaign_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<UpsertWebhookParams, _, _>(
        ToolSpec::new(
            "smartlead_upsert_campaign_webhook",
            "Upsert Campaign Webhook",
            "Add a webhook to a campaign, or update one by passing its id.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Webhook saved successfully",
                    c.webhooks.upsert(params.campaign_id, &params.webhook).await,
                )
            }
        },
    );

    let c = client;
    registry.register::<DeleteWebhookParams, _, _>(
        ToolSpec::new(
            "smartlead_delete_campaign_webhook",
            "Delete Campaign Webhook",
            "Remove a webhook from a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Webhook deleted successfully",
                    c.webhooks.delete(params.campaign_id, params.webhook_id).await,
                )
            }
        },
    );
}
