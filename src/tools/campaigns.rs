//! Campaign management tools.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use super::{field_display, list_len, outcome, NoParams, ToolEnvelope, ToolRegistry, ToolSpec};
use crate::client::{
    CampaignStatus, CreateCampaignBody, ScheduleBody, SequenceStep, SettingsBody, SmartleadClient,
};

#[derive(Debug, Deserialize, JsonSchema)]
struct CampaignIdParams {
    /// Campaign id.
    campaign_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateScheduleParams {
    /// Campaign id.
    campaign_id: i64,
    #[serde(flatten)]
    schedule: ScheduleBody,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateSettingsParams {
    /// Campaign id.
    campaign_id: i64,
    #[serde(flatten)]
    settings: SettingsBody,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateStatusParams {
    /// Campaign id.
    campaign_id: i64,
    /// New run state: START, PAUSED or STOPPED.
    status: CampaignStatus,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SaveSequenceParams {
    /// Campaign id.
    campaign_id: i64,
    /// Full sequence; replaces the existing one.
    sequences: Vec<SequenceStep>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LeadIdParams {
    /// Lead id.
    lead_id: i64,
}

pub(super) fn register(registry: &mut ToolRegistry, client: Arc<SmartleadClient>) {
    let c = client.clone();
    registry.register::<CreateCampaignBody, _, _>(
        ToolSpec::new(
            "smartlead_create_campaign",
            "Create Campaign",
            "Create a new campaign, optionally under a client account.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                let name = params.name.clone();
                match c.campaigns.create(&params).await {
                    Ok(data) => {
                        let summary = field_display(&data, "id")
                            .map(|id| format!("Campaign \"{name}\" created with ID: {id}"));
                        let mut envelope =
                            ToolEnvelope::success("Campaign created successfully", data);
                        envelope.summary = summary;
                        envelope
                    }
                    Err(err) => err.into(),
                }
            }
        },
    );

    let c = client.clone();
    registry.register::<UpdateScheduleParams, _, _>(
        ToolSpec::new(
            "smartlead_update_campaign_schedule",
            "Update Campaign Schedule",
            "Set the sending window, timezone and daily limits of a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign schedule updated successfully",
                    c.campaigns.update_schedule(params.campaign_id, &params.schedule).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<UpdateSettingsParams, _, _>(
        ToolSpec::new(
            "smartlead_update_campaign_settings",
            "Update Campaign Settings",
            "Update tracking, stop conditions and other general campaign settings.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign settings updated successfully",
                    c.campaigns.update_settings(params.campaign_id, &params.settings).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<UpdateStatusParams, _, _>(
        ToolSpec::new(
            "smartlead_update_campaign_status",
            "Update Campaign Status",
            "Start, pause or stop a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign status updated successfully",
                    c.campaigns.update_status(params.campaign_id, params.status).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<CampaignIdParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign",
            "Fetch Campaign",
            "Fetch one campaign by id.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign retrieved successfully",
                    c.campaigns.get(params.campaign_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<NoParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_all_campaigns",
            "Fetch All Campaigns",
            "List every campaign in the workspace.",
        ),
        move |_params| {
            let c = c.clone();
            async move {
                match c.campaigns.list().await {
                    Ok(data) => {
                        let summary =
                            list_len(&data).map(|n| format!("{n} campaign(s) found"));
                        let mut envelope =
                            ToolEnvelope::success("Campaigns retrieved successfully", data);
                        envelope.summary = summary;
                        envelope
                    }
                    Err(err) => err.into(),
                }
            }
        },
    );

    let c = client.clone();
    registry.register::<CampaignIdParams, _, _>(
        ToolSpec::new(
            "smartlead_delete_campaign",
            "Delete Campaign",
            "Permanently delete a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign deleted successfully",
                    c.campaigns.delete(params.campaign_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<SaveSequenceParams, _, _>(
        ToolSpec::new(
            "smartlead_save_campaign_sequence",
            "Save Campaign Sequence",
            "Replace the outreach sequence of a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign sequence saved successfully",
                    c.campaigns.save_sequence(params.campaign_id, &params.sequences).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<CampaignIdParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign_sequence",
            "Fetch Campaign Sequence",
            "Fetch the outreach sequence of a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign sequence retrieved successfully",
                    c.campaigns.get_sequence(params.campaign_id).await,
                )
            }
        },
    );

    let c = client;
    registry.register::<LeadIdParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaigns_by_lead",
            "Fetch Campaigns By Lead",
            "List every campaign a lead belongs to.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaigns retrieved successfully",
                    c.campaigns.by_lead(params.lead_id).await,
                )
            }
        },
    );
}
