//! Lead management tools.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use super::{outcome, NoParams, ToolEnvelope, ToolRegistry, ToolSpec};
use crate::client::{AddLeadSettings, LeadInput, ReplyBody, SmartleadClient};

#[derive(Debug, Deserialize, JsonSchema)]
struct ListLeadsParams {
    /// Campaign id.
    campaign_id: i64,
    /// Pagination offset.
    offset: Option<u32>,
    /// Page size, max 100.
    limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FetchByEmailParams {
    /// Email address of the lead.
    email: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AddLeadsParams {
    /// Campaign id.
    campaign_id: i64,
    /// Leads to add.
    lead_list: Vec<LeadInput>,
    /// Dedupe and block-list settings.
    settings: Option<AddLeadSettings>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LeadInCampaignParams {
    /// Campaign id.
    campaign_id: i64,
    /// Lead id.
    lead_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LeadIdParams {
    /// Lead id.
    lead_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct BlockListParams {
    /// Domains or emails to block account-wide.
    domain_block_list: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateLeadParams {
    /// Campaign id.
    campaign_id: i64,
    /// Lead id.
    lead_id: i64,
    /// Replacement lead fields.
    lead_input: LeadInput,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateCategoryParams {
    /// Campaign id.
    campaign_id: i64,
    /// Lead id.
    lead_id: i64,
    /// Category id from smartlead_fetch_lead_categories.
    category_id: i64,
    /// Also pause the lead.
    pause_lead: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ReplyParams {
    /// Campaign id.
    campaign_id: i64,
    #[serde(flatten)]
    reply: ReplyBody,
}

pub(super) fn register(registry: &mut ToolRegistry, client: Arc<SmartleadClient>) {
    let c = client.clone();
    registry.register::<ListLeadsParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_leads_by_campaign",
            "Fetch Leads By Campaign",
            "List leads in a campaign with pagination.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Leads retrieved successfully",
                    c.leads.list_by_campaign(params.campaign_id, params.offset, params.limit).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<NoParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_lead_categories",
            "Fetch Lead Categories",
            "List the reply categories leads can be filed under.",
        ),
        move |_params| {
            let c = c.clone();
            async move {
                outcome("Lead categories retrieved successfully", c.leads.fetch_categories().await)
            }
        },
    );

    let c = client.clone();
    registry.register::<FetchByEmailParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_lead_by_email",
            "Fetch Lead By Email",
            "Look a lead up by email address across all campaigns.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome("Lead retrieved successfully", c.leads.fetch_by_email(&params.email).await)
            }
        },
    );

    let c = client.clone();
    registry.register::<AddLeadsParams, _, _>(
        ToolSpec::new(
            "smartlead_add_leads_to_campaign",
            "Add Leads To Campaign",
            "Add up to 100 leads to a campaign in one call.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                let count = params.lead_list.len();
                match c
                    .leads
                    .add_to_campaign(
                        params.campaign_id,
                        &params.lead_list,
                        params.settings.as_ref(),
                    )
                    .await
                {
                    Ok(data) => ToolEnvelope::success("Leads added successfully", data)
                        .with_summary(format!("Submitted {count} lead(s)")),
                    Err(err) => err.into(),
                }
            }
        },
    );

    let c = client.clone();
    registry.register::<LeadInCampaignParams, _, _>(
        ToolSpec::new(
            "smartlead_resume_lead_by_campaign",
            "Resume Lead",
            "Resume sending to a paused lead in a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Lead resumed successfully",
                    c.leads.resume(params.campaign_id, params.lead_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<LeadInCampaignParams, _, _>(
        ToolSpec::new(
            "smartlead_pause_lead_by_campaign",
            "Pause Lead",
            "Pause sending to a lead in a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Lead paused successfully",
                    c.leads.pause(params.campaign_id, params.lead_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<LeadInCampaignParams, _, _>(
        ToolSpec::new(
            "smartlead_delete_lead_by_campaign",
            "Delete Lead From Campaign",
            "Remove a lead from a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Lead deleted successfully",
                    c.leads.delete_from_campaign(params.campaign_id, params.lead_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<LeadInCampaignParams, _, _>(
        ToolSpec::new(
            "smartlead_unsubscribe_lead_from_campaign",
            "Unsubscribe Lead From Campaign",
            "Unsubscribe a lead from one campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Lead unsubscribed successfully",
                    c.leads.unsubscribe_from_campaign(params.campaign_id, params.lead_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<LeadIdParams, _, _>(
        ToolSpec::new(
            "smartlead_unsubscribe_lead_from_all_campaigns",
            "Unsubscribe Lead Globally",
            "Unsubscribe a lead from every campaign in the account.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Lead unsubscribed from all campaigns",
                    c.leads.unsubscribe_globally(params.lead_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<BlockListParams, _, _>(
        ToolSpec::new(
            "smartlead_add_domains_to_block_list",
            "Add Domains To Block List",
            "Add domains or emails to the account-wide block list.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Block list updated successfully",
                    c.leads.add_to_block_list(&params.domain_block_list).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<UpdateLeadParams, _, _>(
        ToolSpec::new(
            "smartlead_update_lead_by_campaign",
            "Update Lead",
            "Update a lead's fields within a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Lead updated successfully",
                    c.leads.update(params.campaign_id, params.lead_id, &params.lead_input).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<UpdateCategoryParams, _, _>(
        ToolSpec::new(
            "smartlead_update_lead_category",
            "Update Lead Category",
            "File a lead under a reply category, optionally pausing it.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Lead category updated successfully",
                    c.leads
                        .update_category(
                            params.campaign_id,
                            params.lead_id,
                            params.category_id,
                            params.pause_lead,
                        )
                        .await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<LeadInCampaignParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_lead_message_history",
            "Fetch Lead Message History",
            "Fetch the full email exchange with a lead in a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Message history retrieved successfully",
                    c.leads.message_history(params.campaign_id, params.lead_id).await,
                )
            }
        },
    );

    let c = client;
    registry.register::<ReplyParams, _, _>(
        ToolSpec::new(
            "smartlead_reply_to_lead",
            "Reply To Lead",
            "Send a reply within an existing email thread from the master inbox.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Reply sent successfully",
                    c.leads.reply_from_master_inbox(params.campaign_id, &params.reply).await,
                )
            }
        },
    );
}
