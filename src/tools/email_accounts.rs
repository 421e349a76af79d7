//! Email account tools.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use super::{outcome, NoParams, ToolRegistry, ToolSpec};
use crate::client::{EmailAccountBody, SmartleadClient, WarmupBody};

#[derive(Debug, Deserialize, JsonSchema)]
struct ListAccountsParams {
    /// Pagination offset.
    offset: Option<u32>,
    /// Page size.
    limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CampaignIdParams {
    /// Campaign id.
    campaign_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CampaignAccountsParams {
    /// Campaign id.
    campaign_id: i64,
    /// Email account ids.
    email_account_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AccountIdParams {
    /// Email account id.
    email_account_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateAccountParams {
    /// Email account id.
    email_account_id: i64,
    #[serde(flatten)]
    account: EmailAccountBody,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateWarmupParams {
    /// Email account id.
    email_account_id: i64,
    #[serde(flatten)]
    warmup: WarmupBody,
}

pub(super) fn register(registry: &mut ToolRegistry, client: Arc<SmartleadClient>) {
    let c = client.clone();
    registry.register::<ListAccountsParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_all_email_accounts",
            "Fetch All Email Accounts",
            "List every sender mailbox in the workspace.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Email accounts retrieved successfully",
                    c.email_accounts.list(params.offset, params.limit).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<CampaignIdParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_campaign_email_accounts",
            "Fetch Campaign Email Accounts",
            "List the mailboxes sending for a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Campaign email accounts retrieved successfully",
                    c.email_accounts.list_by_campaign(params.campaign_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<CampaignAccountsParams, _, _>(
        ToolSpec::new(
            "smartlead_add_email_accounts_to_campaign",
            "Add Email Accounts To Campaign",
            "Attach sender mailboxes to a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Email accounts added successfully",
                    c.email_accounts
                        .add_to_campaign(params.campaign_id, &params.email_account_ids)
                        .await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<CampaignAccountsParams, _, _>(
        ToolSpec::new(
            "smartlead_remove_email_accounts_from_campaign",
            "Remove Email Accounts From Campaign",
            "Detach sender mailboxes from a campaign.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Email accounts removed successfully",
                    c.email_accounts
                        .remove_from_campaign(params.campaign_id, &params.email_account_ids)
                        .await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<EmailAccountBody, _, _>(
        ToolSpec::new(
            "smartlead_create_email_account",
            "Create Email Account",
            "Register a mailbox with its SMTP and IMAP details.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome("Email account created successfully", c.email_accounts.create(&params).await)
            }
        },
    );

    let c = client.clone();
    registry.register::<UpdateAccountParams, _, _>(
        ToolSpec::new(
            "smartlead_update_email_account",
            "Update Email Account",
            "Update a mailbox's sending details.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Email account updated successfully",
                    c.email_accounts.update(params.email_account_id, &params.account).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<AccountIdParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_email_account",
            "Fetch Email Account",
            "Fetch one mailbox by id.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Email account retrieved successfully",
                    c.email_accounts.get(params.email_account_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<UpdateWarmupParams, _, _>(
        ToolSpec::new(
            "smartlead_update_email_account_warmup",
            "Update Email Account Warmup",
            "Enable or tune warmup for a mailbox.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Warmup settings updated successfully",
                    c.email_accounts.update_warmup(params.email_account_id, &params.warmup).await,
                )
            }
        },
    );

    let c = client;
    registry.register::<NoParams, _, _>(
        ToolSpec::new(
            "smartlead_reconnect_failed_email_accounts",
            "Reconnect Failed Email Accounts",
            "Trigger reconnection for every mailbox in a failed state.",
        ),
        move |_params| {
            let c = c.clone();
            async move {
                outcome("Reconnect triggered successfully", c.email_accounts.reconnect_failed().await)
            }
        },
    );
}
