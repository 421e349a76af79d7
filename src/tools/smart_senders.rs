//! Smart Senders tools (domain and mailbox purchasing).

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use super::{outcome, NoParams, ToolRegistry, ToolSpec};
use crate::client::{PlaceOrderBody, SmartleadClient};

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchDomainParams {
    /// Domain to check availability for, e.g. "acme-outreach.com".
    domain_name: String,
    /// Vendor id from smartlead_fetch_vendors.
    vendor_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AutoGenerateParams {
    /// Vendor id from smartlead_fetch_vendors.
    vendor_id: i64,
    /// Domains to generate mailbox suggestions for.
    domain_names: Vec<String>,
}

pub(super) fn register(registry: &mut ToolRegistry, client: Arc<SmartleadClient>) {
    let c = client.clone();
    registry.register::<NoParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_vendors",
            "Fetch Vendors",
            "List domain vendors available through Smart Senders.",
        ),
        move |_params| {
            let c = c.clone();
            async move {
                outcome("Vendors retrieved successfully", c.smart_senders.vendors().await)
            }
        },
    );

    let c = client.clone();
    registry.register::<SearchDomainParams, _, _>(
        ToolSpec::new(
            "smartlead_search_domain",
            "Search Domain",
            "Check availability and pricing of a domain.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Domain search completed",
                    c.smart_senders.search_domain(&params.domain_name, params.vendor_id).await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<AutoGenerateParams, _, _>(
        ToolSpec::new(
            "smartlead_auto_generate_mailboxes",
            "Auto-Generate Mailboxes",
            "Generate suggested mailbox names for domains before ordering.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome(
                    "Mailbox suggestions generated",
                    c.smart_senders
                        .auto_generate_mailboxes(params.vendor_id, &params.domain_names)
                        .await,
                )
            }
        },
    );

    let c = client.clone();
    registry.register::<PlaceOrderBody, _, _>(
        ToolSpec::new(
            "smartlead_place_mailbox_order",
            "Place Mailbox Order",
            "Purchase domains and mailboxes. This charges the account.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                outcome("Order placed successfully", c.smart_senders.place_order(&params).await)
            }
        },
    );

    let c = client;
    registry.register::<NoParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_domain_list",
            "Fetch Domain List",
            "List domains purchased through Smart Senders.",
        ),
        move |_params| {
            let c = c.clone();
            async move {
                outcome("Domain list retrieved successfully", c.smart_senders.domain_list().await)
            }
        },
    );
}
