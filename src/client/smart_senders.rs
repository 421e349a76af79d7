//! Smart Senders endpoints (domain and mailbox purchasing).
//!
//! These live on a separate upstream host; every descriptor here is
//! routed to the Smart Senders base URL.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::{BaseClient, RequestDescriptor};
use super::error::ApiError;

/// One mailbox to order for a domain.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MailboxOrder {
    pub mailbox: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

/// Body for placing a mailbox order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlaceOrderBody {
    pub vendor_id: i64,
    /// Domains to register together with their mailboxes.
    pub domains: Vec<DomainOrder>,
    /// Email to receive forwarded mail for the new domains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarding_domain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DomainOrder {
    pub domain_name: String,
    pub mailbox_details: Vec<MailboxOrder>,
}

/// Client for the Smart Senders endpoints.
pub struct SmartSendersClient {
    base: Arc<BaseClient>,
}

impl SmartSendersClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn vendors(&self) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::get("get-vendor-details", "fetch vendors").on_smart_senders(),
            )
            .await
    }

    pub async fn search_domain(
        &self,
        domain_name: &str,
        vendor_id: i64,
    ) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::get("search-domain", "search domain")
                    .on_smart_senders()
                    .query("domain_name", domain_name)
                    .query("vendor_id", vendor_id),
            )
            .await
    }

    /// Suggest mailbox names for the given domains.
    pub async fn auto_generate_mailboxes(
        &self,
        vendor_id: i64,
        domains: &[String],
    ) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::post("auto-generate-mailboxes", "auto-generate mailboxes")
                    .on_smart_senders()
                    .idempotent()
                    .json(serde_json::json!({
                        "vendor_id": vendor_id,
                        "domain_names": domains,
                    })),
            )
            .await
    }

    /// Place the order. A real purchase; not retried on ambiguous
    /// failures.
    pub async fn place_order(&self, body: &PlaceOrderBody) -> Result<Value, ApiError> {
        self.base
            .execute_json(
                RequestDescriptor::post("place-order-mailboxes", "place mailbox order")
                    .on_smart_senders(),
                body,
            )
            .await
    }

    pub async fn domain_list(&self) -> Result<Value, ApiError> {
        self.base
            .execute(
                RequestDescriptor::get("get-domain-list", "fetch domain list").on_smart_senders(),
            )
            .await
    }
}
