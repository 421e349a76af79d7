//! SmartLead API clients.
//!
//! [`BaseClient`] owns the transport, auth, timeout and retry policy;
//! each resource client is a thin method set that builds one
//! [`RequestDescriptor`] per operation and delegates to it.
//! [`SmartleadClient`] bundles the resource clients behind one handle.

use std::sync::Arc;

use crate::config::Config;

mod analytics;
mod base;
mod campaigns;
mod clients;
mod email_accounts;
mod error;
mod leads;
mod smart_senders;
mod statistics;
mod webhooks;

pub use analytics::AnalyticsClient;
pub use base::{
    ApiHost, BaseClient, HttpMethod, HttpTransport, PreparedRequest, RequestDescriptor,
    RetryPolicy, TransportError, TransportResponse,
};
pub use campaigns::{
    CampaignStatus, CampaignsClient, CreateCampaignBody, ScheduleBody, SequenceDelay,
    SequenceStep, SettingsBody,
};
pub use clients::{AddClientBody, ClientsClient};
pub use email_accounts::{EmailAccountBody, EmailAccountsClient, WarmupBody};
pub use error::ApiError;
pub use leads::{AddLeadSettings, LeadInput, LeadsClient, ReplyBody};
pub use smart_senders::{DomainOrder, MailboxOrder, PlaceOrderBody, SmartSendersClient};
pub use statistics::{StatisticsClient, StatisticsFilter};
pub use webhooks::{WebhookBody, WebhooksClient};

#[cfg(test)]
pub(crate) use base::testing;

/// Aggregate handle over every resource client.
///
/// Resource clients are reached directly (`client.campaigns.create(..)`);
/// there is no flat delegation surface on this type.
pub struct SmartleadClient {
    pub campaigns: CampaignsClient,
    pub leads: LeadsClient,
    pub analytics: AnalyticsClient,
    pub statistics: StatisticsClient,
    pub email_accounts: EmailAccountsClient,
    pub webhooks: WebhooksClient,
    pub clients: ClientsClient,
    pub smart_senders: SmartSendersClient,
}

impl SmartleadClient {
    /// Build the full client set over the production transport.
    pub fn new(config: Arc<Config>) -> Result<Self, ApiError> {
        Ok(Self::from_base(Arc::new(BaseClient::new(config)?)))
    }

    /// Build over an arbitrary transport (used by tests to substitute a
    /// scripted stub).
    pub fn with_transport(
        config: Arc<Config>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        Ok(Self::from_base(Arc::new(BaseClient::with_transport(config, transport)?)))
    }

    fn from_base(base: Arc<BaseClient>) -> Self {
        Self {
            campaigns: CampaignsClient::new(base.clone()),
            leads: LeadsClient::new(base.clone()),
            analytics: AnalyticsClient::new(base.clone()),
            statistics: StatisticsClient::new(base.clone()),
            email_accounts: EmailAccountsClient::new(base.clone()),
            webhooks: WebhooksClient::new(base.clone()),
            clients: ClientsClient::new(base.clone()),
            smart_senders: SmartSendersClient::new(base),
        }
    }
}
