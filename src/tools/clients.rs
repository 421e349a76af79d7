//! Client (sub-account) management tools.

use std::sync::Arc;

use super::{list_len, NoParams, ToolEnvelope, ToolRegistry, ToolSpec};
use crate::client::{AddClientBody, SmartleadClient};

pub(super) fn register(registry: &mut ToolRegistry, client: Arc<SmartleadClient>) {
    let c = client.clone();
    registry.register::<AddClientBody, _, _>(
        ToolSpec::new(
            "smartlead_add_client",
            "Add Client",
            "Add a client sub-account to the workspace.",
        ),
        move |params| {
            let c = c.clone();
            async move {
                let name = params.name.clone();
                match c.clients.add(&params).await {
                    Ok(data) => ToolEnvelope::success("Client added successfully", data)
                        .with_summary(format!("Client \"{name}\" added")),
                    Err(err) => err.into(),
                }
            }
        },
    );

    let c = client;
    registry.register::<NoParams, _, _>(
        ToolSpec::new(
            "smartlead_fetch_all_clients",
            "Fetch All Clients",
            "List every client sub-account in the workspace.",
        ),
        move |_params| {
            let c = c.clone();
            async move {
                match c.clients.list().await {
                    Ok(data) => {
                        let summary = list_len(&data).map(|n| format!("{n} client(s) found"));
                        let mut envelope =
                            ToolEnvelope::success("Clients retrieved successfully", data);
                        envelope.summary = summary;
                        envelope
                    }
                    Err(err) => err.into(),
                }
            }
        },
    );
}
