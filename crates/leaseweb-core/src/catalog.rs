// Lookups backing the read-only data sources. Listings are paginated to
// completion; nothing is cached between calls.

use leaseweb_api::LeasewebClient;
use leaseweb_api::types::{CredentialType, ServerListOptions};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::aggregator::checkpoint;
use crate::convert;
use crate::error::CoreError;
use crate::model::{CatalogEntry, ServerCredential};

/// Ids of every server matching `options`, in listing order.
pub async fn server_ids(
    client: &LeasewebClient,
    options: &ServerListOptions,
    cancel: &CancellationToken,
) -> Result<Vec<String>, CoreError> {
    checkpoint(cancel, "list-servers")?;
    let servers = client.list_all_servers(options).await?;
    debug!(count = servers.len(), "listed dedicated servers");
    Ok(servers.into_iter().map(|s| s.id).collect())
}

pub async fn control_panels(
    client: &LeasewebClient,
    operating_system_id: Option<&str>,
    cancel: &CancellationToken,
) -> Result<Vec<CatalogEntry>, CoreError> {
    checkpoint(cancel, "list-control-panels")?;
    let panels = client.list_all_control_panels(operating_system_id).await?;
    Ok(panels.into_iter().map(CatalogEntry::from).collect())
}

pub async fn operating_systems(
    client: &LeasewebClient,
    control_panel_id: Option<&str>,
    cancel: &CancellationToken,
) -> Result<Vec<CatalogEntry>, CoreError> {
    checkpoint(cancel, "list-operating-systems")?;
    let systems = client.list_all_operating_systems(control_panel_id).await?;
    Ok(systems.into_iter().map(CatalogEntry::from).collect())
}

pub async fn credential(
    client: &LeasewebClient,
    server_id: &str,
    credential_type: CredentialType,
    username: &str,
    cancel: &CancellationToken,
) -> Result<ServerCredential, CoreError> {
    checkpoint(cancel, "get-credential")?;
    let cred = client
        .get_credential(server_id, credential_type, username)
        .await?;
    Ok(convert::credential(server_id, cred))
}
