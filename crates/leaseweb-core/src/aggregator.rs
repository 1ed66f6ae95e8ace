// ── Server state aggregation ──
//
// One logical "read" of a server fans out into several remote calls. The
// calls run in a fixed order and the first failure aborts the read; there
// is no partial record.

use leaseweb_api::LeasewebClient;
use leaseweb_api::types::NetworkInterfaceType;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::convert;
use crate::error::CoreError;
use crate::model::ServerRecord;

/// Builds a [`ServerRecord`] from the remote API.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    client: &'a LeasewebClient,
    cancel: &'a CancellationToken,
}

impl<'a> Aggregator<'a> {
    pub fn new(client: &'a LeasewebClient, cancel: &'a CancellationToken) -> Self {
        Self { client, cancel }
    }

    /// Fetch the full observed state of `server_id`.
    ///
    /// Order: server details, power, public interface, leases, and (when
    /// the server has a public IP) the IP profile. A 404 on the public
    /// interface means the server has none and reads as closed.
    pub async fn fetch(&self, server_id: &str) -> Result<ServerRecord, CoreError> {
        checkpoint(self.cancel, "get-server")?;
        let server = self.client.get_server(server_id).await?;
        let mut record = ServerRecord::from(&server);
        if record.id.is_empty() {
            record.id = server_id.to_owned();
        }

        checkpoint(self.cancel, "get-power-status")?;
        let power = self.client.get_power_info(server_id).await?;
        record.powered_on = convert::powered_on(&power);

        checkpoint(self.cancel, "get-public-interface")?;
        record.public_interface_open = match self
            .client
            .get_network_interface(server_id, NetworkInterfaceType::Public)
            .await
        {
            Ok(nic) => nic.status.as_str_or_empty() == "open",
            Err(e) if e.is_not_found() => {
                debug!(server_id, "no public network interface; treating as closed");
                false
            }
            Err(e) => return Err(e.into()),
        };

        checkpoint(self.cancel, "list-leases")?;
        let leases = self.client.list_leases(server_id).await?;
        record.dhcp_lease = leases
            .leases
            .into_iter()
            .next()
            .and_then(|lease| lease.bootfile.into_option())
            .unwrap_or_default();

        if record.has_public_ip() {
            checkpoint(self.cancel, "get-ip")?;
            let ip = self.client.get_ip(server_id, &record.public_ip).await?;
            record.reverse_lookup = ip.reverse_lookup.into_option().unwrap_or_default();
        }

        debug!(server_id, powered_on = record.powered_on, "server state aggregated");
        Ok(record)
    }
}

/// Fail fast if the caller's deadline or cancellation already fired.
pub(crate) fn checkpoint(cancel: &CancellationToken, operation: &str) -> Result<(), CoreError> {
    if cancel.is_cancelled() {
        return Err(CoreError::Cancelled {
            operation: operation.to_owned(),
        });
    }
    Ok(())
}
