// DHCP reservation endpoints (PXE boot file)

use tracing::debug;

use super::client::LeasewebClient;
use super::types::{CreateLease, LeaseList};
use crate::error::Error;

impl LeasewebClient {
    /// `GET /servers/{id}/leases`
    pub async fn list_leases(&self, server_id: &str) -> Result<LeaseList, Error> {
        self.get(&["servers", server_id, "leases"]).await
    }

    /// `POST /servers/{id}/leases` with `{"bootfile": "..."}`
    pub async fn create_lease(&self, server_id: &str, bootfile: &str) -> Result<(), Error> {
        debug!(server_id, bootfile, "creating DHCP reservation");
        self.post_no_response(&["servers", server_id, "leases"], &CreateLease { bootfile })
            .await
    }

    /// `DELETE /servers/{id}/leases`
    pub async fn delete_lease(&self, server_id: &str) -> Result<(), Error> {
        debug!(server_id, "deleting DHCP reservation");
        self.delete(&["servers", server_id, "leases"]).await
    }
}
