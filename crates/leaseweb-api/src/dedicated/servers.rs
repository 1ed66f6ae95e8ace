// Server endpoints
//
// Server object, reference, power, and credentials.

use tracing::debug;

use super::client::{DEFAULT_PAGE_LIMIT, LeasewebClient};
use super::types::{
    Credential, CredentialType, Page, PowerInfo, Server, ServerList, ServerListOptions,
    UpdateServer,
};
use crate::error::Error;

impl LeasewebClient {
    /// Get a single server.
    ///
    /// `GET /servers/{id}`
    pub async fn get_server(&self, server_id: &str) -> Result<Server, Error> {
        self.get(&["servers", server_id]).await
    }

    /// List one page of servers.
    ///
    /// `GET /servers?limit&offset&…filters`
    pub async fn list_servers(
        &self,
        options: &ServerListOptions,
        offset: i64,
        limit: i32,
    ) -> Result<Page<Server>, Error> {
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        params.extend(options.query());

        let list: ServerList = self.get_with_params(&["servers"], &params).await?;
        Ok(Page {
            data: list.servers,
            total_count: list.metadata.total_count,
        })
    }

    /// List every server matching `options`, following pagination.
    pub async fn list_all_servers(&self, options: &ServerListOptions) -> Result<Vec<Server>, Error> {
        self.paginate_all(DEFAULT_PAGE_LIMIT, |offset, limit| {
            self.list_servers(options, offset, limit)
        })
        .await
    }

    /// Set the human-chosen reference label.
    ///
    /// `PUT /servers/{id}` with `{"reference": "..."}`
    pub async fn update_server_reference(
        &self,
        server_id: &str,
        reference: &str,
    ) -> Result<(), Error> {
        debug!(server_id, reference, "updating server reference");
        self.put_no_response(&["servers", server_id], &UpdateServer { reference })
            .await
    }

    /// PDU and IPMI power state.
    ///
    /// `GET /servers/{id}/powerInfo`
    pub async fn get_power_info(&self, server_id: &str) -> Result<PowerInfo, Error> {
        self.get(&["servers", server_id, "powerInfo"]).await
    }

    /// `POST /servers/{id}/powerOn`
    pub async fn power_on(&self, server_id: &str) -> Result<(), Error> {
        debug!(server_id, "powering server on");
        self.post_no_body(&["servers", server_id, "powerOn"]).await
    }

    /// `POST /servers/{id}/powerOff`
    pub async fn power_off(&self, server_id: &str) -> Result<(), Error> {
        debug!(server_id, "powering server off");
        self.post_no_body(&["servers", server_id, "powerOff"]).await
    }

    /// Fetch one stored credential, password included.
    ///
    /// `GET /servers/{id}/credentials/{type}/{username}`
    pub async fn get_credential(
        &self,
        server_id: &str,
        credential_type: CredentialType,
        username: &str,
    ) -> Result<Credential, Error> {
        self.get(&[
            "servers",
            server_id,
            "credentials",
            credential_type.as_ref(),
            username,
        ])
        .await
    }
}
