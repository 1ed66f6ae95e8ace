// Network endpoints
//
// Interface open/close and per-IP profile (reverse lookup, null route).

use tracing::debug;

use super::client::LeasewebClient;
use super::types::{Ip, NetworkInterfaceStatus, NetworkInterfaceType, UpdateIpProfile};
use crate::error::Error;

impl LeasewebClient {
    /// `GET /servers/{id}/networkInterfaces/{type}`
    ///
    /// Servers without the interface answer 404; callers decide whether
    /// that is an error.
    pub async fn get_network_interface(
        &self,
        server_id: &str,
        kind: NetworkInterfaceType,
    ) -> Result<NetworkInterfaceStatus, Error> {
        self.get(&["servers", server_id, "networkInterfaces", kind.as_ref()])
            .await
    }

    /// `POST /servers/{id}/networkInterfaces/{type}/open`
    pub async fn open_network_interface(
        &self,
        server_id: &str,
        kind: NetworkInterfaceType,
    ) -> Result<(), Error> {
        debug!(server_id, interface = %kind, "opening network interface");
        self.post_no_body(&["servers", server_id, "networkInterfaces", kind.as_ref(), "open"])
            .await
    }

    /// `POST /servers/{id}/networkInterfaces/{type}/close`
    pub async fn close_network_interface(
        &self,
        server_id: &str,
        kind: NetworkInterfaceType,
    ) -> Result<(), Error> {
        debug!(server_id, interface = %kind, "closing network interface");
        self.post_no_body(&["servers", server_id, "networkInterfaces", kind.as_ref(), "close"])
            .await
    }

    /// `GET /servers/{id}/ips/{ip}`
    pub async fn get_ip(&self, server_id: &str, ip: &str) -> Result<Ip, Error> {
        self.get(&["servers", server_id, "ips", ip]).await
    }

    /// Update the IP profile (reverse lookup).
    ///
    /// `PUT /servers/{id}/ips/{ip}` with `{"reverseLookup": "..."}`
    pub async fn update_ip_profile(
        &self,
        server_id: &str,
        ip: &str,
        reverse_lookup: &str,
    ) -> Result<(), Error> {
        debug!(server_id, ip, reverse_lookup, "updating IP profile");
        self.put_no_response(
            &["servers", server_id, "ips", ip],
            &UpdateIpProfile { reverse_lookup },
        )
        .await
    }

    /// Null route (blackhole) an IP at the network edge.
    ///
    /// `POST /servers/{id}/ips/{ip}/null`
    pub async fn null_ip_route(&self, server_id: &str, ip: &str) -> Result<(), Error> {
        debug!(server_id, ip, "null routing IP");
        self.post_no_response(&["servers", server_id, "ips", ip, "null"], &serde_json::json!({}))
            .await
    }

    /// `POST /servers/{id}/ips/{ip}/unnull`
    pub async fn remove_null_ip_route(&self, server_id: &str, ip: &str) -> Result<(), Error> {
        debug!(server_id, ip, "removing IP null route");
        self.post_no_body(&["servers", server_id, "ips", ip, "unnull"])
            .await
    }
}
