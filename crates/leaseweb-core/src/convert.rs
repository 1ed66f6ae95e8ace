// ── API-to-domain conversions ──
//
// Bridges `leaseweb_api` wire types into the flat `model` records. Absent
// and null wire fields collapse to empty strings and `false`.

use std::net::IpAddr;

use leaseweb_api::types::{self, NetworkInterface, PowerInfo};

use crate::model::{CatalogEntry, Location, ServerCredential, ServerRecord};

// ── Helpers ────────────────────────────────────────────────────────

/// Host part of an `ip/prefix` string, or empty when it does not parse.
pub fn ip_host(raw: &str) -> String {
    raw.split('/')
        .next()
        .and_then(|host| host.trim().parse::<IpAddr>().ok())
        .map(|ip| ip.to_string())
        .unwrap_or_default()
}

/// A server counts as powered on unless either the PDU or the IPMI reports `off`.
pub fn powered_on(info: &PowerInfo) -> bool {
    let is_off = |status: Option<&types::PowerStatus>| {
        status.is_some_and(|s| s.status.as_str_or_empty() == "off")
    };
    !is_off(info.pdu.as_option()) && !is_off(info.ipmi.as_option())
}

fn interface_ip(nic: Option<&NetworkInterface>) -> String {
    nic.map(|n| ip_host(n.ip.as_str_or_empty()))
        .unwrap_or_default()
}

// ── Server ─────────────────────────────────────────────────────────

impl From<&types::Location> for Location {
    fn from(loc: &types::Location) -> Self {
        Self {
            rack: loc.rack.as_str_or_empty().to_owned(),
            site: loc.site.as_str_or_empty().to_owned(),
            suite: loc.suite.as_str_or_empty().to_owned(),
            unit: loc.unit.as_str_or_empty().to_owned(),
        }
    }
}

/// Static server attributes only. Power, interface, lease, and reverse
/// lookup need their own calls and are filled in by the aggregator.
impl From<&types::Server> for ServerRecord {
    fn from(server: &types::Server) -> Self {
        let nics = server.network_interfaces.as_option();
        let public = nics.and_then(|n| n.public.as_option());
        let internal = nics.and_then(|n| n.internal.as_option());
        let remote = nics.and_then(|n| n.remote_management.as_option());

        let public_ip = interface_ip(public);
        let public_ip_null_routed = !public_ip.is_empty()
            && public.is_some_and(|n| n.null_routed.as_option().copied().unwrap_or(false));

        Self {
            id: server.id.clone(),
            reference: server
                .contract
                .as_option()
                .map(|c| c.reference.as_str_or_empty().to_owned())
                .unwrap_or_default(),
            public_ip,
            public_ip_null_routed,
            remote_management_ip: interface_ip(remote),
            internal_mac: internal
                .map(|n| n.mac.as_str_or_empty().to_owned())
                .unwrap_or_default(),
            location: server
                .location
                .as_option()
                .map(Location::from)
                .unwrap_or_default(),
            ..Self::default()
        }
    }
}

// ── Catalog ────────────────────────────────────────────────────────

impl From<types::ControlPanel> for CatalogEntry {
    fn from(cp: types::ControlPanel) -> Self {
        Self {
            id: cp.id,
            name: cp.name.into_option().unwrap_or_default(),
        }
    }
}

impl From<types::OperatingSystem> for CatalogEntry {
    fn from(os: types::OperatingSystem) -> Self {
        Self {
            id: os.id,
            name: os.name.into_option().unwrap_or_default(),
        }
    }
}

pub(crate) fn credential(server_id: &str, cred: types::Credential) -> ServerCredential {
    ServerCredential {
        server_id: server_id.to_owned(),
        credential_type: cred.credential_type,
        username: cred.username,
        password: cred.password.into_option().unwrap_or_default().into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use leaseweb_api::Nullable;
    use serde_json::json;

    use super::*;

    #[test]
    fn ip_host_strips_prefix() {
        assert_eq!(ip_host("192.0.2.10/24"), "192.0.2.10");
        assert_eq!(ip_host("192.0.2.10"), "192.0.2.10");
        assert_eq!(ip_host("2001:db8::1/64"), "2001:db8::1");
    }

    #[test]
    fn ip_host_rejects_garbage() {
        assert_eq!(ip_host(""), "");
        assert_eq!(ip_host("not-an-ip/24"), "");
        assert_eq!(ip_host("/24"), "");
    }

    #[test]
    fn power_is_on_unless_something_reports_off() {
        let status = |s: &str| {
            Nullable::Present(types::PowerStatus {
                status: Nullable::Present(s.to_owned()),
            })
        };
        let info = |pdu, ipmi| PowerInfo { pdu, ipmi };

        assert!(powered_on(&info(status("on"), status("on"))));
        assert!(!powered_on(&info(status("off"), status("on"))));
        assert!(!powered_on(&info(status("on"), status("off"))));
        assert!(powered_on(&info(Nullable::Absent, Nullable::Null)));
    }

    #[test]
    fn server_record_from_wire() {
        let server: types::Server = serde_json::from_value(json!({
            "id": "12345",
            "contract": { "reference": "db-1" },
            "location": { "rack": "13", "site": "AMS-01", "suite": "A6", "unit": "16-17" },
            "networkInterfaces": {
                "public": { "ip": "192.0.2.10/24", "nullRouted": true },
                "internal": { "mac": "AA:BB:CC:DD:EE:FF" },
                "remoteManagement": { "ip": "10.0.0.5/29" }
            }
        }))
        .unwrap();

        let record = ServerRecord::from(&server);
        assert_eq!(record.id, "12345");
        assert_eq!(record.reference, "db-1");
        assert_eq!(record.public_ip, "192.0.2.10");
        assert!(record.public_ip_null_routed);
        assert_eq!(record.remote_management_ip, "10.0.0.5");
        assert_eq!(record.internal_mac, "AA:BB:CC:DD:EE:FF");
        assert_eq!(record.location.site, "AMS-01");
        assert!(!record.powered_on);
    }

    #[test]
    fn null_route_needs_a_public_ip() {
        let server: types::Server = serde_json::from_value(json!({
            "id": "7",
            "networkInterfaces": { "public": { "ip": null, "nullRouted": true } }
        }))
        .unwrap();

        let record = ServerRecord::from(&server);
        assert_eq!(record.public_ip, "");
        assert!(!record.public_ip_null_routed);
        assert_eq!(record.reference, "");
    }
}
