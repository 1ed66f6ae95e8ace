// ── Observed server state ──
//
// The flat record the provider persists between runs. Every field has a
// concrete value: absent remote data becomes the empty string or `false`.

use serde::{Deserialize, Serialize};

/// Physical placement inside a datacenter. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub rack: String,
    pub site: String,
    pub suite: String,
    pub unit: String,
}

/// Observed state of one dedicated server.
///
/// `public_ip` carries the host part only (no prefix length). When it is
/// empty, `reverse_lookup` is empty and `public_ip_null_routed` is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerRecord {
    pub id: String,
    pub reference: String,
    pub reverse_lookup: String,
    pub dhcp_lease: String,
    pub powered_on: bool,
    pub public_interface_open: bool,
    pub public_ip_null_routed: bool,
    pub public_ip: String,
    pub remote_management_ip: String,
    pub internal_mac: String,
    pub location: Location,
}

impl ServerRecord {
    pub fn has_public_ip(&self) -> bool {
        !self.public_ip.is_empty()
    }
}
