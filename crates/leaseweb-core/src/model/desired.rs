use serde::{Deserialize, Serialize};

use super::Field;

/// Operator intent for the mutable attributes of a server.
///
/// Read-only attributes (IPs, MAC, location) never appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesiredServer {
    pub reference: Field<String>,
    pub reverse_lookup: Field<String>,
    pub dhcp_lease: Field<String>,
    pub powered_on: Field<bool>,
    pub public_interface_open: Field<bool>,
    pub public_ip_null_routed: Field<bool>,
}

impl DesiredServer {
    /// Desired state that asks for exactly what `record` already holds.
    pub fn matching(record: &super::ServerRecord) -> Self {
        Self {
            reference: Field::Known(record.reference.clone()),
            reverse_lookup: Field::Known(record.reverse_lookup.clone()),
            dhcp_lease: Field::Known(record.dhcp_lease.clone()),
            powered_on: Field::Known(record.powered_on),
            public_interface_open: Field::Known(record.public_interface_open),
            public_ip_null_routed: Field::Known(record.public_ip_null_routed),
        }
    }
}
