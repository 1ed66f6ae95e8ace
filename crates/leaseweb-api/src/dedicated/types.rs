// Dedicated server wire types
//
// Models for the `bareMetals/v2` JSON API. Optional fields are `Nullable`
// because the API omits keys and sends explicit nulls inconsistently across
// server generations. Bodies we only partially care about keep the rest in
// `extra`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::nullable::Nullable;

// ── Error body ───────────────────────────────────────────────────────

/// Error body returned with non-2xx responses.
///
/// ```json
/// { "errorMessage": "...", "errorCode": "...", "correlationId": "...",
///   "errorDetails": { "reference": ["too long"] } }
/// ```
///
/// Decoded field by field: a field of an unexpected shape is dropped on
/// its own and never hides the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error_message: Option<String>,
    pub error_code: Option<String>,
    pub correlation_id: Option<String>,
    pub error_details: BTreeMap<String, Vec<String>>,
}

impl ApiErrorBody {
    /// `None` unless `value` is a JSON object.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| -> Option<String> {
            match object.get(key)? {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        };

        Some(Self {
            error_message: object
                .get("errorMessage")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
            error_code: text("errorCode"),
            correlation_id: text("correlationId"),
            error_details: object
                .get("errorDetails")
                .map(detail_map)
                .unwrap_or_default(),
        })
    }
}

/// `{attr: [msg, ...]}` or `{attr: msg}`; anything else is skipped.
fn detail_map(value: &serde_json::Value) -> BTreeMap<String, Vec<String>> {
    let Some(object) = value.as_object() else {
        return BTreeMap::new();
    };
    object
        .iter()
        .filter_map(|(attr, messages)| {
            let lines: Vec<String> = match messages {
                serde_json::Value::String(s) => vec![s.clone()],
                serde_json::Value::Array(items) => items
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .map(str::to_owned)
                    .collect(),
                _ => Vec::new(),
            };
            (!lines.is_empty()).then(|| (attr.clone(), lines))
        })
        .collect()
}

// ── Pagination ───────────────────────────────────────────────────────

/// `_metadata` block of every listing endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub limit: i32,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub total_count: i64,
}

/// One page of a listing, independent of the endpoint's collection key.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_count: i64,
}

// ── Server ───────────────────────────────────────────────────────────

/// Full server object from `GET /servers/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,
    #[serde(default)]
    pub asset_id: Nullable<String>,
    #[serde(default)]
    pub serial_number: Nullable<String>,
    #[serde(default)]
    pub contract: Nullable<Contract>,
    #[serde(default)]
    pub location: Nullable<Location>,
    #[serde(default)]
    pub network_interfaces: Nullable<NetworkInterfaces>,
    /// Catch-all for fields not modelled here (specs, rack, power ports…).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(default)]
    pub id: Nullable<String>,
    #[serde(default)]
    pub customer_id: Nullable<String>,
    #[serde(default)]
    pub delivery_status: Nullable<String>,
    #[serde(default)]
    pub reference: Nullable<String>,
    #[serde(default)]
    pub sales_org_id: Nullable<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub rack: Nullable<String>,
    #[serde(default)]
    pub site: Nullable<String>,
    #[serde(default)]
    pub suite: Nullable<String>,
    #[serde(default)]
    pub unit: Nullable<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaces {
    #[serde(default)]
    pub public: Nullable<NetworkInterface>,
    #[serde(default)]
    pub internal: Nullable<NetworkInterface>,
    #[serde(default)]
    pub remote_management: Nullable<NetworkInterface>,
}

/// Interface summary embedded in the server object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    #[serde(default)]
    pub mac: Nullable<String>,
    /// CIDR notation, e.g. `"192.0.2.10/24"`.
    #[serde(default)]
    pub ip: Nullable<String>,
    #[serde(default)]
    pub gateway: Nullable<String>,
    #[serde(default)]
    pub location_id: Nullable<String>,
    #[serde(default)]
    pub null_routed: Nullable<bool>,
}

// ── Server listing ───────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ServerList {
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(rename = "_metadata", default)]
    pub metadata: Metadata,
}

/// Filters accepted by `GET /servers`.
///
/// Immutable option record; `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerListOptions {
    pub reference: Option<String>,
    pub ip: Option<String>,
    pub mac_address: Option<String>,
    pub site: Option<String>,
    pub private_rack_id: Option<String>,
    pub private_network_capable: Option<bool>,
    pub private_network_enabled: Option<bool>,
}

impl ServerListOptions {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let strings = [
            ("reference", &self.reference),
            ("ip", &self.ip),
            ("macAddress", &self.mac_address),
            ("site", &self.site),
            ("privateRackId", &self.private_rack_id),
        ];
        for (key, value) in strings {
            if let Some(v) = value {
                params.push((key, v.clone()));
            }
        }
        let flags = [
            ("privateNetworkCapable", self.private_network_capable),
            ("privateNetworkEnabled", self.private_network_enabled),
        ];
        for (key, value) in flags {
            if let Some(v) = value {
                params.push((key, v.to_string()));
            }
        }
        params
    }
}

// ── Power ────────────────────────────────────────────────────────────

/// `GET /servers/{id}/powerInfo`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerInfo {
    #[serde(default)]
    pub pdu: Nullable<PowerStatus>,
    #[serde(default)]
    pub ipmi: Nullable<PowerStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerStatus {
    /// `"on"`, `"off"` or `"unknown"`.
    #[serde(default)]
    pub status: Nullable<String>,
}

// ── Network interfaces ───────────────────────────────────────────────

/// Interface selector used in `/networkInterfaces/{type}` paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
pub enum NetworkInterfaceType {
    #[strum(serialize = "public")]
    Public,
    #[strum(serialize = "internal")]
    Internal,
    #[strum(serialize = "remoteManagement")]
    RemoteManagement,
}

/// `GET /servers/{id}/networkInterfaces/{type}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceStatus {
    #[serde(default)]
    pub link_speed: Nullable<String>,
    #[serde(default)]
    pub oper_status: Nullable<String>,
    /// `"open"` or `"closed"`.
    #[serde(default)]
    pub status: Nullable<String>,
    #[serde(default)]
    pub switch_interface: Nullable<String>,
    #[serde(default)]
    pub switch_name: Nullable<String>,
    #[serde(default, rename = "type")]
    pub interface_type: Nullable<String>,
}

// ── IPs ──────────────────────────────────────────────────────────────

/// `GET /servers/{id}/ips/{ip}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ip {
    #[serde(default)]
    pub ip: Nullable<String>,
    #[serde(default)]
    pub gateway: Nullable<String>,
    #[serde(default)]
    pub null_routed: Nullable<bool>,
    #[serde(default)]
    pub reverse_lookup: Nullable<String>,
    #[serde(default)]
    pub version: Nullable<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIpProfile<'a> {
    pub reverse_lookup: &'a str,
}

// ── DHCP leases ──────────────────────────────────────────────────────

/// `GET /servers/{id}/leases`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaseList {
    #[serde(default)]
    pub leases: Vec<Lease>,
    #[serde(rename = "_metadata", default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    #[serde(default)]
    pub bootfile: Nullable<String>,
    #[serde(default)]
    pub created_at: Nullable<String>,
    #[serde(default)]
    pub gateway: Nullable<String>,
    #[serde(default)]
    pub hostname: Nullable<String>,
    #[serde(default)]
    pub ip: Nullable<String>,
    #[serde(default)]
    pub mac: Nullable<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLease<'a> {
    pub bootfile: &'a str,
}

// ── Server reference ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct UpdateServer<'a> {
    pub reference: &'a str,
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControlPanel {
    pub id: String,
    #[serde(default)]
    pub name: Nullable<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPanelList {
    #[serde(default)]
    pub control_panels: Vec<ControlPanel>,
    #[serde(rename = "_metadata", default)]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperatingSystem {
    pub id: String,
    #[serde(default)]
    pub name: Nullable<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystemList {
    #[serde(default)]
    pub operating_systems: Vec<OperatingSystem>,
    #[serde(rename = "_metadata", default)]
    pub metadata: Metadata,
}

// ── Credentials ──────────────────────────────────────────────────────

/// Credential kinds stored for a server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialType {
    OperatingSystem,
    RescueMode,
    RemoteManagement,
    ControlPanel,
    Switch,
    Pdu,
    Firewall,
    LoadBalancer,
    Vnc,
    TemporaryOperatingSystem,
    VpnUser,
    CombinationLock,
    Database,
}

/// `GET /servers/{id}/credentials/{type}/{username}`
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    #[serde(rename = "type")]
    pub credential_type: String,
    pub username: String,
    #[serde(default)]
    pub password: Nullable<String>,
}
