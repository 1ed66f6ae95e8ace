// ── leaseweb_dedicated_server ──
//
// Import-only resource: servers are adopted by id, refreshed through the
// aggregator, and changed through the reconciliation engine.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde_json::{Value, json};
use tracing::debug;

use leaseweb_core::{DesiredServer, Location, ServerRecord};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::registry::{Entry, EntryKind, HandlerContext, UpdateOutcome};
use crate::schema::{AttrType, Attribute, Mode, PlanModifier, Schema, Validator};
use crate::state::{AttrValue, StateBlob, StateError};

pub const NAME: &str = "leaseweb_dedicated_server";

pub const REFERENCE_MAX_LENGTH: usize = 100;

pub fn entry() -> Entry {
    Entry {
        name: NAME,
        kind: EntryKind::Resource,
        schema_fn: schema,
        read_fn: read,
        update_fn: Some(update),
    }
}

// ── Schema ───────────────────────────────────────────────────────────

fn location_type() -> AttrType {
    AttrType::Object(vec![
        ("rack", AttrType::String),
        ("site", AttrType::String),
        ("suite", AttrType::String),
        ("unit", AttrType::String),
    ])
}

/// Attributes shared with the single-server data source.
///
/// `writable` is the mode of the six attributes the engine can change.
pub(crate) fn server_attributes(id: Attribute, writable: Mode) -> Vec<Attribute> {
    vec![
        id,
        Attribute::string("reference", writable)
            .describe("Free-form reference stored on the server contract.")
            .validator(Validator::MaxLength(REFERENCE_MAX_LENGTH)),
        Attribute::string("reverse_lookup", writable)
            .describe("Reverse DNS name of the public IP."),
        Attribute::string("dhcp_lease", writable)
            .describe("PXE boot file URL of the DHCP reservation; empty for none."),
        Attribute::bool("powered_on", writable),
        Attribute::bool("public_network_interface_opened", writable),
        Attribute::bool("public_ip_null_routed", writable),
        Attribute::string("public_ip", Mode::Computed),
        Attribute::string("remote_management_ip", Mode::Computed),
        Attribute::string("internal_mac", Mode::Computed),
        Attribute::new("location", location_type(), Mode::Computed),
    ]
}

fn schema() -> Schema {
    let id = Attribute::string("id", Mode::OptionalComputed)
        .describe("Server id.")
        .validator(Validator::ImmutableOnUpdate)
        .plan_modifier(PlanModifier::UseStateForUnknown);

    server_attributes(id, Mode::OptionalComputed)
        .into_iter()
        .fold(Schema::new("A Leaseweb dedicated server."), Schema::attribute)
}

// ── State mapping ────────────────────────────────────────────────────

pub(crate) fn record_to_state(record: &ServerRecord) -> StateBlob {
    let location = &record.location;
    StateBlob::new()
        .with("id", record.id.as_str())
        .with("reference", record.reference.as_str())
        .with("reverse_lookup", record.reverse_lookup.as_str())
        .with("dhcp_lease", record.dhcp_lease.as_str())
        .with("powered_on", record.powered_on)
        .with("public_network_interface_opened", record.public_interface_open)
        .with("public_ip_null_routed", record.public_ip_null_routed)
        .with("public_ip", record.public_ip.as_str())
        .with("remote_management_ip", record.remote_management_ip.as_str())
        .with("internal_mac", record.internal_mac.as_str())
        .with(
            "location",
            json!({
                "rack": location.rack,
                "site": location.site,
                "suite": location.suite,
                "unit": location.unit,
            }),
        )
}

pub(crate) fn state_to_record(state: &StateBlob) -> Result<ServerRecord, StateError> {
    let location = match state.get("location") {
        AttrValue::Known(v @ Value::Object(_)) => serde_json::from_value::<Location>(v.clone())?,
        AttrValue::Known(_) => {
            return Err(StateError::Type {
                attribute: "location".into(),
                expected: "object",
            });
        }
        AttrValue::Null | AttrValue::Unknown => Location::default(),
    };

    Ok(ServerRecord {
        id: state.string_or_empty("id")?,
        reference: state.string_or_empty("reference")?,
        reverse_lookup: state.string_or_empty("reverse_lookup")?,
        dhcp_lease: state.string_or_empty("dhcp_lease")?,
        powered_on: state.bool_or_false("powered_on")?,
        public_interface_open: state.bool_or_false("public_network_interface_opened")?,
        public_ip_null_routed: state.bool_or_false("public_ip_null_routed")?,
        public_ip: state.string_or_empty("public_ip")?,
        remote_management_ip: state.string_or_empty("remote_management_ip")?,
        internal_mac: state.string_or_empty("internal_mac")?,
        location,
    })
}

pub(crate) fn state_to_desired(state: &StateBlob) -> Result<DesiredServer, StateError> {
    Ok(DesiredServer {
        reference: state.string("reference")?,
        reverse_lookup: state.string("reverse_lookup")?,
        dhcp_lease: state.string("dhcp_lease")?,
        powered_on: state.bool("powered_on")?,
        public_interface_open: state.bool("public_network_interface_opened")?,
        public_ip_null_routed: state.bool("public_ip_null_routed")?,
    })
}

pub(crate) fn server_id(state: &StateBlob) -> Result<String, Diagnostics> {
    match state.string("id")?.known() {
        Some(id) if !id.is_empty() => Ok(id.clone()),
        _ => Err(Diagnostic::error(
            "Missing server id",
            "A dedicated server id is required to read its state.",
        )
        .with_attribute("id")
        .into()),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────

pub(crate) fn read<'a>(
    ctx: &'a HandlerContext,
    state: &'a StateBlob,
) -> BoxFuture<'a, Result<StateBlob, Diagnostics>> {
    async move {
        let id = server_id(state)?;
        let record = ctx.reconciler().read(&id).await?;
        Ok(record_to_state(&record))
    }
    .boxed()
}

fn update<'a>(
    ctx: &'a HandlerContext,
    prior: &'a StateBlob,
    desired: &'a StateBlob,
) -> BoxFuture<'a, UpdateOutcome> {
    async move {
        let decoded = state_to_record(prior).and_then(|o| Ok((o, state_to_desired(desired)?)));
        let (observed, wanted) = match decoded {
            Ok(pair) => pair,
            Err(e) => {
                return UpdateOutcome {
                    state: prior.clone(),
                    diagnostics: e.into(),
                };
            }
        };
        if observed.id.is_empty() {
            return UpdateOutcome {
                state: prior.clone(),
                diagnostics: Diagnostic::error(
                    "Missing server id",
                    "The prior state has no server id; import the server first.",
                )
                .with_attribute("id")
                .into(),
            };
        }

        let reconciler = ctx.reconciler();
        for op in reconciler.plan(&observed, &wanted) {
            debug!(server_id = %observed.id, operation = %op, "planned");
        }

        let (record, failure) = reconciler.reconcile(observed, &wanted).await.into_parts();
        UpdateOutcome {
            state: record_to_state(&record),
            diagnostics: failure.map(Diagnostics::from).unwrap_or_default(),
        }
    }
    .boxed()
}
