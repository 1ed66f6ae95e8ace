// ── Reconciliation engine ──
//
// Drives a dedicated server from its observed record towards the operator's
// desired record through six sub-operations, always in the same order:
//
//   1. reference   2. power   3. reverse lookup
//   4. null route  5. DHCP lease   6. public interface
//
// Each sub-operation has a trigger over (observed, desired). When it fires,
// the engine issues the remote write and commits the new value into the
// observed record before evaluating the next trigger. The first failure
// stops the run; the record keeps everything committed up to that point.

use std::sync::Arc;

use leaseweb_api::LeasewebClient;
use leaseweb_api::types::NetworkInterfaceType;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::aggregator::{Aggregator, checkpoint};
use crate::error::CoreError;
use crate::model::{DesiredServer, ServerRecord};

// ── Options ──────────────────────────────────────────────────────────

/// Which desired field must be known before the public interface is touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum InterfaceGate {
    /// The interface only changes when `public_ip_null_routed` is also
    /// declared. Long-standing provider behaviour.
    #[default]
    NullRouteKnown,
    /// Gate on `public_interface_open` itself.
    InterfaceOpenKnown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub interface_gate: InterfaceGate,
    /// Skip reference, power, reverse lookup, and lease writes whose desired
    /// value already matches the observed one. Off by default: those four
    /// fire whenever the desired value is known.
    pub skip_unchanged: bool,
}

// ── Sub-operations ───────────────────────────────────────────────────

/// One remote write the engine can issue, carrying its target value.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SubOperation {
    UpdateReference { reference: String },
    UpdatePower { on: bool },
    UpdateReverseLookup { ip: String, reverse_lookup: String },
    UpdateNullRoute { ip: String, null_routed: bool },
    UpdateDhcpLease { bootfile: String },
    UpdatePublicInterface { open: bool },
}

impl SubOperation {
    /// Position in the fixed execution order, starting at 1.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::UpdateReference { .. } => 1,
            Self::UpdatePower { .. } => 2,
            Self::UpdateReverseLookup { .. } => 3,
            Self::UpdateNullRoute { .. } => 4,
            Self::UpdateDhcpLease { .. } => 5,
            Self::UpdatePublicInterface { .. } => 6,
        }
    }

    /// Fold the effect of a successful write into the observed record.
    fn commit(&self, record: &mut ServerRecord) {
        match self {
            Self::UpdateReference { reference } => record.reference.clone_from(reference),
            Self::UpdatePower { on } => record.powered_on = *on,
            Self::UpdateReverseLookup { reverse_lookup, .. } => {
                record.reverse_lookup.clone_from(reverse_lookup);
            }
            Self::UpdateNullRoute { null_routed, .. } => record.public_ip_null_routed = *null_routed,
            Self::UpdateDhcpLease { bootfile } => record.dhcp_lease.clone_from(bootfile),
            Self::UpdatePublicInterface { open } => record.public_interface_open = *open,
        }
    }
}

// ── Triggers ─────────────────────────────────────────────────────────

type Trigger = fn(&ServerRecord, &DesiredServer, &EngineOptions) -> Option<SubOperation>;

const STAGES: [Trigger; 6] = [
    reference_trigger,
    power_trigger,
    reverse_lookup_trigger,
    null_route_trigger,
    dhcp_lease_trigger,
    public_interface_trigger,
];

fn wants<T: PartialEq>(desired: &T, current: &T, opts: &EngineOptions) -> bool {
    !opts.skip_unchanged || desired != current
}

fn reference_trigger(
    s: &ServerRecord,
    d: &DesiredServer,
    opts: &EngineOptions,
) -> Option<SubOperation> {
    let reference = d.reference.known()?;
    wants(reference, &s.reference, opts).then(|| SubOperation::UpdateReference {
        reference: reference.clone(),
    })
}

fn power_trigger(s: &ServerRecord, d: &DesiredServer, opts: &EngineOptions) -> Option<SubOperation> {
    let on = *d.powered_on.known()?;
    wants(&on, &s.powered_on, opts).then_some(SubOperation::UpdatePower { on })
}

fn reverse_lookup_trigger(
    s: &ServerRecord,
    d: &DesiredServer,
    opts: &EngineOptions,
) -> Option<SubOperation> {
    let reverse_lookup = d.reverse_lookup.known()?;
    if !s.has_public_ip() {
        return None;
    }
    wants(reverse_lookup, &s.reverse_lookup, opts).then(|| {
        SubOperation::UpdateReverseLookup {
            ip: s.public_ip.clone(),
            reverse_lookup: reverse_lookup.clone(),
        }
    })
}

fn null_route_trigger(
    s: &ServerRecord,
    d: &DesiredServer,
    _opts: &EngineOptions,
) -> Option<SubOperation> {
    let null_routed = *d.public_ip_null_routed.known()?;
    if null_routed == s.public_ip_null_routed || !s.has_public_ip() {
        return None;
    }
    Some(SubOperation::UpdateNullRoute {
        ip: s.public_ip.clone(),
        null_routed,
    })
}

fn dhcp_lease_trigger(
    s: &ServerRecord,
    d: &DesiredServer,
    opts: &EngineOptions,
) -> Option<SubOperation> {
    let bootfile = d.dhcp_lease.known()?;
    wants(bootfile, &s.dhcp_lease, opts).then(|| SubOperation::UpdateDhcpLease {
        bootfile: bootfile.clone(),
    })
}

fn public_interface_trigger(
    s: &ServerRecord,
    d: &DesiredServer,
    opts: &EngineOptions,
) -> Option<SubOperation> {
    let gate_open = match opts.interface_gate {
        InterfaceGate::NullRouteKnown => d.public_ip_null_routed.is_known(),
        InterfaceGate::InterfaceOpenKnown => d.public_interface_open.is_known(),
    };
    let open = *d.public_interface_open.known()?;
    if !gate_open {
        debug!(
            server_id = %s.id,
            gate = %opts.interface_gate,
            "public interface change not gated in; skipping"
        );
        return None;
    }
    (open != s.public_interface_open).then_some(SubOperation::UpdatePublicInterface { open })
}

/// Desired attributes that cannot be applied because the server has no
/// public IP. The public IP is never written, so this holds for the whole run.
fn blocked_without_public_ip(s: &ServerRecord, d: &DesiredServer) -> Vec<&'static str> {
    if s.has_public_ip() {
        return Vec::new();
    }
    let mut blocked = Vec::new();
    if d.reverse_lookup.is_known() {
        blocked.push("reverse_lookup");
    }
    if d.public_ip_null_routed.differs_from(&s.public_ip_null_routed) {
        blocked.push("public_ip_null_routed");
    }
    blocked
}

// ── Report ───────────────────────────────────────────────────────────

/// Outcome of one reconciliation.
///
/// `record` is always meaningful: on failure it holds every change that
/// was committed before the failing sub-operation.
#[derive(Debug)]
pub struct Reconciliation {
    pub record: ServerRecord,
    pub applied: Vec<SubOperation>,
    pub result: Result<(), CoreError>,
}

impl Reconciliation {
    pub fn is_complete(&self) -> bool {
        self.result.is_ok()
    }

    /// Split into the record and the failure, if any.
    pub fn into_parts(self) -> (ServerRecord, Option<CoreError>) {
        (self.record, self.result.err())
    }
}

// ── Engine ───────────────────────────────────────────────────────────

/// Reads and reconciles dedicated servers.
///
/// The client is shared; one `Reconciler` handles one invocation and runs
/// its sub-operations strictly one after another.
#[derive(Debug, Clone)]
pub struct Reconciler {
    client: Arc<LeasewebClient>,
    options: EngineOptions,
    cancel: CancellationToken,
}

impl Reconciler {
    pub fn new(client: Arc<LeasewebClient>) -> Self {
        Self {
            client,
            options: EngineOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Current observed state of `server_id`.
    pub async fn read(&self, server_id: &str) -> Result<ServerRecord, CoreError> {
        Aggregator::new(&self.client, &self.cancel)
            .fetch(server_id)
            .await
    }

    /// Ordered sub-operations a reconciliation would issue, assuming every
    /// write succeeds. No I/O.
    pub fn plan(&self, observed: &ServerRecord, desired: &DesiredServer) -> Vec<SubOperation> {
        let mut record = observed.clone();
        let mut ops = Vec::new();
        for stage in STAGES {
            if let Some(op) = stage(&record, desired, &self.options) {
                op.commit(&mut record);
                ops.push(op);
            }
        }
        ops
    }

    /// Apply `desired` on top of `observed`.
    pub async fn reconcile(
        &self,
        observed: ServerRecord,
        desired: &DesiredServer,
    ) -> Reconciliation {
        for attribute in blocked_without_public_ip(&observed, desired) {
            warn!(
                server_id = %observed.id,
                attribute,
                "requested but the server has no public IP; skipping"
            );
        }

        let mut record = observed;
        let mut applied = Vec::new();

        for stage in STAGES {
            let Some(op) = stage(&record, desired, &self.options) else {
                continue;
            };
            if let Err(e) = self.execute(&record.id, &op).await {
                warn!(server_id = %record.id, operation = %op, error = %e, "sub-operation failed");
                return Reconciliation {
                    record,
                    applied,
                    result: Err(e),
                };
            }
            op.commit(&mut record);
            info!(server_id = %record.id, operation = %op, "sub-operation applied");
            applied.push(op);
        }

        Reconciliation {
            record,
            applied,
            result: Ok(()),
        }
    }

    async fn execute(&self, server_id: &str, op: &SubOperation) -> Result<(), CoreError> {
        let name: &'static str = op.into();
        checkpoint(&self.cancel, name)?;
        let client = &self.client;
        match op {
            SubOperation::UpdateReference { reference } => {
                client.update_server_reference(server_id, reference).await?;
            }
            SubOperation::UpdatePower { on: true } => client.power_on(server_id).await?,
            SubOperation::UpdatePower { on: false } => client.power_off(server_id).await?,
            SubOperation::UpdateReverseLookup { ip, reverse_lookup } => {
                client.update_ip_profile(server_id, ip, reverse_lookup).await?;
            }
            SubOperation::UpdateNullRoute {
                ip,
                null_routed: true,
            } => client.null_ip_route(server_id, ip).await?,
            SubOperation::UpdateNullRoute {
                ip,
                null_routed: false,
            } => client.remove_null_ip_route(server_id, ip).await?,
            SubOperation::UpdateDhcpLease { bootfile } if bootfile.is_empty() => {
                client.delete_lease(server_id).await?;
            }
            SubOperation::UpdateDhcpLease { bootfile } => {
                client.create_lease(server_id, bootfile).await?;
            }
            SubOperation::UpdatePublicInterface { open: true } => {
                client
                    .open_network_interface(server_id, NetworkInterfaceType::Public)
                    .await?;
            }
            SubOperation::UpdatePublicInterface { open: false } => {
                client
                    .close_network_interface(server_id, NetworkInterfaceType::Public)
                    .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use leaseweb_api::{ClientConfig, TransportConfig};
    use pretty_assertions::assert_eq;
    use secrecy::SecretString;

    use super::*;
    use crate::model::Field;

    fn reconciler(options: EngineOptions) -> Reconciler {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".parse().unwrap(),
            token: SecretString::from("unused".to_owned()),
            transport: TransportConfig::default(),
        };
        let client = LeasewebClient::new(&config).unwrap();
        Reconciler::new(Arc::new(client)).with_options(options)
    }

    fn observed() -> ServerRecord {
        ServerRecord {
            id: "42".into(),
            public_ip: "192.0.2.10".into(),
            ..ServerRecord::default()
        }
    }

    #[test]
    fn plan_is_empty_for_all_null_desired() {
        let plan = reconciler(EngineOptions::default()).plan(&observed(), &DesiredServer::default());
        assert!(plan.is_empty());
    }

    #[test]
    fn unknown_fields_never_trigger() {
        let desired = DesiredServer {
            reference: Field::Unknown,
            reverse_lookup: Field::Unknown,
            dhcp_lease: Field::Unknown,
            powered_on: Field::Unknown,
            public_interface_open: Field::Unknown,
            public_ip_null_routed: Field::Unknown,
        };
        let plan = reconciler(EngineOptions::default()).plan(&observed(), &desired);
        assert!(plan.is_empty());
    }

    fn settled() -> ServerRecord {
        ServerRecord {
            reference: "db-1".into(),
            reverse_lookup: "db-1.example.com".into(),
            dhcp_lease: "http://pxe/boot.img".into(),
            powered_on: true,
            public_interface_open: true,
            ..observed()
        }
    }

    #[test]
    fn identical_desired_replays_known_fields() {
        let s = settled();
        let ordinals: Vec<u8> = reconciler(EngineOptions::default())
            .plan(&s, &DesiredServer::matching(&s))
            .iter()
            .map(SubOperation::ordinal)
            .collect();
        // Null route and interface still compare against the observed value.
        assert_eq!(ordinals, vec![1, 2, 3, 5]);
    }

    #[test]
    fn skip_unchanged_issues_nothing_for_identical_desired() {
        let s = settled();
        let options = EngineOptions {
            skip_unchanged: true,
            ..EngineOptions::default()
        };
        assert!(reconciler(options).plan(&s, &DesiredServer::matching(&s)).is_empty());
    }

    #[test]
    fn equal_reference_is_rewritten_by_default() {
        let mut s = observed();
        s.reference = "web-1".into();
        let desired = DesiredServer {
            reference: Field::Known("web-1".into()),
            ..DesiredServer::default()
        };
        assert_eq!(
            reconciler(EngineOptions::default()).plan(&s, &desired),
            vec![SubOperation::UpdateReference {
                reference: "web-1".into()
            }]
        );
    }

    #[test]
    fn plan_follows_fixed_order() {
        let desired = DesiredServer {
            reference: Field::Known("web-1".into()),
            reverse_lookup: Field::Known("web-1.example.com".into()),
            dhcp_lease: Field::Known("http://pxe/boot.img".into()),
            powered_on: Field::Known(true),
            public_interface_open: Field::Known(true),
            public_ip_null_routed: Field::Known(true),
        };
        let plan = reconciler(EngineOptions::default()).plan(&observed(), &desired);
        let ordinals: Vec<u8> = plan.iter().map(SubOperation::ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            plan[3],
            SubOperation::UpdateNullRoute {
                ip: "192.0.2.10".into(),
                null_routed: true
            }
        );
    }

    #[test]
    fn public_ip_guards_reverse_lookup_and_null_route() {
        let s = ServerRecord {
            id: "42".into(),
            ..ServerRecord::default()
        };
        let desired = DesiredServer {
            reverse_lookup: Field::Known("host.example.com".into()),
            public_ip_null_routed: Field::Known(true),
            ..DesiredServer::default()
        };
        assert!(reconciler(EngineOptions::default()).plan(&s, &desired).is_empty());
    }

    #[test]
    fn blocked_attributes_are_reported_once_per_run() {
        let s = ServerRecord {
            id: "42".into(),
            ..ServerRecord::default()
        };
        let desired = DesiredServer {
            reverse_lookup: Field::Known("host.example.com".into()),
            public_ip_null_routed: Field::Known(true),
            ..DesiredServer::default()
        };
        assert_eq!(
            blocked_without_public_ip(&s, &desired),
            vec!["reverse_lookup", "public_ip_null_routed"]
        );
        assert!(blocked_without_public_ip(&observed(), &desired).is_empty());

        let unchanged = DesiredServer {
            public_ip_null_routed: Field::Known(false),
            ..DesiredServer::default()
        };
        assert!(blocked_without_public_ip(&s, &unchanged).is_empty());
    }

    #[test]
    fn equal_null_route_is_not_rewritten() {
        let mut s = observed();
        s.public_ip_null_routed = true;
        let desired = DesiredServer {
            public_ip_null_routed: Field::Known(true),
            ..DesiredServer::default()
        };
        assert!(reconciler(EngineOptions::default()).plan(&s, &desired).is_empty());
    }

    #[test]
    fn interface_gated_on_null_route_by_default() {
        let desired = DesiredServer {
            public_interface_open: Field::Known(true),
            ..DesiredServer::default()
        };
        assert!(
            reconciler(EngineOptions::default())
                .plan(&observed(), &desired)
                .is_empty()
        );

        let gated_on_self = EngineOptions {
            interface_gate: InterfaceGate::InterfaceOpenKnown,
            ..EngineOptions::default()
        };
        assert_eq!(
            reconciler(gated_on_self).plan(&observed(), &desired),
            vec![SubOperation::UpdatePublicInterface { open: true }]
        );
    }

    #[test]
    fn interface_left_alone_when_its_own_value_is_unknown() {
        let desired = DesiredServer {
            public_ip_null_routed: Field::Known(false),
            public_interface_open: Field::Unknown,
            ..DesiredServer::default()
        };
        assert!(
            reconciler(EngineOptions::default())
                .plan(&observed(), &desired)
                .is_empty()
        );
    }

    #[test]
    fn sub_operation_names() {
        assert_eq!(
            SubOperation::UpdateDhcpLease {
                bootfile: String::new()
            }
            .to_string(),
            "update-dhcp-lease"
        );
        let name: &'static str = (&SubOperation::UpdatePower { on: true }).into();
        assert_eq!(name, "update-power");
    }
}
