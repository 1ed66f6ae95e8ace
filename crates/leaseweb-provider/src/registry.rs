// ── Resource registry ──
//
// Every resource and data source is one `Entry`: a name, a schema
// function, a read function, and (for resources) an update function. The
// registry dispatches the runtime's handlers to the right entry and owns
// the behaviour common to all of them: validation before I/O, unsupported
// create/delete, import.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use indexmap::IndexMap;
use tracing::{debug, info};

use leaseweb_api::LeasewebClient;
use leaseweb_core::{CancellationToken, CoreError, EngineOptions, Reconciler};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::schema::Schema;
use crate::state::{AttrValue, StateBlob};
use crate::{data_sources, resources};

pub const PROVIDER_TYPE_NAME: &str = "leaseweb";

// ── Handler plumbing ─────────────────────────────────────────────────

/// What a handler gets to work with for one invocation.
#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub client: Arc<LeasewebClient>,
    pub options: EngineOptions,
    pub cancel: CancellationToken,
}

impl HandlerContext {
    pub fn new(client: Arc<LeasewebClient>) -> Self {
        Self {
            client,
            options: EngineOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(Arc::clone(&self.client))
            .with_options(self.options)
            .with_cancellation(self.cancel.clone())
    }
}

/// Result of an update: the new state is returned even when the update
/// failed part-way, so the runtime records the progress that was made.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub state: StateBlob,
    pub diagnostics: Diagnostics,
}

pub type ReadFn =
    for<'a> fn(&'a HandlerContext, &'a StateBlob) -> BoxFuture<'a, Result<StateBlob, Diagnostics>>;

pub type UpdateFn =
    for<'a> fn(&'a HandlerContext, &'a StateBlob, &'a StateBlob) -> BoxFuture<'a, UpdateOutcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EntryKind {
    Resource,
    DataSource,
}

/// One resource or data source.
#[derive(Clone, Copy)]
pub struct Entry {
    pub name: &'static str,
    pub kind: EntryKind,
    pub schema_fn: fn() -> Schema,
    pub read_fn: ReadFn,
    pub update_fn: Option<UpdateFn>,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("updatable", &self.update_fn.is_some())
            .finish_non_exhaustive()
    }
}

/// Names of everything the provider offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub type_name: &'static str,
    pub resources: Vec<&'static str>,
    pub data_sources: Vec<&'static str>,
}

// ── Registry ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Registry {
    resources: IndexMap<&'static str, Entry>,
    data_sources: IndexMap<&'static str, Entry>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with every built-in resource and data source.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(resources::dedicated_server::entry());
        registry.register(data_sources::dedicated_servers::entry());
        registry.register(data_sources::dedicated_server::entry());
        registry.register(data_sources::control_panels::entry());
        registry.register(data_sources::operating_systems::entry());
        registry.register(data_sources::credential::entry());
        registry
    }

    pub fn empty() -> Self {
        Self {
            resources: IndexMap::new(),
            data_sources: IndexMap::new(),
        }
    }

    pub fn register(&mut self, entry: Entry) {
        let map = match entry.kind {
            EntryKind::Resource => &mut self.resources,
            EntryKind::DataSource => &mut self.data_sources,
        };
        map.insert(entry.name, entry);
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            type_name: PROVIDER_TYPE_NAME,
            resources: self.resources.keys().copied().collect(),
            data_sources: self.data_sources.keys().copied().collect(),
        }
    }

    fn resource(&self, name: &str) -> Result<&Entry, Diagnostics> {
        self.resources
            .get(name)
            .ok_or_else(|| unknown_entry(EntryKind::Resource, name))
    }

    fn data_source(&self, name: &str) -> Result<&Entry, Diagnostics> {
        self.data_sources
            .get(name)
            .ok_or_else(|| unknown_entry(EntryKind::DataSource, name))
    }

    pub fn resource_schema(&self, name: &str) -> Result<Schema, Diagnostics> {
        self.resource(name).map(|e| (e.schema_fn)())
    }

    pub fn data_source_schema(&self, name: &str) -> Result<Schema, Diagnostics> {
        self.data_source(name).map(|e| (e.schema_fn)())
    }

    /// Refresh a resource's state from the remote.
    pub async fn read(
        &self,
        ctx: &HandlerContext,
        name: &str,
        state: &StateBlob,
    ) -> Result<StateBlob, Diagnostics> {
        let entry = self.resource(name)?;
        debug!(resource = name, "read");
        (entry.read_fn)(ctx, state).await
    }

    /// Validate `desired`, then reconcile the remote towards it.
    pub async fn update(
        &self,
        ctx: &HandlerContext,
        name: &str,
        prior: &StateBlob,
        desired: &StateBlob,
    ) -> UpdateOutcome {
        let failed = |diagnostics| UpdateOutcome {
            state: prior.clone(),
            diagnostics,
        };

        let entry = match self.resource(name) {
            Ok(entry) => entry,
            Err(diags) => return failed(diags),
        };
        let Some(update_fn) = entry.update_fn else {
            return failed(unsupported(name, "update").into());
        };

        let schema = (entry.schema_fn)();
        let planned = schema.apply_plan_modifiers(prior, desired);
        let validation = schema.validate(&configurable(&schema, &planned), Some(prior));
        if validation.has_errors() {
            return failed(validation);
        }

        info!(resource = name, "update");
        update_fn(ctx, prior, &planned).await
    }

    /// Adopt an existing server by id.
    pub async fn import_state(
        &self,
        ctx: &HandlerContext,
        name: &str,
        id: &str,
    ) -> Result<StateBlob, Diagnostics> {
        let entry = self.resource(name)?;
        if id.trim().is_empty() {
            return Err(Diagnostic::error(
                "Invalid import id",
                "The import id must be a non-empty server id.",
            )
            .into());
        }
        info!(resource = name, id, "import");
        (entry.read_fn)(ctx, &StateBlob::new().with("id", id)).await
    }

    /// Resources here are adopted via import; the remote has no create.
    pub fn create(&self, name: &str) -> Diagnostics {
        match self.resource(name) {
            Ok(_) => unsupported(name, "create").into(),
            Err(diags) => diags,
        }
    }

    /// Removing a server from state leaves the server itself untouched.
    pub fn delete(&self, name: &str) -> Diagnostics {
        match self.resource(name) {
            Ok(_) => unsupported(name, "delete").into(),
            Err(diags) => diags,
        }
    }

    /// Validate `config`, then read the data source.
    pub async fn read_data_source(
        &self,
        ctx: &HandlerContext,
        name: &str,
        config: &StateBlob,
    ) -> Result<StateBlob, Diagnostics> {
        let entry = self.data_source(name)?;
        let schema = (entry.schema_fn)();
        schema.validate(config, None).into_result()?;
        debug!(data_source = name, "read");
        (entry.read_fn)(ctx, config).await
    }
}

/// Only the attributes the operator may set take part in validation.
fn configurable(schema: &Schema, blob: &StateBlob) -> StateBlob {
    let mut out = StateBlob::new();
    for attr in schema.attributes.iter().filter(|a| a.is_configurable()) {
        let value = blob.get(attr.name);
        if *value != AttrValue::Null {
            out.set(attr.name, value.clone());
        }
    }
    out
}

fn unknown_entry(kind: EntryKind, name: &str) -> Diagnostics {
    Diagnostic::error(
        format!("Unknown {kind}"),
        format!("The provider does not offer a {kind} named \"{name}\"."),
    )
    .into()
}

fn unsupported(name: &str, action: &str) -> Diagnostic {
    let err = CoreError::unsupported(
        action,
        &format!("{name} does not support {action}; the server is managed through import, read, and update only."),
    );
    Diagnostic::from(&err)
}
