// leaseweb-provider: Leaseweb dedicated server provider
//
// Schemas, validators, the three-state attribute codec, and the registry
// that maps host-runtime handlers onto the reconciliation engine.

pub mod data_sources;
pub mod diagnostics;
pub mod logging;
pub mod provider;
pub mod registry;
pub mod resources;
pub mod schema;
pub mod state;
pub mod validate;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use provider::LeasewebProvider;
pub use registry::{
    Entry, EntryKind, HandlerContext, Metadata, PROVIDER_TYPE_NAME, Registry, UpdateOutcome,
};
pub use schema::{AttrType, Attribute, Mode, PlanModifier, Schema, Validator};
pub use state::{AttrValue, StateBlob, StateError, UNKNOWN_VALUE};
