// Read-only data sources.

pub mod control_panels;
pub mod credential;
pub mod dedicated_server;
pub mod dedicated_servers;
pub mod operating_systems;

use leaseweb_core::CatalogEntry;
use serde_json::{Value, json};

/// `[{id, name}, ...]` as stored in state.
pub(crate) fn catalog_list(entries: Vec<CatalogEntry>) -> Value {
    Value::Array(
        entries
            .into_iter()
            .map(|e| json!({ "id": e.id, "name": e.name }))
            .collect(),
    )
}
