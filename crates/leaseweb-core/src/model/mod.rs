// Domain model: observed record, desired intent, catalog views.

mod catalog;
mod desired;
mod field;
mod server;

pub use catalog::{CatalogEntry, ServerCredential};
pub use desired::DesiredServer;
pub use field::Field;
pub use server::{Location, ServerRecord};
