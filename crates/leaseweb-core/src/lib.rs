//! Domain layer between `leaseweb-api` and the provider surface.
//!
//! - **[`Aggregator`]** turns one logical server read into the sequence of
//!   remote calls it needs and yields a flat [`ServerRecord`].
//! - **[`Reconciler`]** plans and applies the six ordered sub-operations that
//!   move a server from its observed record to a [`DesiredServer`].
//! - **[`funnel`]** decides the operator-facing message of every failed
//!   remote call; [`CoreError`] carries it upward.
//! - **[`catalog`]** backs the read-only data sources.

pub mod aggregator;
pub mod catalog;
pub mod convert;
pub mod error;
pub mod funnel;
pub mod model;
pub mod reconcile;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregator::Aggregator;
pub use error::CoreError;
pub use funnel::ErrorClass;
pub use model::{CatalogEntry, DesiredServer, Field, Location, ServerCredential, ServerRecord};
pub use reconcile::{EngineOptions, InterfaceGate, Reconciler, Reconciliation, SubOperation};

pub use tokio_util::sync::CancellationToken;
