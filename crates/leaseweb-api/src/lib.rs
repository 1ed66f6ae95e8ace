// leaseweb-api: Async Rust client for the Leaseweb dedicated server API
//
// Typed operations over `bareMetals/v2`, three-state wire fields, and the
// HTTP response envelope on failure. No retries and no client-side rate
// limiting: one call, one request.

pub mod dedicated;
pub mod error;
pub mod nullable;
pub mod transport;

pub use dedicated::types;
pub use dedicated::{AUTH_HEADER, ClientConfig, DEFAULT_PAGE_LIMIT, LeasewebClient};
pub use error::{Error, HttpResponse};
pub use nullable::Nullable;
pub use transport::TransportConfig;
