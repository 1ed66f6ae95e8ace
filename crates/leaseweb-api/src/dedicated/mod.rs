// Dedicated server (bareMetals/v2) API surface.

pub mod catalog;
pub mod client;
pub mod leases;
pub mod network;
pub mod servers;
pub mod types;

pub use client::{AUTH_HEADER, ClientConfig, DEFAULT_PAGE_LIMIT, LeasewebClient};
