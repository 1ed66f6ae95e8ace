// ── Catalog and credential views ──

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// One row of a control panel or operating system listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

/// A stored credential for a server. The password never hits `Debug`.
#[derive(Debug, Clone)]
pub struct ServerCredential {
    pub server_id: String,
    pub credential_type: String,
    pub username: String,
    pub password: SecretString,
}
