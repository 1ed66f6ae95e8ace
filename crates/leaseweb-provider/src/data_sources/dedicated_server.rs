// leaseweb_dedicated_server (data source): one server by id.

use crate::registry::{Entry, EntryKind};
use crate::resources::dedicated_server::{read, server_attributes};
use crate::schema::{Attribute, Mode, Schema};

pub const NAME: &str = "leaseweb_dedicated_server";

pub fn entry() -> Entry {
    Entry {
        name: NAME,
        kind: EntryKind::DataSource,
        schema_fn: schema,
        read_fn: read,
        update_fn: None,
    }
}

fn schema() -> Schema {
    let id = Attribute::string("id", Mode::Required).describe("Server id.");
    server_attributes(id, Mode::Computed)
        .into_iter()
        .fold(Schema::new("Look up one dedicated server."), Schema::attribute)
}
