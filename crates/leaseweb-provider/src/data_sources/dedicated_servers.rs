// leaseweb_dedicated_servers: ids of every server matching the filters.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde_json::Value;

use leaseweb_api::types::ServerListOptions;
use leaseweb_core::catalog;

use crate::diagnostics::Diagnostics;
use crate::registry::{Entry, EntryKind, HandlerContext};
use crate::schema::{AttrType, Attribute, Mode, Schema};
use crate::state::{StateBlob, StateError};

pub const NAME: &str = "leaseweb_dedicated_servers";

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
    Schema::new("List dedicated server ids, optionally filtered.")
        .attribute(Attribute::string("reference", Mode::Optional))
        .attribute(Attribute::string("ip", Mode::Optional))
        .attribute(Attribute::string("mac_address", Mode::Optional))
        .attribute(Attribute::string("site", Mode::Optional))
        .attribute(Attribute::string("private_rack_id", Mode::Optional))
        .attribute(Attribute::bool("private_network_capable", Mode::Optional))
        .attribute(Attribute::bool("private_network_enabled", Mode::Optional))
        .attribute(Attribute::new(
            "ids",
            AttrType::List(Box::new(AttrType::String)),
            Mode::Computed,
        ))
}

fn list_options(config: &StateBlob) -> Result<ServerListOptions, StateError> {
    let text = |name| -> Result<Option<String>, StateError> {
        Ok(config.string(name)?.known().cloned())
    };
    let flag = |name| -> Result<Option<bool>, StateError> {
        Ok(config.bool(name)?.known().copied())
    };

    Ok(ServerListOptions {
        reference: text("reference")?,
        ip: text("ip")?,
        mac_address: text("mac_address")?,
        site: text("site")?,
        private_rack_id: text("private_rack_id")?,
        private_network_capable: flag("private_network_capable")?,
        private_network_enabled: flag("private_network_enabled")?,
    })
}

fn read<'a>(
    ctx: &'a HandlerContext,
    config: &'a StateBlob,
) -> BoxFuture<'a, Result<StateBlob, Diagnostics>> {
    async move {
        let options = list_options(config)?;
        let ids = catalog::server_ids(&ctx.client, &options, &ctx.cancel).await?;
        let ids = Value::Array(ids.into_iter().map(Value::String).collect());
        Ok(config.clone().with("ids", ids))
    }
    .boxed()
}
