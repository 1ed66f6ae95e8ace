// leaseweb_dedicated_server_control_panels

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use leaseweb_core::catalog;

use super::catalog_list;
use crate::diagnostics::Diagnostics;
use crate::registry::{Entry, EntryKind, HandlerContext};
use crate::schema::{AttrType, Attribute, Mode, Schema};
use crate::state::StateBlob;

pub const NAME: &str = "leaseweb_dedicated_server_control_panels";

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
    Schema::new("Control panels, optionally limited to one operating system.")
        .attribute(Attribute::string("operating_system_id", Mode::Optional))
        .attribute(Attribute::new(
            "control_panels",
            AttrType::List(Box::new(AttrType::Object(vec![
                ("id", AttrType::String),
                ("name", AttrType::String),
            ]))),
            Mode::Computed,
        ))
}

fn read<'a>(
    ctx: &'a HandlerContext,
    config: &'a StateBlob,
) -> BoxFuture<'a, Result<StateBlob, Diagnostics>> {
    async move {
        let os = config.string("operating_system_id")?;
        let panels =
            catalog::control_panels(&ctx.client, os.known().map(String::as_str), &ctx.cancel)
                .await?;
        Ok(config.clone().with("control_panels", catalog_list(panels)))
    }
    .boxed()
}
