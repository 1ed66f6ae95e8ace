// leaseweb_dedicated_server_operating_systems

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use leaseweb_core::catalog;

use super::catalog_list;
use crate::diagnostics::Diagnostics;
use crate::registry::{Entry, EntryKind, HandlerContext};
use crate::schema::{AttrType, Attribute, Mode, Schema};
use crate::state::StateBlob;

pub const NAME: &str = "leaseweb_dedicated_server_operating_systems";

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
    Schema::new("Installable operating systems, optionally limited to one control panel.")
        .attribute(Attribute::string("control_panel_id", Mode::Optional))
        .attribute(Attribute::new(
            "operating_systems",
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
        let panel = config.string("control_panel_id")?;
        let systems =
            catalog::operating_systems(&ctx.client, panel.known().map(String::as_str), &ctx.cancel)
                .await?;
        Ok(config.clone().with("operating_systems", catalog_list(systems)))
    }
    .boxed()
}
