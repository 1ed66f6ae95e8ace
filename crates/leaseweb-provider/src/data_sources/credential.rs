// leaseweb_dedicated_server_credential: one stored credential, password
// included. The password is marked sensitive in the schema.

use std::str::FromStr;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use secrecy::ExposeSecret;

use leaseweb_api::types::CredentialType;
use leaseweb_core::catalog;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::registry::{Entry, EntryKind, HandlerContext};
use crate::schema::{Attribute, Mode, Schema, Validator};
use crate::state::StateBlob;
use crate::validate;

pub const NAME: &str = "leaseweb_dedicated_server_credential";

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
    Schema::new("A credential stored for a dedicated server.")
        .attribute(Attribute::string("dedicated_server_id", Mode::Required))
        .attribute(
            Attribute::string("type", Mode::Required)
                .validator(Validator::OneOf(validate::credential_types())),
        )
        .attribute(Attribute::string("username", Mode::Required))
        .attribute(Attribute::string("password", Mode::Computed).sensitive())
}

fn required(config: &StateBlob, name: &str) -> Result<String, Diagnostics> {
    config.string(name)?.known().cloned().ok_or_else(|| {
        Diagnostic::error(
            "Missing required argument",
            format!("The argument \"{name}\" must be known before reading."),
        )
        .with_attribute(name)
        .into()
    })
}

fn read<'a>(
    ctx: &'a HandlerContext,
    config: &'a StateBlob,
) -> BoxFuture<'a, Result<StateBlob, Diagnostics>> {
    async move {
        let server_id = required(config, "dedicated_server_id")?;
        let username = required(config, "username")?;
        let raw_type = required(config, "type")?;
        let credential_type = CredentialType::from_str(&raw_type).map_err(|_| {
            let detail = format!(
                "{raw_type:?} is not one of {:?}",
                validate::credential_types()
            );
            Diagnostics::from(
                Diagnostic::error("Invalid attribute value", detail).with_attribute("type"),
            )
        })?;

        let credential = catalog::credential(
            &ctx.client,
            &server_id,
            credential_type,
            &username,
            &ctx.cancel,
        )
        .await?;
        Ok(config
            .clone()
            .with("password", credential.password.expose_secret()))
    }
    .boxed()
}
