// ── Provider facade ──
//
// What the host runtime talks to. Holds the registry and, once the
// provider block has been configured, the shared API client. Every handler
// builds a fresh `HandlerContext` from the client that is current at the
// time of the call.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, info};

use leaseweb_api::LeasewebClient;
use leaseweb_config::ProviderBlock;
use leaseweb_core::{CancellationToken, CoreError, EngineOptions};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::registry::{HandlerContext, Metadata, Registry, UpdateOutcome};
use crate::schema::Schema;
use crate::state::StateBlob;

#[derive(Debug)]
pub struct LeasewebProvider {
    registry: Registry,
    client: ArcSwapOption<LeasewebClient>,
    options: EngineOptions,
    cancel: CancellationToken,
}

impl Default for LeasewebProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LeasewebProvider {
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            client: ArcSwapOption::empty(),
            options: EngineOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_configured(&self) -> bool {
        self.client.load().is_some()
    }

    /// Token observed by every remote call made through this provider.
    /// Cancelling it stops in-flight reconciliations at their next
    /// checkpoint.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    // ── Configure ────────────────────────────────────────────────────

    /// Resolve the provider block against the environment and install a
    /// client. A failed configure leaves any previous client in place.
    pub fn configure(&self, block: &ProviderBlock) -> Diagnostics {
        let config = match leaseweb_config::resolve_client_config(block) {
            Ok(config) => config,
            Err(e) => return e.into(),
        };
        match LeasewebClient::new(&config) {
            Ok(client) => {
                info!(base_url = %client.base_url(), "provider configured");
                self.client.store(Some(Arc::new(client)));
                Diagnostics::new()
            }
            Err(e) => CoreError::from(e).into(),
        }
    }

    /// Install an already-built client, bypassing block resolution.
    pub fn configure_client(&self, client: LeasewebClient) {
        self.client.store(Some(Arc::new(client)));
    }

    fn context(&self) -> Result<HandlerContext, Diagnostics> {
        let Some(client) = self.client.load_full() else {
            return Err(Diagnostic::error(
                "Provider not configured",
                "The Leaseweb provider must be configured before resources or data sources are used.",
            )
            .into());
        };
        let mut ctx = HandlerContext::new(client);
        ctx.options = self.options;
        ctx.cancel = self.cancel.child_token();
        Ok(ctx)
    }

    // ── Handlers ─────────────────────────────────────────────────────

    pub fn metadata(&self) -> Metadata {
        self.registry.metadata()
    }

    pub fn resource_schema(&self, name: &str) -> Result<Schema, Diagnostics> {
        self.registry.resource_schema(name)
    }

    pub fn data_source_schema(&self, name: &str) -> Result<Schema, Diagnostics> {
        self.registry.data_source_schema(name)
    }

    pub async fn read(&self, name: &str, state: &StateBlob) -> Result<StateBlob, Diagnostics> {
        let ctx = self.context()?;
        self.registry.read(&ctx, name, state).await
    }

    pub async fn update(&self, name: &str, prior: &StateBlob, desired: &StateBlob) -> UpdateOutcome {
        match self.context() {
            Ok(ctx) => self.registry.update(&ctx, name, prior, desired).await,
            Err(diagnostics) => UpdateOutcome {
                state: prior.clone(),
                diagnostics,
            },
        }
    }

    pub async fn import_state(&self, name: &str, id: &str) -> Result<StateBlob, Diagnostics> {
        let ctx = self.context()?;
        self.registry.import_state(&ctx, name, id).await
    }

    pub fn create(&self, name: &str) -> Diagnostics {
        self.registry.create(name)
    }

    pub fn delete(&self, name: &str) -> Diagnostics {
        debug!(resource = name, "delete requested");
        self.registry.delete(name)
    }

    pub async fn read_data_source(
        &self,
        name: &str,
        config: &StateBlob,
    ) -> Result<StateBlob, Diagnostics> {
        let ctx = self.context()?;
        self.registry.read_data_source(&ctx, name, config).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use leaseweb_config::BlockValue;

    use super::*;

    #[tokio::test]
    async fn handlers_before_configure_report_configuration() {
        let provider = LeasewebProvider::new();
        assert!(!provider.is_configured());

        let diags = provider
            .read("leaseweb_dedicated_server", &StateBlob::new().with("id", "42"))
            .await
            .unwrap_err();
        assert_eq!(
            diags.iter().next().map(|d| d.summary.as_str()),
            Some("Provider not configured")
        );
    }

    #[test]
    fn unknown_block_value_fails_configure() {
        let provider = LeasewebProvider::new();
        let block = ProviderBlock {
            token: BlockValue::Unknown,
            ..ProviderBlock::default()
        };
        let diags = provider.configure(&block);
        assert!(diags.has_errors());
        assert!(!provider.is_configured());
    }
}
