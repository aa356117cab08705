use crate::api::CatalogApi;
use crate::config::{BackendKind, CatalogConfig};
use crate::error::{CatalogError, Result};
use crate::session::AdminSession;
use crate::store::backend::CatalogBackend;
use crate::store::catalog::CatalogStore;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::remote_backend::RemoteBackend;
use std::fs;

pub type DynBackend = Box<dyn CatalogBackend>;

/// Everything one run of the application needs, built once at start.
pub struct AppContext {
    pub config: CatalogConfig,
    pub api: CatalogApi<DynBackend>,
    pub session: AdminSession,
}

/// Builds the backend selected by `config`.
pub fn build_backend(config: &CatalogConfig) -> Result<DynBackend> {
    let backend: DynBackend = match config.backend_kind() {
        BackendKind::Seed => match &config.seed_file {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    CatalogError::Config(format!("cannot read seed file {}: {}", path.display(), e))
                })?;
                Box::new(MemBackend::from_seed_text(&text, config.max_products)?)
            }
            None => Box::new(MemBackend::builtin(config.max_products)?),
        },
        BackendKind::File => Box::new(FsBackend::new(config.data_file())),
        BackendKind::Remote => {
            let url = config.remote_url.as_deref().ok_or_else(|| {
                CatalogError::Config(
                    "remote backend selected but remote_url is not set".to_string(),
                )
            })?;
            Box::new(RemoteBackend::new(url)?)
        }
    };
    Ok(backend)
}

impl AppContext {
    pub fn initialize(config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        let backend = build_backend(&config)?;
        Self::with_backend(config, backend)
    }

    /// Like `initialize`, with the backend supplied by the caller.
    pub fn with_backend(config: CatalogConfig, backend: DynBackend) -> Result<Self> {
        let store = CatalogStore::open(backend, config.max_products)?;
        tracing::debug!(
            backend = store.backend_name(),
            count = store.len(),
            max = store.max_products(),
            "catalog opened"
        );

        let mut api = CatalogApi::new(store, config.export_style());
        api.subscribe(|change| tracing::info!(%change, "catalog changed"));

        let session = AdminSession::new(config.admin_passcode.clone());
        Ok(Self {
            config,
            api,
            session,
        })
    }

    /// Attempts an admin login with `passcode`.
    pub fn login(&mut self, passcode: &str) -> bool {
        if !self.session.is_configured() {
            tracing::warn!("a passcode was given but no admin passcode is configured");
        }
        self.session.login(passcode)
    }

    /// The API for admin operations, once the session is authenticated.
    pub fn admin_api(&mut self) -> Result<&mut CatalogApi<DynBackend>> {
        self.session.require_admin()?;
        Ok(&mut self.api)
    }

    /// Ends the run: closes any admin session and logs the final size.
    pub fn shutdown(&mut self) {
        if self.session.is_admin() {
            self.session.logout();
            tracing::debug!("admin session closed");
        }
        tracing::debug!(
            count = self.api.store().len(),
            backend = self.api.store().backend_name(),
            "shutting down"
        );
    }
}
