pub mod courses;
pub mod library;
pub mod output;
pub mod resolve;

use std::sync::Arc;

use anyhow::{bail, Result};

use ava::{AvaConfig, RestBackend};

/// Connect to the configured backend, or explain how to configure one.
pub fn connect(config: &AvaConfig) -> Result<Arc<RestBackend>> {
    if !config.backend.is_configured() {
        bail!(
            "No backend configured. Set AVA_BACKEND_URL and AVA_API_KEY, or edit {}",
            ava::config::config_path().display()
        );
    }
    Ok(Arc::new(RestBackend::new(&config.backend)?))
}
