//! Process-wide handle to the loaded inference engine.
//!
//! Models are loaded once at startup and shared read-only afterwards.

use crate::config::AppConfig;
use crate::models::inference::InferenceEngine;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing::info;

static ENGINE: OnceCell<InferenceEngine> = OnceCell::new();

/// Load the models from `config` on first call; later calls return the
/// engine that is already loaded and ignore `config`.
pub fn init(config: &AppConfig) -> Result<&'static InferenceEngine> {
    install_with(|| InferenceEngine::new(config))
}

/// Install an engine built by `build` unless one is already installed.
pub fn install_with<F>(build: F) -> Result<&'static InferenceEngine>
where
    F: FnOnce() -> Result<InferenceEngine>,
{
    ENGINE.get_or_try_init(|| {
        let engine = build()?;
        info!(models = ?engine.model_names(), "Inference engine registered");
        Ok(engine)
    })
}
