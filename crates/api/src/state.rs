use std::sync::Arc;

use jernkorset_core::archive::Archive;
use jernkorset_core::modernize::Modernizer;
use jernkorset_modernizer::anthropic::AnthropicModernizer;
use jernkorset_modernizer::ollama::OllamaModernizer;

use crate::config::{ModernizerBackend, ModernizerSettings, Settings};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// The letter archive, loaded once at startup.
    pub archive: Arc<Archive>,
    /// Text modernization backend.
    pub modernizer: Arc<dyn Modernizer>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(archive: Archive, modernizer: Arc<dyn Modernizer>, settings: Settings) -> Self {
        Self {
            archive: Arc::new(archive),
            modernizer,
            settings: Arc::new(settings),
        }
    }
}

/// Build the configured modernization backend.
pub fn build_modernizer(settings: &ModernizerSettings) -> Arc<dyn Modernizer> {
    match settings.backend {
        ModernizerBackend::Ollama => Arc::new(OllamaModernizer::new(
            settings.ollama_url.clone(),
            settings.ollama_model.clone(),
        )),
        ModernizerBackend::Anthropic => Arc::new(AnthropicModernizer::new(
            settings.anthropic_api_key.clone(),
            settings.anthropic_model.clone(),
        )),
    }
}
