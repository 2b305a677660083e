//! The text-modernization capability.
//!
//! The archive never talks to a language model directly. Handlers receive an
//! implementation of [`Modernizer`] through application state, so tests can
//! substitute a canned one and deployments can pick a backend.

use async_trait::async_trait;

/// Modernized text together with the backend's generation throughput.
#[derive(Debug, Clone, PartialEq)]
pub struct Modernized {
    pub text: String,
    /// Always finite and non-negative.
    pub tokens_per_second: f64,
}

/// Failures reported by a [`Modernizer`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModernizeError {
    /// A credential the backend needs is not configured. Carries the
    /// configuration key name.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// Anything else: transport, upstream status, malformed reply.
    #[error("{0}")]
    Failed(String),
}

/// Rewrites archaic spelling into contemporary form.
#[async_trait]
pub trait Modernizer: Send + Sync {
    async fn modernize(&self, text: &str) -> Result<Modernized, ModernizeError>;
}

/// Tokens per second from a token count and an elapsed duration in seconds.
///
/// Returns `0.0` for zero, negative or non-finite durations.
pub fn throughput(tokens: u64, seconds: f64) -> f64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0.0;
    }
    let rate = tokens as f64 / seconds;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}
