//! Request handlers.
//!
//! Everything except [`proofread`] is a pure read over the loaded archive.
//! Handlers return [`crate::error::AppResult`]; the request-context
//! middleware finishes any error they produce.

pub mod fallback;
pub mod health;
pub mod letters;
pub mod places;
pub mod proofread;
