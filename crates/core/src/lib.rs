//! Domain layer for the Jernkorset letter archive.
//!
//! Typed records for letters and places, the closed error taxonomy shared by
//! every consumer, the CSV loader that builds the immutable [`archive::Archive`]
//! at startup, and the modernization capability seam.

pub mod archive;
pub mod error;
pub mod loader;
pub mod models;
pub mod modernize;
pub mod types;
