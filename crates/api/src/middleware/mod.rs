//! Per-request pipeline pieces.
//!
//! - [`request_id::MakeShortRequestId`] -- Generates the correlation id.
//! - [`request_context::request_context`] -- Logs the request and finishes error responses.

pub mod request_context;
pub mod request_id;
