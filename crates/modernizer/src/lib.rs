//! Language-model backends for letter modernization.
//!
//! Both clients implement [`jernkorset_core::modernize::Modernizer`] and send
//! the same proofreading instructions; they differ only in wire format and
//! in how throughput is measured.

pub mod anthropic;
pub mod ollama;

/// System instructions: proofread Danish First World War letters into
/// present-day Danish and return only the corrected plain text.
pub const SYSTEM_PROMPT: &str = "Du hjælper med at korrekturlæse danske breve fra første \
verdenskrig. Du fokuserer på at rette gamle stavemåder til nutidsdansk men opdager også, hvis der \
er ord, der er sammensat forkert, eller noget, der kan være indtastningsfejl. Du returnerer kun \
den rettede tekst i plain text format, uden kommentarer eller andet.";

/// User message wrapping the letter text.
pub fn user_prompt(text: &str) -> String {
    format!("Ret denne tekst til nutidsdansk:\n---\n{text}")
}

/// Errors shared by the HTTP backends before they are folded into
/// [`jernkorset_core::modernize::ModernizeError`].
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("upstream error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The reply parsed but held no usable text.
    #[error("empty response from model")]
    EmptyResponse,
}

impl From<BackendError> for jernkorset_core::modernize::ModernizeError {
    fn from(err: BackendError) -> Self {
        Self::Failed(err.to_string())
    }
}

/// Return the response unchanged on success, or a [`BackendError::Status`]
/// with the body text on failure.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
