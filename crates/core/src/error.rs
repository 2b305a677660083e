use std::path::PathBuf;

use crate::modernize::ModernizeError;
use crate::types::RecordId;

/// Domain errors surfaced by the archive.
///
/// Each variant carries only the inputs that identify the failure; the
/// machine-readable code, HTTP status, message and detail are all derived
/// from them. The API layer is the single place that turns these into
/// HTTP responses.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArchiveError {
    #[error("Invalid letter ID: {letter_id}")]
    InvalidLetterId { letter_id: RecordId },

    #[error("Letter with ID {letter_id} not found")]
    LetterNotFound {
        letter_id: RecordId,
        total_letters: usize,
    },

    #[error("Place with ID {place_id} not found")]
    PlaceNotFound { place_id: RecordId },

    #[error("Failed to load data from {}", path.display())]
    DataLoad {
        path: PathBuf,
        detail: Option<String>,
    },

    #[error("Failed to modernize letter text")]
    Modernization { detail: Option<String> },

    #[error("Missing required configuration: {config_key}")]
    Configuration { config_key: String },
}

impl ArchiveError {
    /// Build a [`ArchiveError::DataLoad`] from any displayable cause.
    pub fn data_load(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Self::DataLoad {
            path: path.into(),
            detail: Some(cause.to_string()),
        }
    }

    /// Machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLetterId { .. } => "INVALID_LETTER_ID",
            Self::LetterNotFound { .. } => "LETTER_NOT_FOUND",
            Self::PlaceNotFound { .. } => "PLACE_NOT_FOUND",
            Self::DataLoad { .. } => "DATA_LOAD_ERROR",
            Self::Modernization { .. } => "MODERNIZATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidLetterId { .. } => 400,
            Self::LetterNotFound { .. } | Self::PlaceNotFound { .. } => 404,
            Self::DataLoad { .. } | Self::Configuration { .. } => 500,
            Self::Modernization { .. } => 502,
        }
    }

    /// Human-readable message (same as the `Display` output).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Optional additional detail for clients.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::InvalidLetterId { .. } => {
                Some("Letter ID must be a positive integer".to_string())
            }
            Self::LetterNotFound { total_letters, .. } => {
                Some(format!("Valid letter IDs are 1-{total_letters}"))
            }
            Self::DataLoad { detail, .. } | Self::Modernization { detail } => detail.clone(),
            Self::PlaceNotFound { .. } | Self::Configuration { .. } => None,
        }
    }
}

impl From<ModernizeError> for ArchiveError {
    fn from(err: ModernizeError) -> Self {
        match err {
            ModernizeError::MissingCredential(config_key) => Self::Configuration { config_key },
            ModernizeError::Failed(text) => Self::Modernization {
                detail: (!text.is_empty()).then_some(text),
            },
        }
    }
}
