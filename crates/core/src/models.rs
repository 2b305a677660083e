//! Records served by the archive and the response envelopes built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{RecordId, Timestamp};

/// A named location letters can be associated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: RecordId,
    pub name: String,
    /// WKT point, e.g. `POINT(12.5683 55.6761)`.
    pub geometry: Option<String>,
}

/// One archived letter, including its full text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    /// 1-indexed position in the archive.
    pub id: RecordId,
    pub date: Timestamp,
    /// Display name of the resolved place, `None` when unknown.
    pub place: Option<String>,
    pub sender: String,
    pub recipient: String,
    pub text: String,
}

/// A letter without its text, for list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterSummary {
    pub id: RecordId,
    pub date: Timestamp,
    pub place: Option<String>,
    pub sender: String,
    pub recipient: String,
}

impl From<&Letter> for LetterSummary {
    fn from(letter: &Letter) -> Self {
        Self {
            id: letter.id,
            date: letter.date,
            place: letter.place.clone(),
            sender: letter.sender.clone(),
            recipient: letter.recipient.clone(),
        }
    }
}

/// Result of modernizing one letter's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofreadResponse {
    pub text: String,
    pub tokens_per_second: f64,
    pub original_letter_id: RecordId,
}

/// Every place, keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub items: BTreeMap<RecordId, Place>,
    pub total: usize,
}

/// Liveness payload with store sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub letter_count: usize,
    pub place_count: usize,
}

/// Uniform failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
    pub detail: Option<String>,
    pub request_id: Option<String>,
}
