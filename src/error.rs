//! Errors raised while decoding a TEMP DROP bulletin.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// A mandatory part of the bulletin could not be located. The whole
    /// bulletin is rejected.
    #[error("malformed bulletin: missing {marker}")]
    MalformedBulletin { marker: String },

    /// A single coded group did not match its expected format. Recovered
    /// locally as a missing value.
    #[error("undecodable {field} group `{token}`")]
    UndecodableField { field: &'static str, token: String },

    /// The release/splash block did not resolve to one or two events.
    #[error("ambiguous position block: {tokens} tokens after all tokenisation attempts")]
    AmbiguousPositionBlock { tokens: usize },

    /// An optional sub-section marker is absent; its fields are missing.
    #[error("section {marker} not found")]
    MissingSection { marker: &'static str },
}

impl DecodeError {
    pub fn malformed(marker: impl Into<String>) -> Self {
        DecodeError::MalformedBulletin {
            marker: marker.into(),
        }
    }

    pub fn undecodable(field: &'static str, token: &str) -> Self {
        DecodeError::UndecodableField {
            field,
            token: token.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
