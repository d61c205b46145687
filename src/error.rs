//! Error types for pattern parsing, card generation and export.
//!
//! Every error is scoped to a single pattern or a single batch element;
//! nothing here is fatal to the process.

use std::fmt;

/// Errors that can occur while parsing a pattern or generating a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The pattern was empty or contained only whitespace.
    EmptyPattern,

    /// A character outside the accepted set was found in the pattern.
    ///
    /// Accepted characters are digits, the wildcards `* X x ? # _`,
    /// the separators `| / : -` and whitespace.
    InvalidCharacter {
        /// The position in the raw pattern (0-indexed, in characters).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// The pattern contained separators but no BIN segment.
    MissingBin,

    /// A single record in a batch could not be produced.
    Failed {
        /// Index of the record within the batch.
        index: usize,
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "pattern is empty"),

            Self::InvalidCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} (only digits, wildcards * X x ? # _ and separators | / : - allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::MissingBin => write!(f, "pattern has no BIN segment"),

            Self::Failed { index, reason } => {
                write!(f, "failed to generate record {}: {}", index, reason)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Errors that can occur while rendering records for export.
#[derive(Debug)]
pub enum ExportError {
    /// The export format name was not recognized.
    UnknownFormat(String),

    /// JSON serialization failed.
    Json(serde_json::Error),

    /// CSV serialization failed.
    Csv(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFormat(name) => {
                write!(
                    f,
                    "unknown export format '{}' (expected pipe, json, csv or formatted)",
                    name
                )
            }
            Self::Json(e) => write!(f, "JSON export failed: {}", e),
            Self::Csv(e) => write!(f, "CSV export failed: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}
