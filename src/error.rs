//! Error types for envconf
//!
//! Every error aborts the whole load. A target that failed to load may be
//! partially populated and must not be used.

use crate::schema::ValueKind;
use thiserror::Error;

/// Fatal configuration error raised while loading from the environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Two leaf fields resolved to the same environment variable
    #[error("duplicated key {key}")]
    DuplicateKey { key: String },

    #[error("field type {type_name} of {key} is not supported")]
    UnsupportedType {
        key: String,
        type_name: &'static str,
    },

    /// `inline` was applied to a field that is not a nested struct
    #[error("option ,inline on field `{field}` under {key} needs a struct value field")]
    InlineOnLeaf { key: String, field: &'static str },

    #[error("{key} cannot be parsed into {kind}: {reason}")]
    Parse {
        key: String,
        kind: ValueKind,
        reason: String,
    },

    #[error("{key} is set but is not valid unicode")]
    NotUnicode { key: String },
}

impl LoadError {
    pub(crate) fn parse(key: &str, kind: ValueKind, reason: impl ToString) -> Self {
        Self::Parse {
            key: key.to_string(),
            kind,
            reason: reason.to_string(),
        }
    }

    /// The canonical key the error is about
    pub fn key(&self) -> &str {
        match self {
            LoadError::DuplicateKey { key }
            | LoadError::UnsupportedType { key, .. }
            | LoadError::InlineOnLeaf { key, .. }
            | LoadError::Parse { key, .. }
            | LoadError::NotUnicode { key } => key,
        }
    }
}

/// Result type alias for load operations
pub type Result<T> = std::result::Result<T, LoadError>;
