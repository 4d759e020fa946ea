//! Caller-visible error taxonomy.
//!
//! Every engine operation returns one of these kinds or succeeds. None
//! of them is retried internally: each represents a genuine state
//! conflict or a caller logic error, not a transient fault. Transient
//! store failures surface as `Storage` and belong to the collaborator.
//!
//! The calling layer maps kinds to transport signaling (not-found →
//! 404-equivalent, forbidden → 403, conflict → 409, validation → 422).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced plant, location, species, share or user is absent.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Caller lacks the role required for the attempted capability, or
    /// touched a share they do not own.
    #[error("forbidden: {reason}")]
    Forbidden { reason: String },

    /// Duplicate share for the same (owner, grantee, entity) triple, or
    /// a self-share attempt.
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Malformed input, e.g. a plant share without a plant id.
    #[error("invalid request: {reason}")]
    Validation { reason: String },

    /// Fault in the underlying store. Not part of the taxonomy proper;
    /// passed through for the transport layer to treat as a 5xx.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        CoreError::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        CoreError::Conflict {
            reason: reason.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        CoreError::Validation {
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, CoreError::Forbidden { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::Conflict { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
