use thiserror::Error;

use shopadmin_core::{DomainError, EntityKind};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} not found")]
    NotFound { kind: EntityKind },

    /// Slug uniqueness is enforced at insert time, standing in for the
    /// database constraint a real deployment would rely on.
    #[error("duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn not_found(kind: EntityKind) -> Self {
        Self::NotFound { kind }
    }
}
