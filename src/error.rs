//! Error types for Librarium

use thiserror::Error;

/// Coarse error classification, used by callers that only need to know how
/// to react (retry vs reject vs report a bug).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A lookup missed; recoverable by the caller.
    NotFound,
    /// An id or barcode collision; the caller must pick another value.
    Conflict,
    /// A borrowing rule rejected the operation; user-facing, not retried.
    PolicyViolation,
    /// An entity invariant is broken; indicates a caller or storage bug.
    Validation,
    /// The persistence layer failed; never silently swallowed.
    Storage,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("duplicate barcode: {0}")]
    DuplicateBarcode(String),

    #[error("copy is not available")]
    CopyNotAvailable,

    #[error("member is not eligible to borrow")]
    MemberNotEligible,

    #[error("member has reached the active loan limit")]
    LoanLimitReached,

    #[error("loan is already returned")]
    LoanAlreadyClosed,

    #[error("overdue loan cannot be renewed")]
    LoanAlreadyOverdue,

    #[error("renewal limit reached")]
    RenewalLimit,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid loan policy: {0}")]
    Policy(String),

    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding failure: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("storage data is corrupt: {0}")]
    CorruptData(String),

    #[error("unsupported storage schema version {found}, expected {expected}")]
    UnsupportedSchema { found: u32, expected: u32 },
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::DuplicateId(_) | AppError::DuplicateBarcode(_) => ErrorKind::Conflict,
            AppError::CopyNotAvailable
            | AppError::MemberNotEligible
            | AppError::LoanLimitReached
            | AppError::LoanAlreadyClosed
            | AppError::LoanAlreadyOverdue
            | AppError::RenewalLimit => ErrorKind::PolicyViolation,
            AppError::Validation(_) | AppError::Policy(_) => ErrorKind::Validation,
            AppError::Io(_)
            | AppError::Encoding(_)
            | AppError::CorruptData(_)
            | AppError::UnsupportedSchema { .. } => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
