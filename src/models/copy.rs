//! Physical copy model and related types

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::enums::CopyStatus;

/// One lendable physical instance of a book.
///
/// Named `BookCopy` rather than `Copy` so it does not collide with
/// `std::marker::Copy` in importing modules. Barcode uniqueness is enforced
/// by the copies service, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCopy {
    pub id: String,
    pub book_id: String,
    pub barcode: Option<String>,
    pub status: CopyStatus,
    pub condition_note: Option<String>,
}

impl BookCopy {
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("copy id is required".into()));
        }

        if self.book_id.trim().is_empty() {
            return Err(AppError::Validation("book id is required".into()));
        }

        Ok(())
    }

    pub fn is_available(&self) -> bool {
        self.status == CopyStatus::Available
    }

    /// Barcode with surrounding whitespace stripped; None when blank.
    pub fn normalized_barcode(&self) -> Option<&str> {
        self.barcode.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }
}

/// Create copy request
#[derive(Debug, Clone, Default)]
pub struct CreateCopy {
    pub id: Option<String>,
    pub book_id: String,
    pub barcode: Option<String>,
    pub condition_note: Option<String>,
}

/// Update copy request
#[derive(Debug, Clone)]
pub struct UpdateCopy {
    pub id: String,
    pub barcode: Option<String>,
    pub status: CopyStatus,
    pub condition_note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_copy() -> BookCopy {
        BookCopy {
            id: "c-1".into(),
            book_id: "b-1".into(),
            barcode: Some("CP-100".into()),
            status: CopyStatus::Available,
            condition_note: None,
        }
    }

    #[test]
    fn valid_copy_passes() {
        valid_copy().validate().unwrap();
    }

    #[test]
    fn book_id_is_required() {
        let mut c = valid_copy();
        c.book_id = "".into();
        assert!(c.validate().is_err());
    }

    #[test]
    fn availability_follows_status() {
        let mut c = valid_copy();
        assert!(c.is_available());
        c.status = CopyStatus::Damaged;
        assert!(!c.is_available());
    }

    #[test]
    fn blank_barcode_normalizes_to_none() {
        let mut c = valid_copy();
        c.barcode = Some("  ".into());
        assert_eq!(c.normalized_barcode(), None);
        c.barcode = Some(" CP-7 ".into());
        assert_eq!(c.normalized_barcode(), Some("CP-7"));
    }
}
