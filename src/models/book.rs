//! Book model and related types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::enums::BookStatus;

static ISBN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{10}|\d{13})$").expect("isbn pattern"));

/// Bibliographic record. Physical inventory lives in [`super::copy::BookCopy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
    pub status: BookStatus,
}

impl Book {
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("book id is required".into()));
        }

        if self.title.trim().is_empty() {
            return Err(AppError::Validation("book title is required".into()));
        }

        if self.authors.is_empty() {
            return Err(AppError::Validation("at least one author is required".into()));
        }

        if let Some(isbn) = &self.isbn {
            if !ISBN_PATTERN.is_match(isbn.trim()) {
                return Err(AppError::Validation("isbn must be 10 or 13 digits".into()));
            }
        }

        Ok(())
    }

    pub fn can_circulate(&self) -> bool {
        self.status == BookStatus::Active
    }
}

/// Create book request
#[derive(Debug, Clone, Default)]
pub struct CreateBook {
    pub id: Option<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
}

/// Update book request; status changes go through `set_status`
#[derive(Debug, Clone)]
pub struct UpdateBook {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_book() -> Book {
        Book {
            id: "b-1".into(),
            title: "Refactoring".into(),
            authors: vec!["M. Fowler".into()],
            isbn: Some("9780201485677".into()),
            category: None,
            publisher: None,
            year: Some(1999),
            status: BookStatus::Active,
        }
    }

    #[test]
    fn valid_book_passes() {
        valid_book().validate().unwrap();
    }

    #[test]
    fn title_is_required() {
        let mut b = valid_book();
        b.title = "   ".into();
        assert!(b.validate().is_err());
    }

    #[test]
    fn at_least_one_author_is_required() {
        let mut b = valid_book();
        b.authors.clear();
        assert!(b.validate().is_err());
    }

    #[test]
    fn isbn_must_be_ten_or_thirteen_digits() {
        let mut b = valid_book();
        b.isbn = Some("0201485672".into());
        b.validate().unwrap();

        b.isbn = Some("12345".into());
        assert!(b.validate().is_err());

        b.isbn = Some("97802014856XX".into());
        assert!(b.validate().is_err());

        // absent isbn is fine
        b.isbn = None;
        b.validate().unwrap();
    }

    #[test]
    fn archived_books_do_not_circulate() {
        let mut b = valid_book();
        assert!(b.can_circulate());
        b.status = BookStatus::Archived;
        assert!(!b.can_circulate());
    }
}
