//! Shared domain status enums
//!
//! Statuses are closed sets. Free-text input from an interactive surface is
//! parsed through `FromStr` and rejected with a Validation error before it
//! can enter the core.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ---------------------------------------------------------------------------
// BookStatus
// ---------------------------------------------------------------------------

/// Book catalog status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Active,
    Archived,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Active => "active",
            BookStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(BookStatus::Active),
            "archived" => Ok(BookStatus::Archived),
            other => Err(AppError::Validation(format!("unknown book status: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// CopyStatus
// ---------------------------------------------------------------------------

/// Physical copy circulation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyStatus {
    Available,
    Loaned,
    Damaged,
    Lost,
}

impl CopyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "available",
            CopyStatus::Loaned => "loaned",
            CopyStatus::Damaged => "damaged",
            CopyStatus::Lost => "lost",
        }
    }
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CopyStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(CopyStatus::Available),
            "loaned" => Ok(CopyStatus::Loaned),
            "damaged" => Ok(CopyStatus::Damaged),
            "lost" => Ok(CopyStatus::Lost),
            other => Err(AppError::Validation(format!("unknown copy status: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// MemberStatus
// ---------------------------------------------------------------------------

/// Member account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    Blocked,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MemberStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            "blocked" => Ok(MemberStatus::Blocked),
            other => Err(AppError::Validation(format!("unknown member status: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Loan lifecycle status. Overdue is not a stored state, it is derived from
/// the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Returned => "returned",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(LoanStatus::Active),
            "returned" => Ok(LoanStatus::Returned),
            other => Err(AppError::Validation(format!("unknown loan status: {other}"))),
        }
    }
}
