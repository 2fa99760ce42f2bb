//! Loan (borrow) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::enums::LoanStatus;

/// Loan transaction linking one copy to one member.
///
/// Terminal once returned: status and `returned_at` are set together and the
/// record is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    pub copy_id: String,
    pub member_id: String,
    pub issued_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub renewal_count: u32,
    pub status: LoanStatus,
}

impl Loan {
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("loan id is required".into()));
        }

        if self.copy_id.trim().is_empty() {
            return Err(AppError::Validation("copy id is required".into()));
        }

        if self.member_id.trim().is_empty() {
            return Err(AppError::Validation("member id is required".into()));
        }

        if self.due_at <= self.issued_at {
            return Err(AppError::Validation("due date must be after issue date".into()));
        }

        match (self.status, self.returned_at) {
            (LoanStatus::Returned, None) => {
                return Err(AppError::Validation(
                    "returned date is required when status is returned".into(),
                ));
            }
            (LoanStatus::Active, Some(_)) => {
                return Err(AppError::Validation(
                    "active loan cannot carry a returned date".into(),
                ));
            }
            _ => {}
        }

        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active && self.returned_at.is_none()
    }

    /// Derived predicate: open and past due. Never true once returned.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        if self.returned_at.is_some() {
            return false;
        }

        now > self.due_at
    }
}

/// Issue loan request
#[derive(Debug, Clone)]
pub struct IssueLoan {
    pub copy_id: String,
    pub member_id: String,
}

/// Renew loan request
#[derive(Debug, Clone)]
pub struct RenewLoan {
    pub loan_id: String,
}

/// Return loan request
#[derive(Debug, Clone)]
pub struct ReturnLoan {
    pub loan_id: String,
}
