//! Borrowing policy and the loan state machine.
//!
//! Everything here is a pure function of its inputs: no clock reads, no
//! storage, no hidden state. Services feed in the current time and the
//! already-loaded entities, and persist whatever comes back.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{BookCopy, Loan, LoanStatus, Member},
};

/// Borrowing policy bounding loan duration, concurrent loans per member, and
/// renewals per loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub loan_days: i64,
    pub max_loans_per_member: usize,
    pub max_renewals: u32,
}

impl Policy {
    pub fn validate(&self) -> AppResult<()> {
        if self.loan_days <= 0 {
            return Err(AppError::Policy("loan days must be greater than zero".into()));
        }

        if self.max_loans_per_member == 0 {
            return Err(AppError::Policy(
                "max loans per member must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    fn loan_period(&self) -> AppResult<Duration> {
        Duration::try_days(self.loan_days)
            .ok_or_else(|| AppError::Policy("loan days out of range".into()))
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            loan_days: 21,
            max_loans_per_member: 5,
            max_renewals: 2,
        }
    }
}

/// Check whether a loan may be issued at all. First failing check wins, in
/// order: policy validity, copy availability, member eligibility, loan cap.
pub fn can_issue(
    copy: &BookCopy,
    member: &Member,
    active_loans: usize,
    policy: &Policy,
) -> AppResult<()> {
    policy.validate()?;

    if !copy.is_available() {
        return Err(AppError::CopyNotAvailable);
    }

    if !member.can_borrow() {
        return Err(AppError::MemberNotEligible);
    }

    if active_loans >= policy.max_loans_per_member {
        return Err(AppError::LoanLimitReached);
    }

    Ok(())
}

/// Build a fresh active loan due `policy.loan_days` after `issued_at`.
pub fn new_loan(
    id: impl Into<String>,
    copy_id: impl Into<String>,
    member_id: impl Into<String>,
    issued_at: DateTime<Utc>,
    policy: &Policy,
) -> AppResult<Loan> {
    policy.validate()?;

    let loan = Loan {
        id: id.into(),
        copy_id: copy_id.into(),
        member_id: member_id.into(),
        issued_at,
        due_at: issued_at + policy.loan_period()?,
        returned_at: None,
        renewal_count: 0,
        status: LoanStatus::Active,
    };

    loan.validate()?;

    Ok(loan)
}

/// Extend an active loan by one loan period.
///
/// Renewals stack from the current due date rather than resetting from
/// `now`, and an overdue loan cannot self-extend: it has to be returned.
pub fn renew(loan: &Loan, now: DateTime<Utc>, policy: &Policy) -> AppResult<Loan> {
    policy.validate()?;

    if !loan.is_active() {
        return Err(AppError::LoanAlreadyClosed);
    }

    if loan.is_overdue(now) {
        return Err(AppError::LoanAlreadyOverdue);
    }

    if loan.renewal_count >= policy.max_renewals {
        return Err(AppError::RenewalLimit);
    }

    let mut renewed = loan.clone();
    renewed.renewal_count += 1;
    renewed.due_at = renewed.due_at + policy.loan_period()?;

    Ok(renewed)
}

/// Close a loan. Terminal: a second return fails with `LoanAlreadyClosed`.
pub fn return_loan(loan: &Loan, returned_at: DateTime<Utc>) -> AppResult<Loan> {
    if loan.status == LoanStatus::Returned || loan.returned_at.is_some() {
        return Err(AppError::LoanAlreadyClosed);
    }

    let mut returned = loan.clone();
    returned.status = LoanStatus::Returned;
    returned.returned_at = Some(returned_at);

    returned.validate()?;

    Ok(returned)
}
