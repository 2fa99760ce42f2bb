//! Loan management service
//!
//! Orchestrates the pure rules engine against the repositories. Issue and
//! return each perform two persist calls (loan, then copy) with no
//! cross-entity transaction; a crash between them leaves the copy status out
//! of sync with the loan until a reconciliation pass.

use std::sync::Arc;

use crate::{
    clock::Clock,
    error::AppResult,
    id::IdGenerator,
    models::{CopyStatus, IssueLoan, Loan, RenewLoan, ReturnLoan},
    repository::{CopyRepository, LoanRepository, MemberRepository},
    rules::{self, Policy},
};

#[derive(Clone)]
pub struct LoansService {
    loans: Arc<dyn LoanRepository>,
    copies: Arc<dyn CopyRepository>,
    members: Arc<dyn MemberRepository>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    policy: Policy,
}

impl LoansService {
    pub fn new(
        loans: Arc<dyn LoanRepository>,
        copies: Arc<dyn CopyRepository>,
        members: Arc<dyn MemberRepository>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        policy: Policy,
    ) -> Self {
        Self {
            loans,
            copies,
            members,
            ids,
            clock,
            policy,
        }
    }

    /// Issue a loan and flip the copy to loaned.
    pub async fn issue(&self, input: IssueLoan) -> AppResult<Loan> {
        let mut copy = self.copies.get_by_id(&input.copy_id).await?;
        let member = self.members.get_by_id(&input.member_id).await?;
        let active = self.loans.count_active_by_member(&input.member_id).await?;

        rules::can_issue(&copy, &member, active, &self.policy)?;

        let loan = rules::new_loan(
            self.ids.new_id(),
            input.copy_id.as_str(),
            input.member_id.as_str(),
            self.clock.now(),
            &self.policy,
        )?;

        self.loans.save(loan.clone()).await?;

        copy.status = CopyStatus::Loaned;
        self.copies.save(copy).await?;

        tracing::info!(
            loan_id = %loan.id,
            copy_id = %loan.copy_id,
            member_id = %loan.member_id,
            due_at = %loan.due_at,
            "loan issued"
        );

        Ok(loan)
    }

    /// Renew a loan
    pub async fn renew(&self, input: RenewLoan) -> AppResult<Loan> {
        let current = self.loans.get_by_id(&input.loan_id).await?;

        let renewed = rules::renew(&current, self.clock.now(), &self.policy)?;
        self.loans.save(renewed.clone()).await?;

        tracing::info!(
            loan_id = %renewed.id,
            due_at = %renewed.due_at,
            renewal_count = renewed.renewal_count,
            "loan renewed"
        );

        Ok(renewed)
    }

    /// Return a loan and flip the copy back to available.
    pub async fn return_loan(&self, input: ReturnLoan) -> AppResult<Loan> {
        let current = self.loans.get_by_id(&input.loan_id).await?;

        let returned = rules::return_loan(&current, self.clock.now())?;
        self.loans.save(returned.clone()).await?;

        let mut copy = self.copies.get_by_id(&returned.copy_id).await?;
        copy.status = CopyStatus::Available;
        self.copies.save(copy).await?;

        tracing::info!(loan_id = %returned.id, copy_id = %returned.copy_id, "loan returned");

        Ok(returned)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Loan> {
        self.loans.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<Loan>> {
        self.loans.list().await
    }

    /// All open loans past their due date. One linear scan over the loan
    /// list, no per-item I/O; this is the hottest read path at scale.
    pub async fn list_overdue(&self) -> AppResult<Vec<Loan>> {
        let now = self.clock.now();
        let loans = self.loans.list().await?;

        Ok(loans.into_iter().filter(|l| l.is_overdue(now)).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use mockall::predicate::eq;

    use crate::{
        error::AppError,
        models::{BookCopy, LoanStatus, Member, MemberStatus},
        repository::{MockCopyRepository, MockLoanRepository, MockMemberRepository},
    };

    use super::*;

    struct StaticIds(&'static str);

    impl IdGenerator for StaticIds {
        fn new_id(&self) -> String {
            self.0.to_string()
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn policy() -> Policy {
        Policy {
            loan_days: 14,
            max_loans_per_member: 3,
            max_renewals: 1,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap()
    }

    fn available_copy() -> BookCopy {
        BookCopy {
            id: "c-1".into(),
            book_id: "b-1".into(),
            barcode: None,
            status: CopyStatus::Available,
            condition_note: None,
        }
    }

    fn active_member(status: MemberStatus) -> Member {
        Member {
            id: "m-1".into(),
            name: "Alice".into(),
            email: None,
            phone: None,
            joined_at: now(),
            status,
        }
    }

    fn open_loan(id: &str, due_at: DateTime<Utc>) -> Loan {
        Loan {
            id: id.into(),
            copy_id: "c-1".into(),
            member_id: "m-1".into(),
            issued_at: due_at - Duration::days(14),
            due_at,
            returned_at: None,
            renewal_count: 0,
            status: LoanStatus::Active,
        }
    }

    fn service(
        loans: MockLoanRepository,
        copies: MockCopyRepository,
        members: MockMemberRepository,
    ) -> LoansService {
        LoansService::new(
            Arc::new(loans),
            Arc::new(copies),
            Arc::new(members),
            Arc::new(StaticIds("l-1")),
            Arc::new(FixedClock(now())),
            policy(),
        )
    }

    #[tokio::test]
    async fn issue_persists_loan_then_flips_copy() {
        let mut copies = MockCopyRepository::new();
        copies
            .expect_get_by_id()
            .with(eq("c-1"))
            .returning(|_| Ok(available_copy()));
        copies
            .expect_save()
            .withf(|c| c.id == "c-1" && c.status == CopyStatus::Loaned)
            .times(1)
            .returning(|_| Ok(()));

        let mut members = MockMemberRepository::new();
        members
            .expect_get_by_id()
            .with(eq("m-1"))
            .returning(|_| Ok(active_member(MemberStatus::Active)));

        let mut loans = MockLoanRepository::new();
        loans
            .expect_count_active_by_member()
            .with(eq("m-1"))
            .returning(|_| Ok(0));
        loans
            .expect_save()
            .withf(|l| l.id == "l-1" && l.status == LoanStatus::Active && l.renewal_count == 0)
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(loans, copies, members);
        let loan = svc
            .issue(IssueLoan {
                copy_id: "c-1".into(),
                member_id: "m-1".into(),
            })
            .await
            .unwrap();

        assert_eq!(loan.issued_at, now());
        assert_eq!(loan.due_at, now() + Duration::days(14));
    }

    #[tokio::test]
    async fn issue_rejects_blocked_member_without_writing() {
        let mut copies = MockCopyRepository::new();
        copies
            .expect_get_by_id()
            .returning(|_| Ok(available_copy()));

        let mut members = MockMemberRepository::new();
        members
            .expect_get_by_id()
            .returning(|_| Ok(active_member(MemberStatus::Blocked)));

        let mut loans = MockLoanRepository::new();
        loans.expect_count_active_by_member().returning(|_| Ok(0));
        // No expect_save on either repository: nothing may be written.

        let svc = service(loans, copies, members);
        let err = svc
            .issue(IssueLoan {
                copy_id: "c-1".into(),
                member_id: "m-1".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MemberNotEligible));
    }

    #[tokio::test]
    async fn issue_rejects_member_at_loan_cap() {
        let mut copies = MockCopyRepository::new();
        copies
            .expect_get_by_id()
            .returning(|_| Ok(available_copy()));

        let mut members = MockMemberRepository::new();
        members
            .expect_get_by_id()
            .returning(|_| Ok(active_member(MemberStatus::Active)));

        let mut loans = MockLoanRepository::new();
        loans.expect_count_active_by_member().returning(|_| Ok(3));

        let svc = service(loans, copies, members);
        let err = svc
            .issue(IssueLoan {
                copy_id: "c-1".into(),
                member_id: "m-1".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::LoanLimitReached));
    }

    #[tokio::test]
    async fn issue_propagates_missing_copy() {
        let mut copies = MockCopyRepository::new();
        copies
            .expect_get_by_id()
            .returning(|id| Err(AppError::NotFound(format!("copy {id}"))));

        let svc = service(
            MockLoanRepository::new(),
            copies,
            MockMemberRepository::new(),
        );
        let err = svc
            .issue(IssueLoan {
                copy_id: "nope".into(),
                member_id: "m-1".into(),
            })
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn renew_extends_due_date_once() {
        let due = now() + Duration::days(5);

        let mut loans = MockLoanRepository::new();
        loans
            .expect_get_by_id()
            .with(eq("l-1"))
            .returning(move |_| Ok(open_loan("l-1", due)));
        loans
            .expect_save()
            .withf(move |l| l.renewal_count == 1 && l.due_at == due + Duration::days(14))
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(loans, MockCopyRepository::new(), MockMemberRepository::new());
        let renewed = svc
            .renew(RenewLoan { loan_id: "l-1".into() })
            .await
            .unwrap();

        assert_eq!(renewed.renewal_count, 1);
    }

    #[tokio::test]
    async fn return_flips_copy_back_to_available() {
        let due = now() + Duration::days(5);

        let mut loans = MockLoanRepository::new();
        loans
            .expect_get_by_id()
            .returning(move |_| Ok(open_loan("l-1", due)));
        loans
            .expect_save()
            .withf(|l| l.status == LoanStatus::Returned && l.returned_at == Some(now()))
            .times(1)
            .returning(|_| Ok(()));

        let mut copies = MockCopyRepository::new();
        copies.expect_get_by_id().with(eq("c-1")).returning(|_| {
            let mut c = available_copy();
            c.status = CopyStatus::Loaned;
            Ok(c)
        });
        copies
            .expect_save()
            .withf(|c| c.status == CopyStatus::Available)
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(loans, copies, MockMemberRepository::new());
        let returned = svc
            .return_loan(ReturnLoan { loan_id: "l-1".into() })
            .await
            .unwrap();

        assert_eq!(returned.status, LoanStatus::Returned);
    }

    #[tokio::test]
    async fn list_overdue_filters_open_past_due_loans() {
        let mut loans = MockLoanRepository::new();
        loans.expect_list().returning(|| {
            let mut returned_late = open_loan("l-3", now() - Duration::days(1));
            returned_late.status = LoanStatus::Returned;
            returned_late.returned_at = Some(now());

            Ok(vec![
                open_loan("l-1", now() - Duration::days(1)), // overdue
                open_loan("l-2", now() + Duration::days(1)), // still running
                returned_late,                               // closed, never overdue
            ])
        });

        let svc = service(loans, MockCopyRepository::new(), MockMemberRepository::new());
        let overdue = svc.list_overdue().await.unwrap();

        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "l-1");
    }
}
