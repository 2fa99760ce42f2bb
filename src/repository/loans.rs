//! JSON-backed loan repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::Loan,
};

use super::{store::JsonStore, LoanRepository};

pub struct JsonLoanRepository {
    store: Arc<JsonStore>,
}

impl JsonLoanRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LoanRepository for JsonLoanRepository {
    async fn save(&self, loan: Loan) -> AppResult<()> {
        loan.validate()?;

        let mut state = self.store.state.write().await;
        state.loans.insert(loan.id.clone(), loan);
        self.store.persist(&state).await
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Loan> {
        let state = self.store.state.read().await;
        state
            .loans
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("loan {id}")))
    }

    async fn count_active_by_member(&self, member_id: &str) -> AppResult<usize> {
        let state = self.store.state.read().await;
        let count = state
            .loans
            .values()
            .filter(|l| l.member_id == member_id && l.is_active())
            .count();

        Ok(count)
    }

    async fn list(&self) -> AppResult<Vec<Loan>> {
        let state = self.store.state.read().await;
        Ok(state.loans.values().cloned().collect())
    }
}
