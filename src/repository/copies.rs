//! JSON-backed copy repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::BookCopy,
};

use super::{store::JsonStore, CopyRepository};

pub struct JsonCopyRepository {
    store: Arc<JsonStore>,
}

impl JsonCopyRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CopyRepository for JsonCopyRepository {
    async fn save(&self, copy: BookCopy) -> AppResult<()> {
        copy.validate()?;

        let mut state = self.store.state.write().await;
        state.copies.insert(copy.id.clone(), copy);
        self.store.persist(&state).await
    }

    async fn get_by_id(&self, id: &str) -> AppResult<BookCopy> {
        let state = self.store.state.read().await;
        state
            .copies
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("copy {id}")))
    }

    async fn get_by_barcode(&self, barcode: &str) -> AppResult<BookCopy> {
        let state = self.store.state.read().await;
        let want = barcode.trim();

        state
            .copies
            .values()
            .find(|c| c.normalized_barcode() == Some(want))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("copy with barcode {want}")))
    }

    async fn list(&self) -> AppResult<Vec<BookCopy>> {
        let state = self.store.state.read().await;
        Ok(state.copies.values().cloned().collect())
    }
}
