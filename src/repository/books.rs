//! JSON-backed book repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

use super::{store::JsonStore, BookRepository};

pub struct JsonBookRepository {
    store: Arc<JsonStore>,
}

impl JsonBookRepository {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookRepository for JsonBookRepository {
    async fn save(&self, book: Book) -> AppResult<()> {
        book.validate()?;

        let mut state = self.store.state.write().await;
        state.books.insert(book.id.clone(), book);
        self.store.persist(&state).await
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        let state = self.store.state.read().await;
        state
            .books
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("book {id}")))
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        let state = self.store.state.read().await;
        Ok(state.books.values().cloned().collect())
    }
}
