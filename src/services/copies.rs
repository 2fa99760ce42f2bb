//! Physical inventory service
//!
//! Owns the barcode uniqueness rule: the entity does not know about other
//! copies, so collisions are checked here before anything is persisted.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    id::IdGenerator,
    models::{BookCopy, CopyStatus, CreateCopy, UpdateCopy},
    repository::CopyRepository,
};

#[derive(Clone)]
pub struct CopiesService {
    copies: Arc<dyn CopyRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl CopiesService {
    pub fn new(copies: Arc<dyn CopyRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { copies, ids }
    }

    pub async fn create(&self, input: CreateCopy) -> AppResult<BookCopy> {
        let id = match input.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => self.ids.new_id(),
        };

        match self.copies.get_by_id(&id).await {
            Ok(_) => return Err(AppError::DuplicateId(id)),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        if let Some(barcode) = normalized(&input.barcode) {
            match self.copies.get_by_barcode(barcode).await {
                Ok(_) => return Err(AppError::DuplicateBarcode(barcode.to_string())),
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }

        let copy = BookCopy {
            id,
            book_id: input.book_id,
            barcode: input.barcode,
            status: CopyStatus::Available,
            condition_note: input.condition_note,
        };

        copy.validate()?;
        self.copies.save(copy.clone()).await?;

        Ok(copy)
    }

    /// Update barcode, status, and condition note. The barcode collision
    /// scan only runs when the barcode actually changes, and skips the
    /// record's own id.
    pub async fn update(&self, input: UpdateCopy) -> AppResult<BookCopy> {
        let mut copy = self.copies.get_by_id(&input.id).await?;

        if let Some(barcode) = normalized(&input.barcode) {
            if copy.normalized_barcode() != Some(barcode) {
                match self.copies.get_by_barcode(barcode).await {
                    Ok(existing) if existing.id != copy.id => {
                        return Err(AppError::DuplicateBarcode(barcode.to_string()));
                    }
                    Ok(_) => {}
                    Err(err) if err.is_not_found() => {}
                    Err(err) => return Err(err),
                }
            }
        }

        copy.barcode = input.barcode;
        copy.status = input.status;
        copy.condition_note = input.condition_note;

        copy.validate()?;
        self.copies.save(copy.clone()).await?;

        Ok(copy)
    }

    pub async fn set_status(&self, id: &str, status: CopyStatus) -> AppResult<BookCopy> {
        let mut copy = self.copies.get_by_id(id).await?;

        copy.status = status;
        copy.validate()?;
        self.copies.save(copy.clone()).await?;

        Ok(copy)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<BookCopy> {
        self.copies.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<BookCopy>> {
        self.copies.list().await
    }
}

fn normalized(barcode: &Option<String>) -> Option<&str> {
    barcode.as_deref().map(str::trim).filter(|b| !b.is_empty())
}
