//! Repository layer: persistence contracts and their JSON-snapshot backing.
//!
//! Services depend only on the trait contracts; each implementation is
//! responsible for keeping its own reads and writes internally consistent
//! per call. The JSON store does this with one reader-writer lock.

pub mod books;
pub mod copies;
pub mod loans;
pub mod members;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, BookCopy, Loan, Member},
};

pub use store::JsonStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn save(&self, book: Book) -> AppResult<()>;
    async fn get_by_id(&self, id: &str) -> AppResult<Book>;
    async fn list(&self) -> AppResult<Vec<Book>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CopyRepository: Send + Sync {
    async fn save(&self, copy: BookCopy) -> AppResult<()>;
    async fn get_by_id(&self, id: &str) -> AppResult<BookCopy>;
    async fn get_by_barcode(&self, barcode: &str) -> AppResult<BookCopy>;
    async fn list(&self) -> AppResult<Vec<BookCopy>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn save(&self, member: Member) -> AppResult<()>;
    async fn get_by_id(&self, id: &str) -> AppResult<Member>;
    async fn list(&self) -> AppResult<Vec<Member>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn save(&self, loan: Loan) -> AppResult<()>;
    async fn get_by_id(&self, id: &str) -> AppResult<Loan>;
    async fn count_active_by_member(&self, member_id: &str) -> AppResult<usize>;
    async fn list(&self) -> AppResult<Vec<Loan>>;
}

/// Bundle of the four repository contracts handed to the services.
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
    pub copies: Arc<dyn CopyRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub loans: Arc<dyn LoanRepository>,
}

impl Repository {
    /// Wire all four repositories onto one shared JSON snapshot store.
    pub fn json(store: Arc<JsonStore>) -> Self {
        Self {
            books: Arc::new(books::JsonBookRepository::new(store.clone())),
            copies: Arc::new(copies::JsonCopyRepository::new(store.clone())),
            members: Arc::new(members::JsonMemberRepository::new(store.clone())),
            loans: Arc::new(loans::JsonLoanRepository::new(store)),
        }
    }
}
