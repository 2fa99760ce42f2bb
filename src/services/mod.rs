//! Use-case services
//!
//! Thin transactional wrappers over the repositories: read current state,
//! apply the change (delegating loan decisions to [`crate::rules`]),
//! validate, persist, and return the new state or the first error.

pub mod books;
pub mod copies;
pub mod loans;
pub mod members;

use std::sync::Arc;

use crate::{clock::Clock, id::IdGenerator, repository::Repository, rules::Policy};

pub use books::BooksService;
pub use copies::CopiesService;
pub use loans::LoansService;
pub use members::MembersService;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: BooksService,
    pub copies: CopiesService,
    pub members: MembersService,
    pub loans: LoansService,
}

impl Services {
    /// Wire all services onto one repository bundle, clock, and id source.
    pub fn new(
        repository: Repository,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        policy: Policy,
    ) -> Self {
        Self {
            books: BooksService::new(repository.books.clone(), ids.clone()),
            copies: CopiesService::new(repository.copies.clone(), ids.clone()),
            members: MembersService::new(repository.members.clone(), ids.clone(), clock.clone()),
            loans: LoansService::new(
                repository.loans,
                repository.copies,
                repository.members,
                ids,
                clock,
                policy,
            ),
        }
    }
}
