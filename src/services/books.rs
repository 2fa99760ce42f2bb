//! Book catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    id::IdGenerator,
    models::{Book, BookStatus, CreateBook, UpdateBook},
    repository::BookRepository,
};

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BookRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl BooksService {
    pub fn new(books: Arc<dyn BookRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { books, ids }
    }

    /// Create a catalog record; generates an id when the caller did not
    /// supply one.
    pub async fn create(&self, input: CreateBook) -> AppResult<Book> {
        let id = match input.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => self.ids.new_id(),
        };

        match self.books.get_by_id(&id).await {
            Ok(_) => return Err(AppError::DuplicateId(id)),
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        let book = Book {
            id,
            title: input.title,
            authors: input.authors,
            isbn: input.isbn,
            category: input.category,
            publisher: input.publisher,
            year: input.year,
            status: BookStatus::Active,
        };

        book.validate()?;
        self.books.save(book.clone()).await?;

        Ok(book)
    }

    /// Update bibliographic fields; status changes go through `set_status`.
    pub async fn update(&self, input: UpdateBook) -> AppResult<Book> {
        let mut book = self.books.get_by_id(&input.id).await?;

        book.title = input.title;
        book.authors = input.authors;
        book.isbn = input.isbn;
        book.category = input.category;
        book.publisher = input.publisher;
        book.year = input.year;

        book.validate()?;
        self.books.save(book.clone()).await?;

        Ok(book)
    }

    pub async fn set_status(&self, id: &str, status: BookStatus) -> AppResult<Book> {
        let mut book = self.books.get_by_id(id).await?;

        book.status = status;
        book.validate()?;
        self.books.save(book.clone()).await?;

        Ok(book)
    }

    /// Soft-delete: books are archived, never removed.
    pub async fn archive(&self, id: &str) -> AppResult<Book> {
        self.set_status(id, BookStatus::Archived).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.books.list().await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use crate::repository::MockBookRepository;

    use super::*;

    struct StaticIds(&'static str);

    impl IdGenerator for StaticIds {
        fn new_id(&self) -> String {
            self.0.to_string()
        }
    }

    fn input() -> CreateBook {
        CreateBook {
            title: "Refactoring".into(),
            authors: vec!["M. Fowler".into()],
            ..CreateBook::default()
        }
    }

    #[tokio::test]
    async fn create_generates_an_id_when_absent() {
        let mut books = MockBookRepository::new();
        books
            .expect_get_by_id()
            .with(eq("b-77"))
            .returning(|id| Err(AppError::NotFound(format!("book {id}"))));
        books
            .expect_save()
            .withf(|b| b.id == "b-77" && b.status == BookStatus::Active)
            .returning(|_| Ok(()));

        let svc = BooksService::new(Arc::new(books), Arc::new(StaticIds("b-77")));
        let book = svc.create(input()).await.unwrap();

        assert_eq!(book.id, "b-77");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let mut books = MockBookRepository::new();
        books.expect_get_by_id().returning(|_| {
            Ok(Book {
                id: "b-1".into(),
                title: "Existing".into(),
                authors: vec!["A".into()],
                isbn: None,
                category: None,
                publisher: None,
                year: None,
                status: BookStatus::Active,
            })
        });

        let svc = BooksService::new(Arc::new(books), Arc::new(StaticIds("unused")));
        let err = svc
            .create(CreateBook {
                id: Some("b-1".into()),
                ..input()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateId(id) if id == "b-1"));
    }

    #[tokio::test]
    async fn update_propagates_not_found() {
        let mut books = MockBookRepository::new();
        books
            .expect_get_by_id()
            .returning(|id| Err(AppError::NotFound(format!("book {id}"))));

        let svc = BooksService::new(Arc::new(books), Arc::new(StaticIds("unused")));
        let err = svc
            .update(UpdateBook {
                id: "missing".into(),
                title: "T".into(),
                authors: vec!["A".into()],
                isbn: None,
                category: None,
                publisher: None,
                year: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn archive_flips_status_only() {
        let mut books = MockBookRepository::new();
        books.expect_get_by_id().with(eq("b-1")).returning(|_| {
            Ok(Book {
                id: "b-1".into(),
                title: "Existing".into(),
                authors: vec!["A".into()],
                isbn: None,
                category: None,
                publisher: None,
                year: None,
                status: BookStatus::Active,
            })
        });
        books
            .expect_save()
            .withf(|b| b.status == BookStatus::Archived && b.title == "Existing")
            .returning(|_| Ok(()));

        let svc = BooksService::new(Arc::new(books), Arc::new(StaticIds("unused")));
        let book = svc.archive("b-1").await.unwrap();

        assert_eq!(book.status, BookStatus::Archived);
    }
}
