//! Request orchestration: one controller per catalog entity.
//!
//! Each operation reads or writes through the [`Repository`], resolves
//! references with [`joins`], and answers with an [`Outcome`]: a view to
//! render or a location to redirect to. Lookups a page needs that do not
//! depend on each other are issued together and joined, the first store
//! error aborting the operation.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod joins;

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookStatus, Genre},
    repository::Repository,
    store::Filter,
    views::{CatalogCounts, Page, View},
};

/// What the HTTP layer should answer with
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    Redirect(String),
}

impl Outcome {
    pub fn render(title: impl Into<String>, page: Page) -> Self {
        Outcome::Render(View::new(title, page))
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Outcome::Redirect(location.into())
    }
}

/// Container for all controllers
#[derive(Clone)]
pub struct Controllers {
    pub catalog: CatalogController,
    pub authors: authors::AuthorController,
    pub genres: genres::GenreController,
    pub books: books::BookController,
    pub book_instances: book_instances::BookInstanceController,
}

impl Controllers {
    /// Create all controllers with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: CatalogController::new(repository.clone()),
            authors: authors::AuthorController::new(repository.clone()),
            genres: genres::GenreController::new(repository.clone()),
            books: books::BookController::new(repository.clone()),
            book_instances: book_instances::BookInstanceController::new(repository),
        }
    }
}

/// Catalog home page
#[derive(Clone)]
pub struct CatalogController {
    repository: Repository,
}

impl CatalogController {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let repo = &self.repository;
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            repo.count::<Book>(Filter::new()),
            repo.count::<BookInstance>(Filter::new()),
            repo.book_instances_count_with_status(BookStatus::Available),
            repo.count::<Author>(Filter::new()),
            repo.count::<Genre>(Filter::new()),
        )?;
        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }

    pub async fn index(&self) -> AppResult<Outcome> {
        let counts = self.counts().await?;
        Ok(Outcome::render("Local Library Home", Page::Index(counts)))
    }
}
