//! Book pages

use super::{
    joins::{mark_genres, populate_book, populate_book_authors},
    Outcome,
};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, Genre},
    repository::Repository,
    store::RecordId,
    validation::{self, FieldError, RawForm, Validated},
    views::Page,
};

pub const LIST_URL: &str = "/catalog/books";

#[derive(Clone)]
pub struct BookController {
    repository: Repository,
}

impl BookController {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Outcome> {
        let books = self.repository.books_list().await?;
        let books = populate_book_authors(&self.repository, books).await?;
        Ok(Outcome::render("Book List", Page::BookList(books)))
    }

    pub async fn detail(&self, id: &RecordId) -> AppResult<Outcome> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get_by_id(id),
            self.repository.books_instances(id),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        let book = populate_book(&self.repository, book).await?;
        Ok(Outcome::render("Book Detail", Page::BookDetail { book, instances }))
    }

    async fn reference_lists(&self) -> AppResult<(Vec<Author>, Vec<Genre>)> {
        tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )
    }

    /// Book form with the author selector and genre checkboxes filled in
    fn form_outcome(
        title: &str,
        book: Option<Book>,
        (authors, genres): (Vec<Author>, Vec<Genre>),
        errors: Vec<FieldError>,
    ) -> Outcome {
        let selected = book.as_ref().map(|b| b.genre.as_slice()).unwrap_or(&[]);
        let genres = mark_genres(genres, selected);
        Outcome::render(
            title,
            Page::BookForm {
                book,
                authors,
                genres,
                errors,
            },
        )
    }

    async fn form_page(
        &self,
        title: &str,
        book: Option<Book>,
        errors: Vec<FieldError>,
    ) -> AppResult<Outcome> {
        let lists = self.reference_lists().await?;
        Ok(Self::form_outcome(title, book, lists, errors))
    }

    pub async fn create_form(&self) -> AppResult<Outcome> {
        self.form_page("Create Book", None, Vec::new()).await
    }

    pub async fn create_submit(&self, form: RawForm) -> AppResult<Outcome> {
        match validation::process::<Book>(RecordId::generate(), &form) {
            Validated::Invalid { entity, errors } => {
                self.form_page("Create Book", Some(entity), errors).await
            }
            Validated::Valid(book) => {
                self.repository.insert(&book).await?;
                tracing::info!(id = %book.id, "book created");
                Ok(Outcome::redirect(book.url()))
            }
        }
    }

    pub async fn delete_form(&self, id: &RecordId) -> AppResult<Outcome> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get_by_id(id),
            self.repository.books_instances(id),
        )?;
        let Some(book) = book else {
            return Ok(Outcome::redirect(LIST_URL));
        };
        let book = populate_book(&self.repository, book).await?;
        Ok(Outcome::render("Delete Book", Page::BookDelete { book, instances }))
    }

    pub async fn delete_submit(&self, id: &RecordId) -> AppResult<Outcome> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get_by_id(id),
            self.repository.books_instances(id),
        )?;
        if !instances.is_empty() {
            if let Some(book) = book {
                tracing::debug!(id = %id, copies = instances.len(), "book delete refused");
                let book = populate_book(&self.repository, book).await?;
                return Ok(Outcome::render("Delete Book", Page::BookDelete { book, instances }));
            }
            return Ok(Outcome::redirect(LIST_URL));
        }
        if self.repository.delete::<Book>(id).await? {
            tracing::info!(id = %id, "book deleted");
        }
        Ok(Outcome::redirect(LIST_URL))
    }

    pub async fn update_form(&self, id: &RecordId) -> AppResult<Outcome> {
        let (book, lists) = tokio::try_join!(
            self.repository.books_get_by_id(id),
            self.reference_lists(),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        Ok(Self::form_outcome("Update Book", Some(book), lists, Vec::new()))
    }

    pub async fn update_submit(&self, id: &RecordId, form: RawForm) -> AppResult<Outcome> {
        match validation::process::<Book>(id.clone(), &form) {
            Validated::Invalid { entity, errors } => {
                self.form_page("Update Book", Some(entity), errors).await
            }
            Validated::Valid(book) => {
                if !self.repository.replace(&book).await? {
                    return Err(AppError::NotFound("Book not found".to_string()));
                }
                tracing::info!(id = %book.id, "book updated");
                Ok(Outcome::redirect(book.url()))
            }
        }
    }
}
