//! Author pages

use super::Outcome;
use crate::{
    error::{AppError, AppResult},
    models::Author,
    repository::Repository,
    store::RecordId,
    validation::{self, RawForm, Validated},
    views::Page,
};

pub const LIST_URL: &str = "/catalog/authors";

#[derive(Clone)]
pub struct AuthorController {
    repository: Repository,
}

impl AuthorController {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Outcome> {
        let authors = self.repository.authors_list().await?;
        Ok(Outcome::render("Author List", Page::AuthorList(authors)))
    }

    pub async fn detail(&self, id: &RecordId) -> AppResult<Outcome> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get_by_id(id),
            self.repository.authors_books(id),
        )?;
        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok(Outcome::render(
            "Author Detail",
            Page::AuthorDetail { author, books },
        ))
    }

    pub fn create_form(&self) -> Outcome {
        Outcome::render(
            "Create Author",
            Page::AuthorForm {
                author: None,
                errors: Vec::new(),
            },
        )
    }

    pub async fn create_submit(&self, form: RawForm) -> AppResult<Outcome> {
        match validation::process::<Author>(RecordId::generate(), &form) {
            Validated::Invalid { entity, errors } => Ok(Outcome::render(
                "Create Author",
                Page::AuthorForm {
                    author: Some(entity),
                    errors,
                },
            )),
            Validated::Valid(author) => {
                self.repository.insert(&author).await?;
                tracing::info!(id = %author.id, "author created");
                Ok(Outcome::redirect(author.url()))
            }
        }
    }

    pub async fn delete_form(&self, id: &RecordId) -> AppResult<Outcome> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get_by_id(id),
            self.repository.authors_books(id),
        )?;
        let Some(author) = author else {
            return Ok(Outcome::redirect(LIST_URL));
        };
        Ok(Outcome::render(
            "Delete Author",
            Page::AuthorDelete { author, books },
        ))
    }

    pub async fn delete_submit(&self, id: &RecordId) -> AppResult<Outcome> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get_by_id(id),
            self.repository.authors_books(id),
        )?;
        if !books.is_empty() {
            if let Some(author) = author {
                tracing::debug!(id = %id, books = books.len(), "author delete refused");
                return Ok(Outcome::render(
                    "Delete Author",
                    Page::AuthorDelete { author, books },
                ));
            }
            return Ok(Outcome::redirect(LIST_URL));
        }
        if self.repository.delete::<Author>(id).await? {
            tracing::info!(id = %id, "author deleted");
        }
        Ok(Outcome::redirect(LIST_URL))
    }

    pub async fn update_form(&self, id: &RecordId) -> AppResult<Outcome> {
        let author = self
            .repository
            .authors_get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok(Outcome::render(
            "Update Author",
            Page::AuthorForm {
                author: Some(author),
                errors: Vec::new(),
            },
        ))
    }

    pub async fn update_submit(&self, id: &RecordId, form: RawForm) -> AppResult<Outcome> {
        match validation::process::<Author>(id.clone(), &form) {
            Validated::Invalid { entity, errors } => Ok(Outcome::render(
                "Update Author",
                Page::AuthorForm {
                    author: Some(entity),
                    errors,
                },
            )),
            Validated::Valid(author) => {
                if !self.repository.replace(&author).await? {
                    return Err(AppError::NotFound("Author not found".to_string()));
                }
                tracing::info!(id = %author.id, "author updated");
                Ok(Outcome::redirect(author.url()))
            }
        }
    }
}
