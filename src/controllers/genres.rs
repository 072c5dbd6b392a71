//! Genre pages

use super::Outcome;
use crate::{
    error::{AppError, AppResult},
    models::Genre,
    repository::Repository,
    store::RecordId,
    validation::{self, RawForm, Validated},
    views::Page,
};

pub const LIST_URL: &str = "/catalog/genres";

#[derive(Clone)]
pub struct GenreController {
    repository: Repository,
}

impl GenreController {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Outcome> {
        let genres = self.repository.genres_list().await?;
        Ok(Outcome::render("Genre List", Page::GenreList(genres)))
    }

    pub async fn detail(&self, id: &RecordId) -> AppResult<Outcome> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get_by_id(id),
            self.repository.genres_books(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok(Outcome::render("Genre Detail", Page::GenreDetail { genre, books }))
    }

    pub fn create_form(&self) -> Outcome {
        Outcome::render(
            "Create Genre",
            Page::GenreForm {
                genre: None,
                errors: Vec::new(),
            },
        )
    }

    /// A name that already exists redirects to the existing genre
    pub async fn create_submit(&self, form: RawForm) -> AppResult<Outcome> {
        let genre = match validation::process::<Genre>(RecordId::generate(), &form) {
            Validated::Invalid { entity, errors } => {
                return Ok(Outcome::render(
                    "Create Genre",
                    Page::GenreForm {
                        genre: Some(entity),
                        errors,
                    },
                ))
            }
            Validated::Valid(genre) => genre,
        };

        if let Some(existing) = self.repository.genres_find_by_name(&genre.name).await? {
            tracing::debug!(id = %existing.id, "genre already exists");
            return Ok(Outcome::redirect(existing.url()));
        }

        self.repository.insert(&genre).await?;
        tracing::info!(id = %genre.id, "genre created");
        Ok(Outcome::redirect(genre.url()))
    }

    pub async fn delete_form(&self, id: &RecordId) -> AppResult<Outcome> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get_by_id(id),
            self.repository.genres_books(id),
        )?;
        let Some(genre) = genre else {
            return Ok(Outcome::redirect(LIST_URL));
        };
        Ok(Outcome::render("Delete Genre", Page::GenreDelete { genre, books }))
    }

    pub async fn delete_submit(&self, id: &RecordId) -> AppResult<Outcome> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get_by_id(id),
            self.repository.genres_books(id),
        )?;
        if !books.is_empty() {
            if let Some(genre) = genre {
                tracing::debug!(id = %id, books = books.len(), "genre delete refused");
                return Ok(Outcome::render(
                    "Delete Genre",
                    Page::GenreDelete { genre, books },
                ));
            }
            return Ok(Outcome::redirect(LIST_URL));
        }
        if self.repository.delete::<Genre>(id).await? {
            tracing::info!(id = %id, "genre deleted");
        }
        Ok(Outcome::redirect(LIST_URL))
    }

    pub async fn update_form(&self, id: &RecordId) -> AppResult<Outcome> {
        let genre = self
            .repository
            .genres_get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok(Outcome::render(
            "Update Genre",
            Page::GenreForm {
                genre: Some(genre),
                errors: Vec::new(),
            },
        ))
    }

    pub async fn update_submit(&self, id: &RecordId, form: RawForm) -> AppResult<Outcome> {
        match validation::process::<Genre>(id.clone(), &form) {
            Validated::Invalid { entity, errors } => Ok(Outcome::render(
                "Update Genre",
                Page::GenreForm {
                    genre: Some(entity),
                    errors,
                },
            )),
            Validated::Valid(genre) => {
                if !self.repository.replace(&genre).await? {
                    return Err(AppError::NotFound("Genre not found".to_string()));
                }
                tracing::info!(id = %genre.id, "genre updated");
                Ok(Outcome::redirect(genre.url()))
            }
        }
    }
}
