//! Book instance (copy) pages

use super::{
    joins::{populate_instance, populate_instances},
    Outcome,
};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance},
    repository::Repository,
    store::RecordId,
    validation::{self, FieldError, RawForm, Validated},
    views::Page,
};

pub const LIST_URL: &str = "/catalog/bookinstances";

#[derive(Clone)]
pub struct BookInstanceController {
    repository: Repository,
}

impl BookInstanceController {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Outcome> {
        let instances = self.repository.book_instances_list().await?;
        let instances = populate_instances(&self.repository, instances).await?;
        Ok(Outcome::render(
            "Book Instance List",
            Page::BookInstanceList(instances),
        ))
    }

    pub async fn detail(&self, id: &RecordId) -> AppResult<Outcome> {
        let instance = self
            .repository
            .book_instances_get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        let instance = populate_instance(&self.repository, instance).await?;
        Ok(Outcome::render("Book", Page::BookInstanceDetail(instance)))
    }

    async fn form_page(
        &self,
        title: &str,
        instance: Option<BookInstance>,
        errors: Vec<FieldError>,
    ) -> AppResult<Outcome> {
        let books = self.repository.books_titles().await?;
        Ok(Self::form_outcome(title, instance, books, errors))
    }

    fn form_outcome(
        title: &str,
        instance: Option<BookInstance>,
        books: Vec<Book>,
        errors: Vec<FieldError>,
    ) -> Outcome {
        let selected_book = instance.as_ref().map(|i| i.book.clone());
        Outcome::render(
            title,
            Page::BookInstanceForm {
                instance,
                books,
                selected_book,
                errors,
            },
        )
    }

    pub async fn create_form(&self) -> AppResult<Outcome> {
        self.form_page("Create BookInstance", None, Vec::new()).await
    }

    pub async fn create_submit(&self, form: RawForm) -> AppResult<Outcome> {
        match validation::process::<BookInstance>(RecordId::generate(), &form) {
            Validated::Invalid { entity, errors } => {
                self.form_page("Create BookInstance", Some(entity), errors)
                    .await
            }
            Validated::Valid(instance) => {
                self.repository.insert(&instance).await?;
                tracing::info!(id = %instance.id, book = %instance.book, "book instance created");
                Ok(Outcome::redirect(instance.url()))
            }
        }
    }

    pub async fn delete_form(&self, id: &RecordId) -> AppResult<Outcome> {
        let Some(instance) = self.repository.book_instances_get_by_id(id).await? else {
            return Ok(Outcome::redirect(LIST_URL));
        };
        let instance = populate_instance(&self.repository, instance).await?;
        Ok(Outcome::render(
            "Delete BookInstance",
            Page::BookInstanceDelete(instance),
        ))
    }

    /// Nothing references a copy, so deletion is never refused
    pub async fn delete_submit(&self, id: &RecordId) -> AppResult<Outcome> {
        if self.repository.delete::<BookInstance>(id).await? {
            tracing::info!(id = %id, "book instance deleted");
        }
        Ok(Outcome::redirect(LIST_URL))
    }

    pub async fn update_form(&self, id: &RecordId) -> AppResult<Outcome> {
        let (instance, books) = tokio::try_join!(
            self.repository.book_instances_get_by_id(id),
            self.repository.books_titles(),
        )?;
        let instance =
            instance.ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        Ok(Self::form_outcome(
            "Update BookInstance",
            Some(instance),
            books,
            Vec::new(),
        ))
    }

    pub async fn update_submit(&self, id: &RecordId, form: RawForm) -> AppResult<Outcome> {
        match validation::process::<BookInstance>(id.clone(), &form) {
            Validated::Invalid { entity, errors } => {
                self.form_page("Update BookInstance", Some(entity), errors)
                    .await
            }
            Validated::Valid(instance) => {
                if !self.repository.replace(&instance).await? {
                    return Err(AppError::NotFound("Book copy not found".to_string()));
                }
                tracing::info!(id = %instance.id, "book instance updated");
                Ok(Outcome::redirect(instance.url()))
            }
        }
    }
}
