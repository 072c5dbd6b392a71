//! Server-side views.
//!
//! Controllers never produce markup: they hand a [`View`] (title plus the
//! data bag of one template) to a [`Renderer`]. [`HtmlRenderer`] renders the
//! templates with [maud](https://maud.lambda.xyz/), which escapes every
//! interpolated value.

mod layout;
mod pages;

use axum::http::StatusCode;
use maud::Markup;

use crate::{
    controllers::joins::{BookListing, GenreChoice, PopulatedBook, PopulatedInstance},
    error::AppResult,
    models::{Author, Book, BookInstance, Genre},
    store::RecordId,
    validation::FieldError,
};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: u64,
    pub book_instances: u64,
    pub book_instances_available: u64,
    pub authors: u64,
    pub genres: u64,
}

/// Data bag of each template
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Index(CatalogCounts),
    AuthorList(Vec<Author>),
    AuthorDetail {
        author: Author,
        books: Vec<Book>,
    },
    AuthorForm {
        author: Option<Author>,
        errors: Vec<FieldError>,
    },
    AuthorDelete {
        author: Author,
        books: Vec<Book>,
    },
    GenreList(Vec<Genre>),
    GenreDetail {
        genre: Genre,
        books: Vec<Book>,
    },
    GenreForm {
        genre: Option<Genre>,
        errors: Vec<FieldError>,
    },
    GenreDelete {
        genre: Genre,
        books: Vec<Book>,
    },
    BookList(Vec<BookListing>),
    BookDetail {
        book: PopulatedBook,
        instances: Vec<BookInstance>,
    },
    BookForm {
        book: Option<Book>,
        authors: Vec<Author>,
        genres: Vec<GenreChoice>,
        errors: Vec<FieldError>,
    },
    BookDelete {
        book: PopulatedBook,
        instances: Vec<BookInstance>,
    },
    BookInstanceList(Vec<PopulatedInstance>),
    BookInstanceDetail(PopulatedInstance),
    BookInstanceForm {
        instance: Option<BookInstance>,
        books: Vec<Book>,
        selected_book: Option<RecordId>,
        errors: Vec<FieldError>,
    },
    BookInstanceDelete(PopulatedInstance),
}

impl Page {
    /// Template identifier
    pub fn template(&self) -> &'static str {
        match self {
            Page::Index(_) => "index",
            Page::AuthorList(_) => "author_list",
            Page::AuthorDetail { .. } => "author_detail",
            Page::AuthorForm { .. } => "author_form",
            Page::AuthorDelete { .. } => "author_delete",
            Page::GenreList(_) => "genre_list",
            Page::GenreDetail { .. } => "genre_detail",
            Page::GenreForm { .. } => "genre_form",
            Page::GenreDelete { .. } => "genre_delete",
            Page::BookList(_) => "book_list",
            Page::BookDetail { .. } => "book_detail",
            Page::BookForm { .. } => "book_form",
            Page::BookDelete { .. } => "book_delete",
            Page::BookInstanceList(_) => "bookinstance_list",
            Page::BookInstanceDetail(_) => "bookinstance_detail",
            Page::BookInstanceForm { .. } => "bookinstance_form",
            Page::BookInstanceDelete(_) => "bookinstance_delete",
        }
    }

    /// Field errors attached to a form page
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Page::AuthorForm { errors, .. }
            | Page::GenreForm { errors, .. }
            | Page::BookForm { errors, .. }
            | Page::BookInstanceForm { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// A page to render: its title and template data
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub title: String,
    pub page: Page,
}

impl View {
    pub fn new(title: impl Into<String>, page: Page) -> Self {
        Self {
            title: title.into(),
            page,
        }
    }

    pub fn template(&self) -> &'static str {
        self.page.template()
    }
}

/// Turns a view into a response body
pub trait Renderer: Send + Sync {
    fn render(&self, view: &View) -> AppResult<String>;
}

/// maud-backed HTML renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, view: &View) -> AppResult<String> {
        tracing::trace!(template = view.template(), "rendering");
        Ok(pages::render(view).into_string())
    }
}

/// Standalone error page
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    pages::error(status, message)
}
