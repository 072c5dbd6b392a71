//! Reference resolution for display.
//!
//! Records keep only the ids of what they reference. These helpers run after
//! the primary fetch and pair each record with the records it points at.

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, Genre},
    repository::Repository,
    store::RecordId,
};

/// Book with its author and genres resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedBook {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

/// Row of the book list
#[derive(Debug, Clone, PartialEq)]
pub struct BookListing {
    pub book: Book,
    pub author: Option<Author>,
}

/// Copy with its book resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedInstance {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// Genre checkbox on the book form
#[derive(Debug, Clone, PartialEq)]
pub struct GenreChoice {
    pub genre: Genre,
    pub checked: bool,
}

pub async fn populate_book(repository: &Repository, book: Book) -> AppResult<PopulatedBook> {
    let (author, mut genres) = tokio::try_join!(
        repository.authors_get_by_id(&book.author),
        repository.find_many::<Genre, _>(&book.genre),
    )?;
    // Keep the order in which the book lists its genres
    let genres = book.genre.iter().filter_map(|id| genres.remove(id)).collect();
    Ok(PopulatedBook {
        book,
        author,
        genres,
    })
}

pub async fn populate_book_authors(
    repository: &Repository,
    books: Vec<Book>,
) -> AppResult<Vec<BookListing>> {
    let authors = repository
        .find_many::<Author, _>(books.iter().map(|b| &b.author))
        .await?;
    Ok(books
        .into_iter()
        .map(|book| {
            let author = authors.get(&book.author).cloned();
            BookListing { book, author }
        })
        .collect())
}

pub async fn populate_instance(
    repository: &Repository,
    instance: BookInstance,
) -> AppResult<PopulatedInstance> {
    let book = repository.books_get_by_id(&instance.book).await?;
    Ok(PopulatedInstance { instance, book })
}

pub async fn populate_instances(
    repository: &Repository,
    instances: Vec<BookInstance>,
) -> AppResult<Vec<PopulatedInstance>> {
    let books = repository
        .find_many::<Book, _>(instances.iter().map(|i| &i.book))
        .await?;
    Ok(instances
        .into_iter()
        .map(|instance| {
            let book = books.get(&instance.book).cloned();
            PopulatedInstance { instance, book }
        })
        .collect())
}

/// Mark the genres present in `selected`
pub fn mark_genres(genres: Vec<Genre>, selected: &[RecordId]) -> Vec<GenreChoice> {
    genres
        .into_iter()
        .map(|genre| {
            let checked = selected.contains(&genre.id);
            GenreChoice { genre, checked }
        })
        .collect()
}
