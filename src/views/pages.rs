//! maud templates, one function per template

use axum::http::StatusCode;
use maud::{html, Markup};

use super::layout::{base_document, error_list};
use super::{CatalogCounts, Page, View};
use crate::controllers::joins::{BookListing, GenreChoice, PopulatedBook, PopulatedInstance};
use crate::models::{Author, Book, BookInstance, BookStatus, Genre};
use crate::store::RecordId;
use crate::validation::FieldError;

pub fn render(view: &View) -> Markup {
    let content = match &view.page {
        Page::Index(counts) => index(counts),
        Page::AuthorList(authors) => author_list(authors),
        Page::AuthorDetail { author, books } => author_detail(author, books),
        Page::AuthorForm { author, errors } => author_form(author.as_ref(), errors),
        Page::AuthorDelete { author, books } => author_delete(author, books),
        Page::GenreList(genres) => genre_list(genres),
        Page::GenreDetail { genre, books } => genre_detail(genre, books),
        Page::GenreForm { genre, errors } => genre_form(genre.as_ref(), errors),
        Page::GenreDelete { genre, books } => genre_delete(genre, books),
        Page::BookList(books) => book_list(books),
        Page::BookDetail { book, instances } => book_detail(book, instances),
        Page::BookForm {
            book,
            authors,
            genres,
            errors,
        } => book_form(book.as_ref(), authors, genres, errors),
        Page::BookDelete { book, instances } => book_delete(book, instances),
        Page::BookInstanceList(instances) => bookinstance_list(instances),
        Page::BookInstanceDetail(instance) => bookinstance_detail(instance),
        Page::BookInstanceForm {
            instance,
            books,
            selected_book,
            errors,
        } => bookinstance_form(instance.as_ref(), books, selected_book.as_ref(), errors),
        Page::BookInstanceDelete(instance) => bookinstance_delete(instance),
    };
    base_document(&view.title, content)
}

pub fn error(status: StatusCode, message: &str) -> Markup {
    base_document(
        status.canonical_reason().unwrap_or("Error"),
        html! {
            h2 { (status.as_u16()) }
            p { (message) }
        },
    )
}

fn index(counts: &CatalogCounts) -> Markup {
    html! {
        p { "Welcome to " em { "LocalLibrary" } ", a small catalog of books, authors and copies." }
        h2 { "Dynamic content" }
        p { "The library has the following record counts:" }
        ul {
            li { strong { "Books: " } (counts.books) }
            li { strong { "Copies: " } (counts.book_instances) }
            li { strong { "Copies available: " } (counts.book_instances_available) }
            li { strong { "Authors: " } (counts.authors) }
            li { strong { "Genres: " } (counts.genres) }
        }
    }
}

fn status_class(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Available => "text-success",
        BookStatus::Maintenance => "text-danger",
        BookStatus::Loaned | BookStatus::Reserved => "text-warning",
    }
}

fn book_titles(books: &[Book], empty: &str) -> Markup {
    html! {
        @if books.is_empty() {
            p { (empty) }
        } @else {
            dl {
                @for book in books {
                    dt { a href=(book.url()) { (book.title) } }
                    @if !book.summary.is_empty() {
                        dd { (book.summary) }
                    }
                }
            }
        }
    }
}

fn copy_rows(instances: &[BookInstance]) -> Markup {
    html! {
        @for copy in instances {
            hr;
            p class=(status_class(copy.status)) { (copy.status.as_str()) }
            p { strong { "Imprint: " } (copy.imprint) }
            @if copy.status != BookStatus::Available {
                p { strong { "Due back: " } (copy.due_back_formatted()) }
            }
            p { strong { "Id: " } a href=(copy.url()) { (copy.id.as_str()) } }
        }
    }
}

fn delete_button(label: &str, id: &RecordId) -> Markup {
    html! {
        form method="POST" action="" {
            input type="hidden" name="id" value=(id.as_str());
            button type="submit" { (label) }
        }
    }
}

fn author_list(authors: &[Author]) -> Markup {
    html! {
        ul {
            @for author in authors {
                li {
                    a href=(author.url()) { (author.name()) }
                    " (" (author.lifespan()) ")"
                }
            }
            @if authors.is_empty() {
                li { "There are no authors." }
            }
        }
    }
}

fn author_detail(author: &Author, books: &[Book]) -> Markup {
    html! {
        h2 { (author.name()) }
        p { (author.lifespan()) }
        h3 { "Books" }
        (book_titles(books, "This author has no books."))
        hr;
        p { a href={ (author.url()) "/delete" } { "Delete author" } }
        p { a href={ (author.url()) "/update" } { "Update author" } }
    }
}

fn author_form(author: Option<&Author>, errors: &[FieldError]) -> Markup {
    let first_name = author.map(|a| a.first_name.as_str()).unwrap_or("");
    let family_name = author.map(|a| a.family_name.as_str()).unwrap_or("");
    let born = author.map(Author::date_of_birth_formatted).unwrap_or_default();
    let died = author.map(Author::date_of_death_formatted).unwrap_or_default();
    html! {
        (error_list(errors))
        form method="POST" action="" {
            label for="first_name" { "First name:" }
            input id="first_name" type="text" name="first_name" placeholder="First name" value=(first_name);
            label for="family_name" { "Family name:" }
            input id="family_name" type="text" name="family_name" placeholder="Family name" value=(family_name);
            label for="date_of_birth" { "Date of birth:" }
            input id="date_of_birth" type="date" name="date_of_birth" value=(born);
            label for="date_of_death" { "Date of death:" }
            input id="date_of_death" type="date" name="date_of_death" value=(died);
            p { button type="submit" { "Submit" } }
        }
    }
}

fn author_delete(author: &Author, books: &[Book]) -> Markup {
    html! {
        h2 { (author.name()) }
        p { (author.lifespan()) }
        @if books.is_empty() {
            p { "Do you really want to delete this author?" }
            (delete_button("Delete", &author.id))
        } @else {
            p { strong { "Delete the following books before attempting to delete this author." } }
            (book_titles(books, ""))
        }
    }
}

fn genre_list(genres: &[Genre]) -> Markup {
    html! {
        ul {
            @for genre in genres {
                li { a href=(genre.url()) { (genre.name) } }
            }
            @if genres.is_empty() {
                li { "There are no genres." }
            }
        }
    }
}

fn genre_detail(genre: &Genre, books: &[Book]) -> Markup {
    html! {
        h2 { "Genre: " (genre.name) }
        h3 { "Books" }
        (book_titles(books, "This genre has no books."))
        hr;
        p { a href={ (genre.url()) "/delete" } { "Delete genre" } }
        p { a href={ (genre.url()) "/update" } { "Update genre" } }
    }
}

fn genre_form(genre: Option<&Genre>, errors: &[FieldError]) -> Markup {
    let name = genre.map(|g| g.name.as_str()).unwrap_or("");
    html! {
        (error_list(errors))
        form method="POST" action="" {
            label for="name" { "Genre:" }
            input id="name" type="text" name="name" placeholder="Fantasy, Poetry etc." value=(name);
            p { button type="submit" { "Submit" } }
        }
    }
}

fn genre_delete(genre: &Genre, books: &[Book]) -> Markup {
    html! {
        h2 { (genre.name) }
        @if books.is_empty() {
            p { "Do you really want to delete this genre?" }
            (delete_button("Delete", &genre.id))
        } @else {
            p { strong { "Delete the following books before attempting to delete this genre." } }
            (book_titles(books, ""))
        }
    }
}

fn book_list(books: &[BookListing]) -> Markup {
    html! {
        ul {
            @for listing in books {
                li {
                    a href=(listing.book.url()) { (listing.book.title) }
                    @if let Some(author) = &listing.author {
                        " (" (author.name()) ")"
                    }
                }
            }
            @if books.is_empty() {
                li { "There are no books." }
            }
        }
    }
}

fn book_summary(populated: &PopulatedBook) -> Markup {
    let book = &populated.book;
    html! {
        h2 { "Title: " (book.title) }
        p {
            strong { "Author: " }
            @if let Some(author) = &populated.author {
                a href=(author.url()) { (author.name()) }
            }
        }
        p { strong { "Summary: " } (book.summary) }
        p { strong { "ISBN: " } (book.isbn) }
        p {
            strong { "Genre: " }
            @for (i, genre) in populated.genres.iter().enumerate() {
                @if i > 0 { ", " }
                a href=(genre.url()) { (genre.name) }
            }
        }
    }
}

fn book_detail(populated: &PopulatedBook, instances: &[BookInstance]) -> Markup {
    let book = &populated.book;
    html! {
        (book_summary(populated))
        h3 { "Copies" }
        @if instances.is_empty() {
            p { "There are no copies of this book in the library." }
        }
        (copy_rows(instances))
        hr;
        p { a href={ (book.url()) "/delete" } { "Delete book" } }
        p { a href={ (book.url()) "/update" } { "Update book" } }
    }
}

fn book_form(
    book: Option<&Book>,
    authors: &[Author],
    genres: &[GenreChoice],
    errors: &[FieldError],
) -> Markup {
    let title = book.map(|b| b.title.as_str()).unwrap_or("");
    let summary = book.map(|b| b.summary.as_str()).unwrap_or("");
    let isbn = book.map(|b| b.isbn.as_str()).unwrap_or("");
    let selected_author = book.map(|b| &b.author);
    html! {
        (error_list(errors))
        form method="POST" action="" {
            label for="title" { "Title:" }
            input id="title" type="text" name="title" placeholder="Name of book" value=(title);
            label for="author" { "Author:" }
            select id="author" name="author" {
                option value="" { "-- select an author --" }
                @for author in authors {
                    option value=(author.id.as_str()) selected[selected_author == Some(&author.id)] {
                        (author.name())
                    }
                }
            }
            label for="summary" { "Summary:" }
            textarea id="summary" name="summary" placeholder="Summary" { (summary) }
            label for="isbn" { "ISBN:" }
            input id="isbn" type="text" name="isbn" placeholder="ISBN13" value=(isbn);
            label { "Genre:" }
            div {
                @for choice in genres {
                    @let input_id = format!("genre-{}", choice.genre.id);
                    input type="checkbox" name="genre" id=(input_id) value=(choice.genre.id.as_str()) checked[choice.checked];
                    label for=(input_id) { (choice.genre.name) }
                }
            }
            p { button type="submit" { "Submit" } }
        }
    }
}

fn book_delete(populated: &PopulatedBook, instances: &[BookInstance]) -> Markup {
    html! {
        (book_summary(populated))
        @if instances.is_empty() {
            p { "Do you really want to delete this book?" }
            (delete_button("Delete", &populated.book.id))
        } @else {
            p { strong { "Delete the following copies before attempting to delete this book." } }
            (copy_rows(instances))
        }
    }
}

fn instance_title(populated: &PopulatedInstance) -> Markup {
    html! {
        @match &populated.book {
            Some(book) => {
                a href=(book.url()) { (book.title) }
            }
            None => {
                em { "Unknown book" }
            }
        }
    }
}

fn bookinstance_list(instances: &[PopulatedInstance]) -> Markup {
    html! {
        ul {
            @for populated in instances {
                @let copy = &populated.instance;
                li {
                    a href=(copy.url()) { (instance_title(populated)) " : " (copy.imprint) }
                    " - "
                    span class=(status_class(copy.status)) { (copy.status.as_str()) }
                    @if copy.status != BookStatus::Available {
                        span { " (Due: " (copy.due_back_formatted()) ")" }
                    }
                }
            }
            @if instances.is_empty() {
                li { "There are no book copies in this library." }
            }
        }
    }
}

fn bookinstance_summary(populated: &PopulatedInstance) -> Markup {
    let copy = &populated.instance;
    html! {
        h2 { "ID: " (copy.id.as_str()) }
        p { strong { "Title: " } (instance_title(populated)) }
        p { strong { "Imprint: " } (copy.imprint) }
        p {
            strong { "Status: " }
            span class=(status_class(copy.status)) { (copy.status.as_str()) }
        }
        @if copy.status != BookStatus::Available {
            p { strong { "Due back: " } (copy.due_back_formatted()) }
        }
    }
}

fn bookinstance_detail(populated: &PopulatedInstance) -> Markup {
    let copy = &populated.instance;
    html! {
        (bookinstance_summary(populated))
        hr;
        p { a href={ (copy.url()) "/delete" } { "Delete book instance" } }
        p { a href={ (copy.url()) "/update" } { "Update book instance" } }
    }
}

fn bookinstance_form(
    instance: Option<&BookInstance>,
    books: &[Book],
    selected_book: Option<&RecordId>,
    errors: &[FieldError],
) -> Markup {
    let imprint = instance.map(|i| i.imprint.as_str()).unwrap_or("");
    let due_back = instance.map(BookInstance::due_back_formatted).unwrap_or_default();
    let status = instance.map(|i| i.status).unwrap_or_default();
    html! {
        (error_list(errors))
        form method="POST" action="" {
            label for="book" { "Book:" }
            select id="book" name="book" {
                option value="" { "-- select a book --" }
                @for book in books {
                    option value=(book.id.as_str()) selected[selected_book == Some(&book.id)] { (book.title) }
                }
            }
            label for="imprint" { "Imprint:" }
            input id="imprint" type="text" name="imprint" placeholder="Publisher and date information" value=(imprint);
            label for="due_back" { "Date when book available:" }
            input id="due_back" type="date" name="due_back" value=(due_back);
            label for="status" { "Status:" }
            select id="status" name="status" {
                @for choice in BookStatus::ALL {
                    option value=(choice.as_str()) selected[choice == status] { (choice.as_str()) }
                }
            }
            p { button type="submit" { "Submit" } }
        }
    }
}

fn bookinstance_delete(populated: &PopulatedInstance) -> Markup {
    html! {
        (bookinstance_summary(populated))
        p { "Do you really want to delete this book instance?" }
        (delete_button("Delete", &populated.instance.id))
    }
}
