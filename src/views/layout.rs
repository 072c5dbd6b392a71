//! Page chrome shared by every template

use maud::{html, Markup, DOCTYPE};

use crate::validation::FieldError;

const CSS: &str = "\
body { font-family: sans-serif; margin: 0; display: flex; }\
.sidebar { min-width: 14rem; padding: 1rem; background: #f4f4f4; }\
.sidebar ul { list-style: none; padding: 0; }\
main { padding: 1rem 2rem; flex: 1; }\
.errors { color: #a00; }\
.text-success { color: #070; }\
.text-danger { color: #a00; }\
.text-warning { color: #a60; }\
label { display: block; margin-top: .6rem; }";

/// Renders the base HTML document structure
pub fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (sidebar())
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

fn sidebar() -> Markup {
    html! {
        nav.sidebar {
            ul {
                li { a href="/catalog" { "Home" } }
                li { a href="/catalog/books" { "All books" } }
                li { a href="/catalog/authors" { "All authors" } }
                li { a href="/catalog/genres" { "All genres" } }
                li { a href="/catalog/bookinstances" { "All book-instances" } }
            }
            hr;
            ul {
                li { a href="/catalog/author/create" { "Create new author" } }
                li { a href="/catalog/genre/create" { "Create new genre" } }
                li { a href="/catalog/book/create" { "Create new book" } }
                li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
            }
        }
    }
}

/// Error messages above a form
pub fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors {
                @for error in errors {
                    li { (error.message) }
                }
            }
        }
    }
}
