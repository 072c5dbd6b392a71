//! Catalog workflows driven through the controllers over an in-memory store

use std::sync::Arc;

use chrono::NaiveDate;

use local_library::{
    controllers::{Controllers, Outcome},
    models::{Author, Book, BookInstance, BookStatus, Genre},
    repository::Repository,
    store::{Filter, MemoryStore, RecordId},
    validation::RawForm,
    views::Page,
    AppError,
};

struct Harness {
    repository: Repository,
    controllers: Controllers,
}

fn harness() -> Harness {
    let repository = Repository::new(Arc::new(MemoryStore::new()));
    Harness {
        controllers: Controllers::new(repository.clone()),
        repository,
    }
}

fn redirect_location(outcome: Outcome) -> String {
    match outcome {
        Outcome::Redirect(location) => location,
        Outcome::Render(view) => panic!("expected redirect, got {}", view.template()),
    }
}

fn rendered_page(outcome: Outcome) -> Page {
    match outcome {
        Outcome::Render(view) => view.page,
        Outcome::Redirect(location) => panic!("expected page, got redirect to {}", location),
    }
}

async fn seed_author(h: &Harness, first: &str, family: &str) -> Author {
    let author = Author {
        id: RecordId::generate(),
        first_name: first.to_string(),
        family_name: family.to_string(),
        date_of_birth: None,
        date_of_death: None,
    };
    h.repository.insert(&author).await.unwrap();
    author
}

async fn seed_genre(h: &Harness, name: &str) -> Genre {
    let genre = Genre {
        id: RecordId::generate(),
        name: name.to_string(),
    };
    h.repository.insert(&genre).await.unwrap();
    genre
}

async fn seed_book(h: &Harness, title: &str, author: &Author, genres: &[&Genre]) -> Book {
    let book = Book {
        id: RecordId::generate(),
        title: title.to_string(),
        author: author.id.clone(),
        summary: "A summary".to_string(),
        isbn: "9780000000000".to_string(),
        genre: genres.iter().map(|g| g.id.clone()).collect(),
    };
    h.repository.insert(&book).await.unwrap();
    book
}

async fn seed_instance(h: &Harness, book: &Book, status: BookStatus) -> BookInstance {
    let instance = BookInstance {
        id: RecordId::generate(),
        book: book.id.clone(),
        imprint: "First edition".to_string(),
        status,
        due_back: None,
    };
    h.repository.insert(&instance).await.unwrap();
    instance
}

#[tokio::test]
async fn test_genre_create_reuses_existing_name() {
    let h = harness();

    let first = h
        .controllers
        .genres
        .create_submit(RawForm::new().with("name", "Fantasy"))
        .await
        .unwrap();
    let first = redirect_location(first);

    let second = h
        .controllers
        .genres
        .create_submit(RawForm::new().with("name", "  Fantasy "))
        .await
        .unwrap();

    assert_eq!(redirect_location(second), first);
    assert_eq!(h.repository.count::<Genre>(Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_genre_create_too_short_is_rejected() {
    let h = harness();

    let outcome = h
        .controllers
        .genres
        .create_submit(RawForm::new().with("name", "Sf"))
        .await
        .unwrap();

    let page = rendered_page(outcome);
    assert_eq!(page.errors().len(), 1);
    assert_eq!(
        page.errors()[0].message,
        "Genre name must be between 3 and 100 characters."
    );
    assert_eq!(h.repository.count::<Genre>(Filter::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_book_with_empty_title_is_not_persisted() {
    let h = harness();
    let author = seed_author(&h, "Ursula", "LeGuin").await;

    let form = RawForm::new()
        .with("title", "   ")
        .with("author", author.id.as_str())
        .with("summary", "Islands and wizards")
        .with("isbn", "9780553383041");
    let outcome = h.controllers.books.create_submit(form).await.unwrap();

    let page = rendered_page(outcome);
    let messages: Vec<&str> = page.errors().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Title must not be empty."]);
    assert_eq!(h.repository.count::<Book>(Filter::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_book_invalid_form_keeps_genre_selection() {
    let h = harness();
    let author = seed_author(&h, "Ursula", "LeGuin").await;
    let fantasy = seed_genre(&h, "Fantasy").await;
    let poetry = seed_genre(&h, "Poetry").await;

    let form = RawForm::new()
        .with("title", "")
        .with("author", author.id.as_str())
        .with("summary", "")
        .with("isbn", "")
        .with("genre", fantasy.id.as_str());
    let outcome = h.controllers.books.create_submit(form).await.unwrap();

    let Page::BookForm {
        authors,
        genres,
        errors,
        ..
    } = rendered_page(outcome)
    else {
        panic!("expected the book form");
    };
    assert_eq!(authors.len(), 1);
    assert_eq!(errors.len(), 3);
    let checked: Vec<(&str, bool)> = genres
        .iter()
        .map(|choice| (choice.genre.name.as_str(), choice.checked))
        .collect();
    assert_eq!(checked, vec![("Fantasy", true), ("Poetry", false)]);
    assert_ne!(fantasy.id, poetry.id);
}

#[tokio::test]
async fn test_author_create_persists_and_redirects() {
    let h = harness();

    let form = RawForm::new()
        .with("first_name", "Isaac")
        .with("family_name", "Asimov")
        .with("date_of_birth", "1920-01-02")
        .with("date_of_death", "1992-04-06");
    let outcome = h.controllers.authors.create_submit(form).await.unwrap();
    let location = redirect_location(outcome);

    let authors = h.repository.authors_list().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(location, authors[0].url());
    assert_eq!(authors[0].name(), "Asimov, Isaac");
    assert_eq!(authors[0].lifespan(), "1920-01-02 - 1992-04-06");
}

#[tokio::test]
async fn test_author_invalid_date_reports_message() {
    let h = harness();

    let form = RawForm::new()
        .with("first_name", "Isaac")
        .with("family_name", "Asimov")
        .with("date_of_birth", "not a date");
    let outcome = h.controllers.authors.create_submit(form).await.unwrap();

    let page = rendered_page(outcome);
    assert_eq!(page.errors().len(), 1);
    assert_eq!(page.errors()[0].field, "date_of_birth");
    assert_eq!(page.errors()[0].message, "Invalid date of birth");
    assert_eq!(h.repository.count::<Author>(Filter::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_genre_update_keeps_id() {
    let h = harness();
    let genre = seed_genre(&h, "Sci Fi").await;

    let outcome = h
        .controllers
        .genres
        .update_submit(&genre.id, RawForm::new().with("name", "Science Fiction"))
        .await
        .unwrap();
    assert_eq!(redirect_location(outcome), genre.url());

    let detail = h.controllers.genres.detail(&genre.id).await.unwrap();
    let Page::GenreDetail { genre: shown, books } = rendered_page(detail) else {
        panic!("expected genre detail");
    };
    assert_eq!(shown.id, genre.id);
    assert_eq!(shown.name, "Science Fiction");
    assert!(books.is_empty());
    assert_eq!(h.repository.count::<Genre>(Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_of_missing_record_is_not_found() {
    let h = harness();

    let result = h
        .controllers
        .genres
        .update_submit(&RecordId::from("missing"), RawForm::new().with("name", "Poetry"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(h.repository.count::<Genre>(Filter::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_author_delete_refused_while_books_exist() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    seed_book(&h, "Dune", &author, &[]).await;

    let outcome = h.controllers.authors.delete_submit(&author.id).await.unwrap();

    let Page::AuthorDelete { author: shown, books } = rendered_page(outcome) else {
        panic!("expected the delete page");
    };
    assert_eq!(shown.id, author.id);
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert!(h.repository.authors_get_by_id(&author.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_author_delete_without_books() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;

    let outcome = h.controllers.authors.delete_submit(&author.id).await.unwrap();
    assert_eq!(redirect_location(outcome), "/catalog/authors");

    let result = h.controllers.authors.detail(&author.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_form_of_missing_record_redirects() {
    let h = harness();

    let outcome = h
        .controllers
        .books
        .delete_form(&RecordId::from("missing"))
        .await
        .unwrap();

    assert_eq!(redirect_location(outcome), "/catalog/books");
}

#[tokio::test]
async fn test_genre_delete_refused_while_books_exist() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let genre = seed_genre(&h, "Science Fiction").await;
    seed_book(&h, "Dune", &author, &[&genre]).await;

    let outcome = h.controllers.genres.delete_submit(&genre.id).await.unwrap();

    assert!(matches!(rendered_page(outcome), Page::GenreDelete { .. }));
    assert_eq!(h.repository.count::<Genre>(Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_delete_refused_while_copies_exist() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let book = seed_book(&h, "Dune", &author, &[]).await;
    seed_instance(&h, &book, BookStatus::Loaned).await;

    let outcome = h.controllers.books.delete_submit(&book.id).await.unwrap();

    let Page::BookDelete { book: shown, instances } = rendered_page(outcome) else {
        panic!("expected the delete page");
    };
    assert_eq!(shown.book.id, book.id);
    assert_eq!(instances.len(), 1);
    assert_eq!(h.repository.count::<Book>(Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_instance_delete_is_unconditional() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let book = seed_book(&h, "Dune", &author, &[]).await;
    let instance = seed_instance(&h, &book, BookStatus::Available).await;

    let outcome = h
        .controllers
        .book_instances
        .delete_submit(&instance.id)
        .await
        .unwrap();

    assert_eq!(redirect_location(outcome), "/catalog/bookinstances");
    assert_eq!(
        h.repository.count::<BookInstance>(Filter::new()).await.unwrap(),
        0
    );
    assert_eq!(h.repository.count::<Book>(Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_instance_empty_status_defaults_to_maintenance() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let book = seed_book(&h, "Dune", &author, &[]).await;

    let form = RawForm::new()
        .with("book", book.id.as_str())
        .with("imprint", "Chilton Books, 1965")
        .with("status", "")
        .with("due_back", "");
    let outcome = h
        .controllers
        .book_instances
        .create_submit(form)
        .await
        .unwrap();
    redirect_location(outcome);

    let instances = h.repository.book_instances_list().await.unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].status, BookStatus::Maintenance);
    assert_eq!(instances[0].due_back, None);
}

#[tokio::test]
async fn test_book_instance_unknown_status_is_rejected() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let book = seed_book(&h, "Dune", &author, &[]).await;

    let form = RawForm::new()
        .with("book", book.id.as_str())
        .with("imprint", "Chilton Books, 1965")
        .with("status", "Lost");
    let outcome = h
        .controllers
        .book_instances
        .update_submit(&RecordId::generate(), form)
        .await
        .unwrap();

    let Page::BookInstanceForm {
        selected_book,
        books,
        errors,
        ..
    } = rendered_page(outcome)
    else {
        panic!("expected the copy form");
    };
    assert_eq!(selected_book, Some(book.id.clone()));
    assert_eq!(books.len(), 1);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Invalid status");
}

#[tokio::test]
async fn test_book_detail_resolves_references() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let genre = seed_genre(&h, "Science Fiction").await;
    let book = seed_book(&h, "Dune", &author, &[&genre]).await;
    seed_instance(&h, &book, BookStatus::Available).await;
    seed_instance(&h, &book, BookStatus::Reserved).await;

    let outcome = h.controllers.books.detail(&book.id).await.unwrap();

    let Page::BookDetail { book: shown, instances } = rendered_page(outcome) else {
        panic!("expected book detail");
    };
    assert_eq!(shown.author.map(|a| a.id), Some(author.id));
    assert_eq!(shown.genres, vec![genre]);
    assert_eq!(instances.len(), 2);
}

#[tokio::test]
async fn test_index_counts_records() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let genre = seed_genre(&h, "Science Fiction").await;
    let book = seed_book(&h, "Dune", &author, &[&genre]).await;
    seed_instance(&h, &book, BookStatus::Available).await;
    seed_instance(&h, &book, BookStatus::Loaned).await;

    let counts = h.controllers.catalog.counts().await.unwrap();

    assert_eq!(counts.books, 1);
    assert_eq!(counts.book_instances, 2);
    assert_eq!(counts.book_instances_available, 1);
    assert_eq!(counts.authors, 1);
    assert_eq!(counts.genres, 1);
}

#[tokio::test]
async fn test_detail_of_missing_record_is_not_found() {
    let h = harness();
    let missing = RecordId::from("missing");

    assert!(matches!(
        h.controllers.authors.detail(&missing).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        h.controllers.books.detail(&missing).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        h.controllers.book_instances.detail(&missing).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_author_birth_year_only_is_accepted() {
    let h = harness();

    let form = RawForm::new()
        .with("first_name", "Isaac")
        .with("family_name", "Asimov")
        .with("date_of_birth", "1920")
        .with("date_of_death", "1992-04");
    let outcome = h.controllers.authors.create_submit(form).await.unwrap();
    redirect_location(outcome);

    let authors = h.repository.authors_list().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].date_of_birth, NaiveDate::from_ymd_opt(1920, 1, 1));
    assert_eq!(authors[0].date_of_death, NaiveDate::from_ymd_opt(1992, 4, 1));
}

#[tokio::test]
async fn test_author_update_replaces_every_field() {
    let h = harness();
    let author = Author {
        id: RecordId::generate(),
        first_name: "Isaac".to_string(),
        family_name: "Asimov".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1920, 1, 2),
        date_of_death: NaiveDate::from_ymd_opt(1992, 4, 6),
    };
    h.repository.insert(&author).await.unwrap();

    let form = RawForm::new()
        .with("first_name", "Isaak")
        .with("family_name", "Asimov")
        .with("date_of_birth", "1920-01-02");
    let outcome = h
        .controllers
        .authors
        .update_submit(&author.id, form)
        .await
        .unwrap();
    assert_eq!(redirect_location(outcome), author.url());

    let detail = h.controllers.authors.detail(&author.id).await.unwrap();
    let Page::AuthorDetail { author: shown, .. } = rendered_page(detail) else {
        panic!("expected author detail");
    };
    assert_eq!(
        shown,
        Author {
            first_name: "Isaak".to_string(),
            date_of_death: None,
            ..author
        }
    );
}

#[tokio::test]
async fn test_book_update_without_genres_clears_them() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let fantasy = seed_genre(&h, "Fantasy").await;
    let poetry = seed_genre(&h, "Poetry").await;
    let book = seed_book(&h, "Dune", &author, &[&fantasy, &poetry]).await;

    let form = RawForm::new()
        .with("title", "Dune Messiah")
        .with("author", author.id.as_str())
        .with("summary", "The sequel")
        .with("isbn", "9780593098233");
    let outcome = h
        .controllers
        .books
        .update_submit(&book.id, form)
        .await
        .unwrap();
    assert_eq!(redirect_location(outcome), book.url());

    let detail = h.controllers.books.detail(&book.id).await.unwrap();
    let Page::BookDetail { book: shown, .. } = rendered_page(detail) else {
        panic!("expected book detail");
    };
    assert_eq!(shown.book.id, book.id);
    assert_eq!(shown.book.title, "Dune Messiah");
    assert_eq!(shown.book.summary, "The sequel");
    assert_eq!(shown.book.isbn, "9780593098233");
    assert!(shown.book.genre.is_empty());
    assert!(shown.genres.is_empty());
    assert_eq!(h.repository.count::<Book>(Filter::new()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_instance_update_round_trip() {
    let h = harness();
    let author = seed_author(&h, "Frank", "Herbert").await;
    let book = seed_book(&h, "Dune", &author, &[]).await;
    let instance = seed_instance(&h, &book, BookStatus::Available).await;

    let form = RawForm::new()
        .with("book", book.id.as_str())
        .with("imprint", "Ace Books, 1990")
        .with("status", "Loaned")
        .with("due_back", "2024-06-01");
    let outcome = h
        .controllers
        .book_instances
        .update_submit(&instance.id, form)
        .await
        .unwrap();
    assert_eq!(redirect_location(outcome), instance.url());

    let detail = h
        .controllers
        .book_instances
        .detail(&instance.id)
        .await
        .unwrap();
    let Page::BookInstanceDetail(shown) = rendered_page(detail) else {
        panic!("expected copy detail");
    };
    assert_eq!(
        shown.instance,
        BookInstance {
            id: instance.id.clone(),
            book: book.id.clone(),
            imprint: "Ace Books, 1990".to_string(),
            status: BookStatus::Loaned,
            due_back: NaiveDate::from_ymd_opt(2024, 6, 1),
        }
    );
    assert_eq!(shown.book.map(|b| b.title), Some("Dune".to_string()));
    assert_eq!(
        h.repository.count::<BookInstance>(Filter::new()).await.unwrap(),
        1
    );
}
