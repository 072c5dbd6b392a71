//! Rule tables for the catalog forms

use super::{Check, CheckKind, CleanForm, FormEntity, FormRules, SanitizeRule, Sanitizer};
use crate::models::{Author, Book, BookInstance, BookStatus, Genre};
use crate::store::RecordId;

const TRIM_ESCAPE: &[Sanitizer] = &[Sanitizer::Trim, Sanitizer::Escape];
const TO_DATE: &[Sanitizer] = &[Sanitizer::Trim, Sanitizer::ToDate];

pub const AUTHOR: FormRules = FormRules {
    checks: &[
        Check {
            field: "first_name",
            kind: CheckKind::NonEmpty,
            message: "First name must be specified.",
        },
        Check {
            field: "first_name",
            kind: CheckKind::Length { min: 1, max: 100 },
            message: "First name must be at most 100 characters.",
        },
        Check {
            field: "first_name",
            kind: CheckKind::Alphanumeric,
            message: "First name has non-alphanumeric characters.",
        },
        Check {
            field: "family_name",
            kind: CheckKind::NonEmpty,
            message: "Family name must be specified.",
        },
        Check {
            field: "family_name",
            kind: CheckKind::Length { min: 1, max: 100 },
            message: "Family name must be at most 100 characters.",
        },
        Check {
            field: "family_name",
            kind: CheckKind::Alphanumeric,
            message: "Family name has non-alphanumeric characters.",
        },
        Check {
            field: "date_of_birth",
            kind: CheckKind::OptionalIsoDate,
            message: "Invalid date of birth",
        },
        Check {
            field: "date_of_death",
            kind: CheckKind::OptionalIsoDate,
            message: "Invalid date of death",
        },
    ],
    sanitizers: &[
        SanitizeRule {
            field: "first_name",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "family_name",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "date_of_birth",
            steps: TO_DATE,
        },
        SanitizeRule {
            field: "date_of_death",
            steps: TO_DATE,
        },
    ],
};

pub const GENRE: FormRules = FormRules {
    checks: &[
        Check {
            field: "name",
            kind: CheckKind::NonEmpty,
            message: "Genre name required",
        },
        Check {
            field: "name",
            kind: CheckKind::Length { min: 3, max: 100 },
            message: "Genre name must be between 3 and 100 characters.",
        },
    ],
    sanitizers: &[SanitizeRule {
        field: "name",
        steps: TRIM_ESCAPE,
    }],
};

pub const BOOK: FormRules = FormRules {
    checks: &[
        Check {
            field: "title",
            kind: CheckKind::NonEmpty,
            message: "Title must not be empty.",
        },
        Check {
            field: "author",
            kind: CheckKind::NonEmpty,
            message: "Author must not be empty.",
        },
        Check {
            field: "summary",
            kind: CheckKind::NonEmpty,
            message: "Summary must not be empty.",
        },
        Check {
            field: "isbn",
            kind: CheckKind::NonEmpty,
            message: "ISBN must not be empty.",
        },
    ],
    sanitizers: &[
        SanitizeRule {
            field: "title",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "author",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "summary",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "isbn",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "genre",
            steps: &[Sanitizer::ToList, Sanitizer::Trim, Sanitizer::Escape],
        },
    ],
};

pub const BOOK_INSTANCE: FormRules = FormRules {
    checks: &[
        Check {
            field: "book",
            kind: CheckKind::NonEmpty,
            message: "Book must be specified",
        },
        Check {
            field: "imprint",
            kind: CheckKind::NonEmpty,
            message: "Imprint must be specified",
        },
        Check {
            field: "due_back",
            kind: CheckKind::OptionalIsoDate,
            message: "Invalid date",
        },
        Check {
            field: "status",
            kind: CheckKind::OptionalOneOf(BookStatus::NAMES),
            message: "Invalid status",
        },
    ],
    sanitizers: &[
        SanitizeRule {
            field: "book",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "imprint",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "status",
            steps: TRIM_ESCAPE,
        },
        SanitizeRule {
            field: "due_back",
            steps: TO_DATE,
        },
    ],
};

impl FormEntity for Author {
    const RULES: FormRules = AUTHOR;

    fn from_form(id: RecordId, form: &CleanForm) -> Self {
        Author {
            id,
            first_name: form.text("first_name"),
            family_name: form.text("family_name"),
            date_of_birth: form.date("date_of_birth"),
            date_of_death: form.date("date_of_death"),
        }
    }
}

impl FormEntity for Genre {
    const RULES: FormRules = GENRE;

    fn from_form(id: RecordId, form: &CleanForm) -> Self {
        Genre {
            id,
            name: form.text("name"),
        }
    }
}

impl FormEntity for Book {
    const RULES: FormRules = BOOK;

    fn from_form(id: RecordId, form: &CleanForm) -> Self {
        Book {
            id,
            title: form.text("title"),
            author: form.id("author"),
            summary: form.text("summary"),
            isbn: form.text("isbn"),
            genre: form.ids("genre"),
        }
    }
}

impl FormEntity for BookInstance {
    const RULES: FormRules = BOOK_INSTANCE;

    fn from_form(id: RecordId, form: &CleanForm) -> Self {
        BookInstance {
            id,
            book: form.id("book"),
            imprint: form.text("imprint"),
            // An unknown status has already been reported by the checks
            status: form.text("status").parse().unwrap_or_default(),
            due_back: form.date("due_back"),
        }
    }
}
