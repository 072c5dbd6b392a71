//! Book instance (a physical copy of a book)

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_date, Document};
use crate::store::RecordId;

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Maintenance,
        BookStatus::Available,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    /// Values accepted from the copy form
    pub const NAMES: &'static [&'static str] = &["Available", "Maintenance", "Loaned", "Reserved"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "Maintenance" => Ok(BookStatus::Maintenance),
            "Loaned" => Ok(BookStatus::Loaned),
            "Reserved" => Ok(BookStatus::Reserved),
            other => Err(format!("unknown book status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookInstance {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub book: RecordId,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_date(self.due_back)
    }
}

impl Document for BookInstance {
    const COLLECTION: &'static str = "bookinstances";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names_round_trip() {
        for status in BookStatus::ALL {
            assert_eq!(status.as_str().parse::<BookStatus>().unwrap(), status);
            assert!(BookStatus::NAMES.contains(&status.as_str()));
        }
        assert!("Lost".parse::<BookStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_as_name() {
        let value = serde_json::to_value(BookStatus::Loaned).unwrap();
        assert_eq!(value, "Loaned");
    }

    #[test]
    fn test_url_and_due_back() {
        let copy = BookInstance {
            id: RecordId::from("c9"),
            due_back: NaiveDate::from_ymd_opt(2026, 11, 1),
            ..Default::default()
        };
        assert_eq!(copy.url(), "/catalog/bookinstance/c9");
        assert_eq!(copy.due_back_formatted(), "2026-11-01");
        assert_eq!(copy.status, BookStatus::Maintenance);
    }
}
