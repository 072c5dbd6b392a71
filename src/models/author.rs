//! Author model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_date, Document};
use crate::store::RecordId;

/// Author of one or more books
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, family name first
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        format_date(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        format_date(self.date_of_death)
    }

    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";

    fn id(&self) -> &RecordId {
        &self.id
    }
}
