//! Genre model

use serde::{Deserialize, Serialize};

use super::Document;
use crate::store::RecordId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: RecordId,
    /// 3 to 100 characters, unique in practice
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

impl Document for Genre {
    const COLLECTION: &'static str = "genres";

    fn id(&self) -> &RecordId {
        &self.id
    }
}
