use serde::{Deserialize, Serialize};

/// A named grouping of cards within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
}
