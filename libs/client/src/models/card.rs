use serde::{Deserialize, Serialize};

/// A single front/back study unit within a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub front: String,
    pub back: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub order_in_deck: i64,
}

/// Payload for creating or editing a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub front: String,
    pub back: String,
    #[serde(rename = "type")]
    pub card_type: String,
}
