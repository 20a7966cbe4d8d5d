//! Data models exchanged with the Flashy Cards API

pub mod card;
pub mod category;
pub mod deck;
pub mod user;

// Re-export for convenience
pub use card::{Card, NewCard};
pub use category::Category;
pub use deck::Deck;
pub use user::{MeResponse, TokenResponse, UserCredentials};

use serde::{Deserialize, Serialize};

/// Body of category and deck create/rename requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub name: String,
}
