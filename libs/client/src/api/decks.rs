//! Deck endpoints

use reqwest::{Method, StatusCode};

use crate::error::{ClientError, ClientResult};
use crate::http::{ApiClient, expect_json, expect_status};
use crate::models::{Deck, RenameRequest};
use crate::validation::validate_name;

/// List every deck of the user across categories
pub async fn get_all_decks(client: &ApiClient) -> ClientResult<Vec<Deck>> {
    let response = client
        .request(Method::GET, "/categories/all/decks")
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

/// List the decks of one category
pub async fn get_decks(client: &ApiClient, category_id: i64) -> ClientResult<Vec<Deck>> {
    let response = client
        .request(Method::GET, &format!("/categories/{category_id}/decks"))
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

/// Create a deck inside a category
pub async fn create_deck(client: &ApiClient, category_id: i64, name: &str) -> ClientResult<Deck> {
    validate_name(name).map_err(ClientError::Validation)?;

    let response = client
        .request(Method::POST, &format!("/categories/{category_id}/decks"))
        .json(&RenameRequest {
            name: name.to_string(),
        })
        .send()
        .await?;
    expect_json(response, StatusCode::CREATED).await
}

/// Rename a deck
pub async fn edit_deck(client: &ApiClient, deck: &Deck, new_name: &str) -> ClientResult<Deck> {
    validate_name(new_name).map_err(ClientError::Validation)?;

    let response = client
        .request(
            Method::PATCH,
            &format!("/categories/{}/decks/{}", deck.category_id, deck.id),
        )
        .json(&RenameRequest {
            name: new_name.to_string(),
        })
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

/// Delete a deck
pub async fn delete_deck(client: &ApiClient, deck: &Deck) -> ClientResult<()> {
    let response = client
        .request(
            Method::DELETE,
            &format!("/categories/{}/decks/{}", deck.category_id, deck.id),
        )
        .send()
        .await?;
    expect_status(response, StatusCode::OK)?;
    Ok(())
}
