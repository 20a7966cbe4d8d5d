//! Card endpoints

use reqwest::{Method, StatusCode};

use crate::error::{ClientError, ClientResult};
use crate::http::{ApiClient, expect_json, expect_status};
use crate::models::{Card, Deck, NewCard};
use crate::validation::validate_card;

fn cards_path(deck: &Deck) -> String {
    format!("/categories/{}/decks/{}/cards", deck.category_id, deck.id)
}

/// List the cards of a deck
pub async fn get_cards(client: &ApiClient, deck: &Deck) -> ClientResult<Vec<Card>> {
    let response = client.request(Method::GET, &cards_path(deck)).send().await?;
    expect_json(response, StatusCode::OK).await
}

/// Create a card in a deck
pub async fn create_card(client: &ApiClient, deck: &Deck, card: &NewCard) -> ClientResult<Card> {
    validate_card(card).map_err(ClientError::Validation)?;

    let response = client
        .request(Method::POST, &cards_path(deck))
        .json(card)
        .send()
        .await?;
    expect_json(response, StatusCode::CREATED).await
}

/// Replace the editable fields of a card
pub async fn edit_card(
    client: &ApiClient,
    deck: &Deck,
    card_id: i64,
    edited: &NewCard,
) -> ClientResult<Card> {
    validate_card(edited).map_err(ClientError::Validation)?;

    let response = client
        .request(Method::PATCH, &format!("{}/{card_id}", cards_path(deck)))
        .json(edited)
        .send()
        .await?;
    expect_json(response, StatusCode::OK).await
}

/// Delete a card
pub async fn delete_card(client: &ApiClient, deck: &Deck, card_id: i64) -> ClientResult<()> {
    let response = client
        .request(Method::DELETE, &format!("{}/{card_id}", cards_path(deck)))
        .send()
        .await?;
    expect_status(response, StatusCode::OK)?;
    Ok(())
}
