//! Input validation utilities
//!
//! These checks run before any network call; a failure blocks the request
//! entirely instead of letting the server reject it.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::NewCard;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    Ok(())
}

/// Validate a category or deck name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    Ok(())
}

/// Validate a card payload; front, back and type are all required
pub fn validate_card(card: &NewCard) -> Result<(), String> {
    if card.front.trim().is_empty() {
        return Err("Card front is required".to_string());
    }

    if card.back.trim().is_empty() {
        return Err("Card back is required".to_string());
    }

    if card.card_type.trim().is_empty() {
        return Err("Card type is required".to_string());
    }

    Ok(())
}
