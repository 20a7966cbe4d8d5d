//! Resource access functions
//!
//! One function per (resource, verb) pair. Each issues exactly one HTTP
//! call through the authenticated client, returns the parsed body on the
//! expected status, and fails with the status text otherwise. No retries,
//! no pagination.

pub mod auth;
pub mod cards;
pub mod categories;
pub mod decks;
