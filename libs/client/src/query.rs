//! Query/mutation layer
//!
//! Wraps the resource access functions with the query cache. Reads are
//! served from cache when an entry exists and fetched otherwise. Mutations
//! call the server first; only a successful response touches the cache, and
//! each mutation declares the full set of keys that could contain the
//! mutated resource. A failed mutation leaves the cache untouched and
//! propagates its error.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::api;
use crate::cache::{CacheKey, QueryCache};
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::{Card, Category, Deck, NewCard};
use crate::stores::DeckStore;

/// Cached access to the remote resources
#[derive(Clone)]
pub struct QueryClient {
    api: ApiClient,
    cache: Arc<QueryCache>,
    decks: DeckStore,
}

impl QueryClient {
    pub fn new(api: ApiClient, cache: Arc<QueryCache>, decks: DeckStore) -> Self {
        Self { api, cache, decks }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn read_through<T, F>(&self, key: CacheKey, fetch: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: std::future::Future<Output = ClientResult<T>>,
    {
        if let Some(cached) = self.cache.get::<T>(key) {
            return Ok(cached);
        }

        let fresh = fetch.await?;
        self.cache.insert(key, &fresh);
        Ok(fresh)
    }

    // Reads

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.read_through(CacheKey::Categories, api::categories::get_categories(&self.api))
            .await
    }

    pub async fn category(&self, id: i64) -> ClientResult<Category> {
        self.read_through(
            CacheKey::Category(id),
            api::categories::get_category(&self.api, id),
        )
        .await
    }

    pub async fn all_decks(&self) -> ClientResult<Vec<Deck>> {
        self.read_through(CacheKey::AllDecks, api::decks::get_all_decks(&self.api))
            .await
    }

    pub async fn decks(&self, category_id: i64) -> ClientResult<Vec<Deck>> {
        self.read_through(
            CacheKey::Decks { category_id },
            api::decks::get_decks(&self.api, category_id),
        )
        .await
    }

    pub async fn cards(&self, deck: &Deck) -> ClientResult<Vec<Card>> {
        self.read_through(
            CacheKey::Cards { deck_id: deck.id },
            api::cards::get_cards(&self.api, deck),
        )
        .await
    }

    // Mutations

    pub async fn create_category(&self, name: &str) -> ClientResult<Category> {
        let category = api::categories::create_category(&self.api, name).await?;
        info!("Created category {}", category.name);
        self.cache.invalidate(&[CacheKey::Categories]);
        Ok(category)
    }

    pub async fn rename_category(&self, id: i64, name: &str) -> ClientResult<Category> {
        let category = api::categories::edit_category(&self.api, id, name).await?;
        info!("Renamed category {} to {}", id, category.name);
        self.cache
            .invalidate(&[CacheKey::Categories, CacheKey::Category(id)]);
        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> ClientResult<()> {
        // Collect the deck ids under this category before their listing is
        // dropped, so their card entries can be invalidated too.
        let deck_ids: Option<Vec<i64>> = self
            .cache
            .get::<Vec<Deck>>(CacheKey::Decks { category_id: id })
            .map(|decks| decks.iter().map(|deck| deck.id).collect());

        api::categories::delete_category(&self.api, id).await?;
        info!("Deleted category {}", id);

        self.cache.invalidate(&[
            CacheKey::Categories,
            CacheKey::Category(id),
            CacheKey::Decks { category_id: id },
            CacheKey::AllDecks,
        ]);
        match deck_ids {
            Some(ids) => {
                let keys: Vec<CacheKey> =
                    ids.into_iter().map(|deck_id| CacheKey::Cards { deck_id }).collect();
                self.cache.invalidate(&keys);
            }
            // Without a cached deck listing the affected decks are unknown;
            // drop every card entry.
            None => self
                .cache
                .invalidate_where(|key| matches!(key, CacheKey::Cards { .. })),
        }

        if self
            .decks
            .selected()
            .is_some_and(|deck| deck.category_id == id)
        {
            self.decks.clear();
        }
        Ok(())
    }

    pub async fn create_deck(&self, category_id: i64, name: &str) -> ClientResult<Deck> {
        let deck = api::decks::create_deck(&self.api, category_id, name).await?;
        info!("Created deck {} in category {}", deck.name, category_id);
        self.cache
            .invalidate(&[CacheKey::Decks { category_id }, CacheKey::AllDecks]);
        Ok(deck)
    }

    pub async fn rename_deck(&self, deck: &Deck, new_name: &str) -> ClientResult<Deck> {
        let renamed = api::decks::edit_deck(&self.api, deck, new_name).await?;
        info!("Renamed deck {} to {}", deck.name, renamed.name);
        self.cache.invalidate(&[
            CacheKey::Decks {
                category_id: deck.category_id,
            },
            CacheKey::AllDecks,
        ]);
        if self.decks.selected().is_some_and(|d| d.id == deck.id) {
            self.decks.select(renamed.clone());
        }
        Ok(renamed)
    }

    /// Delete a deck. Clears the selection when it pointed at this deck;
    /// a deck the server no longer knows about also loses its selection so
    /// the store never dangles.
    pub async fn delete_deck(&self, deck: &Deck) -> ClientResult<()> {
        let result = api::decks::delete_deck(&self.api, deck).await;

        match &result {
            Ok(()) => {
                info!("Deleted deck {}", deck.name);
                self.cache.invalidate(&[
                    CacheKey::Decks {
                        category_id: deck.category_id,
                    },
                    CacheKey::AllDecks,
                    CacheKey::Cards { deck_id: deck.id },
                ]);
                self.clear_selection_of(deck.id);
            }
            Err(err) if err.is_not_found() => {
                self.clear_selection_of(deck.id);
            }
            Err(_) => {}
        }

        result
    }

    pub async fn create_card(&self, deck: &Deck, card: &NewCard) -> ClientResult<Card> {
        let created = api::cards::create_card(&self.api, deck, card).await?;
        info!("Created card in deck {}", deck.name);
        self.cache.invalidate(&[CacheKey::Cards { deck_id: deck.id }]);
        Ok(created)
    }

    pub async fn edit_card(
        &self,
        deck: &Deck,
        card_id: i64,
        edited: &NewCard,
    ) -> ClientResult<Card> {
        let card = api::cards::edit_card(&self.api, deck, card_id, edited).await?;
        info!("Edited card {} in deck {}", card_id, deck.name);
        self.cache.invalidate(&[CacheKey::Cards { deck_id: deck.id }]);
        Ok(card)
    }

    pub async fn delete_card(&self, deck: &Deck, card_id: i64) -> ClientResult<()> {
        api::cards::delete_card(&self.api, deck, card_id).await?;
        info!("Deleted card {} from deck {}", card_id, deck.name);
        self.cache.invalidate(&[CacheKey::Cards { deck_id: deck.id }]);
        Ok(())
    }

    fn clear_selection_of(&self, deck_id: i64) {
        if self.decks.selected().is_some_and(|d| d.id == deck_id) {
            self.decks.clear();
        }
    }
}
