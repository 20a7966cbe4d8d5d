//! In-process mock of the Flashy Cards API for integration tests
//!
//! Serves the same routes and status codes as the real server, backed by a
//! plain in-memory table per resource, and counts every request so tests
//! can assert that cached reads never reach the network.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use parking_lot::Mutex;

use client::models::{Card, Category, Deck, MeResponse, NewCard, RenameRequest, TokenResponse, UserCredentials};
use client::token::Claims;
use client::{
    ApiClient, ClientConfig, CredentialStore, DeckStore, QueryCache, QueryClient, SessionManager,
    UserStore,
};

const JWT_SECRET: &[u8] = b"mock-api-secret";
const TOKEN_LIFETIME_SECS: u64 = 900;

#[derive(Default)]
struct MockData {
    users: HashMap<String, String>,
    categories: Vec<Category>,
    decks: Vec<Deck>,
    cards: HashMap<i64, Vec<Card>>,
    next_id: i64,
}

impl MockData {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone)]
struct MockState {
    data: Arc<Mutex<MockData>>,
    requests: Arc<AtomicUsize>,
}

/// Handle to a running mock server
pub struct MockApi {
    pub base_url: String,
    state: MockState,
}

impl MockApi {
    /// Total number of requests the server has seen
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// Register an account directly in the backing store
    pub fn seed_user(&self, username: &str, password: &str) {
        self.state
            .data
            .lock()
            .users
            .insert(username.to_string(), password.to_string());
    }

    /// Mint a valid token for a user, as the real server would on sign-in
    pub fn issue_token(&self, username: &str) -> String {
        mint_token(username, TOKEN_LIFETIME_SECS as i64)
    }

    /// Mint a token whose expiry is already in the past, beyond the
    /// 60-second leeway `jsonwebtoken` validation allows by default
    pub fn issue_expired_token(&self, username: &str) -> String {
        mint_token(username, -120)
    }
}

/// Everything a test needs to drive the client against a mock server
pub struct TestClient {
    pub session: SessionManager,
    pub query: QueryClient,
    pub users: UserStore,
    pub decks: DeckStore,
    pub credentials: CredentialStore,
    pub cache: Arc<QueryCache>,
}

/// Unique credential file path per test
pub fn credential_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flashy-test-{}-{}", std::process::id(), name))
}

/// Wire up the full client stack against a base URL
pub fn build_client(base_url: &str, credential_path: PathBuf) -> TestClient {
    let config = ClientConfig::new(base_url, credential_path.clone());
    let users = UserStore::new();
    let decks = DeckStore::new();
    let cache = Arc::new(QueryCache::new());
    let credentials = CredentialStore::new(credential_path);

    let api = ApiClient::new(&config, users.clone()).expect("client construction failed");
    let query = QueryClient::new(api.clone(), cache.clone(), decks.clone());
    let session = SessionManager::new(
        api,
        credentials.clone(),
        users.clone(),
        decks.clone(),
        cache.clone(),
    );

    TestClient {
        session,
        query,
        users,
        decks,
        credentials,
        cache,
    }
}

/// Start the mock server on an ephemeral port
pub async fn spawn_mock_api() -> MockApi {
    let state = MockState {
        data: Arc::new(Mutex::new(MockData::default())),
        requests: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route("/auth/signin", post(sign_in))
        .route("/auth/signup", post(sign_up))
        .route("/auth/me", get(me))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            axum::routing::patch(edit_category).delete(delete_category),
        )
        .route("/categories/all/decks", get(list_all_decks))
        .route("/categories/:id/decks", get(list_decks).post(create_deck))
        .route(
            "/categories/:cat_id/decks/:deck_id",
            axum::routing::patch(edit_deck).delete(delete_deck),
        )
        .route(
            "/categories/:cat_id/decks/:deck_id/cards",
            get(list_cards).post(create_card),
        )
        .route(
            "/categories/:cat_id/decks/:deck_id/cards/:card_id",
            axum::routing::patch(edit_card).delete(delete_card),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            count_requests,
        ))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock listener");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server died");
    });

    MockApi {
        base_url: format!("http://{addr}"),
        state,
    }
}

async fn count_requests(
    State(state): State<MockState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs()
}

fn mint_token(username: &str, lifetime_secs: i64) -> String {
    let now = now_secs();
    let claims = Claims {
        username: username.to_string(),
        iat: now,
        exp: now.saturating_add_signed(lifetime_secs),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .expect("token encoding failed")
}

/// Extract and verify the bearer token, returning the username
fn authenticate(headers: &HeaderMap) -> Result<String, StatusCode> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = &auth_header[7..];
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(token, &DecodingKey::from_secret(JWT_SECRET), &validation)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(data.claims.username)
}

// Auth handlers

async fn sign_in(
    State(state): State<MockState>,
    Json(payload): Json<UserCredentials>,
) -> Result<Json<TokenResponse>, StatusCode> {
    let data = state.data.lock();
    match data.users.get(&payload.username) {
        Some(password) if *password == payload.password => Ok(Json(TokenResponse {
            access_token: mint_token(&payload.username, TOKEN_LIFETIME_SECS as i64),
        })),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn sign_up(
    State(state): State<MockState>,
    Json(payload): Json<UserCredentials>,
) -> Result<StatusCode, StatusCode> {
    let mut data = state.data.lock();
    if data.users.contains_key(&payload.username) {
        return Err(StatusCode::CONFLICT);
    }
    data.users.insert(payload.username, payload.password);
    Ok(StatusCode::CREATED)
}

async fn me(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, StatusCode> {
    let username = authenticate(&headers)?;
    let data = state.data.lock();
    if !data.users.contains_key(&username) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(MeResponse { username }))
}

// Category handlers

async fn list_categories(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Category>>, StatusCode> {
    authenticate(&headers)?;
    Ok(Json(state.data.lock().categories.clone()))
}

async fn create_category(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(payload): Json<RenameRequest>,
) -> Result<(StatusCode, Json<Category>), StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    let category = Category {
        id: data.next_id(),
        name: payload.name,
        user_id: 1,
    };
    data.categories.push(category.clone());
    Ok((StatusCode::CREATED, Json(category)))
}

async fn edit_category(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<RenameRequest>,
) -> Result<Json<Category>, StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    let category = data
        .categories
        .iter_mut()
        .find(|category| category.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    category.name = payload.name;
    Ok(Json(category.clone()))
}

async fn delete_category(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    if !data.categories.iter().any(|category| category.id == id) {
        return Err(StatusCode::NOT_FOUND);
    }
    data.categories.retain(|category| category.id != id);
    let orphaned: Vec<i64> = data
        .decks
        .iter()
        .filter(|deck| deck.category_id == id)
        .map(|deck| deck.id)
        .collect();
    data.decks.retain(|deck| deck.category_id != id);
    for deck_id in orphaned {
        data.cards.remove(&deck_id);
    }
    Ok(StatusCode::OK)
}

// Deck handlers

async fn list_all_decks(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Deck>>, StatusCode> {
    authenticate(&headers)?;
    Ok(Json(state.data.lock().decks.clone()))
}

async fn list_decks(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Vec<Deck>>, StatusCode> {
    authenticate(&headers)?;
    let data = state.data.lock();
    let decks = data
        .decks
        .iter()
        .filter(|deck| deck.category_id == id)
        .cloned()
        .collect();
    Ok(Json(decks))
}

async fn create_deck(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<RenameRequest>,
) -> Result<(StatusCode, Json<Deck>), StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    if !data.categories.iter().any(|category| category.id == id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let deck = Deck {
        id: data.next_id(),
        category_id: id,
        name: payload.name,
    };
    data.decks.push(deck.clone());
    Ok((StatusCode::CREATED, Json(deck)))
}

async fn edit_deck(
    State(state): State<MockState>,
    Path((_cat_id, deck_id)): Path<(i64, i64)>,
    headers: HeaderMap,
    Json(payload): Json<RenameRequest>,
) -> Result<Json<Deck>, StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    let deck = data
        .decks
        .iter_mut()
        .find(|deck| deck.id == deck_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    deck.name = payload.name;
    Ok(Json(deck.clone()))
}

async fn delete_deck(
    State(state): State<MockState>,
    Path((_cat_id, deck_id)): Path<(i64, i64)>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    if !data.decks.iter().any(|deck| deck.id == deck_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    data.decks.retain(|deck| deck.id != deck_id);
    data.cards.remove(&deck_id);
    Ok(StatusCode::OK)
}

// Card handlers

async fn list_cards(
    State(state): State<MockState>,
    Path((_cat_id, deck_id)): Path<(i64, i64)>,
    headers: HeaderMap,
) -> Result<Json<Vec<Card>>, StatusCode> {
    authenticate(&headers)?;
    let data = state.data.lock();
    Ok(Json(data.cards.get(&deck_id).cloned().unwrap_or_default()))
}

async fn create_card(
    State(state): State<MockState>,
    Path((_cat_id, deck_id)): Path<(i64, i64)>,
    headers: HeaderMap,
    Json(payload): Json<NewCard>,
) -> Result<(StatusCode, Json<Card>), StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    if !data.decks.iter().any(|deck| deck.id == deck_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let id = data.next_id();
    let deck_cards = data.cards.entry(deck_id).or_default();
    let card = Card {
        id,
        front: payload.front,
        back: payload.back,
        card_type: payload.card_type,
        order_in_deck: deck_cards.len() as i64 + 1,
    };
    deck_cards.push(card.clone());
    Ok((StatusCode::CREATED, Json(card)))
}

async fn edit_card(
    State(state): State<MockState>,
    Path((_cat_id, deck_id, card_id)): Path<(i64, i64, i64)>,
    headers: HeaderMap,
    Json(payload): Json<NewCard>,
) -> Result<Json<Card>, StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    let card = data
        .cards
        .get_mut(&deck_id)
        .and_then(|cards| cards.iter_mut().find(|card| card.id == card_id))
        .ok_or(StatusCode::NOT_FOUND)?;
    card.front = payload.front;
    card.back = payload.back;
    card.card_type = payload.card_type;
    Ok(Json(card.clone()))
}

async fn delete_card(
    State(state): State<MockState>,
    Path((_cat_id, deck_id, card_id)): Path<(i64, i64, i64)>,
    headers: HeaderMap,
) -> Result<StatusCode, StatusCode> {
    authenticate(&headers)?;
    let mut data = state.data.lock();
    let cards = data.cards.get_mut(&deck_id).ok_or(StatusCode::NOT_FOUND)?;
    if !cards.iter().any(|card| card.id == card_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    cards.retain(|card| card.id != card_id);
    Ok(StatusCode::OK)
}
