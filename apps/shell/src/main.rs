//! Interactive terminal front end for Flashy Cards
//!
//! Wires the client library together, bootstraps the session from the
//! persisted credential, then runs a small command loop. Mutation failures
//! are shown as one-line notifications; read failures appear in place of
//! the data they replace.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use client::{
    ApiClient, ClientConfig, CredentialStore, Deck, DeckStore, NewCard, QueryCache, QueryClient,
    SessionManager, SessionState, UserStore,
};

mod commands;

use commands::{Command, HELP, parse};

struct App {
    session: SessionManager,
    query: QueryClient,
    users: UserStore,
    decks: DeckStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let config = ClientConfig::from_env()?;

    let users = UserStore::new();
    let decks = DeckStore::new();
    let cache = Arc::new(QueryCache::new());
    let credentials = CredentialStore::new(config.credential_path.clone());

    let api = ApiClient::new(&config, users.clone())?;
    let query = QueryClient::new(api.clone(), cache.clone(), decks.clone());
    let session = SessionManager::new(api, credentials, users.clone(), decks.clone(), cache);

    let app = App {
        session,
        query,
        users,
        decks,
    };

    match app.session.bootstrap().await? {
        SessionState::Authenticated => {
            println!("Welcome back, {}!", app.users.get().username);
        }
        _ => println!("Not logged in. Use 'login <username> <password>' or 'signup'."),
    }
    println!("Type 'help' for the command list.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line) {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{message}");
                }
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        app.run(command, &mut lines).await;
    }

    Ok(())
}

impl App {
    async fn run(&self, command: Command, lines: &mut Lines<BufReader<Stdin>>) {
        match command {
            Command::Help => println!("{HELP}"),
            Command::Quit => {}

            Command::Login { username, password } => {
                match self.session.login(&username, &password).await {
                    Ok(()) => println!("Logged in as {}", self.users.get().username),
                    Err(err) => println!("Could not log in: {err}"),
                }
            }
            Command::SignUp { username, password } => {
                match self.session.sign_up(&username, &password).await {
                    Ok(()) => println!("Account created, you can log in now"),
                    Err(err) => println!("Could not sign up: {err}"),
                }
            }
            Command::Logout => match self.session.logout() {
                Ok(()) => println!("Logged out"),
                Err(err) => println!("Could not log out: {err}"),
            },
            Command::WhoAmI => {
                let state = self.users.get();
                if state.is_authenticated() {
                    println!("{}", state.username);
                } else {
                    println!("Not logged in");
                }
            }

            Command::Categories => match self.query.categories().await {
                Ok(categories) if categories.is_empty() => println!("No categories yet"),
                Ok(categories) => {
                    for category in categories {
                        println!("[{}] {}", category.id, category.name);
                    }
                }
                Err(err) => println!("Could not load categories: {err}"),
            },
            Command::NewCategory { name } => match self.query.create_category(&name).await {
                Ok(category) => println!("Created category [{}] {}", category.id, category.name),
                Err(err) => println!("Could not create category: {err}"),
            },
            Command::RenameCategory { id, name } => {
                match self.query.rename_category(id, &name).await {
                    Ok(category) => println!("Renamed to {}", category.name),
                    Err(err) => println!("Could not rename category: {err}"),
                }
            }
            Command::DeleteCategory { id } => match self.query.delete_category(id).await {
                Ok(()) => println!("Category deleted"),
                Err(err) => println!("Could not delete category: {err}"),
            },

            Command::Decks { category_id } => {
                let decks = match category_id {
                    Some(id) => self.query.decks(id).await,
                    None => self.query.all_decks().await,
                };
                match decks {
                    Ok(decks) if decks.is_empty() => println!("No decks"),
                    Ok(decks) => {
                        let selected = self.decks.selected().map(|deck| deck.id);
                        for deck in decks {
                            let marker = if selected == Some(deck.id) { "*" } else { " " };
                            println!("{marker}[{}] {} (category {})", deck.id, deck.name, deck.category_id);
                        }
                    }
                    Err(err) => println!("Could not load decks: {err}"),
                }
            }
            Command::NewDeck { category_id, name } => {
                match self.query.create_deck(category_id, &name).await {
                    Ok(deck) => println!("Created deck [{}] {}", deck.id, deck.name),
                    Err(err) => println!("Could not create deck: {err}"),
                }
            }
            Command::RenameDeck { id, name } => match self.resolve_deck(id).await {
                Some(deck) => match self.query.rename_deck(&deck, &name).await {
                    Ok(renamed) => println!("Renamed to {}", renamed.name),
                    Err(err) => println!("Could not rename deck: {err}"),
                },
                None => println!("No deck with id {id}"),
            },
            Command::DeleteDeck { id } => match self.resolve_deck(id).await {
                Some(deck) => match self.query.delete_deck(&deck).await {
                    Ok(()) => println!("Deck deleted"),
                    Err(err) => println!("Could not delete deck: {err}"),
                },
                None => println!("No deck with id {id}"),
            },
            Command::Select { id } => match self.resolve_deck(id).await {
                Some(deck) => {
                    println!("Selected deck {}", deck.name);
                    self.decks.select(deck);
                }
                None => println!("No deck with id {id}"),
            },

            Command::Cards => match self.selected_deck() {
                Some(deck) => match self.query.cards(&deck).await {
                    Ok(cards) if cards.is_empty() => println!("Deck {} is empty", deck.name),
                    Ok(cards) => {
                        for card in cards {
                            println!(
                                "[{}] #{} ({}) {} / {}",
                                card.id, card.order_in_deck, card.card_type, card.front, card.back
                            );
                        }
                    }
                    Err(err) => println!("Could not load cards: {err}"),
                },
                None => {}
            },
            Command::NewCard {
                front,
                back,
                card_type,
            } => {
                if let Some(deck) = self.selected_deck() {
                    let card = NewCard {
                        front,
                        back,
                        card_type,
                    };
                    match self.query.create_card(&deck, &card).await {
                        Ok(card) => println!("Created card [{}]", card.id),
                        Err(err) => println!("Could not create card: {err}"),
                    }
                }
            }
            Command::EditCard {
                id,
                front,
                back,
                card_type,
            } => {
                if let Some(deck) = self.selected_deck() {
                    let edited = NewCard {
                        front,
                        back,
                        card_type,
                    };
                    match self.query.edit_card(&deck, id, &edited).await {
                        Ok(card) => println!("Card [{}] updated", card.id),
                        Err(err) => println!("Could not edit card: {err}"),
                    }
                }
            }
            Command::DeleteCard { id } => {
                if let Some(deck) = self.selected_deck() {
                    match self.query.delete_card(&deck, id).await {
                        Ok(()) => println!("Card deleted"),
                        Err(err) => println!("Could not delete card: {err}"),
                    }
                }
            }

            Command::Study => {
                if let Some(deck) = self.selected_deck() {
                    self.study(&deck, lines).await;
                }
            }
        }
    }

    /// Flip through the selected deck: front first, Enter reveals the back,
    /// Enter again moves on, 'q' stops.
    async fn study(&self, deck: &Deck, lines: &mut Lines<BufReader<Stdin>>) {
        let cards = match self.query.cards(deck).await {
            Ok(cards) => cards,
            Err(err) => {
                println!("Could not load cards: {err}");
                return;
            }
        };
        if cards.is_empty() {
            println!("Deck {} is empty", deck.name);
            return;
        }

        println!(
            "Studying {} ({} cards). Enter flips, 'q' stops.",
            deck.name,
            cards.len()
        );
        for card in cards {
            println!("  front: {}", card.front);
            if self.wants_to_stop(lines).await {
                return;
            }
            println!("  back:  {}", card.back);
            if self.wants_to_stop(lines).await {
                return;
            }
        }
        println!("Done!");
    }

    async fn wants_to_stop(&self, lines: &mut Lines<BufReader<Stdin>>) -> bool {
        match lines.next_line().await {
            Ok(Some(line)) => line.trim() == "q",
            _ => true,
        }
    }

    /// Look a deck up by id across all categories
    async fn resolve_deck(&self, id: i64) -> Option<Deck> {
        match self.query.all_decks().await {
            Ok(decks) => decks.into_iter().find(|deck| deck.id == id),
            Err(err) => {
                println!("Could not load decks: {err}");
                None
            }
        }
    }

    fn selected_deck(&self) -> Option<Deck> {
        let selected = self.decks.selected();
        if selected.is_none() {
            println!("Select a deck first ('decks', then 'select <id>')");
        }
        selected
    }
}
