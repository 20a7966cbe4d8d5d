//! Command parsing for the interactive shell

/// One action the user can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Login { username: String, password: String },
    SignUp { username: String, password: String },
    Logout,
    WhoAmI,
    Categories,
    NewCategory { name: String },
    RenameCategory { id: i64, name: String },
    DeleteCategory { id: i64 },
    Decks { category_id: Option<i64> },
    NewDeck { category_id: i64, name: String },
    RenameDeck { id: i64, name: String },
    DeleteDeck { id: i64 },
    Select { id: i64 },
    Cards,
    NewCard { front: String, back: String, card_type: String },
    EditCard { id: i64, front: String, back: String, card_type: String },
    DeleteCard { id: i64 },
    Study,
    Quit,
}

pub const HELP: &str = "\
Commands:
  login <username> <password>       sign in
  signup <username> <password>      register a new account
  logout                            drop the session
  whoami                            show the logged-in user
  categories                        list categories
  newcat <name>                     create a category
  renamecat <id> <name>             rename a category
  delcat <id>                       delete a category
  decks [category-id]               list decks (all, or of one category)
  newdeck <category-id> <name>      create a deck
  renamedeck <id> <name>            rename a deck
  deldeck <id>                      delete a deck
  select <id>                       focus a deck
  cards                             list cards of the selected deck
  newcard <front> | <back> | <type> create a card in the selected deck
  editcard <id> <front> | <back> | <type>
  delcard <id>                      delete a card
  study                             flip through the selected deck
  quit                              exit";

/// Parse one input line. Card fields are separated by `|` so fronts and
/// backs can contain spaces.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "logout" => Ok(Command::Logout),
        "whoami" => Ok(Command::WhoAmI),
        "categories" | "cats" => Ok(Command::Categories),
        "cards" => Ok(Command::Cards),
        "study" => Ok(Command::Study),
        "login" | "signup" => {
            let mut parts = rest.split_whitespace();
            let username = parts.next().ok_or("usage: login <username> <password>")?;
            let password = parts.next().ok_or("usage: login <username> <password>")?;
            let username = username.to_string();
            let password = password.to_string();
            if word == "login" {
                Ok(Command::Login { username, password })
            } else {
                Ok(Command::SignUp { username, password })
            }
        }
        "newcat" => {
            if rest.is_empty() {
                return Err("usage: newcat <name>".to_string());
            }
            Ok(Command::NewCategory {
                name: rest.to_string(),
            })
        }
        "renamecat" => {
            let (id, name) = id_and_text(rest, "usage: renamecat <id> <name>")?;
            Ok(Command::RenameCategory { id, name })
        }
        "delcat" => Ok(Command::DeleteCategory {
            id: parse_id(rest, "usage: delcat <id>")?,
        }),
        "decks" => {
            if rest.is_empty() {
                Ok(Command::Decks { category_id: None })
            } else {
                Ok(Command::Decks {
                    category_id: Some(parse_id(rest, "usage: decks [category-id]")?),
                })
            }
        }
        "newdeck" => {
            let (category_id, name) = id_and_text(rest, "usage: newdeck <category-id> <name>")?;
            Ok(Command::NewDeck { category_id, name })
        }
        "renamedeck" => {
            let (id, name) = id_and_text(rest, "usage: renamedeck <id> <name>")?;
            Ok(Command::RenameDeck { id, name })
        }
        "deldeck" => Ok(Command::DeleteDeck {
            id: parse_id(rest, "usage: deldeck <id>")?,
        }),
        "select" => Ok(Command::Select {
            id: parse_id(rest, "usage: select <id>")?,
        }),
        "newcard" => {
            let (front, back, card_type) =
                card_fields(rest, "usage: newcard <front> | <back> | <type>")?;
            Ok(Command::NewCard {
                front,
                back,
                card_type,
            })
        }
        "editcard" => {
            let (id, fields) = match rest.split_once(char::is_whitespace) {
                Some((id, fields)) => (id, fields.trim()),
                None => return Err("usage: editcard <id> <front> | <back> | <type>".to_string()),
            };
            let id = parse_id(id, "usage: editcard <id> <front> | <back> | <type>")?;
            let (front, back, card_type) =
                card_fields(fields, "usage: editcard <id> <front> | <back> | <type>")?;
            Ok(Command::EditCard {
                id,
                front,
                back,
                card_type,
            })
        }
        "delcard" => Ok(Command::DeleteCard {
            id: parse_id(rest, "usage: delcard <id>")?,
        }),
        "" => Err(String::new()),
        other => Err(format!("Unknown command '{other}', try 'help'")),
    }
}

fn parse_id(text: &str, usage: &str) -> Result<i64, String> {
    text.trim().parse().map_err(|_| usage.to_string())
}

fn id_and_text(rest: &str, usage: &str) -> Result<(i64, String), String> {
    let (id, text) = rest.split_once(char::is_whitespace).ok_or(usage)?;
    let id = parse_id(id, usage)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(usage.to_string());
    }
    Ok((id, text.to_string()))
}

fn card_fields(rest: &str, usage: &str) -> Result<(String, String, String), String> {
    let mut parts = rest.splitn(3, '|').map(|part| part.trim().to_string());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(front), Some(back), Some(card_type)) => Ok((front, back, card_type)),
        _ => Err(usage.to_string()),
    }
}
