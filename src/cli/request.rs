//! Request parsing: one input line becomes one [`Request`]

use crate::core::error::{InventoryError, InventoryResult};

pub const ADD_PART_USAGE: &str = "addPart ID";
pub const ADD_ASSEMBLY_USAGE: &str = "addAssembly ID capacity [x1 n1 [x2 n2 ...]]";
pub const FULFILL_ORDER_USAGE: &str = "fulfillOrder [x1 n1 [x2 n2 ...]]";
pub const STOCK_USAGE: &str = "stock ID n";
pub const RESTOCK_USAGE: &str = "restock [ID]";
pub const EMPTY_USAGE: &str = "empty ID";
pub const INVENTORY_USAGE: &str = "inventory [ID]";
pub const PARTS_USAGE: &str = "parts";
pub const HELP_USAGE: &str = "help";
pub const CLEAR_USAGE: &str = "clear";
pub const QUIT_USAGE: &str = "quit";

/// One parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    AddPart {
        id: String,
    },
    AddAssembly {
        id: String,
        capacity: i64,
        components: Vec<(String, i64)>,
    },
    FulfillOrder {
        lines: Vec<(String, i64)>,
    },
    Stock {
        id: String,
        quantity: i64,
    },
    Restock {
        id: Option<String>,
    },
    Empty {
        id: String,
    },
    Inventory {
        id: Option<String>,
    },
    Parts,
    Help,
    Clear,
    Quit,
}

/// Drop everything from the first `#` and trim what is left
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

impl Request {
    /// Parse a comment-free, non-empty line
    pub fn parse(line: &str) -> InventoryResult<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = tokens.split_first() else {
            return Err(InventoryError::UnknownCommand(String::new()));
        };

        match keyword {
            "addPart" => match args {
                [id] => Ok(Request::AddPart { id: id.to_string() }),
                _ => Err(InventoryError::malformed(ADD_PART_USAGE)),
            },
            "addAssembly" => match args {
                [id, capacity, rest @ ..] if rest.len() % 2 == 0 => {
                    let capacity = capacity
                        .parse()
                        .map_err(|_| InventoryError::invalid_capacity(*capacity, *id))?;
                    Ok(Request::AddAssembly {
                        id: id.to_string(),
                        capacity,
                        components: pairs(rest)?,
                    })
                }
                _ => Err(InventoryError::malformed(ADD_ASSEMBLY_USAGE)),
            },
            "fulfillOrder" => {
                if args.len() % 2 != 0 {
                    return Err(InventoryError::malformed(FULFILL_ORDER_USAGE));
                }
                let lines = pairs(args).map_err(InventoryError::order_canceled)?;
                Ok(Request::FulfillOrder { lines })
            }
            "stock" => match args {
                [id, n] => Ok(Request::Stock {
                    id: id.to_string(),
                    quantity: quantity(n, id)?,
                }),
                _ => Err(InventoryError::malformed(STOCK_USAGE)),
            },
            "restock" => match args {
                [] => Ok(Request::Restock { id: None }),
                [id] => Ok(Request::Restock {
                    id: Some(id.to_string()),
                }),
                _ => Err(InventoryError::malformed(RESTOCK_USAGE)),
            },
            "empty" => match args {
                [id] => Ok(Request::Empty { id: id.to_string() }),
                _ => Err(InventoryError::malformed(EMPTY_USAGE)),
            },
            "inventory" => match args {
                [] => Ok(Request::Inventory { id: None }),
                [id] => Ok(Request::Inventory {
                    id: Some(id.to_string()),
                }),
                _ => Err(InventoryError::malformed(INVENTORY_USAGE)),
            },
            "parts" => no_args(args, Request::Parts, PARTS_USAGE),
            "help" => no_args(args, Request::Help, HELP_USAGE),
            "clear" => no_args(args, Request::Clear, CLEAR_USAGE),
            "quit" => no_args(args, Request::Quit, QUIT_USAGE),
            other => Err(InventoryError::UnknownCommand(other.to_string())),
        }
    }

    /// The command keyword, for logging
    pub fn keyword(&self) -> &'static str {
        match self {
            Request::AddPart { .. } => "addPart",
            Request::AddAssembly { .. } => "addAssembly",
            Request::FulfillOrder { .. } => "fulfillOrder",
            Request::Stock { .. } => "stock",
            Request::Restock { .. } => "restock",
            Request::Empty { .. } => "empty",
            Request::Inventory { .. } => "inventory",
            Request::Parts => "parts",
            Request::Help => "help",
            Request::Clear => "clear",
            Request::Quit => "quit",
        }
    }
}

fn no_args(args: &[&str], request: Request, usage: &'static str) -> InventoryResult<Request> {
    if args.is_empty() {
        Ok(request)
    } else {
        Err(InventoryError::malformed(usage))
    }
}

fn quantity(token: &str, id: &str) -> InventoryResult<i64> {
    token
        .parse()
        .map_err(|_| InventoryError::invalid_quantity(token, id))
}

/// `id qty id qty ...`; the caller checks the count is even
fn pairs(tokens: &[&str]) -> InventoryResult<Vec<(String, i64)>> {
    tokens
        .chunks_exact(2)
        .map(|pair| Ok((pair[0].to_string(), quantity(pair[1], pair[0])?)))
        .collect()
}
