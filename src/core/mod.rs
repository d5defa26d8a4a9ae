//! Core module - fundamental types and the inventory engine

pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod identity;
pub mod logging;
pub mod policy;
pub mod quantities;
pub mod resolver;

pub use catalog::{Catalog, Entry};
pub use config::{Config, ConfigError};
pub use entity::Item;
pub use error::{InventoryError, InventoryResult};
pub use identity::{IdParseError, ItemId, ItemKind, MAX_ID_LEN};
pub use quantities::{DemandList, Quantities, Quantity, QuantityLine, Recipe};
pub use resolver::{Activity, Resolution, Resolver};
