//! Inventory error model

use miette::Diagnostic;
use thiserror::Error;

use crate::core::identity::{IdParseError, ItemId};

/// Result type used across the inventory core
pub type InventoryResult<T> = Result<T, InventoryError>;

/// A failed inventory command
///
/// Every variant is recoverable at the command boundary: the session reports
/// it and moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum InventoryError {
    #[error(transparent)]
    #[diagnostic(
        code(inventory::invalid_identifier),
        help("part IDs start with 'P', assembly IDs with 'A', at most 11 characters")
    )]
    InvalidIdentifier(#[from] IdParseError),

    #[error("{id}: duplicate {kind} ID", kind = .id.kind())]
    #[diagnostic(code(inventory::duplicate_identifier))]
    DuplicateIdentifier { id: ItemId },

    #[error("{0}: part/assembly ID is not in the inventory")]
    #[diagnostic(
        code(inventory::unknown_component),
        help("define every recipe component before the assembly that uses it")
    )]
    UnknownComponent(String),

    #[error("{0}: assembly ID is not in the inventory")]
    #[diagnostic(code(inventory::unknown_assembly))]
    UnknownAssembly(String),

    #[error("{0}: ID not an assembly")]
    #[diagnostic(code(inventory::not_an_assembly))]
    NotAnAssembly(String),

    #[error("{value}: illegal capacity for ID {id}")]
    #[diagnostic(code(inventory::invalid_capacity))]
    InvalidCapacity { value: String, id: String },

    #[error("{value}: illegal quantity for ID {id}")]
    #[diagnostic(
        code(inventory::invalid_quantity),
        help("quantities must be positive integers")
    )]
    InvalidQuantity { value: String, id: String },

    #[error("Invalid input (usage: {usage})")]
    #[diagnostic(code(inventory::malformed_command), help("type `help` for the request list"))]
    MalformedCommand { usage: &'static str },

    #[error("{0}: unknown command")]
    #[diagnostic(code(inventory::unknown_command), help("type `help` for the request list"))]
    UnknownCommand(String),

    #[error("{0}: assembly recipe is cyclic")]
    #[diagnostic(code(inventory::cyclic_recipe))]
    CyclicRecipe(ItemId),

    #[error("{0}: quantity overflow")]
    #[diagnostic(code(inventory::quantity_overflow))]
    QuantityOverflow(ItemId),

    #[error("{0} -- order canceled")]
    #[diagnostic(code(inventory::order_canceled))]
    OrderCanceled(Box<InventoryError>),
}

impl InventoryError {
    pub fn invalid_capacity(value: impl Into<String>, id: impl Into<String>) -> Self {
        Self::InvalidCapacity {
            value: value.into(),
            id: id.into(),
        }
    }

    pub fn invalid_quantity(value: impl Into<String>, id: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            value: value.into(),
            id: id.into(),
        }
    }

    pub fn malformed(usage: &'static str) -> Self {
        Self::MalformedCommand { usage }
    }

    /// Wrap a validation failure as a canceled order
    pub fn order_canceled(self) -> Self {
        Self::OrderCanceled(Box::new(self))
    }

    /// Short stable name of the error kind, used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier(_) => "invalid_identifier",
            Self::DuplicateIdentifier { .. } => "duplicate_identifier",
            Self::UnknownComponent(_) => "unknown_component",
            Self::UnknownAssembly(_) => "unknown_assembly",
            Self::NotAnAssembly(_) => "not_an_assembly",
            Self::InvalidCapacity { .. } => "invalid_capacity",
            Self::InvalidQuantity { .. } => "invalid_quantity",
            Self::MalformedCommand { .. } => "malformed_command",
            Self::UnknownCommand(_) => "unknown_command",
            Self::CyclicRecipe(_) => "cyclic_recipe",
            Self::QuantityOverflow(_) => "quantity_overflow",
            Self::OrderCanceled(_) => "order_canceled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_request_diagnostics() {
        let id = ItemId::parse("P1").unwrap();
        assert_eq!(
            InventoryError::DuplicateIdentifier { id }.to_string(),
            "P1: duplicate part ID"
        );
        assert_eq!(
            InventoryError::invalid_capacity("-4", "A1").to_string(),
            "-4: illegal capacity for ID A1"
        );
        assert_eq!(
            InventoryError::UnknownCommand("frob".into()).to_string(),
            "frob: unknown command"
        );
    }

    #[test]
    fn test_order_canceled_suffix() {
        let err = InventoryError::UnknownAssembly("A9".into()).order_canceled();
        assert_eq!(
            err.to_string(),
            "A9: assembly ID is not in the inventory -- order canceled"
        );
        assert_eq!(err.kind(), "order_canceled");
    }

    #[test]
    fn test_identifier_error_is_transparent() {
        let err: InventoryError = ItemId::part("X1").unwrap_err().into();
        assert_eq!(err.to_string(), "X1: part ID must start with 'P'");
    }
}
