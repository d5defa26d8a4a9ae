//! Insertion-ordered quantity lists
//!
//! One type serves both as an assembly's recipe (built once, then read-only)
//! and as the raw-part demand accumulated while resolving a request.

use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::core::error::{InventoryError, InventoryResult};
use crate::core::identity::ItemId;

/// Unit count used for quantities, capacities and on-hand stock
pub type Quantity = u64;

/// An assembly's per-unit component requirements
pub type Recipe = Quantities;

/// Raw parts demanded by one top-level operation
pub type DemandList = Quantities;

/// One line of a quantity list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuantityLine {
    pub id: ItemId,
    pub quantity: Quantity,
}

/// Ordered identifier-to-quantity mapping with no duplicate identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Quantities {
    lines: Vec<QuantityLine>,
    index: HashMap<ItemId, usize>,
}

impl Quantities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `id`, merging into an existing line if present
    ///
    /// Zero quantities leave the list untouched.
    pub fn add(&mut self, id: ItemId, quantity: Quantity) -> InventoryResult<()> {
        if quantity == 0 {
            return Ok(());
        }
        match self.index.get(&id) {
            Some(&pos) => {
                let line = &mut self.lines[pos];
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| InventoryError::QuantityOverflow(id.clone()))?;
            }
            None => {
                self.index.insert(id.clone(), self.lines.len());
                self.lines.push(QuantityLine { id, quantity });
            }
        }
        Ok(())
    }

    /// Get the accumulated quantity for an id
    pub fn get(&self, id: &ItemId) -> Option<Quantity> {
        self.index.get(id).map(|&pos| self.lines[pos].quantity)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, QuantityLine> {
        self.lines.iter()
    }

    /// Lines ordered by identifier, for display
    pub fn sorted(&self) -> Vec<&QuantityLine> {
        let mut lines: Vec<&QuantityLine> = self.lines.iter().collect();
        lines.sort_by(|a, b| a.id.cmp(&b.id));
        lines
    }

    /// Sum of all quantities
    pub fn total(&self) -> Quantity {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

impl<'a> IntoIterator for &'a Quantities {
    type Item = &'a QuantityLine;
    type IntoIter = std::slice::Iter<'a, QuantityLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Quantities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.lines.serialize(serializer)
    }
}
