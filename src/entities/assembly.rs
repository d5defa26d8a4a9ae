//! Assembly entity - manufacturable items with a bin capacity and a recipe

use serde::Serialize;

use crate::core::entity::Item;
use crate::core::identity::ItemId;
use crate::core::quantities::{Quantity, Recipe};

/// Assembly entity - stock of one manufactured item plus how to make it
///
/// `on_hand` stays within `0..=capacity`; only the resolver and the stocking
/// policies move it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assembly {
    id: ItemId,

    /// Maximum number of units the bin holds
    capacity: Quantity,

    /// Units currently in stock
    on_hand: Quantity,

    /// Components needed per unit built
    recipe: Recipe,
}

impl Assembly {
    /// Create an empty assembly bin
    pub fn new(id: ItemId, capacity: Quantity, recipe: Recipe) -> Self {
        Self {
            id,
            capacity,
            on_hand: 0,
            recipe,
        }
    }

    pub fn capacity(&self) -> Quantity {
        self.capacity
    }

    pub fn on_hand(&self) -> Quantity {
        self.on_hand
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Stock level below which the assembly counts as low
    pub fn low_water_mark(&self) -> Quantity {
        self.capacity / 2 + 1
    }

    /// Whether the assembly should be restocked
    pub fn is_low(&self) -> bool {
        self.on_hand < self.low_water_mark()
    }

    /// Free space left in the bin
    pub fn room(&self) -> Quantity {
        self.capacity.saturating_sub(self.on_hand)
    }

    /// Add produced units, clamped to the bin capacity
    pub(crate) fn fill(&mut self, units: Quantity) {
        self.on_hand = self.on_hand.saturating_add(units).min(self.capacity);
    }

    /// Withdraw units; callers check availability first
    pub(crate) fn withdraw(&mut self, units: Quantity) {
        self.on_hand = self.on_hand.saturating_sub(units);
    }

    pub(crate) fn set_on_hand(&mut self, units: Quantity) {
        self.on_hand = units.min(self.capacity);
    }

    pub(crate) fn empty(&mut self) {
        self.on_hand = 0;
    }
}

impl Item for Assembly {
    fn id(&self) -> &ItemId {
        &self.id
    }
}
