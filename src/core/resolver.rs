//! Recursive bill-of-materials resolution
//!
//! [`Resolver::get`] draws assemblies from stock and manufactures only the
//! shortfall. [`Resolver::make`] manufactures from scratch, turning each
//! recipe line into raw-part demand or a nested `get` on a sub-assembly.
//! Neither touches the produced assembly's own bin beyond what `get`
//! withdraws; stocking policies add produced units through
//! [`Resolver::deposit`].

use serde::Serialize;
use std::collections::HashSet;

use crate::core::catalog::Catalog;
use crate::core::error::{InventoryError, InventoryResult};
use crate::core::identity::{ItemId, ItemKind};
use crate::core::quantities::{DemandList, Quantity, Recipe};

/// One production step, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Activity {
    /// Units of an assembly manufactured
    Make { id: ItemId, units: Quantity },
    /// A low assembly topped up to capacity
    Restock { id: ItemId, units: Quantity },
}

/// Everything one top-level operation produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Raw parts consumed
    pub demand: DemandList,
    /// Production log
    pub activity: Vec<Activity>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.demand.is_empty() && self.activity.is_empty()
    }
}

/// Resolves production requests against a catalog
pub struct Resolver<'c> {
    catalog: &'c mut Catalog,
    resolution: Resolution,
    /// Assemblies whose `make` is on the stack
    in_progress: HashSet<ItemId>,
}

impl<'c> Resolver<'c> {
    pub fn new(catalog: &'c mut Catalog) -> Self {
        Self {
            catalog,
            resolution: Resolution::default(),
            in_progress: HashSet::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &*self.catalog
    }

    /// Hand `n` units of an assembly to the caller, consuming stock first
    pub fn get(&mut self, id: &ItemId, n: Quantity) -> InventoryResult<()> {
        if n == 0 {
            return Ok(());
        }
        let asm = self
            .catalog
            .assembly_mut(id.as_str())
            .ok_or_else(|| InventoryError::UnknownAssembly(id.to_string()))?;

        let on_hand = asm.on_hand();
        tracing::debug!(assembly = %id, requested = n, on_hand, "get");
        if on_hand >= n {
            asm.withdraw(n);
            return Ok(());
        }

        asm.empty();
        self.make(id, n - on_hand)
    }

    /// Manufacture `n` units of an assembly, recording raw-part demand
    pub fn make(&mut self, id: &ItemId, n: Quantity) -> InventoryResult<()> {
        if n == 0 {
            return Ok(());
        }
        let recipe = self
            .catalog
            .assembly(id.as_str())
            .ok_or_else(|| InventoryError::UnknownAssembly(id.to_string()))?
            .recipe()
            .clone();

        if !self.in_progress.insert(id.clone()) {
            return Err(InventoryError::CyclicRecipe(id.clone()));
        }
        tracing::debug!(assembly = %id, units = n, components = recipe.len(), "make");
        self.resolution.activity.push(Activity::Make {
            id: id.clone(),
            units: n,
        });

        let result = self.expand(&recipe, n);
        self.in_progress.remove(id);
        result
    }

    fn expand(&mut self, recipe: &Recipe, n: Quantity) -> InventoryResult<()> {
        // Last recipe line first
        for line in recipe.iter().rev() {
            let total = line
                .quantity
                .checked_mul(n)
                .ok_or_else(|| InventoryError::QuantityOverflow(line.id.clone()))?;
            match line.id.kind() {
                ItemKind::Part => self.resolution.demand.add(line.id.clone(), total)?,
                ItemKind::Assembly => self.get(&line.id, total)?,
            }
        }
        Ok(())
    }

    /// Put produced units into an assembly's bin
    pub fn deposit(&mut self, id: &ItemId, units: Quantity) -> InventoryResult<()> {
        let asm = self
            .catalog
            .assembly_mut(id.as_str())
            .ok_or_else(|| InventoryError::UnknownAssembly(id.to_string()))?;
        asm.fill(units);
        Ok(())
    }

    /// Append an entry to the production log
    pub fn record(&mut self, activity: Activity) {
        self.resolution.activity.push(activity);
    }

    /// Take the production log and raw-part demand
    pub fn finish(self) -> Resolution {
        self.resolution
    }
}
