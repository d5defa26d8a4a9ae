//! Catalog of part and assembly definitions
//!
//! Parts and assemblies share one identifier namespace. Both are kept in
//! registration order, which the restock sweep depends on, with a hash index
//! for lookups.

use std::collections::HashMap;

use crate::core::entity::{sorted_by_id, Item};
use crate::core::error::{InventoryError, InventoryResult};
use crate::core::identity::ItemId;
use crate::core::quantities::{Quantity, Recipe};
use crate::entities::{Assembly, Part};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Part(usize),
    Assembly(usize),
}

/// A catalog lookup result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    Part(&'a Part),
    Assembly(&'a Assembly),
}

impl<'a> Entry<'a> {
    pub fn id(&self) -> &'a ItemId {
        match *self {
            Entry::Part(part) => &part.id,
            Entry::Assembly(asm) => asm.id(),
        }
    }
}

/// Saved on-hand levels, in registration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockSnapshot(Vec<Quantity>);

/// All known parts and assemblies
#[derive(Debug, Default)]
pub struct Catalog {
    parts: Vec<Part>,
    assemblies: Vec<Assembly>,
    index: HashMap<String, Slot>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new part
    pub fn define_part(&mut self, id: &str) -> InventoryResult<&Part> {
        let id = ItemId::part(id)?;
        self.ensure_unused(&id)?;

        tracing::info!(part = %id, "part defined");
        self.index
            .insert(id.as_str().to_string(), Slot::Part(self.parts.len()));
        self.parts.push(Part::new(id));
        Ok(&self.parts[self.parts.len() - 1])
    }

    /// Build a recipe from raw component ids and quantities
    ///
    /// Every component must already be defined and every quantity must be
    /// positive. Repeated components merge.
    pub fn build_recipe<'a, I>(&self, components: I) -> InventoryResult<Recipe>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut recipe = Recipe::new();
        for (raw_id, quantity) in components {
            let entry = self
                .lookup(raw_id)
                .ok_or_else(|| InventoryError::UnknownComponent(raw_id.to_string()))?;
            if quantity <= 0 {
                return Err(InventoryError::invalid_quantity(quantity.to_string(), raw_id));
            }
            recipe.add(entry.id().clone(), quantity as Quantity)?;
        }
        Ok(recipe)
    }

    /// Register a new assembly with an empty bin
    ///
    /// Nothing is registered unless every check passes.
    pub fn define_assembly(
        &mut self,
        id: &str,
        capacity: i64,
        recipe: Recipe,
    ) -> InventoryResult<&Assembly> {
        let id = self.check_new_assembly(id, capacity)?;
        if let Some(missing) = recipe.iter().find(|line| self.lookup(line.id.as_str()).is_none()) {
            return Err(InventoryError::UnknownComponent(missing.id.to_string()));
        }

        tracing::info!(
            assembly = %id,
            capacity,
            components = recipe.len(),
            "assembly defined"
        );
        self.index
            .insert(id.as_str().to_string(), Slot::Assembly(self.assemblies.len()));
        self.assemblies
            .push(Assembly::new(id, capacity as Quantity, recipe));
        Ok(&self.assemblies[self.assemblies.len() - 1])
    }

    /// Register an assembly from raw component ids and quantities
    ///
    /// The assembly's own id and capacity are checked before any component.
    pub fn define_assembly_from<'a, I>(
        &mut self,
        id: &str,
        capacity: i64,
        components: I,
    ) -> InventoryResult<&Assembly>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        self.check_new_assembly(id, capacity)?;
        let recipe = self.build_recipe(components)?;
        self.define_assembly(id, capacity, recipe)
    }

    fn check_new_assembly(&self, id: &str, capacity: i64) -> InventoryResult<ItemId> {
        let id = ItemId::assembly(id)?;
        if capacity < 0 {
            return Err(InventoryError::invalid_capacity(capacity.to_string(), id.as_str()));
        }
        self.ensure_unused(&id)?;
        Ok(id)
    }

    fn ensure_unused(&self, id: &ItemId) -> InventoryResult<()> {
        if self.index.contains_key(id.as_str()) {
            return Err(InventoryError::DuplicateIdentifier { id: id.clone() });
        }
        Ok(())
    }

    /// Look up any item by id
    pub fn lookup(&self, id: &str) -> Option<Entry<'_>> {
        match self.index.get(id)? {
            Slot::Part(pos) => Some(Entry::Part(&self.parts[*pos])),
            Slot::Assembly(pos) => Some(Entry::Assembly(&self.assemblies[*pos])),
        }
    }

    pub fn assembly(&self, id: &str) -> Option<&Assembly> {
        match self.lookup(id)? {
            Entry::Assembly(asm) => Some(asm),
            Entry::Part(_) => None,
        }
    }

    /// Look up an assembly, failing with `UnknownAssembly`
    pub fn require_assembly(&self, id: &str) -> InventoryResult<&Assembly> {
        self.assembly(id)
            .ok_or_else(|| InventoryError::UnknownAssembly(id.to_string()))
    }

    pub(crate) fn assembly_mut(&mut self, id: &str) -> Option<&mut Assembly> {
        match self.index.get(id)? {
            Slot::Assembly(pos) => self.assemblies.get_mut(*pos),
            Slot::Part(_) => None,
        }
    }

    /// Assemblies in registration order
    pub fn assemblies(&self) -> &[Assembly] {
        &self.assemblies
    }

    pub fn parts_sorted(&self) -> Vec<&Part> {
        sorted_by_id(&self.parts)
    }

    pub fn assemblies_sorted(&self) -> Vec<&Assembly> {
        sorted_by_id(&self.assemblies)
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Discard every definition
    pub fn clear(&mut self) {
        tracing::debug!(
            parts = self.parts.len(),
            assemblies = self.assemblies.len(),
            "catalog cleared"
        );
        self.parts.clear();
        self.assemblies.clear();
        self.index.clear();
    }

    #[cfg(test)]
    pub(crate) fn replace_assembly(&mut self, asm: Assembly) {
        if let Some(Slot::Assembly(pos)) = self.index.get(asm.id().as_str()).copied() {
            self.assemblies[pos] = asm;
        }
    }

    /// Record every assembly's on-hand level
    pub fn snapshot(&self) -> StockSnapshot {
        StockSnapshot(self.assemblies.iter().map(Assembly::on_hand).collect())
    }

    /// Put back on-hand levels saved by [`Catalog::snapshot`]
    pub fn restore(&mut self, snapshot: &StockSnapshot) {
        for (asm, units) in self.assemblies.iter_mut().zip(&snapshot.0) {
            asm.set_on_hand(*units);
        }
    }
}
