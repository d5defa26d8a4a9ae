//! Inventory policies built on the resolver
//!
//! Each top-level operation runs against a snapshot of every bin: if
//! resolution fails part way, on-hand levels are put back before the error
//! is returned.

use crate::core::catalog::Catalog;
use crate::core::entity::Item;
use crate::core::error::{InventoryError, InventoryResult};
use crate::core::identity::{ItemId, ItemKind};
use crate::core::quantities::{Quantities, Quantity};
use crate::core::resolver::{Activity, Resolution, Resolver};

/// Run `f` against a resolver, restoring every bin if it fails
fn transactional<F>(catalog: &mut Catalog, f: F) -> InventoryResult<Resolution>
where
    F: FnOnce(&mut Resolver<'_>) -> InventoryResult<()>,
{
    let snapshot = catalog.snapshot();
    let mut resolver = Resolver::new(catalog);
    match f(&mut resolver) {
        Ok(()) => Ok(resolver.finish()),
        Err(err) => {
            drop(resolver);
            catalog.restore(&snapshot);
            tracing::debug!(error = %err, "resolution rolled back");
            Err(err)
        }
    }
}

/// Validate a whole order before anything is touched
///
/// Repeated assemblies are merged. Any bad line cancels the order.
pub fn parse_order<'a, I>(catalog: &Catalog, lines: I) -> InventoryResult<Quantities>
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut orders = Quantities::new();
    for (raw_id, quantity) in lines {
        let asm = catalog
            .assembly(raw_id)
            .ok_or_else(|| InventoryError::UnknownAssembly(raw_id.to_string()).order_canceled())?;
        if quantity <= 0 {
            return Err(InventoryError::invalid_quantity(quantity.to_string(), raw_id).order_canceled());
        }
        orders.add(asm.id().clone(), quantity as Quantity)?;
    }
    Ok(orders)
}

/// Fill an order, drawing on stock and manufacturing any shortfall
pub fn fulfill_order<'a, I>(catalog: &mut Catalog, lines: I) -> InventoryResult<Resolution>
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let orders = parse_order(catalog, lines)?;
    tracing::info!(lines = orders.len(), units = orders.total(), "fulfilling order");
    transactional(catalog, |resolver| {
        orders
            .iter()
            .try_for_each(|line| resolver.get(&line.id, line.quantity))
    })
}

/// Manufacture up to `n` units into an assembly's bin, never past capacity
pub fn stock(catalog: &mut Catalog, id: &str, n: i64) -> InventoryResult<Resolution> {
    if n <= 0 {
        return Err(InventoryError::invalid_quantity(n.to_string(), id));
    }
    let asm = catalog.require_assembly(id)?;
    let units = (n as Quantity).min(asm.room());
    let id = asm.id().clone();
    tracing::info!(assembly = %id, requested = n, units, "stocking");

    transactional(catalog, |resolver| {
        resolver.make(&id, units)?;
        resolver.deposit(&id, units)
    })
}

/// Where a restock entry lands in the production log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Announce {
    /// Sweeps announce each assembly before making it
    BeforeMake,
    /// A single restock reports once the bin is full
    AfterMake,
}

fn restock_one(resolver: &mut Resolver<'_>, id: &ItemId, announce: Announce) -> InventoryResult<()> {
    let Some(asm) = resolver.catalog().assembly(id.as_str()) else {
        return Err(InventoryError::UnknownAssembly(id.to_string()));
    };
    if !asm.is_low() || asm.room() == 0 {
        return Ok(());
    }
    let units = asm.room();
    tracing::info!(assembly = %id, units, "restocking");
    let entry = Activity::Restock {
        id: id.clone(),
        units,
    };
    if announce == Announce::BeforeMake {
        resolver.record(entry.clone());
    }
    resolver.make(id, units)?;
    resolver.deposit(id, units)?;
    if announce == Announce::AfterMake {
        resolver.record(entry);
    }
    Ok(())
}

/// Top up low assemblies to full capacity
///
/// With no id every assembly is considered, most recently defined first.
/// Earlier restocks may draw on bins visited later in the sweep.
pub fn restock(catalog: &mut Catalog, id: Option<&str>) -> InventoryResult<Resolution> {
    let (targets, announce): (Vec<ItemId>, _) = match id {
        Some(id) => (
            vec![catalog.require_assembly(id)?.id().clone()],
            Announce::AfterMake,
        ),
        None => (
            catalog
                .assemblies()
                .iter()
                .rev()
                .map(|asm| asm.id().clone())
                .collect(),
            Announce::BeforeMake,
        ),
    };

    transactional(catalog, |resolver| {
        targets
            .iter()
            .try_for_each(|target| restock_one(resolver, target, announce))
    })
}

/// Zero an assembly's on-hand stock
pub fn empty(catalog: &mut Catalog, id: &str) -> InventoryResult<()> {
    if ItemKind::from_id(id) != Some(ItemKind::Assembly) {
        return Err(InventoryError::NotAnAssembly(id.to_string()));
    }
    let asm = catalog
        .assembly_mut(id)
        .ok_or_else(|| InventoryError::UnknownAssembly(id.to_string()))?;
    asm.empty();
    tracing::info!(assembly = id, "emptied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    /// A1 (cap 10) = 2 x P1; A2 (cap 5) = 1 x A1 + 3 x P2
    fn nested() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.define_part("P1").unwrap();
        catalog.define_part("P2").unwrap();
        let r1 = catalog.build_recipe([("P1", 2)]).unwrap();
        catalog.define_assembly("A1", 10, r1).unwrap();
        let r2 = catalog.build_recipe([("A1", 1), ("P2", 3)]).unwrap();
        catalog.define_assembly("A2", 5, r2).unwrap();
        catalog
    }

    fn on_hand(catalog: &Catalog, name: &str) -> Quantity {
        catalog.assembly(name).unwrap().on_hand()
    }

    #[test]
    fn test_stock_example() {
        let mut catalog = nested();
        let resolution = stock(&mut catalog, "A1", 7).unwrap();
        assert_eq!(resolution.demand.get(&id("P1")), Some(14));
        assert_eq!(on_hand(&catalog, "A1"), 7);
    }

    #[test]
    fn test_stock_clamps_to_capacity() {
        let mut catalog = nested();
        stock(&mut catalog, "A1", 7).unwrap();
        let resolution = stock(&mut catalog, "A1", 7).unwrap();
        assert_eq!(resolution.demand.get(&id("P1")), Some(6));
        assert_eq!(on_hand(&catalog, "A1"), 10);

        let resolution = stock(&mut catalog, "A1", 1).unwrap();
        assert!(resolution.is_empty());
        assert_eq!(on_hand(&catalog, "A1"), 10);
    }

    #[test]
    fn test_stock_rejects_bad_requests() {
        let mut catalog = nested();
        assert_eq!(
            stock(&mut catalog, "A1", 0).unwrap_err().to_string(),
            "0: illegal quantity for ID A1"
        );
        assert_eq!(
            stock(&mut catalog, "A7", 3).unwrap_err(),
            InventoryError::UnknownAssembly("A7".into())
        );
        assert_eq!(on_hand(&catalog, "A1"), 0);
    }

    #[test]
    fn test_fulfill_merges_and_draws_stock() {
        let mut catalog = nested();
        stock(&mut catalog, "A1", 3).unwrap();

        let resolution = fulfill_order(&mut catalog, [("A1", 2), ("A2", 1), ("A1", 2)]).unwrap();
        // A1: 4 requested, 3 on hand -> make 1 (2 x P1)
        // A2: make 1 -> A1 x 1 from empty bin (2 x P1) + 3 x P2
        assert_eq!(resolution.demand.get(&id("P1")), Some(4));
        assert_eq!(resolution.demand.get(&id("P2")), Some(3));
        assert_eq!(on_hand(&catalog, "A1"), 0);
    }

    #[test]
    fn test_fulfill_unknown_assembly_cancels_everything() {
        let mut catalog = nested();
        stock(&mut catalog, "A1", 5).unwrap();

        let err = fulfill_order(&mut catalog, [("A1", 2), ("A9", 1)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "A9: assembly ID is not in the inventory -- order canceled"
        );
        assert_eq!(on_hand(&catalog, "A1"), 5);
    }

    #[test]
    fn test_fulfill_rejects_parts_and_bad_quantities() {
        let mut catalog = nested();
        assert!(matches!(
            fulfill_order(&mut catalog, [("P1", 2)]),
            Err(InventoryError::OrderCanceled(_))
        ));
        let err = fulfill_order(&mut catalog, [("A1", -2)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "-2: illegal quantity for ID A1 -- order canceled"
        );
    }

    #[test]
    fn test_empty_order_is_noop() {
        let mut catalog = nested();
        let resolution = fulfill_order(&mut catalog, std::iter::empty()).unwrap();
        assert!(resolution.is_empty());
    }

    #[test]
    fn test_restock_single() {
        let mut catalog = nested();
        stock(&mut catalog, "A1", 8).unwrap();
        // 8 >= 10/2 + 1, not low
        assert!(restock(&mut catalog, Some("A1")).unwrap().is_empty());

        empty(&mut catalog, "A1").unwrap();
        stock(&mut catalog, "A1", 5).unwrap();
        let resolution = restock(&mut catalog, Some("A1")).unwrap();
        assert_eq!(resolution.demand.get(&id("P1")), Some(10));
        assert_eq!(
            resolution.activity,
            vec![
                Activity::Make {
                    id: id("A1"),
                    units: 5
                },
                Activity::Restock {
                    id: id("A1"),
                    units: 5
                },
            ]
        );
        assert_eq!(on_hand(&catalog, "A1"), 10);
    }

    #[test]
    fn test_restock_all_runs_newest_first() {
        let mut catalog = nested();
        let resolution = restock(&mut catalog, None).unwrap();

        let restocked: Vec<&str> = resolution
            .activity
            .iter()
            .filter_map(|a| match a {
                Activity::Restock { id, .. } => Some(id.as_str()),
                Activity::Make { .. } => None,
            })
            .collect();
        assert_eq!(restocked, vec!["A2", "A1"]);

        // A2 x5 pulls 5 freshly made A1, leaving A1 empty and low, then A1 x10
        assert_eq!(resolution.demand.get(&id("P1")), Some(30));
        assert_eq!(resolution.demand.get(&id("P2")), Some(15));
        assert_eq!(on_hand(&catalog, "A1"), 10);
        assert_eq!(on_hand(&catalog, "A2"), 5);
    }

    #[test]
    fn test_restock_skips_stocked_assemblies() {
        let mut catalog = nested();
        stock(&mut catalog, "A1", 10).unwrap();
        stock(&mut catalog, "A2", 5).unwrap();
        assert!(restock(&mut catalog, None).unwrap().is_empty());
    }

    #[test]
    fn test_restock_unknown() {
        let mut catalog = nested();
        assert_eq!(
            restock(&mut catalog, Some("A3")).unwrap_err(),
            InventoryError::UnknownAssembly("A3".into())
        );
    }

    #[test]
    fn test_empty_checks() {
        let mut catalog = nested();
        assert_eq!(
            empty(&mut catalog, "P1").unwrap_err(),
            InventoryError::NotAnAssembly("P1".into())
        );
        assert_eq!(
            empty(&mut catalog, "A5").unwrap_err(),
            InventoryError::UnknownAssembly("A5".into())
        );
    }

    /// A1 (cap 4, full) = 1 x P1; A2 (cap 10) = huge x P1 + 2 x A1.
    ///
    /// Making A2 draws A1 down before the P1 line overflows.
    fn overflowing() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.define_part("P1").unwrap();
        let r1 = catalog.build_recipe([("P1", 1)]).unwrap();
        catalog.define_assembly("A1", 4, r1).unwrap();
        let r2 = catalog.build_recipe([("P1", i64::MAX), ("A1", 2)]).unwrap();
        catalog.define_assembly("A2", 10, r2).unwrap();
        stock(&mut catalog, "A1", 4).unwrap();
        catalog
    }

    #[test]
    fn test_failed_resolution_rolls_back() {
        let mut catalog = overflowing();
        let err = fulfill_order(&mut catalog, [("A2", 3)]).unwrap_err();
        assert_eq!(err, InventoryError::QuantityOverflow(id("P1")));
        assert_eq!(on_hand(&catalog, "A1"), 4);
    }

    #[test]
    fn test_failed_stock_rolls_back() {
        let mut catalog = overflowing();
        let err = stock(&mut catalog, "A2", 3).unwrap_err();
        assert_eq!(err, InventoryError::QuantityOverflow(id("P1")));
        assert_eq!(on_hand(&catalog, "A1"), 4);
        assert_eq!(on_hand(&catalog, "A2"), 0);
    }

    #[test]
    fn test_failed_restock_sweep_rolls_back() {
        let mut catalog = overflowing();
        let r3 = catalog.build_recipe([("P1", 1)]).unwrap();
        catalog.define_assembly("A3", 6, r3).unwrap();

        // A3 is filled, then A2 drains A1 and overflows
        let err = restock(&mut catalog, None).unwrap_err();
        assert_eq!(err, InventoryError::QuantityOverflow(id("P1")));
        assert_eq!(on_hand(&catalog, "A1"), 4);
        assert_eq!(on_hand(&catalog, "A2"), 0);
        assert_eq!(on_hand(&catalog, "A3"), 0);
    }

    proptest! {
        #[test]
        fn prop_stock_never_exceeds_capacity(first in 1i64..30, second in 1i64..30) {
            let mut catalog = nested();
            let before = stock(&mut catalog, "A1", first).unwrap();
            let held = on_hand(&catalog, "A1");
            prop_assert!(held <= 10);
            prop_assert_eq!(before.demand.get(&id("P1")).unwrap_or(0), 2 * held);

            let after = stock(&mut catalog, "A1", second).unwrap();
            let made = on_hand(&catalog, "A1") - held;
            prop_assert!(on_hand(&catalog, "A1") <= 10);
            prop_assert_eq!(made, (second as u64).min(10 - held));
            prop_assert_eq!(after.demand.get(&id("P1")).unwrap_or(0), 2 * made);
        }
    }
}
