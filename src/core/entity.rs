//! Item trait - common interface for catalog entries

use crate::core::identity::ItemId;

/// Common trait for parts and assemblies
pub trait Item {
    /// Get the item's unique ID
    fn id(&self) -> &ItemId;
}

/// Sort a collection of items by identifier for display
pub fn sorted_by_id<'a, T, I>(items: I) -> Vec<&'a T>
where
    T: Item + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut items: Vec<&T> = items.into_iter().collect();
    items.sort_by(|a, b| a.id().cmp(b.id()));
    items
}
