//! Part entity - raw, non-manufacturable items

use serde::Serialize;

use crate::core::entity::Item;
use crate::core::identity::ItemId;

/// A raw part. Parts carry no stock; they only show up as demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub id: ItemId,
}

impl Part {
    pub fn new(id: ItemId) -> Self {
        Self { id }
    }
}

impl Item for Part {
    fn id(&self) -> &ItemId {
        &self.id
    }
}
