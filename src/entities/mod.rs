//! Entity type definitions
//!
//! - [`Part`] - raw items, consumed as demand
//! - [`Assembly`] - manufactured items with a bin capacity and a recipe

pub mod assembly;
pub mod part;

pub use assembly::Assembly;
pub use part::Part;
