//! Bill-of-materials inventory
//!
//! Tracks raw parts and manufactured assemblies, resolves orders and
//! stocking requests into raw-part demand, and reports inventory levels.

pub mod cli;
pub mod core;
pub mod entities;
