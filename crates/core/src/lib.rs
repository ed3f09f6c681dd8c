//! Core budget logic for Keystone.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Budget line derivation, cost-code grouping and roll-up totals live here.
//!
//! # Modules
//!
//! - `budget` - Cost-code grouping, aggregation, quick filters and reports

pub mod budget;
