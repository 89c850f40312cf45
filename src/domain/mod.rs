//! Domain layer - Core encounter generation logic with no I/O
//!
//! This layer contains:
//! - Value Objects: travel conditions, party composition, probability tables
//! - Entities: monster records, generated encounters
//! - Aggregates: the encounter batch record
//! - Domain Services: tables, probability resolution, rolls, budgets,
//!   monster filtering and encounter composition

pub mod aggregates;
pub mod entities;
pub mod services;
pub mod value_objects;
