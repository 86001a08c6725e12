//! # Domain Module
//!
//! Core domain types for channel application validation.

pub mod aux_data;
pub mod balances;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use aux_data::*;
pub use balances::Balances;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
