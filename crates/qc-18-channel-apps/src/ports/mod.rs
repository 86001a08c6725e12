//! # Ports Module
//!
//! Hexagonal architecture ports (application contract, resolver, randomizer).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
