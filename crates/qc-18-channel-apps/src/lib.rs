//! # QC-18 Channel Applications
//!
//! Pluggable application validation for multi-party, multi-asset off-chain
//! payment channels.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Given two successive channel states and the index of the participant who
//! proposed the transition, decide whether the transition is admissible, and
//! map on-chain application addresses to the logic that governs them.
//!
//! ## Safety Rules
//!
//! | Rule | Description |
//! |------|-------------|
//! | No self-enrichment | The proposer's own balance never increases |
//! | No foreign debit | No other participant's balance ever decreases |
//! | Shape first | Asset/participant counts must agree before any rule runs |
//! | Routed payloads | Auxiliary data kinds are checked before dispatch |
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-channel-apps/
//! ├── domain/          # Address, Balances, ChannelState, invariants, errors
//! ├── ports/           # ChannelApp, AppResolver, AppRandomizer
//! ├── adapters/        # PaymentApp, AppRegistry
//! ├── config.rs        # ChannelAppConfig
//! └── service.rs       # ChannelValidationService (routing boundary)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{global_registry, AppMatcher, AppRegistry, PaymentApp, PaymentAppRandomizer};
pub use config::ChannelAppConfig;
pub use domain::{
    invariant_payment_transition, invariant_transition_shape, transition_violations, Address,
    AppKind, AuxData, AuxDataKind, BackendId, Balance, Balances, ChannelAppError, ChannelId,
    ChannelState, ErrorClass, Params, RegistryError, TransitionViolation, ADDRESS_LEN,
};
pub use ports::{same_app, AppRandomizer, AppResolver, ChannelApp, DynChannelApp};
pub use service::ChannelValidationService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
