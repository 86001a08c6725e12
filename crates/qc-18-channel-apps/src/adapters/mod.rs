//! # Adapters Layer (Hexagonal Architecture)
//!
//! Concrete applications and the in-memory application registry.

mod app_registry;
mod payment_app;

pub use app_registry::{global_registry, AppMatcher, AppRegistry};
pub use payment_app::{PaymentApp, PaymentAppRandomizer};
