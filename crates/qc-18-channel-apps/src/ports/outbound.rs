//! # Outbound Ports
//!
//! Randomized application generation for property tests. Validation paths
//! never call into this port.

use super::inbound::DynChannelApp;
use crate::domain::{AuxData, BackendId};
use rand::RngCore;

/// Generates random applications and payloads of one application kind.
pub trait AppRandomizer: Send + Sync {
    /// New application with a freshly generated address on `backend`.
    fn new_random_app(&self, rng: &mut dyn RngCore, backend: BackendId) -> DynChannelApp;

    /// Random auxiliary data valid for applications of this kind.
    fn new_random_data(&self, rng: &mut dyn RngCore) -> AuxData;
}
