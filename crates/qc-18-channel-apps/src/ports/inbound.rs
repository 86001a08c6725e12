//! # Inbound Ports
//!
//! The application contract every channel application implements, and the
//! resolver the channel layer uses to turn an address into an application.

use crate::domain::{Address, AuxData, ChannelAppError, ChannelState, Params, RegistryError};
use std::fmt::Debug;
use std::io::Read;
use std::sync::Arc;

/// Channel application contract.
///
/// Implementations are pure: validation never performs I/O, never blocks and
/// never mutates the states it is given.
pub trait ChannelApp: Send + Sync + Debug {
    /// On-chain identity of the application.
    fn address(&self) -> Address;

    /// Decode this application's auxiliary data from a byte stream.
    fn decode_data(&self, r: &mut dyn Read) -> Result<AuxData, ChannelAppError>;

    /// Whether payloads of this kind belong to this application.
    fn supports_data(&self, data: &AuxData) -> bool;

    /// Accept or reject a freshly constructed channel state.
    fn validate_initial_state(
        &self,
        params: &Params,
        state: &ChannelState,
    ) -> Result<(), ChannelAppError>;

    /// Accept or reject `from -> to` as proposed by participant `proposer`.
    ///
    /// `validate_transition(p, s, s, i)` must succeed for every valid `s` and `i`.
    fn validate_transition(
        &self,
        params: &Params,
        from: &ChannelState,
        to: &ChannelState,
        proposer: usize,
    ) -> Result<(), ChannelAppError>;
}

/// Shared handle to an application.
pub type DynChannelApp = Arc<dyn ChannelApp>;

/// Two applications are the same iff their addresses are equal.
pub fn same_app(a: &dyn ChannelApp, b: &dyn ChannelApp) -> bool {
    a.address() == b.address()
}

/// Address-to-application resolution.
pub trait AppResolver: Send + Sync {
    /// Resolve the application governing channels bound to `address`.
    fn resolve(&self, address: &Address) -> Result<DynChannelApp, RegistryError>;
}
