//! Payment Application Adapter
//!
//! Implements `ChannelApp` for plain payment channels: value only ever flows
//! out of the proposer's own balance. Payment states carry no auxiliary data.

use crate::domain::{
    invariant_payment_transition, Address, AuxData, BackendId, ChannelAppError, ChannelState,
    Params,
};
use crate::ports::{AppRandomizer, ChannelApp, DynChannelApp};
use rand::RngCore;
use std::io::Read;
use std::sync::Arc;
use tracing::trace;

/// The payment application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentApp {
    address: Address,
}

impl PaymentApp {
    /// Payment application deployed at `address`.
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Payload every payment state carries.
    pub fn data() -> AuxData {
        AuxData::NoData
    }

    /// Abort on a payload the payment application can never hold.
    ///
    /// Reaching this means the channel layer routed another application's
    /// state here, which is a bug in the caller, not peer misbehavior.
    fn assert_no_data(&self, state: &ChannelState) {
        if !state.data.is_empty_payload() {
            panic!(
                "payment app {} received {} data on channel {} (version {})",
                self.address,
                state.data.kind(),
                state.id,
                state.version
            );
        }
    }
}

impl ChannelApp for PaymentApp {
    fn address(&self) -> Address {
        self.address
    }

    fn decode_data(&self, _r: &mut dyn Read) -> Result<AuxData, ChannelAppError> {
        Ok(Self::data())
    }

    fn supports_data(&self, data: &AuxData) -> bool {
        data.is_empty_payload()
    }

    /// # Panics
    ///
    /// If `state` carries anything but the canonical empty payload.
    fn validate_initial_state(
        &self,
        _params: &Params,
        state: &ChannelState,
    ) -> Result<(), ChannelAppError> {
        self.assert_no_data(state);
        Ok(())
    }

    /// # Panics
    ///
    /// If either state carries anything but the canonical empty payload.
    fn validate_transition(
        &self,
        params: &Params,
        from: &ChannelState,
        to: &ChannelState,
        proposer: usize,
    ) -> Result<(), ChannelAppError> {
        self.assert_no_data(from);
        self.assert_no_data(to);

        trace!(
            "[qc-18] Payment transition on {} v{} -> v{} by {}",
            from.id,
            from.version,
            to.version,
            proposer
        );

        invariant_payment_transition(&from.balances, &to.balances, proposer, params.num_parts())
    }
}

/// Random payment applications for property tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct PaymentAppRandomizer;

impl AppRandomizer for PaymentAppRandomizer {
    fn new_random_app(&self, rng: &mut dyn RngCore, backend: BackendId) -> DynChannelApp {
        let app = PaymentApp::new(Address::random(rng));
        trace!("[qc-18] Random payment app {} on {:?}", app.address, backend);
        Arc::new(app)
    }

    fn new_random_data(&self, _rng: &mut dyn RngCore) -> AuxData {
        PaymentApp::data()
    }
}
