//! # Domain Entities
//!
//! Channel parameters and channel states as handed to applications by the
//! channel layer. States are immutable once built: a candidate `to` state is
//! a full copy of `from` with changes applied, never an in-place mutation.

use super::aux_data::AuxData;
use super::balances::Balances;
use super::value_objects::{Address, Balance, ChannelId};
use serde::{Deserialize, Serialize};

/// Fixed channel parameters agreed at channel creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Channel identifier.
    pub id: ChannelId,
    /// Participant addresses; balance columns are index-aligned with this list.
    pub participants: Vec<Address>,
    /// Address of the application governing this channel.
    pub app: Address,
    /// Dispute challenge duration in seconds.
    pub challenge_duration: u64,
    /// Channel nonce.
    pub nonce: Balance,
}

impl Params {
    /// Number of participants.
    pub fn num_parts(&self) -> usize {
        self.participants.len()
    }
}

/// A channel state at some version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelState {
    /// Channel identifier.
    pub id: ChannelId,
    /// Monotonic state version.
    pub version: u64,
    /// Application address, must equal `Params::app`.
    pub app: Address,
    /// Balance matrix.
    pub balances: Balances,
    /// Application payload.
    pub data: AuxData,
    /// Final states can be settled without dispute.
    pub is_final: bool,
}

impl ChannelState {
    /// Version-0 state for a channel.
    pub fn initial(params: &Params, balances: Balances, data: AuxData) -> Self {
        Self {
            id: params.id,
            version: 0,
            app: params.app,
            balances,
            data,
            is_final: false,
        }
    }

    /// Number of participants as seen by the balance matrix.
    pub fn num_parts(&self) -> usize {
        self.balances.num_parts()
    }

    /// Candidate successor with the given balances and the next version.
    pub fn with_balances(&self, balances: Balances) -> Self {
        Self {
            version: self.version.saturating_add(1),
            balances,
            ..self.clone()
        }
    }

    /// Candidate successor with different auxiliary data.
    pub fn with_data(&self, data: AuxData) -> Self {
        Self {
            version: self.version.saturating_add(1),
            data,
            ..self.clone()
        }
    }
}
