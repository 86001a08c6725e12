//! # Domain Errors
//!
//! Error types for channel application validation and resolution.
//!
//! Errors fall into four classes (see [`ErrorClass`]):
//! - structural: `from`/`to` shapes disagree, proposer out of range
//! - semantic: a per-cell transfer rule was broken by the proposer
//! - contract shape: a state reached an application that cannot read its data
//! - registry: an address could not be turned into an application

use super::value_objects::{Address, Balance};
use thiserror::Error;

/// Application kinds that have a well-known singleton slot in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppKind {
    /// The payment application.
    Payment,
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppKind::Payment => write!(f, "payment"),
        }
    }
}

/// Registry configuration and lookup errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Neither the singleton nor any registered matcher accepts the address.
    #[error("No matching application for address {0}")]
    NoMatchingApplication(Address),

    /// Singleton slot read before it was configured.
    #[error("Application kind '{0}' is not configured")]
    Unconfigured(AppKind),

    /// Guarded singleton set on an already configured slot.
    #[error("Application kind '{kind}' already configured at {current}")]
    AlreadyConfigured {
        /// Slot that was already set
        kind: AppKind,
        /// Address currently held by the slot
        current: Address,
    },
}

/// Coarse classification of a [`ChannelAppError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Shape mismatch between the compared states.
    Structural,
    /// Per-cell transition rule violated.
    Semantic,
    /// Auxiliary data of the wrong kind for the application.
    ContractShape,
    /// Byte stream could not be decoded.
    Codec,
    /// Address resolution failed.
    Registry,
}

/// Channel application error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelAppError {
    /// Balance matrix rows have different lengths.
    #[error("Ragged balances: asset {asset} has {got} participants, expected {expected}")]
    RaggedBalances {
        /// Offending asset index
        asset: usize,
        /// Participant count of asset 0
        expected: usize,
        /// Participant count of the offending asset
        got: usize,
    },

    /// `from` and `to` carry a different number of assets.
    #[error("Asset count mismatch: from={from}, to={to}")]
    AssetCountMismatch {
        /// Assets in `from`
        from: usize,
        /// Assets in `to`
        to: usize,
    },

    /// `from` and `to` carry a different number of participants for an asset.
    #[error("Participant count mismatch for asset {asset}: from={from}, to={to}")]
    ParticipantCountMismatch {
        /// Asset index
        asset: usize,
        /// Participants in `from`
        from: usize,
        /// Participants in `to`
        to: usize,
    },

    /// Proposer index does not name a participant.
    #[error("Proposer index {index} out of range for {participants} participants")]
    ProposerOutOfRange {
        /// Claimed proposer index
        index: usize,
        /// Number of participants
        participants: usize,
    },

    /// State does not belong to the channel described by the params.
    #[error("State does not match channel params: {0}")]
    StateParamsMismatch(String),

    /// The proposer's own balance increased.
    #[error("Proposer {participant} enriched itself in asset {asset}: {before} -> {after}")]
    ProposerSelfEnrichment {
        /// Asset index
        asset: usize,
        /// Proposer index
        participant: usize,
        /// Balance in `from`
        before: Balance,
        /// Balance in `to`
        after: Balance,
    },

    /// A participant other than the proposer lost funds.
    #[error("Proposer {proposer} debited participant {participant} in asset {asset}")]
    UnauthorizedDebit {
        /// Asset index
        asset: usize,
        /// Debited participant
        participant: usize,
        /// Proposer index
        proposer: usize,
    },

    /// Auxiliary data kind is not handled by the application.
    #[error("Application {app} cannot handle {got} data")]
    AppDataMismatch {
        /// Application address
        app: Address,
        /// Kind of the offending payload
        got: String,
    },

    /// Byte stream decoding failed.
    #[error("Codec error: {0}")]
    Codec(String),

    /// Balance sum exceeded the balance type.
    #[error("Balance overflow in asset {asset}")]
    BalanceOverflow {
        /// Asset index
        asset: usize,
    },

    /// Resolution failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ChannelAppError {
    /// Classify the error for the channel layer.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::RaggedBalances { .. }
            | Self::AssetCountMismatch { .. }
            | Self::ParticipantCountMismatch { .. }
            | Self::ProposerOutOfRange { .. }
            | Self::StateParamsMismatch(_)
            | Self::BalanceOverflow { .. } => ErrorClass::Structural,
            Self::ProposerSelfEnrichment { .. } | Self::UnauthorizedDebit { .. } => {
                ErrorClass::Semantic
            }
            Self::AppDataMismatch { .. } => ErrorClass::ContractShape,
            Self::Codec(_) => ErrorClass::Codec,
            Self::Registry(_) => ErrorClass::Registry,
        }
    }
}

impl From<std::io::Error> for ChannelAppError {
    fn from(err: std::io::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_enrichment_message() {
        let err = ChannelAppError::ProposerSelfEnrichment {
            asset: 1,
            participant: 0,
            before: Balance::from(5u64),
            after: Balance::from(9u64),
        };
        let msg = err.to_string();
        assert!(msg.contains("5 -> 9"));
        assert!(msg.contains("asset 1"));
        assert_eq!(err.class(), ErrorClass::Semantic);
    }

    #[test]
    fn test_unauthorized_debit_class() {
        let err = ChannelAppError::UnauthorizedDebit {
            asset: 0,
            participant: 2,
            proposer: 1,
        };
        assert_eq!(err.class(), ErrorClass::Semantic);
        assert!(err.to_string().contains("participant 2"));
    }

    #[test]
    fn test_no_matching_application() {
        let err: ChannelAppError =
            RegistryError::NoMatchingApplication(Address::new([0xAB; 20])).into();
        assert_eq!(err.class(), ErrorClass::Registry);
        assert!(err.to_string().contains("0xabab"));
    }

    #[test]
    fn test_structural_class() {
        let err = ChannelAppError::AssetCountMismatch { from: 1, to: 2 };
        assert_eq!(err.class(), ErrorClass::Structural);
    }

    #[test]
    fn test_io_error_maps_to_codec() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short");
        let err = ChannelAppError::from(io);
        assert_eq!(err.class(), ErrorClass::Codec);
    }
}
