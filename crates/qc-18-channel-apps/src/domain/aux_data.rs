//! # Auxiliary Data
//!
//! Application-defined payload attached to a channel state.
//!
//! Payloads are a tagged union: each application declares which kinds it
//! accepts, and the routing boundary checks the tag before dispatching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Tag of an [`AuxData`] payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuxDataKind {
    /// Canonical empty payload.
    NoData,
    /// Application-specific bytes.
    Opaque,
}

impl fmt::Display for AuxDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuxDataKind::NoData => write!(f, "no-data"),
            AuxDataKind::Opaque => write!(f, "opaque"),
        }
    }
}

/// Auxiliary data payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuxData {
    /// The canonical empty payload. Encodes to zero bytes.
    #[default]
    NoData,
    /// Raw payload owned by some non-payment application.
    Opaque(Vec<u8>),
}

impl AuxData {
    /// Payload tag.
    pub fn kind(&self) -> AuxDataKind {
        match self {
            AuxData::NoData => AuxDataKind::NoData,
            AuxData::Opaque(_) => AuxDataKind::Opaque,
        }
    }

    /// True only for the canonical empty payload.
    pub fn is_empty_payload(&self) -> bool {
        matches!(self, AuxData::NoData)
    }

    /// Write the payload to `w`.
    pub fn encode(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match self {
            AuxData::NoData => Ok(()),
            AuxData::Opaque(bytes) => w.write_all(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_encodes_nothing() {
        let mut buf = Vec::new();
        AuxData::NoData.encode(&mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_opaque_encodes_bytes() {
        let mut buf = Vec::new();
        AuxData::Opaque(vec![1, 2, 3]).encode(&mut buf).unwrap();
        assert_eq!(buf, vec![1, 2, 3]);
    }

    #[test]
    fn test_kind_and_default() {
        assert_eq!(AuxData::default(), AuxData::NoData);
        assert!(AuxData::NoData.is_empty_payload());
        assert!(!AuxData::Opaque(vec![]).is_empty_payload());
        assert_eq!(AuxData::Opaque(vec![9]).kind(), AuxDataKind::Opaque);
        assert_eq!(AuxDataKind::NoData.to_string(), "no-data");
    }
}
