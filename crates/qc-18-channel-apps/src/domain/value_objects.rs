//! # Domain Value Objects
//!
//! Immutable value types shared by channel applications.

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

/// Non-negative balance of one participant in one asset.
pub type Balance = primitive_types::U256;

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// On-chain address identifying an application (or a participant).
///
/// Two applications are the same application iff their addresses are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Wrap raw address bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Fresh random address. Test collaborators only.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Write the 20 address bytes.
    pub fn encode(&self, w: &mut dyn Write) -> std::io::Result<()> {
        w.write_all(&self.0)
    }

    /// Read exactly 20 address bytes.
    pub fn decode(r: &mut dyn Read) -> std::io::Result<Self> {
        let mut bytes = [0u8; ADDRESS_LEN];
        r.read_exact(&mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| format!("invalid address hex: {e}"))?;
        let bytes: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| format!("address must be {ADDRESS_LEN} bytes, got {}", v.len()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Channel identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChannelId(pub [u8; 32]);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}{:02x}..", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelId({self})")
    }
}

/// Wallet backend identifier an address belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BackendId(pub u32);
