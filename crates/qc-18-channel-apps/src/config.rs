//! Configuration for the Channel Applications subsystem

use crate::domain::Address;
use serde::{Deserialize, Serialize};

/// Channel application configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelAppConfig {
    /// Address of the payment application, set at startup.
    pub payment_app_address: Option<Address>,
    /// Refuse to overwrite the payment singleton once set.
    pub guard_payment_singleton: bool,
}

impl ChannelAppConfig {
    /// Config with the payment application at `address`.
    pub fn with_payment_app(address: Address) -> Self {
        Self {
            payment_app_address: Some(address),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChannelAppConfig::default();
        assert!(config.payment_app_address.is_none());
        assert!(!config.guard_payment_singleton);
    }

    #[test]
    fn test_config_from_json() {
        let json = format!(
            r#"{{"payment_app_address":"0x{}","guard_payment_singleton":true}}"#,
            "ab".repeat(20)
        );
        let config: ChannelAppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.payment_app_address, Some(Address::new([0xAB; 20])));
        assert!(config.guard_payment_singleton);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ChannelAppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ChannelAppConfig::default());
    }
}
