//! Application Registry Adapter
//!
//! Implements `AppResolver` with two coexisting strategies:
//! - a singleton slot for the well-known payment application
//! - an ordered list of (matcher, application) entries, first match wins
//!
//! Writes are expected once at startup, reads for every channel afterwards.
//! Both go through one `RwLock`, so a reader always sees either none or all
//! of a registration. Matchers are called after the lock is released, so a
//! matcher may itself use the registry.

use crate::config::ChannelAppConfig;
use crate::domain::{Address, AppKind, RegistryError};
use crate::ports::{AppResolver, ChannelApp, DynChannelApp};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use super::PaymentApp;

/// Address predicate selecting the application for a channel.
pub type AppMatcher = Arc<dyn Fn(&Address) -> bool + Send + Sync>;

#[derive(Clone)]
struct RegistryEntry {
    matcher: AppMatcher,
    app: DynChannelApp,
}

#[derive(Default)]
struct RegistryState {
    payment: Option<Arc<PaymentApp>>,
    entries: Vec<RegistryEntry>,
}

/// In-memory application registry.
pub struct AppRegistry {
    state: RwLock<RegistryState>,
    /// Refuse to overwrite the payment singleton.
    guard_payment_singleton: bool,
}

impl AppRegistry {
    /// Empty registry; the payment slot may be overwritten.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            guard_payment_singleton: false,
        }
    }

    /// Registry configured from `config`.
    pub fn from_config(config: &ChannelAppConfig) -> Self {
        let registry = Self {
            state: RwLock::new(RegistryState::default()),
            guard_payment_singleton: config.guard_payment_singleton,
        };
        if let Some(address) = config.payment_app_address {
            registry.state.write().payment = Some(Arc::new(PaymentApp::new(address)));
            info!("[qc-18] Payment app configured at {}", address);
        }
        registry
    }

    /// Set the payment application address.
    ///
    /// Overwrites a previous address unless the registry guards the slot.
    pub fn set_payment_app(&self, address: Address) -> Result<(), RegistryError> {
        if self.guard_payment_singleton {
            return self.set_payment_app_once(address);
        }
        let mut state = self.state.write();
        if let Some(previous) = state.payment.as_ref() {
            warn!(
                "[qc-18] Payment app {} replaced by {}",
                previous.address(),
                address
            );
        } else {
            info!("[qc-18] Payment app configured at {}", address);
        }
        state.payment = Some(Arc::new(PaymentApp::new(address)));
        Ok(())
    }

    /// Set the payment application address, failing if it is already set.
    pub fn set_payment_app_once(&self, address: Address) -> Result<(), RegistryError> {
        let mut state = self.state.write();
        if let Some(current) = state.payment.as_ref() {
            return Err(RegistryError::AlreadyConfigured {
                kind: AppKind::Payment,
                current: current.address(),
            });
        }
        state.payment = Some(Arc::new(PaymentApp::new(address)));
        info!("[qc-18] Payment app configured at {}", address);
        Ok(())
    }

    /// The configured payment application.
    pub fn payment_app(&self) -> Result<DynChannelApp, RegistryError> {
        self.state
            .read()
            .payment
            .clone()
            .map(|app| app as DynChannelApp)
            .ok_or(RegistryError::Unconfigured(AppKind::Payment))
    }

    /// Address of the configured payment application.
    pub fn payment_app_address(&self) -> Result<Address, RegistryError> {
        self.state
            .read()
            .payment
            .as_ref()
            .map(|app| app.address())
            .ok_or(RegistryError::Unconfigured(AppKind::Payment))
    }

    /// Whether `app` is the configured payment application.
    pub fn is_payment_app(&self, app: &dyn ChannelApp) -> bool {
        self.payment_app_address()
            .map(|address| address == app.address())
            .unwrap_or(false)
    }

    /// Append a (matcher, application) entry. Earlier entries win on overlap.
    ///
    /// `resolve` evaluates matchers outside the registry lock; a matcher
    /// registered concurrently with a resolution may not be seen by it.
    pub fn register_matcher<F>(&self, matcher: F, app: DynChannelApp)
    where
        F: Fn(&Address) -> bool + Send + Sync + 'static,
    {
        let mut state = self.state.write();
        info!(
            "[qc-18] Registering app {} as entry #{}",
            app.address(),
            state.entries.len()
        );
        state.entries.push(RegistryEntry {
            matcher: Arc::new(matcher),
            app,
        });
    }

    /// Append an entry matching exactly the application's own address.
    pub fn register_app(&self, app: DynChannelApp) {
        let address = app.address();
        self.register_matcher(move |candidate| *candidate == address, app);
    }

    /// Number of matcher entries (the payment slot is not counted).
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// No matcher entries registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("AppRegistry")
            .field("payment", &state.payment)
            .field("entries", &state.entries.len())
            .field("guard_payment_singleton", &self.guard_payment_singleton)
            .finish()
    }
}

impl AppResolver for AppRegistry {
    fn resolve(&self, address: &Address) -> Result<DynChannelApp, RegistryError> {
        let entries = {
            let state = self.state.read();
            if let Some(payment) = state.payment.as_ref() {
                if payment.address() == *address {
                    debug!("[qc-18] Resolved {} to payment app", address);
                    return Ok(payment.clone() as DynChannelApp);
                }
            }
            state.entries.clone()
        };

        for (index, entry) in entries.iter().enumerate() {
            if (entry.matcher)(address) {
                debug!("[qc-18] Resolved {} via entry #{}", address, index);
                return Ok(entry.app.clone());
            }
        }

        debug!("[qc-18] No application for {}", address);
        Err(RegistryError::NoMatchingApplication(*address))
    }
}

/// Process-wide registry, created empty on first use.
///
/// Configure it during startup before any channel is validated.
pub fn global_registry() -> &'static AppRegistry {
    static REGISTRY: OnceLock<AppRegistry> = OnceLock::new();
    REGISTRY.get_or_init(AppRegistry::new)
}
