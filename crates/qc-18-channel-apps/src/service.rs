//! # Channel Validation Service
//!
//! The routing boundary between the channel layer and applications: resolves
//! the application for a channel, checks that the states actually belong to
//! that channel and application, then dispatches to the application.
//!
//! Every payload tag is checked here, so a mismatched payload is reported as
//! a recoverable `AppDataMismatch` instead of reaching an application that
//! would abort on it.

use crate::domain::{ChannelAppError, ChannelState, Params};
use crate::ports::{AppResolver, DynChannelApp};
use std::sync::Arc;
use tracing::{debug, warn};

/// Validates channel states against the application bound to their channel.
#[derive(Clone)]
pub struct ChannelValidationService {
    resolver: Arc<dyn AppResolver>,
}

impl ChannelValidationService {
    /// Service resolving applications through `resolver`.
    pub fn new(resolver: Arc<dyn AppResolver>) -> Self {
        Self { resolver }
    }

    /// Validate a freshly constructed channel state.
    pub fn validate_initial_state(
        &self,
        params: &Params,
        state: &ChannelState,
    ) -> Result<(), ChannelAppError> {
        debug!(
            "[qc-18] Validating initial state of {} (app {})",
            params.id, params.app
        );

        let app = self.route(params, &[state])?;
        app.validate_initial_state(params, state)
            .inspect_err(|e| warn!("[qc-18] Initial state of {} rejected: {}", params.id, e))
    }

    /// Validate the update `from -> to` proposed by participant `proposer`.
    ///
    /// Any error means the update must be rejected as a whole.
    pub fn validate_transition(
        &self,
        params: &Params,
        from: &ChannelState,
        to: &ChannelState,
        proposer: usize,
    ) -> Result<(), ChannelAppError> {
        debug!(
            "[qc-18] Validating {} v{} -> v{} proposed by {}",
            params.id, from.version, to.version, proposer
        );

        let app = self.route(params, &[from, to])?;
        app.validate_transition(params, from, to, proposer)
            .inspect_err(|e| {
                warn!(
                    "[qc-18] Transition {} v{} -> v{} by {} rejected: {}",
                    params.id, from.version, to.version, proposer, e
                )
            })
    }

    /// Resolve the channel's application and check the states are routable to it.
    fn route(
        &self,
        params: &Params,
        states: &[&ChannelState],
    ) -> Result<DynChannelApp, ChannelAppError> {
        let app = self.resolver.resolve(&params.app)?;

        for state in states {
            if state.id != params.id {
                return Err(ChannelAppError::StateParamsMismatch(format!(
                    "state channel {} != params channel {}",
                    state.id, params.id
                )));
            }
            if state.app != params.app {
                return Err(ChannelAppError::StateParamsMismatch(format!(
                    "state app {} != params app {}",
                    state.app, params.app
                )));
            }
            state.balances.ensure_width(params.num_parts())?;
            if !app.supports_data(&state.data) {
                return Err(ChannelAppError::AppDataMismatch {
                    app: app.address(),
                    got: state.data.kind().to_string(),
                });
            }
        }

        Ok(app)
    }
}

impl std::fmt::Debug for ChannelValidationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelValidationService").finish_non_exhaustive()
    }
}
