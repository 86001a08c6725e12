//! # Domain Invariants
//!
//! Per-cell transfer rules for payment transitions.
//!
//! For every asset `a` and participant `j`, with proposer `i`:
//! - `j == i`: fail iff `from[a][j] < to[a][j]` (proposer credited itself)
//! - `j != i`: fail iff `from[a][j] > to[a][j]` (someone else was debited)
//!
//! The rule is checked cell by cell. It is stricter than per-asset
//! conservation and must not be replaced by a sum check.

use super::balances::Balances;
use super::errors::ChannelAppError;
use super::value_objects::Balance;

/// A single violating cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionViolation {
    /// Proposer's own balance increased.
    SelfEnrichment {
        /// Asset index
        asset: usize,
        /// Proposer index
        participant: usize,
        /// Balance in `from`
        before: Balance,
        /// Balance in `to`
        after: Balance,
    },
    /// Another participant's balance decreased.
    UnauthorizedDebit {
        /// Asset index
        asset: usize,
        /// Debited participant
        participant: usize,
        /// Proposer index
        proposer: usize,
    },
}

impl From<TransitionViolation> for ChannelAppError {
    fn from(v: TransitionViolation) -> Self {
        match v {
            TransitionViolation::SelfEnrichment {
                asset,
                participant,
                before,
                after,
            } => ChannelAppError::ProposerSelfEnrichment {
                asset,
                participant,
                before,
                after,
            },
            TransitionViolation::UnauthorizedDebit {
                asset,
                participant,
                proposer,
            } => ChannelAppError::UnauthorizedDebit {
                asset,
                participant,
                proposer,
            },
        }
    }
}

/// Invariant: `from` and `to` have identical shape and `proposer` names one
/// of `participants` channel members.
///
/// The participant count comes from the channel params so that a matrix
/// with zero assets still has valid proposers.
pub fn invariant_transition_shape(
    from: &Balances,
    to: &Balances,
    proposer: usize,
    participants: usize,
) -> Result<(), ChannelAppError> {
    from.ensure_same_shape(to)?;
    from.ensure_width(participants)?;
    to.ensure_width(participants)?;
    if proposer >= participants {
        return Err(ChannelAppError::ProposerOutOfRange {
            index: proposer,
            participants,
        });
    }
    Ok(())
}

/// Every violating cell in (asset, participant) order.
///
/// Assumes the shapes were checked; cells missing from `to` are skipped.
pub fn transition_violations(
    from: &Balances,
    to: &Balances,
    proposer: usize,
) -> Vec<TransitionViolation> {
    let mut violations = Vec::new();
    for (asset, (before_row, after_row)) in from.assets().zip(to.assets()).enumerate() {
        for (participant, (before, after)) in before_row.iter().zip(after_row).enumerate() {
            if participant == proposer {
                if before < after {
                    violations.push(TransitionViolation::SelfEnrichment {
                        asset,
                        participant,
                        before: *before,
                        after: *after,
                    });
                }
            } else if before > after {
                violations.push(TransitionViolation::UnauthorizedDebit {
                    asset,
                    participant,
                    proposer,
                });
            }
        }
    }
    violations
}

/// Invariant: payment transition proposed by `proposer` moves only its own funds.
///
/// Returns the first violation in (asset, participant) order.
pub fn invariant_payment_transition(
    from: &Balances,
    to: &Balances,
    proposer: usize,
    participants: usize,
) -> Result<(), ChannelAppError> {
    invariant_transition_shape(from, to, proposer, participants)?;
    match transition_violations(from, to, proposer).into_iter().next() {
        Some(violation) => Err(violation.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bal(rows: &[&[u64]]) -> Balances {
        Balances::from_u64(rows).unwrap()
    }

    #[test]
    fn test_self_transition_valid() {
        let s = bal(&[&[10, 5, 20], &[1, 0, 3]]);
        for i in 0..3 {
            assert!(invariant_payment_transition(&s, &s, i, 3).is_ok());
        }
    }

    #[test]
    fn test_two_party_payment() {
        let from = bal(&[&[10, 5]]);
        let to = bal(&[&[5, 10]]);
        assert!(invariant_payment_transition(&from, &to, 0, 2).is_ok());
        assert_eq!(
            invariant_payment_transition(&from, &to, 1, 2),
            Err(ChannelAppError::UnauthorizedDebit {
                asset: 0,
                participant: 0,
                proposer: 1
            })
        );
    }

    #[test]
    fn test_proposer_self_enrichment() {
        let from = bal(&[&[10, 5]]);
        let to = bal(&[&[11, 5]]);
        assert_eq!(
            invariant_payment_transition(&from, &to, 0, 2),
            Err(ChannelAppError::ProposerSelfEnrichment {
                asset: 0,
                participant: 0,
                before: Balance::from(10u64),
                after: Balance::from(11u64),
            })
        );
    }

    #[test]
    fn test_credit_to_proposer_rejected() {
        // Participant 1 gains without anyone paying: fine for proposer 0, not for 1.
        let from = bal(&[&[10, 5]]);
        let to = bal(&[&[10, 6]]);
        assert!(invariant_payment_transition(&from, &to, 1, 2).is_err());
        assert!(invariant_payment_transition(&from, &to, 0, 2).is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let from = bal(&[&[10, 5, 20], &[10, 5, 20]]);
        let to = bal(&[&[15, 0, 20], &[10, 0, 25]]);
        let v = transition_violations(&from, &to, 0);
        assert_eq!(
            v,
            vec![
                TransitionViolation::SelfEnrichment {
                    asset: 0,
                    participant: 0,
                    before: Balance::from(10u64),
                    after: Balance::from(15u64),
                },
                TransitionViolation::UnauthorizedDebit {
                    asset: 0,
                    participant: 1,
                    proposer: 0
                },
                TransitionViolation::UnauthorizedDebit {
                    asset: 1,
                    participant: 1,
                    proposer: 0
                },
            ]
        );
        assert!(transition_violations(&from, &to, 1).is_empty());
    }

    #[test]
    fn test_proposer_out_of_range() {
        let s = bal(&[&[1, 2]]);
        assert_eq!(
            invariant_payment_transition(&s, &s, 2, 2),
            Err(ChannelAppError::ProposerOutOfRange {
                index: 2,
                participants: 2
            })
        );
    }

    #[test]
    fn test_zero_assets_still_has_proposers() {
        let s = Balances::default();
        assert!(invariant_payment_transition(&s, &s, 1, 2).is_ok());
    }

    #[test]
    fn test_matrix_wider_than_channel() {
        let s = bal(&[&[1, 2, 3]]);
        assert!(matches!(
            invariant_payment_transition(&s, &s, 0, 2),
            Err(ChannelAppError::StateParamsMismatch(_))
        ));
    }

    #[test]
    fn test_shape_checked_before_rules() {
        let from = bal(&[&[1, 2]]);
        let to = bal(&[&[1, 2], &[0, 0]]);
        assert_eq!(
            invariant_payment_transition(&from, &to, 0, 2),
            Err(ChannelAppError::AssetCountMismatch { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_every_asset_row_width_checked() {
        let s = bal(&[&[1, 2], &[3, 4]]);
        assert!(invariant_payment_transition(&s, &s, 0, 2).is_ok());
        assert!(matches!(
            invariant_payment_transition(&s, &s, 0, 3),
            Err(ChannelAppError::StateParamsMismatch(_))
        ));
    }

    #[test]
    fn test_ragged_wire_matrix_never_reaches_rules() {
        let decoded = serde_json::from_str::<Balances>(r#"[["0xa","0x5"],["0x3"]]"#);
        assert!(decoded.is_err());
    }
}
