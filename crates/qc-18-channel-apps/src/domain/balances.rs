//! # Balance Matrix
//!
//! Per-asset, per-participant value ledger carried inside a channel state.
//! Rows are assets, columns are participants (index-aligned with the
//! channel's participant list). Every row has the same length.

use super::errors::ChannelAppError;
use super::value_objects::Balance;
use serde::{Deserialize, Serialize};

/// Rectangular balance matrix: `balances[asset][participant]`.
///
/// Serialized as a plain nested array; deserialization goes through
/// [`Balances::new`], so ragged input is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Balance>>", into = "Vec<Vec<Balance>>")]
pub struct Balances {
    rows: Vec<Vec<Balance>>,
}

impl Balances {
    /// Build a matrix, rejecting ragged rows.
    pub fn new(rows: Vec<Vec<Balance>>) -> Result<Self, ChannelAppError> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((asset, row)) = rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != expected)
            {
                return Err(ChannelAppError::RaggedBalances {
                    asset,
                    expected,
                    got: row.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Convenience constructor from `u64` values.
    pub fn from_u64(rows: &[&[u64]]) -> Result<Self, ChannelAppError> {
        Self::new(
            rows.iter()
                .map(|row| row.iter().copied().map(Balance::from).collect())
                .collect(),
        )
    }

    /// Number of assets.
    pub fn num_assets(&self) -> usize {
        self.rows.len()
    }

    /// Number of participants (0 when there are no assets).
    pub fn num_parts(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Balance of `part` in `asset`.
    pub fn get(&self, asset: usize, part: usize) -> Option<Balance> {
        self.rows.get(asset).and_then(|row| row.get(part)).copied()
    }

    /// All participant balances for one asset.
    pub fn asset(&self, asset: usize) -> Option<&[Balance]> {
        self.rows.get(asset).map(Vec::as_slice)
    }

    /// Iterate over asset rows.
    pub fn assets(&self) -> impl Iterator<Item = &[Balance]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Structural check against another matrix.
    pub fn ensure_same_shape(&self, other: &Balances) -> Result<(), ChannelAppError> {
        if self.num_assets() != other.num_assets() {
            return Err(ChannelAppError::AssetCountMismatch {
                from: self.num_assets(),
                to: other.num_assets(),
            });
        }
        for (asset, (a, b)) in self.rows.iter().zip(&other.rows).enumerate() {
            if a.len() != b.len() {
                return Err(ChannelAppError::ParticipantCountMismatch {
                    asset,
                    from: a.len(),
                    to: b.len(),
                });
            }
        }
        Ok(())
    }

    /// Every asset row covers exactly `participants` participants.
    ///
    /// A matrix with no assets fits any participant count.
    pub fn ensure_width(&self, participants: usize) -> Result<(), ChannelAppError> {
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != participants)
        {
            Some((asset, row)) => Err(ChannelAppError::StateParamsMismatch(format!(
                "asset {asset} covers {} participants, channel has {participants}",
                row.len()
            ))),
            None => Ok(()),
        }
    }

    /// Total held in `asset` across all participants.
    pub fn sum(&self, asset: usize) -> Result<Balance, ChannelAppError> {
        let row = self.rows.get(asset).map(Vec::as_slice).unwrap_or_default();
        row.iter().try_fold(Balance::zero(), |acc, b| {
            acc.checked_add(*b)
                .ok_or(ChannelAppError::BalanceOverflow { asset })
        })
    }
}

impl TryFrom<Vec<Vec<Balance>>> for Balances {
    type Error = ChannelAppError;

    fn try_from(rows: Vec<Vec<Balance>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<Balances> for Vec<Vec<Balance>> {
    fn from(balances: Balances) -> Self {
        balances.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let b = Balances::from_u64(&[&[10, 5, 20], &[1, 2, 3]]).unwrap();
        assert_eq!(b.num_assets(), 2);
        assert_eq!(b.num_parts(), 3);
        assert_eq!(b.get(1, 2), Some(Balance::from(3u64)));
        assert_eq!(b.get(2, 0), None);
        assert_eq!(b.asset(0).map(<[Balance]>::len), Some(3));
    }

    #[test]
    fn test_empty_matrix() {
        let b = Balances::new(vec![]).unwrap();
        assert_eq!(b.num_assets(), 0);
        assert_eq!(b.num_parts(), 0);
    }

    #[test]
    fn test_ragged_rejected() {
        let err = Balances::from_u64(&[&[1, 2], &[3]]).unwrap_err();
        assert_eq!(
            err,
            ChannelAppError::RaggedBalances {
                asset: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_asset_count_mismatch() {
        let a = Balances::from_u64(&[&[1, 2]]).unwrap();
        let b = Balances::from_u64(&[&[1, 2], &[3, 4]]).unwrap();
        assert_eq!(
            a.ensure_same_shape(&b),
            Err(ChannelAppError::AssetCountMismatch { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_participant_count_mismatch() {
        let a = Balances::from_u64(&[&[1, 2]]).unwrap();
        let b = Balances::from_u64(&[&[1, 2, 3]]).unwrap();
        assert_eq!(
            a.ensure_same_shape(&b),
            Err(ChannelAppError::ParticipantCountMismatch {
                asset: 0,
                from: 2,
                to: 3
            })
        );
    }

    #[test]
    fn test_sum() {
        let b = Balances::from_u64(&[&[10, 5, 20]]).unwrap();
        assert_eq!(b.sum(0).unwrap(), Balance::from(35u64));
        assert_eq!(b.sum(4).unwrap(), Balance::zero());
    }

    #[test]
    fn test_sum_overflow() {
        let b = Balances::new(vec![vec![Balance::MAX, Balance::one()]]).unwrap();
        assert_eq!(b.sum(0), Err(ChannelAppError::BalanceOverflow { asset: 0 }));
    }

    #[test]
    fn test_deserialize_rejects_ragged() {
        let result = serde_json::from_str::<Balances>(r#"[["0xa","0x5"],["0x3"]]"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Ragged balances"), "{err}");
    }

    #[test]
    fn test_deserialize_rectangular() {
        let b: Balances = serde_json::from_str(r#"[["0xa","0x5"],["0x3","0x0"]]"#).unwrap();
        assert_eq!(b, Balances::from_u64(&[&[10, 5], &[3, 0]]).unwrap());
    }

    #[test]
    fn test_serde_round_trip_is_nested_array() {
        let b = Balances::from_u64(&[&[1, 2]]).unwrap();
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, r#"[["0x1","0x2"]]"#);
        assert_eq!(serde_json::from_str::<Balances>(&json).unwrap(), b);
    }

    #[test]
    fn test_ensure_width() {
        let b = Balances::from_u64(&[&[1, 2], &[3, 4]]).unwrap();
        assert!(b.ensure_width(2).is_ok());
        assert!(matches!(
            b.ensure_width(3),
            Err(ChannelAppError::StateParamsMismatch(_))
        ));
        assert!(Balances::default().ensure_width(5).is_ok());
    }
}
