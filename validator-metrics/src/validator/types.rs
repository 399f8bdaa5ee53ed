//! Validator domain types supplied by the upstream status collector.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of smallest on-chain units in one whole coin.
pub const UNITS_PER_COIN: f64 = 1_000_000_000.0;

/// Lifecycle status of a validator.
///
/// The discriminant is the code exported on the `validator_statuses` gauge
/// and the value carried on the wire by the upstream collector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ValidatorStatus {
    Unknown = 0,
    Deposited = 1,
    Pending = 2,
    Active = 3,
    Exiting = 4,
    Slashing = 5,
    Exited = 6,
}

impl ValidatorStatus {
    /// Numeric code of this status.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Returned when a numeric status code has no matching [`ValidatorStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown validator status code {0}")]
pub struct InvalidStatusCode(pub u8);

impl From<ValidatorStatus> for u8 {
    fn from(status: ValidatorStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for ValidatorStatus {
    type Error = InvalidStatusCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => ValidatorStatus::Unknown,
            1 => ValidatorStatus::Deposited,
            2 => ValidatorStatus::Pending,
            3 => ValidatorStatus::Active,
            4 => ValidatorStatus::Exiting,
            5 => ValidatorStatus::Slashing,
            6 => ValidatorStatus::Exited,
            other => return Err(InvalidStatusCode(other)),
        })
    }
}

/// Status of a single validator, keyed by its public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorStatusEntry {
    pub public_key: String,
    pub status: ValidatorStatus,
}

/// Balance information for a single validator, in raw on-chain units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorInfo {
    pub public_key: String,
    pub balance: u64,
    pub withdrawal: u64,
}

impl ValidatorInfo {
    /// Current balance in whole coins.
    pub fn balance_coins(&self) -> f64 {
        self.balance as f64 / UNITS_PER_COIN
    }

    /// Cumulative withdrawal in whole coins.
    pub fn withdrawal_coins(&self) -> f64 {
        self.withdrawal as f64 / UNITS_PER_COIN
    }

    /// Balance plus withdrawal in whole coins.
    pub fn total_balance_coins(&self) -> f64 {
        (self.balance as u128 + self.withdrawal as u128) as f64 / UNITS_PER_COIN
    }
}

/// One refresh cycle worth of validator data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorReport {
    #[serde(default)]
    pub statuses: Vec<ValidatorStatusEntry>,
    #[serde(default)]
    pub validators: Vec<ValidatorInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_exported_values() {
        for code in 0..=6u8 {
            let status = ValidatorStatus::try_from(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert_eq!(ValidatorStatus::Active.code(), 3);
        assert_eq!(ValidatorStatus::try_from(7), Err(InvalidStatusCode(7)));
    }

    #[test]
    fn status_is_encoded_as_numeric_code() {
        let json = serde_json::to_string(&ValidatorStatus::Slashing).unwrap();
        assert_eq!(json, "5");

        let back: ValidatorStatus = serde_json::from_str("6").unwrap();
        assert_eq!(back, ValidatorStatus::Exited);

        let err = serde_json::from_str::<ValidatorStatus>("9").unwrap_err();
        assert!(err.to_string().contains("unknown validator status code 9"));
    }

    #[test]
    fn entries_use_camel_case_public_key() {
        let entry: ValidatorStatusEntry =
            serde_json::from_str(r#"{ "publicKey": "0xAA", "status": 3 }"#).unwrap();
        assert_eq!(entry.public_key, "0xAA");
        assert_eq!(entry.status, ValidatorStatus::Active);

        let info = ValidatorInfo {
            public_key: "0xBB".into(),
            balance: 1,
            withdrawal: 2,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["publicKey"], "0xBB");
        assert!(json.get("public_key").is_none());
    }

    #[test]
    fn raw_units_convert_to_whole_coins() {
        let info = ValidatorInfo {
            public_key: "0xBB".into(),
            balance: 32_000_000_000,
            withdrawal: 500_000_000,
        };

        assert_eq!(info.balance_coins(), 32.0);
        assert_eq!(info.withdrawal_coins(), 0.5);
        assert_eq!(info.total_balance_coins(), 32.5);
    }

    #[test]
    fn total_balance_does_not_overflow() {
        let info = ValidatorInfo {
            public_key: "0xCC".into(),
            balance: u64::MAX,
            withdrawal: u64::MAX,
        };

        assert!(info.total_balance_coins() > info.balance_coins());
    }
}
