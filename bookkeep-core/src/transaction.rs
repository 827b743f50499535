//! Canonical transaction record emitted by statement parsers.
//!
//! Field order is the output contract:
//!   date, status, transaction_type, amount, wallet_balance

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of statuses a statement row can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Success,
    Failed,
    Cancelled,
    Reversed,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Success,
        TransactionStatus::Failed,
        TransactionStatus::Cancelled,
        TransactionStatus::Reversed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "Success",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Cancelled => "Cancelled",
            TransactionStatus::Reversed => "Reversed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for TransactionStatus {
    type Err = UnknownStatus;

    /// Exact, case-sensitive match against the closed set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// One statement row, normalized.
///
/// `date` is the literal `d/m/yyyy` substring as found in the statement.
/// `amount` and `wallet_balance` are decimal strings with thousands
/// separators removed; they are never empty on an emitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub status: TransactionStatus,
    pub transaction_type: String,
    pub amount: String,
    pub wallet_balance: String,
}

impl Transaction {
    /// Interpret the verbatim day/month/year date.
    ///
    /// Returns `None` for dates the statement layout accepts syntactically
    /// but which do not exist on the calendar (e.g. `13/13/9999`).
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let mut it = self.date.trim().split('/');
        let d: u32 = it.next()?.parse().ok()?;
        let m: u32 = it.next()?.parse().ok()?;
        let y: i32 = it.next()?.parse().ok()?;
        if it.next().is_some() {
            return None;
        }
        NaiveDate::from_ymd_opt(y, m, d)
    }
}
