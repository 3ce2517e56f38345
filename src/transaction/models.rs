//! The transaction data model as served by the transactions API.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// A single entry in the transaction list.
///
/// Transactions are read-only and server-supplied. The type tag is
/// redundant with the sign of the amount but is authoritative for
/// filtering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// Unique, stable identifier.
    pub id: String,
    /// The name of the merchant the money went to or came from.
    pub merchant: String,
    /// Signed amount in currency minor units.
    ///
    /// Positive amounts are income, negative amounts are expenses.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Free-text category label, e.g. "Food & Drink".
    pub category: String,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// The consumer-facing filter toggle over transaction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    /// Show every transaction.
    #[default]
    All,
    /// Only show income.
    Income,
    /// Only show expenses.
    Expense,
}

impl TransactionFilter {
    /// The optional type filter this selection maps to.
    ///
    /// [TransactionFilter::All] omits the filter from requests entirely.
    pub fn type_filter(self) -> Option<TransactionType> {
        match self {
            TransactionFilter::All => None,
            TransactionFilter::Income => Some(TransactionType::Income),
            TransactionFilter::Expense => Some(TransactionType::Expense),
        }
    }
}

impl std::str::FromStr for TransactionFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(TransactionFilter::All),
            "income" => Ok(TransactionFilter::Income),
            "expense" => Ok(TransactionFilter::Expense),
            other => Err(Error::UnknownFilter(other.to_owned())),
        }
    }
}
