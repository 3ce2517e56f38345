//! The transaction domain: the wire data model, category emoji, and the
//! pure utilities that group a flat transaction list into the year and day
//! sections the list view renders.

mod category;
mod grouping;
mod models;

pub use category::category_emoji;
pub use grouping::{DaySection, YearSection, group_transactions_by_year};
pub use models::{Transaction, TransactionFilter, TransactionType};
