//! Pocket Ledger is the data layer for a personal finance transaction
//! browser: merchant search, income/expense filtering, cursor-based "load
//! more" pagination, refresh-from-the-top, and locale-aware formatting of
//! amounts, dates and counts.
//!
//! The centrepiece is [TransactionFetcher], which coordinates debounced
//! search input, filter changes and three overlapping fetch intents against
//! a single result list without letting stale or duplicate responses
//! corrupt it. Everything else (the paginated API client, the grouping
//! utilities, the [Localizer]) are its collaborators.

#![warn(missing_docs)]

mod client;
mod debounce;
mod fetcher;
mod localize;
mod pagination;
mod timezone;
mod transaction;

pub use client::{TransactionApiClient, TransactionSource};
pub use debounce::Debouncer;
pub use fetcher::{DEBOUNCE_DELAY, FetchParams, FetchState, PAGE_SIZE, TransactionFetcher};
pub use localize::{Locale, Localizer};
pub use pagination::{Page, PageQuery, SORT_NEWEST_FIRST};
pub use timezone::local_offset;
pub use transaction::{
    DaySection, Transaction, TransactionFilter, TransactionType, YearSection, category_emoji,
    group_transactions_by_year,
};

/// The errors that may occur in the transaction browsing data layer.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transactions API could not be reached.
    ///
    /// Covers connection failures, DNS failures and timeouts enforced by
    /// the underlying transport.
    #[error("could not reach the transactions API: {0}")]
    Transport(String),

    /// The transactions API answered with a non-success HTTP status.
    #[error("the transactions API returned HTTP status {0}")]
    HttpStatus(u16),

    /// The response body did not match either supported page shape.
    ///
    /// The API may return a JSON object carrying pagination metadata, or a
    /// bare JSON array paired with an `X-Total-Count` header. Anything else
    /// is a decode failure.
    #[error("could not decode the transactions API response: {0}")]
    Decode(String),

    /// A page query could not be encoded as a URL query string.
    #[error("could not encode the page query: {0}")]
    QueryEncode(String),

    /// An error occurred while getting the local offset from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An unknown value was supplied for the transaction type filter.
    #[error("unknown transaction filter \"{0}\", expected all, income or expense")]
    UnknownFilter(String),

    /// An unknown value was supplied for the display locale.
    #[error("unsupported locale \"{0}\", expected en or es")]
    UnknownLocale(String),
}
