//! Grouping logic for the transaction list (year sections, day sections).

use std::collections::BTreeMap;

use time::{Date, UtcOffset};

use super::models::Transaction;

/// The transactions that happened on one calendar day.
#[derive(Debug, PartialEq)]
pub struct DaySection {
    /// The local calendar day.
    pub date: Date,
    /// The day's transactions, in their original list order.
    pub transactions: Vec<Transaction>,
}

/// The day sections belonging to one calendar year.
#[derive(Debug, PartialEq)]
pub struct YearSection {
    /// The calendar year, e.g. 2024.
    pub year: i32,
    /// The year's day sections, newest day first.
    pub days: Vec<DaySection>,
}

/// Group transactions into year sections, each split into day sections.
///
/// Years and days are ordered newest first regardless of the input order.
/// Timestamps are shifted into `offset` before the calendar day is taken,
/// so a late-night UTC transaction lands on the viewer's local day.
pub fn group_transactions_by_year(
    transactions: &[Transaction],
    offset: UtcOffset,
) -> Vec<YearSection> {
    let mut years: BTreeMap<i32, BTreeMap<Date, Vec<Transaction>>> = BTreeMap::new();

    for transaction in transactions {
        let local_date = transaction.date.to_offset(offset).date();
        years
            .entry(local_date.year())
            .or_default()
            .entry(local_date)
            .or_default()
            .push(transaction.clone());
    }

    years
        .into_iter()
        .rev()
        .map(|(year, days)| YearSection {
            year,
            days: days
                .into_iter()
                .rev()
                .map(|(date, transactions)| DaySection { date, transactions })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime, offset};

    use crate::transaction::models::{Transaction, TransactionType};

    use super::group_transactions_by_year;

    fn transaction(id: &str, date: time::OffsetDateTime) -> Transaction {
        Transaction {
            id: id.to_owned(),
            merchant: "Test Merchant".to_owned(),
            amount: -450.0,
            date,
            category: "Shopping".to_owned(),
            transaction_type: TransactionType::Expense,
        }
    }

    #[test]
    fn groups_by_year_then_day_newest_first() {
        let transactions = vec![
            transaction("1", datetime!(2023-12-31 09:00 UTC)),
            transaction("2", datetime!(2024-01-15 10:30 UTC)),
            transaction("3", datetime!(2024-01-15 18:00 UTC)),
            transaction("4", datetime!(2024-01-16 12:00 UTC)),
        ];

        let got = group_transactions_by_year(&transactions, offset!(UTC));

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].year, 2024);
        assert_eq!(got[1].year, 2023);

        let days_2024: Vec<_> = got[0].days.iter().map(|day| day.date).collect();
        assert_eq!(days_2024, vec![date!(2024 - 01 - 16), date!(2024 - 01 - 15)]);

        let ids: Vec<_> = got[0].days[1]
            .transactions
            .iter()
            .map(|transaction| transaction.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "3"], "same-day order must be preserved");
    }

    #[test]
    fn day_is_taken_in_the_local_offset() {
        // 23:30 UTC on the 15th is already the 16th at UTC+13.
        let transactions = vec![transaction("1", datetime!(2024-01-15 23:30 UTC))];

        let got = group_transactions_by_year(&transactions, offset!(+13));

        assert_eq!(got[0].days[0].date, date!(2024 - 01 - 16));
    }

    #[test]
    fn empty_input_yields_no_sections() {
        let got = group_transactions_by_year(&[], offset!(UTC));

        assert!(got.is_empty());
    }
}
