//! Locale-aware display formatting for amounts, dates and counts.
//!
//! A [Localizer] is constructed explicitly with a locale and the viewer's
//! UTC offset and passed to whatever needs to render text. There is no
//! process-wide locale.
//!
//! Transaction amounts are stored in minor currency units (cents), so the
//! currency formatter divides by 100 before rendering.

use std::{str::FromStr, sync::OnceLock};

use numfmt::{Formatter, Precision};
use time::{Date, OffsetDateTime, UtcOffset};

use crate::Error;

/// The display languages the transaction browser supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
}

impl FromStr for Locale {
    type Err = Error;

    /// Parse a language tag such as `en` or `es-MX`. Only the primary
    /// language subtag is considered.
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let language = string
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match language.as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            _ => Err(Error::UnknownLocale(string.to_owned())),
        }
    }
}

struct Strings {
    currency_symbol: &'static str,
    months_short: [&'static str; 12],
    months_long: [&'static str; 12],
    today: &'static str,
    yesterday: &'static str,
    transaction_one: &'static str,
    transaction_other: &'static str,
    no_transactions: &'static str,
    something_went_wrong: &'static str,
}

static EN: Strings = Strings {
    currency_symbol: "$",
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    months_long: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    today: "TODAY",
    yesterday: "YESTERDAY",
    transaction_one: "transaction",
    transaction_other: "transactions",
    no_transactions: "No transactions found",
    something_went_wrong: "Something went wrong",
};

static ES: Strings = Strings {
    currency_symbol: "€",
    months_short: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
    ],
    months_long: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    today: "HOY",
    yesterday: "AYER",
    transaction_one: "transacción",
    transaction_other: "transacciones",
    no_transactions: "No se encontraron transacciones",
    something_went_wrong: "Algo salió mal",
};

/// Formats amounts, dates and counts for one locale and UTC offset.
pub struct Localizer {
    locale: Locale,
    strings: &'static Strings,
    offset: UtcOffset,
}

impl Localizer {
    /// Create a localizer for `locale` that renders dates in the timezone
    /// described by `offset`.
    pub fn new(locale: Locale, offset: UtcOffset) -> Self {
        let strings = match locale {
            Locale::En => &EN,
            Locale::Es => &ES,
        };

        Self {
            locale,
            strings,
            offset,
        }
    }

    /// The UTC offset dates are rendered in.
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Format an amount of minor currency units, e.g. `-123450.0` becomes
    /// `-$1,234.50` in English.
    pub fn currency(&self, minor_units: f64) -> String {
        let number = minor_units / 100.0;
        let (positive_fmt, negative_fmt) = self.currency_formatters();

        let mut formatted_string = if number < 0.0 {
            negative_fmt.fmt_string(number.abs())
        } else if number > 0.0 {
            positive_fmt.fmt_string(number)
        } else {
            // Zero is hardcoded as "0", so we must specify the formatted
            // string for zero
            format!("{}0.00", self.strings.currency_symbol)
        };

        // numfmt omits the last trailing zero, so we must add it ourselves
        // For example, "12.30" is rendered as "12.3" so we append "0".
        if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
            formatted_string = format!("{formatted_string}0");
        }

        formatted_string
    }

    fn currency_formatters(&self) -> (&'static Formatter, &'static Formatter) {
        match self.locale {
            Locale::En => {
                static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();
                static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

                (
                    POSITIVE_FMT.get_or_init(|| currency_formatter("$")),
                    NEGATIVE_FMT.get_or_init(|| currency_formatter("-$")),
                )
            }
            Locale::Es => {
                static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();
                static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

                (
                    POSITIVE_FMT.get_or_init(|| currency_formatter("€")),
                    NEGATIVE_FMT.get_or_init(|| currency_formatter("-€")),
                )
            }
        }
    }

    /// Format a calendar date, e.g. `Jan 15, 2024` in English or
    /// `15 ene 2024` in Spanish.
    pub fn date(&self, date: Date) -> String {
        let month = self.strings.months_short[date.month() as usize - 1];

        match self.locale {
            Locale::En => format!("{month} {}, {}", date.day(), date.year()),
            Locale::Es => format!("{} {month} {}", date.day(), date.year()),
        }
    }

    /// Format a timestamp as its local date plus a 24-hour clock time,
    /// e.g. `Jan 15, 2024, 10:30`.
    pub fn date_time(&self, datetime: OffsetDateTime) -> String {
        let local = datetime.to_offset(self.offset);

        format!(
            "{}, {:02}:{:02}",
            self.date(local.date()),
            local.hour(),
            local.minute()
        )
    }

    /// The uppercase section heading for a day of transactions: `TODAY` or
    /// `YESTERDAY` for the two most recent days, otherwise the long month
    /// and day, e.g. `JANUARY 15`.
    pub fn section_date_label(&self, date: Date, today: Date) -> String {
        if date == today {
            return self.strings.today.to_owned();
        }
        if Some(date) == today.previous_day() {
            return self.strings.yesterday.to_owned();
        }

        let month = self.strings.months_long[date.month() as usize - 1];
        let label = match self.locale {
            Locale::En => format!("{month} {}", date.day()),
            Locale::Es => format!("{} de {month}", date.day()),
        };

        label.to_uppercase()
    }

    /// Format a count with its pluralized noun, e.g. `1 transaction` or
    /// `3 transactions`.
    pub fn transaction_count(&self, count: usize) -> String {
        let noun = if count == 1 {
            self.strings.transaction_one
        } else {
            self.strings.transaction_other
        };

        format!("{count} {noun}")
    }

    /// The empty-state message shown when a fetch returns no transactions.
    pub fn no_transactions(&self) -> &'static str {
        self.strings.no_transactions
    }

    /// The generic error heading shown above a fetch failure message.
    pub fn something_went_wrong(&self) -> &'static str {
        self.strings.something_went_wrong
    }
}

fn currency_formatter(symbol: &str) -> Formatter {
    // The symbols passed here are all short enough to be valid prefixes.
    Formatter::currency(symbol)
        .unwrap()
        .precision(Precision::Decimals(2))
}

#[cfg(test)]
mod tests {
    use time::{UtcOffset, macros::date, macros::datetime};

    use crate::Error;

    use super::{Locale, Localizer};

    fn english() -> Localizer {
        Localizer::new(Locale::En, UtcOffset::UTC)
    }

    fn spanish() -> Localizer {
        Localizer::new(Locale::Es, UtcOffset::UTC)
    }

    #[test]
    fn parses_language_tags() {
        assert_eq!("en".parse(), Ok(Locale::En));
        assert_eq!("en-US".parse(), Ok(Locale::En));
        assert_eq!("es-MX".parse(), Ok(Locale::Es));
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(Error::UnknownLocale("fr".to_owned()))
        );
    }

    #[test]
    fn currency_converts_minor_units() {
        assert_eq!(english().currency(123456.0), "$1,234.56");
    }

    #[test]
    fn currency_renders_negative_amounts() {
        assert_eq!(english().currency(-45000.0), "-$450.00");
    }

    #[test]
    fn currency_renders_zero() {
        assert_eq!(english().currency(0.0), "$0.00");
    }

    #[test]
    fn currency_keeps_the_trailing_zero() {
        assert_eq!(english().currency(1230.0), "$12.30");
    }

    #[test]
    fn currency_uses_the_locale_symbol() {
        assert_eq!(spanish().currency(-45000.0), "-€450.00");
    }

    #[test]
    fn date_follows_the_locale_order() {
        let day = date!(2024 - 01 - 15);

        assert_eq!(english().date(day), "Jan 15, 2024");
        assert_eq!(spanish().date(day), "15 ene 2024");
    }

    #[test]
    fn date_time_appends_the_clock_time() {
        let got = english().date_time(datetime!(2024-01-15 10:05 UTC));

        assert_eq!(got, "Jan 15, 2024, 10:05");
    }

    #[test]
    fn date_time_applies_the_offset() {
        let localizer = Localizer::new(Locale::En, UtcOffset::from_hms(13, 0, 0).unwrap());

        let got = localizer.date_time(datetime!(2024-01-15 22:30 UTC));

        assert_eq!(got, "Jan 16, 2024, 11:30");
    }

    #[test]
    fn section_labels_for_recent_days() {
        let today = date!(2024 - 01 - 15);

        assert_eq!(english().section_date_label(today, today), "TODAY");
        assert_eq!(
            english().section_date_label(date!(2024 - 01 - 14), today),
            "YESTERDAY"
        );
        assert_eq!(spanish().section_date_label(today, today), "HOY");
        assert_eq!(
            spanish().section_date_label(date!(2024 - 01 - 14), today),
            "AYER"
        );
    }

    #[test]
    fn section_labels_for_older_days() {
        let today = date!(2024 - 03 - 01);

        assert_eq!(
            english().section_date_label(date!(2024 - 01 - 05), today),
            "JANUARY 5"
        );
        assert_eq!(
            spanish().section_date_label(date!(2024 - 01 - 05), today),
            "5 DE ENERO"
        );
    }

    #[test]
    fn transaction_counts_pluralize() {
        assert_eq!(english().transaction_count(1), "1 transaction");
        assert_eq!(english().transaction_count(3), "3 transactions");
        assert_eq!(spanish().transaction_count(1), "1 transacción");
        assert_eq!(spanish().transaction_count(3), "3 transacciones");
    }
}
