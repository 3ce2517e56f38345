//! Resolves canonical timezone names to UTC offsets so transaction dates
//! can be grouped and displayed in the viewer's local day.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Get the current UTC offset for a canonical timezone name such as
/// `Pacific/Auckland`.
///
/// # Errors
/// Returns [Error::InvalidTimezone] when the name is not in the timezone
/// database.
pub fn local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}
