//! Time and unique-id collaborators.
//!
//! Dates cross the storage boundary as `YYYY-MM-DD` strings and all gates
//! compare at day granularity, so the engine only ever needs "today" as a
//! [`NaiveDate`].

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the current date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock dates in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Generator of short probabilistically-unique tokens for new records.
pub trait TokenGen {
    fn generate(&self) -> String;
}

/// First 8 hex characters of a v4 UUID, matching the id shape of existing
/// stored data.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokens;

impl TokenGen for UuidTokens {
    fn generate(&self) -> String {
        let mut token = uuid::Uuid::new_v4().simple().to_string();
        token.truncate(8);
        token
    }
}

/// Render a date in the stored `YYYY-MM-DD` form.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` date. `None` for anything malformed.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
