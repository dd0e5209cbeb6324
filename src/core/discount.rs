//! Off-peak / weekend discount rule.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::utils::error::{BillingError, Result};

/// Last hour of the morning off-peak window (inclusive).
pub const OFF_PEAK_END_HOUR: u32 = 5;
/// First hour of the night off-peak window (inclusive).
pub const OFF_PEAK_START_HOUR: u32 = 23;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Whether a call starting at `hour` on `date` gets the discount: night
/// hours 23:00-05:59, or any time on a Saturday or Sunday.
pub fn applies(hour: u32, date: NaiveDate) -> bool {
    if hour >= OFF_PEAK_START_HOUR || hour <= OFF_PEAK_END_HOUR {
        return true;
    }
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Same rule applied to raw record fields such as `"23h"` and `"15/03/2024"`.
pub fn applies_to_labels(time_label: &str, date: &str) -> Result<bool> {
    Ok(applies(parse_hour_label(time_label)?, parse_date(date)?))
}

/// Extracts the hour from a start time label. Everything before the first
/// `h` is the hour.
pub fn parse_hour_label(label: &str) -> Result<u32> {
    let raw = label.trim();
    let digits = raw.split('h').next().unwrap_or_default().trim();

    let hour: u32 = digits.parse().map_err(|_| BillingError::InvalidField {
        field: "start_time",
        value: raw.to_string(),
        reason: "expected an hour label like '23h'".to_string(),
    })?;

    if hour > 23 {
        return Err(BillingError::InvalidField {
            field: "start_time",
            value: raw.to_string(),
            reason: "hour must be between 0 and 23".to_string(),
        });
    }
    Ok(hour)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| BillingError::InvalidField {
        field: "date",
        value: raw.to_string(),
        reason: format!("expected DD/MM/YYYY ({})", e),
    })
}
