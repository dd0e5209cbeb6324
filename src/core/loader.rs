//! Parsers for the roster and call record files.
//!
//! Both inputs are `;` separated lines without a header. Fields are trimmed
//! and empty lines are ignored; any other malformed line fails the whole
//! load.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::core::discount;
use crate::domain::model::{Call, Customer, CustomerRegistry, Zone};
use crate::utils::error::{BillingError, Result};

pub const ROSTER_FIELDS: usize = 2;
pub const CALL_FIELDS: usize = 5;

/// Counters produced while attaching calls to customers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallLoadOutcome {
    pub attached: usize,
    pub dropped: usize,
}

fn records(data: &[u8]) -> csv::StringRecordsIntoIter<&[u8]> {
    ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(data)
        .into_records()
}

fn line_of(record: &StringRecord, fallback: usize) -> usize {
    record
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback)
}

fn read_record(
    result: csv::Result<StringRecord>,
    source_name: &str,
    index: usize,
) -> Result<(usize, StringRecord)> {
    match result {
        Ok(record) => Ok((line_of(&record, index + 1), record)),
        Err(e) => {
            let line = e
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 1);
            Err(BillingError::CsvError(e).at_line(source_name, line))
        }
    }
}

fn check_field_count(
    record: &StringRecord,
    expected: usize,
    source_name: &str,
    line: usize,
) -> Result<()> {
    if record.len() != expected {
        return Err(BillingError::ParseError {
            source_name: source_name.to_string(),
            line,
            message: format!("expected {} fields, found {}", expected, record.len()),
        });
    }
    Ok(())
}

/// Builds the customer registry from `name;phone` lines.
pub fn load_customers(data: &[u8], source_name: &str) -> Result<CustomerRegistry> {
    let mut registry = CustomerRegistry::new();

    for (index, result) in records(data).enumerate() {
        let (line, record) = read_record(result, source_name, index)?;
        check_field_count(&record, ROSTER_FIELDS, source_name, line)?;

        let phone_number = &record[1];
        if registry.contains(phone_number) {
            tracing::warn!(
                "Duplicate phone number {} at {}:{}, keeping the later entry",
                phone_number,
                source_name,
                line
            );
        }
        registry.insert(Customer::new(&record[0], phone_number));
    }

    tracing::debug!("Parsed {} customers from {}", registry.len(), source_name);
    Ok(registry)
}

fn parse_call(record: &StringRecord) -> Result<Call> {
    let duration_minutes = record[1]
        .parse::<u32>()
        .map_err(|e| BillingError::InvalidField {
            field: "duration",
            value: record[1].to_string(),
            reason: e.to_string(),
        })?;
    let start_hour = discount::parse_hour_label(&record[2])?;
    let date = discount::parse_date(&record[3])?;
    let zone: Zone = record[4].parse()?;

    Ok(Call {
        duration_minutes,
        start_hour,
        date,
        zone,
    })
}

/// Attaches `phone;minutes;HHh;DD/MM/YYYY;zone` lines to their customers.
/// Lines for numbers absent from the registry are discarded without
/// further validation.
pub fn load_calls(
    data: &[u8],
    source_name: &str,
    registry: &mut CustomerRegistry,
) -> Result<CallLoadOutcome> {
    let mut outcome = CallLoadOutcome::default();

    for (index, result) in records(data).enumerate() {
        let (line, record) = read_record(result, source_name, index)?;
        check_field_count(&record, CALL_FIELDS, source_name, line)?;

        let phone_number = &record[0];
        if !registry.contains(phone_number) {
            tracing::debug!(
                "Dropping call for unknown number {} at {}:{}",
                phone_number,
                source_name,
                line
            );
            outcome.dropped += 1;
            continue;
        }

        let call = parse_call(&record).map_err(|e| e.at_line(source_name, line))?;
        registry.attach_call(phone_number, call);
        outcome.attached += 1;
    }

    Ok(outcome)
}
