//! Report rendering: one text line per customer plus an optional JSON
//! summary.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::core::{tally, tariff};
use crate::domain::model::{Customer, CustomerRegistry, CustomerSummary, Zone, ZoneTally};
use crate::utils::error::Result;

pub const FIELD_SEPARATOR: &str = "; ";

pub fn summarize(customer: &Customer) -> CustomerSummary {
    CustomerSummary {
        name: customer.name.clone(),
        phone_number: customer.phone_number.clone(),
        total_charge: tariff::total_charge(&customer.calls),
        calls: tally::tally(&customer.calls),
    }
}

/// Summaries for every customer in registry order.
pub fn summarize_all(registry: &CustomerRegistry) -> Vec<CustomerSummary> {
    registry.iter().map(summarize).collect()
}

/// Rounds a charge to whole currency units, ties to even.
pub fn round_charge(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// `name; phone; total; NH; LC; X; RX`
pub fn format_line(summary: &CustomerSummary) -> String {
    let mut fields = vec![
        summary.name.clone(),
        summary.phone_number.clone(),
        round_charge(summary.total_charge).to_string(),
    ];
    fields.extend(Zone::ALL.iter().map(|&zone| summary.count(zone).to_string()));
    fields.join(FIELD_SEPARATOR)
}

pub fn render_text(summaries: &[CustomerSummary]) -> String {
    summaries
        .iter()
        .map(|s| format!("{}\n", format_line(s)))
        .collect()
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    name: &'a str,
    phone_number: &'a str,
    total_charge: Decimal,
    calls: &'a ZoneTally,
}

pub fn render_json(summaries: &[CustomerSummary]) -> Result<String> {
    let rows: Vec<JsonRow<'_>> = summaries
        .iter()
        .map(|s| JsonRow {
            name: &s.name,
            phone_number: &s.phone_number,
            total_charge: round_charge(s.total_charge),
            calls: &s.calls,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Call;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn alice() -> Customer {
        let mut customer = Customer::new("Alice", "0901234567");
        customer.calls.push(Call {
            duration_minutes: 10,
            start_hour: 23,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            zone: Zone::Local,
        });
        customer
    }

    #[test]
    fn test_format_line_matches_report_layout() {
        let summary = summarize(&alice());
        assert_eq!(summary.total_charge, dec!(7700));
        assert_eq!(format_line(&summary), "Alice; 0901234567; 7700; 1; 0; 0; 0");
    }

    #[test]
    fn test_customer_without_calls() {
        let summary = summarize(&Customer::new("Bob", "0912345678"));
        assert_eq!(format_line(&summary), "Bob; 0912345678; 0; 0; 0; 0; 0");
    }

    #[test]
    fn test_round_charge_only_at_output() {
        assert_eq!(round_charge(dec!(7700.0)).to_string(), "7700");
        assert_eq!(round_charge(dec!(10.5)), dec!(10));
        assert_eq!(round_charge(dec!(11.5)), dec!(12));
        assert_eq!(round_charge(dec!(11.49)), dec!(11));
    }

    #[test]
    fn test_render_text_one_line_per_customer() {
        let summaries = vec![
            summarize(&alice()),
            summarize(&Customer::new("Bob", "0912345678")),
        ];
        let text = render_text(&summaries);
        assert_eq!(
            text,
            "Alice; 0901234567; 7700; 1; 0; 0; 0\nBob; 0912345678; 0; 0; 0; 0; 0\n"
        );
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[summarize(&alice())]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Alice");
        assert_eq!(value[0]["total_charge"], "7700");
        assert_eq!(value[0]["calls"]["NH"], 1);
        assert_eq!(value[0]["calls"]["RX"], 0);
    }
}
