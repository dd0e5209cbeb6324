use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::BillingError;

/// Billing tier of a call's destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    /// Local (NH)
    #[serde(rename = "NH")]
    Local,
    /// Regional (LC)
    #[serde(rename = "LC")]
    Regional,
    /// Domestic long distance (X)
    #[serde(rename = "X")]
    DomesticLongDistance,
    /// International (RX)
    #[serde(rename = "RX")]
    International,
}

impl Zone {
    /// Every zone in report column order.
    pub const ALL: [Zone; 4] = [
        Zone::Local,
        Zone::Regional,
        Zone::DomesticLongDistance,
        Zone::International,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Zone::Local => "NH",
            Zone::Regional => "LC",
            Zone::DomesticLongDistance => "X",
            Zone::International => "RX",
        }
    }

    /// Tariff multiplier applied to the base rate.
    pub fn multiplier(&self) -> u32 {
        match self {
            Zone::Local => 1,
            Zone::Regional => 2,
            Zone::DomesticLongDistance => 3,
            Zone::International => 4,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Zone {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NH" => Ok(Zone::Local),
            "LC" => Ok(Zone::Regional),
            "X" => Ok(Zone::DomesticLongDistance),
            "RX" => Ok(Zone::International),
            other => Err(BillingError::InvalidField {
                field: "zone",
                value: other.to_string(),
                reason: "expected one of NH, LC, X, RX".to_string(),
            }),
        }
    }
}

/// A single call record. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub duration_minutes: u32,
    /// Hour of day the call started, 0..=23.
    pub start_hour: u32,
    pub date: NaiveDate,
    pub zone: Zone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub phone_number: String,
    pub calls: Vec<Call>,
}

impl Customer {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            calls: Vec::new(),
        }
    }
}

/// Customers keyed by phone number, iterated in roster order.
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    customers: Vec<Customer>,
    index: HashMap<String, usize>,
}

impl CustomerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a customer. A phone number already present keeps its
    /// position and has its record replaced.
    pub fn insert(&mut self, customer: Customer) {
        match self.index.get(&customer.phone_number) {
            Some(&pos) => self.customers[pos] = customer,
            None => {
                self.index
                    .insert(customer.phone_number.clone(), self.customers.len());
                self.customers.push(customer);
            }
        }
    }

    pub fn contains(&self, phone_number: &str) -> bool {
        self.index.contains_key(phone_number)
    }

    pub fn get(&self, phone_number: &str) -> Option<&Customer> {
        self.index.get(phone_number).map(|&pos| &self.customers[pos])
    }

    /// Appends a call to the matching customer. Returns `false` when the
    /// number is not registered and the call was discarded.
    pub fn attach_call(&mut self, phone_number: &str, call: Call) -> bool {
        match self.index.get(phone_number) {
            Some(&pos) => {
                self.customers[pos].calls.push(call);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn call_count(&self) -> usize {
        self.customers.iter().map(|c| c.calls.len()).sum()
    }
}

/// Per-zone call counts. Always holds all four zones.
pub type ZoneTally = BTreeMap<Zone, u32>;

/// Computed billing outcome for one customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub name: String,
    pub phone_number: String,
    /// Unrounded sum of call charges.
    pub total_charge: Decimal,
    pub calls: ZoneTally,
}

impl CustomerSummary {
    pub fn count(&self, zone: Zone) -> u32 {
        self.calls.get(&zone).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub customers: usize,
    pub calls_attached: usize,
    pub calls_dropped: usize,
}

/// Output of the extract stage: the populated registry and load counters.
#[derive(Debug, Clone, Default)]
pub struct BillingInput {
    pub registry: CustomerRegistry,
    pub stats: LoadStats,
}

/// Result of the transform stage, ready to be written.
#[derive(Debug, Clone)]
pub struct BillingReport {
    pub summaries: Vec<CustomerSummary>,
    pub stats: LoadStats,
}
