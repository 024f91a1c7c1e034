//! Scheduled capital expenditures

use serde::{Deserialize, Serialize};

/// How a capital item's dollar amount is determined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CapitalAmount {
    /// Flat dollar amount
    Fixed(f64),
    /// Percent of the year's potential gross income
    PercentOfPgi(f64),
    /// Percent of the year's effective gross income
    PercentOfEgi(f64),
    /// Dollars per square foot of rentable area
    PerArea(f64),
}

impl CapitalAmount {
    /// Resolve to dollars against the year's income and the building area
    pub fn resolve(&self, pgi: f64, egi: f64, rentable_area: f64) -> f64 {
        match *self {
            CapitalAmount::Fixed(amount) => amount,
            CapitalAmount::PercentOfPgi(pct) => pgi * pct / 100.0,
            CapitalAmount::PercentOfEgi(pct) => egi * pct / 100.0,
            CapitalAmount::PerArea(per_area) => rentable_area * per_area,
        }
    }
}

/// A capital expenditure that falls in a single projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalItem {
    /// Projection year (1-indexed)
    pub year: u32,
    pub description: String,
    pub amount: CapitalAmount,
}

impl CapitalItem {
    pub fn new(year: u32, description: impl Into<String>, amount: CapitalAmount) -> Self {
        Self {
            year,
            description: description.into(),
            amount,
        }
    }

    pub fn applies_to(&self, year: u32) -> bool {
        self.year == year
    }
}
