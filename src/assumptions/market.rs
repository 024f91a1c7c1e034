//! Speculative leasing and other-income assumptions

use serde::{Deserialize, Serialize};

/// Lease-up assumptions for vacant and vacated space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketLeasingAssumptions {
    /// Market rent per square foot at the effective date
    pub market_rent_per_area: f64,
    /// Months between space becoming available and rent commencing
    #[serde(default)]
    pub downtime_months: f64,
    /// New-lease tenant improvements per square foot
    #[serde(default)]
    pub ti_per_area: f64,
    /// New-lease commission as percent of first-year rent
    #[serde(default)]
    pub lc_percent: f64,
}

/// Non-rental income line (parking, signage, storage, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherIncomeItem {
    pub name: String,
    /// Year-1 amount in dollars
    pub annual_amount: f64,
    /// Item growth rate; `None` uses the global other-income growth
    #[serde(default)]
    pub growth_percent: Option<f64>,
}

impl OtherIncomeItem {
    pub fn new(name: impl Into<String>, annual_amount: f64) -> Self {
        Self {
            name: name.into(),
            annual_amount,
            growth_percent: None,
        }
    }

    /// Amount for the 0-based `year_index`
    pub fn amount_for(&self, year_index: u32, global_growth_percent: f64) -> f64 {
        let rate = self.growth_percent.unwrap_or(global_growth_percent);
        self.annual_amount * (1.0 + rate / 100.0).powi(year_index as i32)
    }
}
