//! Present value discounting of the annual cash flow stream

use serde::{Deserialize, Serialize};

/// Discounts annual amounts at a single rate, end-of-year convention
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentValueDiscounter {
    /// Annual discount rate in percent
    pub discount_rate_percent: f64,
}

impl PresentValueDiscounter {
    pub fn new(discount_rate_percent: f64) -> Self {
        Self { discount_rate_percent }
    }

    /// Discount factor for year `t` (1-indexed): `1 / (1 + r)^t`.
    ///
    /// A rate at or below -100% has no meaningful factor and yields 0.
    pub fn factor(&self, year: u32) -> f64 {
        let base = 1.0 + self.discount_rate_percent / 100.0;
        if base <= 0.0 {
            return 0.0;
        }
        1.0 / base.powi(year as i32)
    }
}

/// Year-1 NOI over value, in percent; 0 when value is 0
pub fn going_in_cap_rate(year_one_noi: f64, total_present_value: f64) -> f64 {
    if total_present_value == 0.0 {
        return 0.0;
    }
    year_one_noi / total_present_value * 100.0
}
