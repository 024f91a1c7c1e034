//! Reversion (terminal) value at the end of the holding period

use serde::{Deserialize, Serialize};

/// Sale value of the property at the end of the horizon
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TerminalValue {
    /// Final-year NOI grown one more year
    pub year_n_plus_one_noi: f64,
    /// Year N+1 NOI capitalised at the exit cap rate
    pub gross_reversion: f64,
    /// Gross reversion less cost of sale
    pub net_reversion: f64,
}

impl TerminalValue {
    /// Capitalise next-year NOI at `exit_cap_rate_percent`.
    ///
    /// A non-positive exit cap rate yields an all-zero value.
    pub fn calculate(
        final_year_noi: f64,
        next_year_growth_percent: f64,
        exit_cap_rate_percent: f64,
        sale_cost_percent: f64,
    ) -> Self {
        if exit_cap_rate_percent <= 0.0 {
            return Self::default();
        }
        let year_n_plus_one_noi = final_year_noi * (1.0 + next_year_growth_percent / 100.0);
        let gross_reversion = year_n_plus_one_noi / (exit_cap_rate_percent / 100.0);
        let net_reversion = gross_reversion * (1.0 - sale_cost_percent / 100.0);
        Self {
            year_n_plus_one_noi,
            gross_reversion,
            net_reversion,
        }
    }
}
