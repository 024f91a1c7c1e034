//! Speculative lease-up of vacant and vacated space

use crate::assumptions::MarketLeasingAssumptions;
use crate::lease::downtime_factor;
use super::state::ProjectionState;

/// Market leasing contribution for one projection year
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarketLeasingYear {
    /// Rent from leases signed this year (after downtime) plus rent from
    /// area leased in earlier years
    pub rent: f64,
    pub ti_cost: f64,
    pub lc_cost: f64,
}

/// Leases the whole vacancy pool at market each year
#[derive(Debug, Clone, Copy)]
pub struct MarketLeasingEngine {
    assumptions: Option<MarketLeasingAssumptions>,
    market_rent_growth_percent: f64,
}

impl MarketLeasingEngine {
    pub fn new(assumptions: Option<MarketLeasingAssumptions>, market_rent_growth_percent: f64) -> Self {
        Self {
            assumptions,
            market_rent_growth_percent,
        }
    }

    /// Market rent per area for 0-based `year_index`, if assumptions exist
    pub fn inflated_market_rent(&self, year_index: u32) -> Option<f64> {
        self.assumptions.map(|a| {
            a.market_rent_per_area * (1.0 + self.market_rent_growth_percent / 100.0).powi(year_index as i32)
        })
    }

    /// Lease up the pool for the state's year and return the next state.
    ///
    /// Without assumptions the pool carries forward unresolved.
    pub fn step(&self, state: &ProjectionState, newly_vacated: f64) -> (MarketLeasingYear, ProjectionState) {
        let (assumptions, inflated_rent) = match (self.assumptions, self.inflated_market_rent(state.year_index)) {
            (Some(a), Some(rent)) => (a, rent),
            _ => return (MarketLeasingYear::default(), state.advance(newly_vacated, 0.0)),
        };

        let available = state.available_area(newly_vacated);
        let new_lease_rent = available * inflated_rent;
        let continuing_rent = state.market_leased_area * inflated_rent;

        let year = MarketLeasingYear {
            rent: new_lease_rent * downtime_factor(assumptions.downtime_months) + continuing_rent,
            ti_cost: available * assumptions.ti_per_area,
            lc_cost: new_lease_rent * assumptions.lc_percent / 100.0,
        };

        (year, state.advance(newly_vacated, available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assumptions() -> MarketLeasingAssumptions {
        MarketLeasingAssumptions {
            market_rent_per_area: 20.0,
            downtime_months: 6.0,
            ti_per_area: 15.0,
            lc_percent: 5.0,
        }
    }

    #[test]
    fn test_pool_leased_in_year_available() {
        let engine = MarketLeasingEngine::new(Some(assumptions()), 3.0);
        let state = ProjectionState::initial(1_000.0);

        let (year, next) = engine.step(&state, 0.0);
        assert_relative_eq!(year.rent, 1_000.0 * 20.0 * 0.5);
        assert_relative_eq!(year.ti_cost, 15_000.0);
        assert_relative_eq!(year.lc_cost, 1_000.0 * 20.0 * 0.05);
        assert_eq!(next.vacant_pool, 0.0);
        assert_eq!(next.market_leased_area, 1_000.0);
    }

    #[test]
    fn test_previously_leased_area_keeps_paying() {
        let engine = MarketLeasingEngine::new(Some(assumptions()), 3.0);
        let state = ProjectionState::initial(1_000.0);
        let (_, next) = engine.step(&state, 0.0);

        // Year 2: 400 sq ft newly vacated on top of the 1,000 already leased
        let (year, after) = engine.step(&next, 400.0);
        let rent = 20.0 * 1.03;
        assert_relative_eq!(year.rent, 400.0 * rent * 0.5 + 1_000.0 * rent, max_relative = 1e-12);
        assert_relative_eq!(year.ti_cost, 400.0 * 15.0);
        assert_eq!(after.market_leased_area, 1_400.0);
    }

    #[test]
    fn test_no_assumptions_leaves_pool_unresolved() {
        let engine = MarketLeasingEngine::new(None, 3.0);
        let state = ProjectionState::initial(1_000.0);
        let (year, next) = engine.step(&state, 250.0);
        assert_eq!(year, MarketLeasingYear::default());
        assert_eq!(next.vacant_pool, 1_250.0);
        assert_eq!(next.year_index, 1);
    }
}
