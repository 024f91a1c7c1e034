//! Year-to-year projection state

/// State carried from one projection year to the next.
///
/// Each step consumes the previous state and returns a fresh one; nothing
/// is mutated in place and nothing outlives a single run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectionState {
    /// Next projection year to compute (0-based)
    pub year_index: u32,

    /// Vacant area not yet re-leased
    pub vacant_pool: f64,

    /// Area placed on speculative market leases so far
    pub market_leased_area: f64,
}

impl ProjectionState {
    /// Initial state at the effective date
    pub fn initial(initial_vacant_area: f64) -> Self {
        Self {
            year_index: 0,
            vacant_pool: initial_vacant_area.max(0.0),
            market_leased_area: 0.0,
        }
    }

    /// Pool available this year once `newly_vacated` area is added
    pub fn available_area(&self, newly_vacated: f64) -> f64 {
        self.vacant_pool + newly_vacated
    }

    /// State for the following year
    pub fn advance(&self, newly_vacated: f64, newly_leased: f64) -> Self {
        Self {
            year_index: self.year_index + 1,
            vacant_pool: (self.available_area(newly_vacated) - newly_leased).max(0.0),
            market_leased_area: self.market_leased_area + newly_leased,
        }
    }
}
