//! Valuation inputs: global assumptions, expenses, capital items and market leasing

mod capital;
mod expenses;
mod market;
pub mod loader;

pub use capital::{CapitalAmount, CapitalItem};
pub use expenses::{ExpenseBucket, ExpenseCategory};
pub use market::{MarketLeasingAssumptions, OtherIncomeItem};
pub use loader::{load_input, load_input_from_reader};

use crate::lease::Lease;
use crate::projection::RenewalPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Property-wide growth, loss and capital market assumptions.
///
/// All rates are percentages (`2.5` = 2.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAssumptions {
    /// Analysis start; projection years are anchored on its anniversaries
    pub effective_date: NaiveDate,

    /// Number of projection years
    pub horizon_years: u32,

    /// Total rentable area in square feet (denominator for pro-rata shares)
    pub rentable_area: f64,

    /// Vacant area at the effective date; derived from the rent roll if absent
    #[serde(default)]
    pub initial_vacant_area: Option<f64>,

    #[serde(default)]
    pub market_rent_growth_percent: f64,

    /// Fallback inflation for expense buckets without their own rate
    #[serde(default)]
    pub expense_inflation_percent: f64,

    /// Fallback growth for other-income items without their own rate
    #[serde(default)]
    pub other_income_growth_percent: f64,

    /// Fallback rate for CPI-indexed leases
    #[serde(default)]
    pub cpi_percent: f64,

    /// General vacancy applied to potential rental income
    #[serde(default)]
    pub general_vacancy_percent: f64,

    /// Credit / collection loss applied after general vacancy
    #[serde(default)]
    pub credit_loss_percent: f64,

    pub discount_rate_percent: f64,

    pub exit_cap_rate_percent: f64,

    #[serde(default)]
    pub sale_cost_percent: f64,

    /// Growth applied to final-year NOI to get the year N+1 NOI
    #[serde(default)]
    pub terminal_noi_growth_percent: f64,
}

impl GlobalAssumptions {
    /// Assumptions with zero growth, zero losses and the given capital market rates
    pub fn new(
        effective_date: NaiveDate,
        horizon_years: u32,
        rentable_area: f64,
        discount_rate_percent: f64,
        exit_cap_rate_percent: f64,
    ) -> Self {
        Self {
            effective_date,
            horizon_years,
            rentable_area,
            initial_vacant_area: None,
            market_rent_growth_percent: 0.0,
            expense_inflation_percent: 0.0,
            other_income_growth_percent: 0.0,
            cpi_percent: 0.0,
            general_vacancy_percent: 0.0,
            credit_loss_percent: 0.0,
            discount_rate_percent,
            exit_cap_rate_percent,
            sale_cost_percent: 0.0,
            terminal_noi_growth_percent: 0.0,
        }
    }
}

/// Everything the engine needs for one valuation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfInput {
    pub globals: GlobalAssumptions,

    #[serde(default)]
    pub leases: Vec<Lease>,

    #[serde(default)]
    pub expenses: Vec<ExpenseBucket>,

    #[serde(default)]
    pub capital_items: Vec<CapitalItem>,

    #[serde(default)]
    pub other_income: Vec<OtherIncomeItem>,

    #[serde(default)]
    pub market_leasing: Option<MarketLeasingAssumptions>,

    #[serde(default)]
    pub renewal_policy: RenewalPolicy,
}

impl DcfInput {
    pub fn new(globals: GlobalAssumptions) -> Self {
        Self {
            globals,
            leases: Vec::new(),
            expenses: Vec::new(),
            capital_items: Vec::new(),
            other_income: Vec::new(),
            market_leasing: None,
            renewal_policy: RenewalPolicy::default(),
        }
    }

    pub fn with_leases(mut self, leases: Vec<Lease>) -> Self {
        self.leases = leases;
        self
    }

    pub fn with_expenses(mut self, expenses: Vec<ExpenseBucket>) -> Self {
        self.expenses = expenses;
        self
    }

    pub fn with_capital_items(mut self, capital_items: Vec<CapitalItem>) -> Self {
        self.capital_items = capital_items;
        self
    }

    pub fn with_other_income(mut self, other_income: Vec<OtherIncomeItem>) -> Self {
        self.other_income = other_income;
        self
    }

    pub fn with_market_leasing(mut self, market_leasing: MarketLeasingAssumptions) -> Self {
        self.market_leasing = Some(market_leasing);
        self
    }

    pub fn with_renewal_policy(mut self, renewal_policy: RenewalPolicy) -> Self {
        self.renewal_policy = renewal_policy;
        self
    }

    /// Vacant area at the effective date.
    ///
    /// Uses the explicit assumption if given, otherwise rentable area less
    /// every lease that has not expired before the effective date.
    pub fn initial_vacant_area(&self) -> f64 {
        if let Some(vacant) = self.globals.initial_vacant_area {
            return vacant.max(0.0);
        }
        let occupied: f64 = self
            .leases
            .iter()
            .filter(|lease| lease.occupies_on_or_after(self.globals.effective_date))
            .map(|lease| lease.area)
            .sum();
        (self.globals.rentable_area - occupied).max(0.0)
    }
}
