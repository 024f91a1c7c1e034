//! Lease roster data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single rent step in a step-up schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentStep {
    /// Lease year (1-indexed) in which this rent takes effect
    pub lease_year: u32,
    /// Annual rent per square foot from that lease year on
    pub rent_per_area: f64,
}

/// Contract rent escalation structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Escalation {
    /// Rent compounds by a fixed annual percentage on each lease anniversary
    FixedPercent { rate_percent: f64 },
    /// Rent follows an explicit schedule of per-area rents
    StepUp { schedule: Vec<RentStep> },
    /// Rent indexed to CPI, reset every `review_frequency_years`
    Cpi {
        /// CPI rate for this lease; `None` uses the global CPI assumption
        #[serde(default)]
        rate_percent: Option<f64>,
        #[serde(default = "default_review_frequency")]
        review_frequency_years: u32,
    },
}

fn default_review_frequency() -> u32 {
    1
}

/// Operating expense recovery structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reimbursement {
    /// Tenant pays its pro-rata share of all recoverable expenses
    Nnn {
        #[serde(default)]
        admin_fee_percent: f64,
    },
    /// Tenant pays its share above a per-area expense stop
    ModifiedGross {
        #[serde(default)]
        expense_stop_per_area: Option<f64>,
        #[serde(default)]
        admin_fee_percent: f64,
    },
    /// Landlord absorbs all expenses
    Gross,
}

/// Renewal assumptions applied when the lease expires inside the horizon
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenewalTerms {
    /// Probability (0-100) that the tenant renews
    pub probability_percent: f64,
    /// Renewal term in years
    pub term_years: u32,
    /// Bump over the last escalated rent; 0 means use market rent
    pub rent_bump_percent: f64,
    /// Months of free rent / downtime before renewal rent starts
    pub downtime_months: f64,
    /// Tenant improvement allowance per square foot
    pub ti_per_area: f64,
    /// Leasing commission as a percent of first-year renewal rent
    pub lc_percent: f64,
    /// Market rent per square foot at the effective date
    pub market_rent_per_area: f64,
}

impl RenewalTerms {
    /// Fraction of the year that earns rent after downtime
    pub fn downtime_factor(&self) -> f64 {
        downtime_factor(self.downtime_months)
    }
}

/// Fraction of a year left after `downtime_months` of vacancy, floored at 0
pub fn downtime_factor(downtime_months: f64) -> f64 {
    ((12.0 - downtime_months) / 12.0).max(0.0)
}

/// A tenant lease in the rent roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lease {
    /// Tenant name or suite identifier
    pub tenant: String,

    /// Leased area in square feet
    pub area: f64,

    /// Contract rent per square foot per year at lease start
    pub base_rent_per_area: f64,

    /// First day of the lease term
    pub start_date: NaiveDate,

    /// Last day of the lease term (inclusive)
    pub end_date: NaiveDate,

    pub escalation: Escalation,

    pub reimbursement: Reimbursement,

    #[serde(default)]
    pub renewal: RenewalTerms,
}

impl Lease {
    /// Create a lease with fixed escalation, NNN recovery and no renewal
    pub fn new(
        tenant: impl Into<String>,
        area: f64,
        base_rent_per_area: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            tenant: tenant.into(),
            area,
            base_rent_per_area,
            start_date,
            end_date,
            escalation: Escalation::FixedPercent { rate_percent: 0.0 },
            reimbursement: Reimbursement::Nnn { admin_fee_percent: 0.0 },
            renewal: RenewalTerms::default(),
        }
    }

    pub fn with_escalation(mut self, escalation: Escalation) -> Self {
        self.escalation = escalation;
        self
    }

    pub fn with_reimbursement(mut self, reimbursement: Reimbursement) -> Self {
        self.reimbursement = reimbursement;
        self
    }

    pub fn with_renewal(mut self, renewal: RenewalTerms) -> Self {
        self.renewal = renewal;
        self
    }

    /// True if the lease is still in occupation on or after `date`
    pub fn occupies_on_or_after(&self, date: NaiveDate) -> bool {
        self.end_date >= date
    }
}
