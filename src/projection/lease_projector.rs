//! Per-lease, per-year rent, TI/LC and expiry projection

use crate::assumptions::GlobalAssumptions;
use crate::calendar::{first_year_after, full_years_between, year_window};
use crate::lease::{Escalation, Lease};
use super::renewal::RenewalPolicy;
use serde::{Deserialize, Serialize};

/// What a lease is doing in a given projection year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaseStatus {
    /// In its contract term
    Active,
    /// In a renewal term following the contract or an earlier renewal
    Renewed,
    /// Year of the renewal test the tenant failed; area goes to market leasing
    Vacated,
    /// Not started, or vacated in an earlier year
    Inactive,
}

/// One lease's contribution to one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeaseYear {
    pub status: LeaseStatus,
    pub scheduled_rent: f64,
    pub ti_cost: f64,
    pub lc_cost: f64,
    pub vacant_after_expiry: bool,
}

impl LeaseYear {
    fn with_status(status: LeaseStatus) -> Self {
        Self {
            status,
            scheduled_rent: 0.0,
            ti_cost: 0.0,
            lc_cost: 0.0,
            vacant_after_expiry: matches!(status, LeaseStatus::Vacated),
        }
    }

    /// True when the tenant occupies the space and pays recoveries this year
    pub fn is_occupied(&self) -> bool {
        matches!(self.status, LeaseStatus::Active | LeaseStatus::Renewed)
    }
}

/// Projects leases against the property's calendar and growth assumptions
#[derive(Debug, Clone, Copy)]
pub struct LeaseProjector<'a> {
    globals: &'a GlobalAssumptions,
    renewal_policy: RenewalPolicy,
}

impl<'a> LeaseProjector<'a> {
    pub fn new(globals: &'a GlobalAssumptions, renewal_policy: RenewalPolicy) -> Self {
        Self { globals, renewal_policy }
    }

    /// Project the lease at roster position `lease_index` for 0-based `year_index`
    pub fn project(&self, lease: &Lease, lease_index: usize, year_index: u32) -> LeaseYear {
        let window = year_window(self.globals.effective_date, year_index);

        if window.overlaps(lease.start_date, lease.end_date) {
            let years_into_lease = full_years_between(lease.start_date, window.start);
            let rent_per_area = escalated_rent_per_area(lease, years_into_lease, self.globals.cpi_percent);
            return LeaseYear {
                scheduled_rent: lease.area * rent_per_area,
                ..LeaseYear::with_status(LeaseStatus::Active)
            };
        }

        match first_year_after(self.globals.effective_date, lease.end_date) {
            Some(first_test) if year_index >= first_test => {
                self.renewal_chain_year(lease, lease_index, first_test, year_index)
            }
            _ => LeaseYear::with_status(LeaseStatus::Inactive),
        }
    }

    /// Follow back-to-back renewal terms of `term_years` from the contract
    /// expiry; a renewal test runs at the start of every term.
    fn renewal_chain_year(&self, lease: &Lease, lease_index: usize, first_test: u32, year_index: u32) -> LeaseYear {
        let term_years = lease.renewal.term_years.max(1);
        let renewal_number = (year_index - first_test) / term_years;
        let term_start = first_test + renewal_number * term_years;

        for k in 0..=renewal_number {
            if !self.renewal_policy.renews(lease_index, k, lease.renewal.probability_percent) {
                let test_year = first_test + k * term_years;
                let status = if test_year == year_index {
                    LeaseStatus::Vacated
                } else {
                    LeaseStatus::Inactive
                };
                return LeaseYear::with_status(status);
            }
        }

        self.renewal_year(lease, first_test, renewal_number, year_index, year_index == term_start)
    }

    fn renewal_year(
        &self,
        lease: &Lease,
        first_test: u32,
        renewal_number: u32,
        year_index: u32,
        term_start: bool,
    ) -> LeaseYear {
        let terms = &lease.renewal;

        // Each renewal term bumps the previous one
        let renewal_rent = if terms.rent_bump_percent != 0.0 {
            self.last_escalated_rent(lease, first_test)
                * (1.0 + terms.rent_bump_percent / 100.0).powi(renewal_number as i32 + 1)
        } else {
            terms.market_rent_per_area
        };
        let inflated_rent = renewal_rent
            * (1.0 + self.globals.market_rent_growth_percent / 100.0).powi(year_index as i32);
        let full_year_rent = lease.area * inflated_rent;

        if !term_start {
            return LeaseYear {
                scheduled_rent: full_year_rent,
                ..LeaseYear::with_status(LeaseStatus::Renewed)
            };
        }

        LeaseYear {
            scheduled_rent: full_year_rent * terms.downtime_factor(),
            ti_cost: lease.area * terms.ti_per_area,
            lc_cost: full_year_rent * terms.lc_percent / 100.0,
            ..LeaseYear::with_status(LeaseStatus::Renewed)
        }
    }

    /// Rent per area the escalation produced in the projection year the contract expired
    fn last_escalated_rent(&self, lease: &Lease, first_test: u32) -> f64 {
        let expiry_window = year_window(self.globals.effective_date, first_test.saturating_sub(1));
        let years_into_lease = full_years_between(lease.start_date, expiry_window.start);
        escalated_rent_per_area(lease, years_into_lease, self.globals.cpi_percent)
    }
}

/// Contract rent per area after `years_into_lease` full lease years.
///
/// Unusable configurations (empty step schedule, zero CPI review frequency)
/// fall back to base rent; `escalation_warning` reports them.
pub fn escalated_rent_per_area(lease: &Lease, years_into_lease: u32, cpi_fallback_percent: f64) -> f64 {
    let base = lease.base_rent_per_area;
    let lease_year = years_into_lease + 1;

    match &lease.escalation {
        Escalation::FixedPercent { rate_percent } => {
            base * (1.0 + rate_percent / 100.0).powi(years_into_lease as i32)
        }
        Escalation::StepUp { schedule } => schedule
            .iter()
            .filter(|step| step.lease_year <= lease_year)
            .max_by_key(|step| step.lease_year)
            .map(|step| step.rent_per_area)
            .unwrap_or(base),
        Escalation::Cpi { rate_percent, review_frequency_years } => {
            if *review_frequency_years == 0 {
                return base;
            }
            let rate = rate_percent.unwrap_or(cpi_fallback_percent);
            let cycles = (lease_year - 1) / review_frequency_years;
            let compounding_years = cycles * review_frequency_years;
            base * (1.0 + rate / 100.0).powi(compounding_years as i32)
        }
    }
}

/// Describe an escalation the projector cannot honour, if any
pub fn escalation_warning(lease: &Lease) -> Option<String> {
    match &lease.escalation {
        Escalation::StepUp { schedule } if schedule.is_empty() => Some(format!(
            "Lease '{}': step-up escalation has an empty schedule; using flat base rent",
            lease.tenant
        )),
        Escalation::Cpi { review_frequency_years: 0, .. } => Some(format!(
            "Lease '{}': CPI escalation has a zero review frequency; using flat base rent",
            lease.tenant
        )),
        _ => None,
    }
}
