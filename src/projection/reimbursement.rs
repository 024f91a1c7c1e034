//! Tenant expense recoveries

use crate::lease::{Lease, Reimbursement};

/// Converts each lease's recovery structure into dollars for one year
#[derive(Debug, Clone, Copy)]
pub struct ReimbursementCalculator {
    rentable_area: f64,
}

impl ReimbursementCalculator {
    pub fn new(rentable_area: f64) -> Self {
        Self { rentable_area }
    }

    /// Recovery owed by `lease` against this year's recoverable pool
    pub fn reimbursement(&self, lease: &Lease, recoverable_total: f64) -> f64 {
        if self.rentable_area <= 0.0 {
            return 0.0;
        }
        let prorated = recoverable_total * lease.area / self.rentable_area;

        match lease.reimbursement {
            Reimbursement::Nnn { admin_fee_percent } => prorated * (1.0 + admin_fee_percent / 100.0),
            Reimbursement::ModifiedGross {
                expense_stop_per_area: Some(stop),
                admin_fee_percent,
            } => (prorated - stop * lease.area).max(0.0) * (1.0 + admin_fee_percent / 100.0),
            Reimbursement::ModifiedGross { expense_stop_per_area: None, .. } => 0.0,
            Reimbursement::Gross => 0.0,
        }
    }

    /// Aggregate recovery across the leases occupying space this year
    pub fn total<'l, I>(&self, occupied_leases: I, recoverable_total: f64) -> f64
    where
        I: IntoIterator<Item = &'l Lease>,
    {
        occupied_leases
            .into_iter()
            .map(|lease| self.reimbursement(lease, recoverable_total))
            .sum()
    }
}
