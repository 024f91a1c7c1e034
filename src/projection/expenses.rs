//! Operating expense inflation, recoverable pool and management fee

use crate::assumptions::ExpenseBucket;

/// Expenses for one projection year before the management fee is priced
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpenseProjection {
    /// Inflated non-management buckets
    pub fixed_expenses: f64,
    /// Inflated recoverable (CAM-eligible) buckets
    pub recoverable_total: f64,
    /// Management fee as percent of EGI
    pub management_fee_percent: f64,
}

impl ExpenseProjection {
    pub fn management_fee(&self, egi: f64) -> f64 {
        egi * self.management_fee_percent / 100.0
    }

    /// Total operating expenses with the fee priced off `egi`
    pub fn total_for(&self, egi: f64) -> f64 {
        self.fixed_expenses + self.management_fee(egi)
    }
}

/// Inflates each bucket from year-1 dollars
#[derive(Debug, Clone, Copy)]
pub struct ExpenseProjector<'a> {
    buckets: &'a [ExpenseBucket],
    global_inflation_percent: f64,
}

impl<'a> ExpenseProjector<'a> {
    pub fn new(buckets: &'a [ExpenseBucket], global_inflation_percent: f64) -> Self {
        Self {
            buckets,
            global_inflation_percent,
        }
    }

    /// Project all buckets for 0-based `year_index`
    pub fn project(&self, year_index: u32) -> ExpenseProjection {
        self.buckets
            .iter()
            .fold(ExpenseProjection::default(), |mut acc, bucket| {
                if bucket.category.is_management() {
                    // The fee percent only drifts when the bucket carries its own rate
                    let growth = compound(bucket.inflation_percent.unwrap_or(0.0), year_index);
                    acc.management_fee_percent += bucket.amount * growth;
                } else {
                    let rate = bucket.inflation_percent.unwrap_or(self.global_inflation_percent);
                    let amount = bucket.amount * compound(rate, year_index);
                    acc.fixed_expenses += amount;
                    if bucket.is_recoverable() {
                        acc.recoverable_total += amount;
                    }
                }
                acc
            })
    }
}

fn compound(rate_percent: f64, years: u32) -> f64 {
    (1.0 + rate_percent / 100.0).powi(years as i32)
}

/// Management fee priced twice within a year: first on rental-only EGI,
/// then on final EGI once reimbursements and other income are known
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManagementFeeReconciliation {
    pub provisional_fee: f64,
    pub final_fee: f64,
}

impl ManagementFeeReconciliation {
    pub fn new(expenses: &ExpenseProjection, rental_egi: f64, final_egi: f64) -> Self {
        Self {
            provisional_fee: expenses.management_fee(rental_egi),
            final_fee: expenses.management_fee(final_egi),
        }
    }

    /// Amount added to provisional operating expenses
    pub fn adjustment(&self) -> f64 {
        self.final_fee - self.provisional_fee
    }
}
