//! Operating expense buckets

use serde::{Deserialize, Serialize};

/// Operating expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    RealEstateTaxes,
    Insurance,
    RepairsMaintenance,
    Utilities,
    Janitorial,
    Payroll,
    GeneralAdministrative,
    /// Management fee; the bucket amount is a percent of EGI
    Management,
    Other,
}

impl ExpenseCategory {
    /// Whether tenants reimburse this category unless the bucket says otherwise
    pub fn default_recoverable(&self) -> bool {
        matches!(
            self,
            ExpenseCategory::RealEstateTaxes
                | ExpenseCategory::Insurance
                | ExpenseCategory::RepairsMaintenance
        )
    }

    pub fn is_management(&self) -> bool {
        matches!(self, ExpenseCategory::Management)
    }
}

/// A single operating expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBucket {
    pub name: String,

    pub category: ExpenseCategory,

    /// Year-1 amount in dollars; for `Management`, the fee as percent of EGI
    pub amount: f64,

    /// Bucket-specific annual inflation; `None` uses the global rate
    /// (management fees are only inflated when this is set)
    #[serde(default)]
    pub inflation_percent: Option<f64>,

    /// Recoverability override; `None` uses the category default
    #[serde(default)]
    pub recoverable: Option<bool>,
}

impl ExpenseBucket {
    pub fn new(name: impl Into<String>, category: ExpenseCategory, amount: f64) -> Self {
        Self {
            name: name.into(),
            category,
            amount,
            inflation_percent: None,
            recoverable: None,
        }
    }

    /// Management fee bucket charging `fee_percent` of EGI
    pub fn management_fee(fee_percent: f64) -> Self {
        Self::new("Management", ExpenseCategory::Management, fee_percent)
    }

    pub fn with_inflation(mut self, inflation_percent: f64) -> Self {
        self.inflation_percent = Some(inflation_percent);
        self
    }

    pub fn with_recoverable(mut self, recoverable: bool) -> Self {
        self.recoverable = Some(recoverable);
        self
    }

    /// Effective recoverability; management fees never enter the CAM pool
    pub fn is_recoverable(&self) -> bool {
        if self.category.is_management() {
            return false;
        }
        self.recoverable.unwrap_or_else(|| self.category.default_recoverable())
    }
}
