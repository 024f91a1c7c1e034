//! Property DCF - Annual discounted cash flow valuation for income-producing real estate
//!
//! This library provides:
//! - Lease-by-lease rent projection (fixed, step-up and CPI escalations)
//! - Renewal and market leasing of expiring and vacant space
//! - Operating expense inflation, recoveries and management fees
//! - Reversion value, present value, going-in cap rate and IRR
//! - Sensitivity tables and seeded renewal simulation

pub mod calendar;
pub mod error;
pub mod lease;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod output;

// Re-export commonly used types
pub use error::{DcfError, LoadResult};
pub use lease::{Escalation, Lease, Reimbursement, RenewalTerms};
pub use assumptions::{DcfInput, GlobalAssumptions};
pub use projection::{run_dcf, AnnualCashFlowRecord, DcfEngine, DcfResult, RenewalPolicy};
pub use scenario::{MonteCarloSummary, ScenarioRunner, SensitivityPoint};
