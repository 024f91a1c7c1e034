//! Annual cash flow projection, discounting and return metrics

mod state;
mod engine;
mod cashflows;
mod discount;
mod expenses;
mod lease_projector;
mod market_leasing;
mod reimbursement;
mod renewal;
mod terminal;
pub mod irr;

pub use state::ProjectionState;
pub use engine::{run_dcf, DcfEngine};
pub use cashflows::{AnnualCashFlowRecord, AnnualRecordBuilder, DcfResult, DcfSummary};
pub use discount::{going_in_cap_rate, PresentValueDiscounter};
pub use expenses::{ExpenseProjection, ExpenseProjector, ManagementFeeReconciliation};
pub use lease_projector::{escalated_rent_per_area, escalation_warning, LeaseProjector, LeaseStatus, LeaseYear};
pub use market_leasing::{MarketLeasingEngine, MarketLeasingYear};
pub use reimbursement::ReimbursementCalculator;
pub use renewal::{RenewalPolicy, DEFAULT_RENEWAL_THRESHOLD_PERCENT};
pub use terminal::TerminalValue;
pub use irr::calculate_irr;
