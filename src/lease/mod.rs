//! Lease roster types and rent roll loading

mod data;
pub mod loader;

pub use data::{downtime_factor, Escalation, Lease, Reimbursement, RenewalTerms, RentStep};
pub use loader::{load_rent_roll, load_rent_roll_from_reader};
