//! Cash flow output structures for valuations

use serde::{Deserialize, Serialize};
use super::terminal::TerminalValue;

/// Projected operating cash flow for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualCashFlowRecord {
    /// Projection year (1-indexed)
    pub year: u32,

    // Income
    pub scheduled_rent: f64,
    pub market_rent: f64,
    pub potential_rental_income: f64,
    pub reimbursements: f64,
    pub other_income: f64,
    pub potential_gross_revenue: f64,
    pub vacancy_loss: f64,
    pub credit_loss: f64,
    pub effective_gross_income: f64,

    // Expenses
    pub recoverable_expenses: f64,
    pub management_fee: f64,
    pub operating_expenses: f64,
    pub net_operating_income: f64,

    // Capital
    pub tenant_improvements: f64,
    pub leasing_commissions: f64,
    pub ti_lc_outflow: f64,
    pub capital_outflow: f64,

    // Summary
    pub net_cash_flow: f64,
    pub net_cash_flow_with_reversion: f64,
    pub pv_factor: f64,
    pub present_value: f64,

    /// Vacant area left unleased at year end
    pub vacant_area: f64,
}

/// Intermediate amounts for one year, finalised once discounting is known.
///
/// Income and expense identities are computed inside `finish`, so a record
/// can never leave the engine half-built.
#[derive(Debug, Clone, Default)]
pub struct AnnualRecordBuilder {
    pub year: u32,
    pub scheduled_rent: f64,
    pub market_rent: f64,
    pub reimbursements: f64,
    pub other_income: f64,
    pub vacancy_loss: f64,
    pub credit_loss: f64,
    pub recoverable_expenses: f64,
    pub management_fee: f64,
    pub operating_expenses: f64,
    pub tenant_improvements: f64,
    pub leasing_commissions: f64,
    pub capital_outflow: f64,
    pub reversion: f64,
    pub vacant_area: f64,
}

impl AnnualRecordBuilder {
    pub fn new(year: u32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    pub fn potential_rental_income(&self) -> f64 {
        self.scheduled_rent + self.market_rent
    }

    pub fn potential_gross_revenue(&self) -> f64 {
        self.potential_rental_income() + self.reimbursements + self.other_income
    }

    pub fn effective_gross_income(&self) -> f64 {
        self.potential_gross_revenue() - self.vacancy_loss - self.credit_loss
    }

    pub fn net_operating_income(&self) -> f64 {
        self.effective_gross_income() - self.operating_expenses
    }

    pub fn ti_lc_outflow(&self) -> f64 {
        self.tenant_improvements + self.leasing_commissions
    }

    pub fn net_cash_flow(&self) -> f64 {
        self.net_operating_income() - self.ti_lc_outflow() - self.capital_outflow
    }

    pub fn net_cash_flow_with_reversion(&self) -> f64 {
        self.net_cash_flow() + self.reversion
    }

    /// Build the record, discounting with `pv_factor`
    pub fn finish(self, pv_factor: f64) -> AnnualCashFlowRecord {
        let potential_rental_income = self.potential_rental_income();
        let potential_gross_revenue = self.potential_gross_revenue();
        let effective_gross_income = potential_gross_revenue - self.vacancy_loss - self.credit_loss;
        let net_operating_income = effective_gross_income - self.operating_expenses;
        let ti_lc_outflow = self.ti_lc_outflow();
        let net_cash_flow = net_operating_income - ti_lc_outflow - self.capital_outflow;
        let net_cash_flow_with_reversion = net_cash_flow + self.reversion;

        AnnualCashFlowRecord {
            year: self.year,
            scheduled_rent: self.scheduled_rent,
            market_rent: self.market_rent,
            potential_rental_income,
            reimbursements: self.reimbursements,
            other_income: self.other_income,
            potential_gross_revenue,
            vacancy_loss: self.vacancy_loss,
            credit_loss: self.credit_loss,
            effective_gross_income,
            recoverable_expenses: self.recoverable_expenses,
            management_fee: self.management_fee,
            operating_expenses: self.operating_expenses,
            net_operating_income,
            tenant_improvements: self.tenant_improvements,
            leasing_commissions: self.leasing_commissions,
            ti_lc_outflow,
            capital_outflow: self.capital_outflow,
            net_cash_flow,
            net_cash_flow_with_reversion,
            pv_factor,
            present_value: net_cash_flow_with_reversion * pv_factor,
            vacant_area: self.vacant_area,
        }
    }
}

/// Complete valuation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcfResult {
    /// Annual cash flow records, one per projection year
    pub cash_flows: Vec<AnnualCashFlowRecord>,

    /// Sum of discounted annual cash flows including reversion
    pub total_present_value: f64,

    /// Year-1 NOI over total present value, in percent
    pub going_in_cap_rate_percent: f64,

    /// IRR in percent; NaN when the solver fails
    pub irr_percent: f64,

    pub terminal: TerminalValue,

    /// Configuration fallbacks the engine applied
    pub warnings: Vec<String>,
}

impl DcfResult {
    /// Net cash flows including reversion, year 1 first
    pub fn net_cash_flow_series(&self) -> Vec<f64> {
        self.cash_flows.iter().map(|r| r.net_cash_flow_with_reversion).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> DcfSummary {
        let total = |f: fn(&AnnualCashFlowRecord) -> f64| self.cash_flows.iter().map(f).sum::<f64>();

        DcfSummary {
            years: self.cash_flows.len() as u32,
            total_potential_gross_revenue: total(|r| r.potential_gross_revenue),
            total_effective_gross_income: total(|r| r.effective_gross_income),
            total_operating_expenses: total(|r| r.operating_expenses),
            total_net_operating_income: total(|r| r.net_operating_income),
            total_ti_lc: total(|r| r.ti_lc_outflow),
            total_capital: total(|r| r.capital_outflow),
            total_net_cash_flow: total(|r| r.net_cash_flow),
            year_one_noi: self.cash_flows.first().map(|r| r.net_operating_income).unwrap_or(0.0),
            final_year_noi: self.cash_flows.last().map(|r| r.net_operating_income).unwrap_or(0.0),
            net_reversion: self.terminal.net_reversion,
            total_present_value: self.total_present_value,
        }
    }
}

/// Summary statistics for a valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcfSummary {
    pub years: u32,
    pub total_potential_gross_revenue: f64,
    pub total_effective_gross_income: f64,
    pub total_operating_expenses: f64,
    pub total_net_operating_income: f64,
    pub total_ti_lc: f64,
    pub total_capital: f64,
    pub total_net_cash_flow: f64,
    pub year_one_noi: f64,
    pub final_year_noi: f64,
    pub net_reversion: f64,
    pub total_present_value: f64,
}
