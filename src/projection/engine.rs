//! Core valuation engine: annual cash flow aggregation across the horizon

use crate::assumptions::DcfInput;
use super::cashflows::{AnnualCashFlowRecord, AnnualRecordBuilder, DcfResult};
use super::discount::{going_in_cap_rate, PresentValueDiscounter};
use super::expenses::{ExpenseProjector, ManagementFeeReconciliation};
use super::irr::calculate_irr;
use super::lease_projector::{escalation_warning, LeaseProjector, LeaseYear};
use super::market_leasing::MarketLeasingEngine;
use super::reimbursement::ReimbursementCalculator;
use super::state::ProjectionState;
use super::terminal::TerminalValue;

/// Main valuation engine
pub struct DcfEngine<'a> {
    input: &'a DcfInput,
}

impl<'a> DcfEngine<'a> {
    /// Create an engine over a fully specified input
    pub fn new(input: &'a DcfInput) -> Self {
        Self { input }
    }

    /// Run the full valuation.
    ///
    /// Returns `None` when the horizon is zero years.
    pub fn run(&self) -> Option<DcfResult> {
        let globals = &self.input.globals;
        let horizon = globals.horizon_years;
        if horizon == 0 {
            log::info!("Horizon is zero years; nothing to project");
            return None;
        }

        let warnings: Vec<String> = self.input.leases.iter().filter_map(escalation_warning).collect();
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        let initial = ProjectionState::initial(self.input.initial_vacant_area());
        let (mut years, _) = (0..horizon).fold(
            (Vec::with_capacity(horizon as usize), initial),
            |(mut years, state), _| {
                let (year, next) = self.project_year(&state);
                years.push(year);
                (years, next)
            },
        );

        let final_year_noi = years.last().map(|y| y.net_operating_income()).unwrap_or(0.0);
        let terminal = TerminalValue::calculate(
            final_year_noi,
            globals.terminal_noi_growth_percent,
            globals.exit_cap_rate_percent,
            globals.sale_cost_percent,
        );
        if let Some(last) = years.last_mut() {
            last.reversion = terminal.net_reversion;
        }

        let discounter = PresentValueDiscounter::new(globals.discount_rate_percent);
        let cash_flows: Vec<AnnualCashFlowRecord> = years
            .into_iter()
            .map(|year| {
                let factor = discounter.factor(year.year);
                year.finish(factor)
            })
            .collect();

        let total_present_value: f64 = cash_flows.iter().map(|r| r.present_value).sum();
        let year_one_noi = cash_flows.first().map(|r| r.net_operating_income).unwrap_or(0.0);

        let mut irr_series = Vec::with_capacity(cash_flows.len() + 1);
        irr_series.push(-total_present_value);
        irr_series.extend(cash_flows.iter().map(|r| r.net_cash_flow_with_reversion));
        let irr_percent = calculate_irr(&irr_series);

        let result = DcfResult {
            going_in_cap_rate_percent: going_in_cap_rate(year_one_noi, total_present_value),
            total_present_value,
            irr_percent,
            terminal,
            cash_flows,
            warnings,
        };

        log::info!(
            "Valued {} leases over {} years: PV {:.2}, IRR {:.4}%, going-in cap {:.4}%",
            self.input.leases.len(),
            horizon,
            result.total_present_value,
            result.irr_percent,
            result.going_in_cap_rate_percent,
        );

        Some(result)
    }

    /// Compute one projection year from `state`, returning the year's
    /// amounts and the state for the next year
    pub fn project_year(&self, state: &ProjectionState) -> (AnnualRecordBuilder, ProjectionState) {
        let input = self.input;
        let globals = &input.globals;
        let year_index = state.year_index;
        let mut year = AnnualRecordBuilder::new(year_index + 1);

        // 1. Contract leases
        let projector = LeaseProjector::new(globals, input.renewal_policy);
        let lease_years: Vec<LeaseYear> = input
            .leases
            .iter()
            .enumerate()
            .map(|(i, lease)| projector.project(lease, i, year_index))
            .collect();

        year.scheduled_rent = lease_years.iter().map(|y| y.scheduled_rent).sum();
        let lease_ti: f64 = lease_years.iter().map(|y| y.ti_cost).sum();
        let lease_lc: f64 = lease_years.iter().map(|y| y.lc_cost).sum();
        let newly_vacated: f64 = input
            .leases
            .iter()
            .zip(&lease_years)
            .filter(|(_, y)| y.vacant_after_expiry)
            .map(|(lease, _)| lease.area)
            .sum();

        // 2. Speculative leasing of the vacancy pool
        let market_engine = MarketLeasingEngine::new(input.market_leasing, globals.market_rent_growth_percent);
        let (market, next_state) = market_engine.step(state, newly_vacated);
        year.market_rent = market.rent;
        year.tenant_improvements = lease_ti + market.ti_cost;
        year.leasing_commissions = lease_lc + market.lc_cost;
        year.vacant_area = next_state.vacant_pool;

        // 3. Vacancy then credit loss on rental income
        let potential_rental = year.potential_rental_income();
        year.vacancy_loss = potential_rental * globals.general_vacancy_percent / 100.0;
        year.credit_loss = (potential_rental - year.vacancy_loss) * globals.credit_loss_percent / 100.0;
        let rental_egi = potential_rental - year.vacancy_loss - year.credit_loss;

        // 4. Other income, not subject to vacancy
        year.other_income = input
            .other_income
            .iter()
            .map(|item| item.amount_for(year_index, globals.other_income_growth_percent))
            .sum();

        // 5. Expenses on rental-only EGI, recoveries, then fee reconciliation
        let expenses = ExpenseProjector::new(&input.expenses, globals.expense_inflation_percent).project(year_index);
        let provisional_opex = expenses.total_for(rental_egi);

        let occupied = input
            .leases
            .iter()
            .zip(&lease_years)
            .filter(|(_, y)| y.is_occupied())
            .map(|(lease, _)| lease);
        year.reimbursements = ReimbursementCalculator::new(globals.rentable_area)
            .total(occupied, expenses.recoverable_total);
        year.recoverable_expenses = expenses.recoverable_total;

        let final_egi = year.effective_gross_income();
        let fee = ManagementFeeReconciliation::new(&expenses, rental_egi, final_egi);
        year.management_fee = fee.final_fee;
        year.operating_expenses = provisional_opex + fee.adjustment();

        // 7. Capital items scheduled for this year
        let pgi = year.potential_gross_revenue();
        year.capital_outflow = input
            .capital_items
            .iter()
            .filter(|item| item.applies_to(year.year))
            .map(|item| item.amount.resolve(pgi, final_egi, globals.rentable_area))
            .sum();

        log::debug!(
            "Year {}: rent {:.2} market {:.2} reimb {:.2} EGI {:.2} opex {:.2} NOI {:.2} vacant {:.0} sf",
            year.year,
            year.scheduled_rent,
            year.market_rent,
            year.reimbursements,
            final_egi,
            year.operating_expenses,
            year.net_operating_income(),
            year.vacant_area,
        );

        (year, next_state)
    }
}

/// Run a valuation for `input`; `None` when the horizon is zero
pub fn run_dcf(input: &DcfInput) -> Option<DcfResult> {
    DcfEngine::new(input).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{
        CapitalAmount, CapitalItem, ExpenseBucket, ExpenseCategory, GlobalAssumptions,
        MarketLeasingAssumptions, OtherIncomeItem,
    };
    use crate::lease::{Escalation, Lease, Reimbursement, RenewalTerms};
    use crate::projection::irr::npv;
    use crate::projection::RenewalPolicy;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// One 1,000 sf suite at $15.00, 2.5% bumps, no expenses
    fn single_suite_input() -> DcfInput {
        let mut globals = GlobalAssumptions::new(date(2024, 1, 1), 10, 1_000.0, 8.5, 7.75);
        globals.sale_cost_percent = 3.0;
        let lease = Lease::new("Suite 100", 1_000.0, 15.0, date(2024, 1, 1), date(2039, 12, 31))
            .with_escalation(Escalation::FixedPercent { rate_percent: 2.5 });
        DcfInput::new(globals).with_leases(vec![lease])
    }

    fn multi_tenant_input() -> DcfInput {
        let mut globals = GlobalAssumptions::new(date(2024, 1, 1), 7, 10_000.0, 8.0, 7.0);
        globals.market_rent_growth_percent = 3.0;
        globals.expense_inflation_percent = 2.5;
        globals.other_income_growth_percent = 2.0;
        globals.general_vacancy_percent = 5.0;
        globals.credit_loss_percent = 1.0;
        globals.sale_cost_percent = 2.0;
        globals.terminal_noi_growth_percent = 3.0;

        let renewal = RenewalTerms {
            probability_percent: 70.0,
            term_years: 5,
            rent_bump_percent: 0.0,
            downtime_months: 2.0,
            ti_per_area: 8.0,
            lc_percent: 4.0,
            market_rent_per_area: 24.0,
        };

        DcfInput::new(globals)
            .with_leases(vec![
                Lease::new("Anchor", 5_000.0, 20.0, date(2021, 1, 1), date(2032, 12, 31))
                    .with_escalation(Escalation::FixedPercent { rate_percent: 3.0 }),
                Lease::new("Renewing", 2_000.0, 22.0, date(2020, 1, 1), date(2025, 12, 31))
                    .with_reimbursement(Reimbursement::ModifiedGross {
                        expense_stop_per_area: Some(4.0),
                        admin_fee_percent: 10.0,
                    })
                    .with_renewal(renewal),
                Lease::new("Leaving", 1_500.0, 21.0, date(2019, 1, 1), date(2026, 12, 31))
                    .with_reimbursement(Reimbursement::Gross)
                    .with_renewal(RenewalTerms { probability_percent: 20.0, ..renewal }),
            ])
            .with_expenses(vec![
                ExpenseBucket::new("Taxes", ExpenseCategory::RealEstateTaxes, 40_000.0),
                ExpenseBucket::new("Insurance", ExpenseCategory::Insurance, 8_000.0),
                ExpenseBucket::new("Utilities", ExpenseCategory::Utilities, 12_000.0),
                ExpenseBucket::management_fee(3.0),
            ])
            .with_capital_items(vec![
                CapitalItem::new(2, "Roof", CapitalAmount::Fixed(50_000.0)),
                CapitalItem::new(4, "Reserves", CapitalAmount::PercentOfEgi(1.0)),
            ])
            .with_other_income(vec![OtherIncomeItem::new("Parking", 6_000.0)])
            .with_market_leasing(MarketLeasingAssumptions {
                market_rent_per_area: 23.0,
                downtime_months: 6.0,
                ti_per_area: 20.0,
                lc_percent: 6.0,
            })
    }

    #[test]
    fn test_single_suite_scenario() {
        let input = single_suite_input();
        let result = run_dcf(&input).expect("horizon is positive");

        assert_eq!(result.cash_flows.len(), 10);
        assert_relative_eq!(result.cash_flows[4].scheduled_rent, 16_557.19, epsilon = 0.01);

        let year10 = &result.cash_flows[9];
        assert_eq!(year10.operating_expenses, 0.0);
        assert_eq!(year10.net_operating_income, year10.scheduled_rent);

        // Closed form: discounted rent stream plus discounted reversion
        let rents: Vec<f64> = (0..10).map(|k| 15_000.0 * 1.025_f64.powi(k)).collect();
        let reversion = rents[9] / 0.0775 * 0.97;
        let expected: f64 = rents
            .iter()
            .enumerate()
            .map(|(i, r)| r / 1.085_f64.powi(i as i32 + 1))
            .sum::<f64>()
            + reversion / 1.085_f64.powi(10);
        assert_relative_eq!(result.total_present_value, expected, max_relative = 1e-12);
        assert_relative_eq!(result.terminal.net_reversion, reversion, max_relative = 1e-12);
        assert_relative_eq!(
            result.going_in_cap_rate_percent,
            15_000.0 / expected * 100.0,
            max_relative = 1e-12
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_zero_horizon_is_absent() {
        let mut input = single_suite_input();
        input.globals.horizon_years = 0;
        assert!(run_dcf(&input).is_none());
    }

    #[test]
    fn test_zero_exit_cap_has_no_reversion() {
        let mut input = single_suite_input();
        input.globals.exit_cap_rate_percent = 0.0;
        let result = run_dcf(&input).expect("horizon is positive");
        assert_eq!(result.terminal, TerminalValue::default());
        let last = result.cash_flows.last().unwrap();
        assert_eq!(last.net_cash_flow_with_reversion, last.net_cash_flow);
    }

    #[test]
    fn test_identities_hold_every_year() {
        let result = run_dcf(&multi_tenant_input()).expect("horizon is positive");
        for r in &result.cash_flows {
            assert_eq!(r.effective_gross_income, r.potential_gross_revenue - r.vacancy_loss - r.credit_loss);
            assert_eq!(r.net_operating_income, r.effective_gross_income - r.operating_expenses);
            assert_eq!(r.net_cash_flow, r.net_operating_income - r.ti_lc_outflow - r.capital_outflow);
        }
    }

    #[test]
    fn test_present_value_sums_discounted_series() {
        let result = run_dcf(&multi_tenant_input()).expect("horizon is positive");
        let sum_pv: f64 = result.cash_flows.iter().map(|r| r.present_value).sum();
        let sum_factored: f64 = result
            .cash_flows
            .iter()
            .map(|r| r.pv_factor * r.net_cash_flow_with_reversion)
            .sum();
        assert_eq!(sum_pv, result.total_present_value);
        assert_eq!(sum_factored, result.total_present_value);
    }

    #[test]
    fn test_irr_round_trip_on_engine_output() {
        let result = run_dcf(&multi_tenant_input()).expect("horizon is positive");
        assert!(result.irr_percent.is_finite());

        let mut series = vec![-result.total_present_value];
        series.extend(result.net_cash_flow_series());
        assert_abs_diff_eq!(npv(&series, result.irr_percent / 100.0), 0.0, epsilon = 1e-6);
        // Buying at PV earns exactly the discount rate
        assert_abs_diff_eq!(result.irr_percent, 8.0, epsilon = 1e-6);
    }

    #[test]
    fn test_higher_discount_rate_lowers_value() {
        let base = multi_tenant_input();
        let values: Vec<f64> = [6.0, 7.0, 8.0, 9.0, 10.0]
            .iter()
            .map(|&rate| {
                let mut input = base.clone();
                input.globals.discount_rate_percent = rate;
                run_dcf(&input).expect("horizon is positive").total_present_value
            })
            .collect();
        assert!(values.windows(2).all(|w| w[1] < w[0]), "values = {:?}", values);
    }

    #[test]
    fn test_renewal_and_vacancy_flow_through() {
        let input = multi_tenant_input();
        let result = run_dcf(&input).expect("horizon is positive");
        let cf = &result.cash_flows;

        // Year 3 (2026): "Renewing" renews at market with downtime, TI and LC
        let renewal_rent = 2_000.0 * 24.0 * 1.03_f64.powi(2);
        let anchor_y3 = 5_000.0 * 20.0 * 1.03_f64.powi(5);
        let leaving_y3 = 1_500.0 * 21.0;
        assert_relative_eq!(
            cf[2].scheduled_rent,
            anchor_y3 + leaving_y3 + renewal_rent * 10.0 / 12.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(cf[2].tenant_improvements, 2_000.0 * 8.0);

        // Year 4 (2027): "Leaving" vacates and its 1,500 sf is market leased
        let market_rent_y4 = 23.0 * 1.03_f64.powi(3);
        assert_eq!(cf[3].vacant_area, 0.0);
        assert!(cf[3].market_rent > 1_500.0 * market_rent_y4 * 0.5);
        assert!(cf[3].tenant_improvements >= 1_500.0 * 20.0);
    }

    #[test]
    fn test_initial_vacancy_is_leased_in_year_one() {
        let input = multi_tenant_input();
        let result = run_dcf(&input).expect("horizon is positive");
        // Rentable 10,000 less 8,500 leased = 1,500 sf vacant at the effective date
        let y1 = &result.cash_flows[0];
        assert_relative_eq!(y1.market_rent, 1_500.0 * 23.0 * 0.5, max_relative = 1e-12);
        assert_relative_eq!(y1.leasing_commissions, 1_500.0 * 23.0 * 0.06, max_relative = 1e-12);
        assert_eq!(y1.vacant_area, 0.0);
    }

    #[test]
    fn test_management_fee_priced_on_final_egi() {
        let result = run_dcf(&multi_tenant_input()).expect("horizon is positive");
        for r in &result.cash_flows {
            assert_relative_eq!(r.management_fee, r.effective_gross_income * 0.03, max_relative = 1e-12);
            let fixed = r.operating_expenses - r.management_fee;
            assert!(fixed > 0.0);
        }
    }

    #[test]
    fn test_capital_items_resolve_in_their_year() {
        let result = run_dcf(&multi_tenant_input()).expect("horizon is positive");
        let cf = &result.cash_flows;
        assert_eq!(cf[0].capital_outflow, 0.0);
        assert_eq!(cf[1].capital_outflow, 50_000.0);
        assert_relative_eq!(cf[3].capital_outflow, cf[3].effective_gross_income * 0.01, max_relative = 1e-12);
    }

    #[test]
    fn test_seeded_renewals_are_reproducible() {
        let input = multi_tenant_input().with_renewal_policy(RenewalPolicy::Seeded { seed: 1234 });
        let a = run_dcf(&input).expect("horizon is positive");
        let b = run_dcf(&input).expect("horizon is positive");
        assert_eq!(a.total_present_value, b.total_present_value);
        assert_eq!(a.net_cash_flow_series(), b.net_cash_flow_series());
    }

    #[test]
    fn test_empty_step_schedule_warns() {
        let mut input = single_suite_input();
        input.leases[0].escalation = Escalation::StepUp { schedule: vec![] };
        let result = run_dcf(&input).expect("horizon is positive");
        assert_eq!(result.warnings.len(), 1);
        assert_relative_eq!(result.cash_flows[5].scheduled_rent, 15_000.0);
    }

    fn renew_or_vacate_input(probability_percent: f64) -> DcfInput {
        let mut globals = GlobalAssumptions::new(date(2024, 1, 1), 10, 1_000.0, 8.0, 7.5);
        globals.market_rent_growth_percent = 3.0;
        let lease = Lease::new("Suite 200", 1_000.0, 20.0, date(2021, 1, 1), date(2025, 12, 31)).with_renewal(
            RenewalTerms {
                probability_percent,
                term_years: 5,
                market_rent_per_area: 20.0,
                ..RenewalTerms::default()
            },
        );
        DcfInput::new(globals)
            .with_leases(vec![lease])
            .with_market_leasing(MarketLeasingAssumptions {
                market_rent_per_area: 20.0,
                downtime_months: 0.0,
                ti_per_area: 0.0,
                lc_percent: 0.0,
            })
    }

    #[test]
    fn test_renewal_probability_never_lowers_value_at_market_parity() {
        let values: Vec<f64> = [10.0, 30.0, 49.0, 50.0, 70.0, 90.0]
            .iter()
            .map(|&p| run_dcf(&renew_or_vacate_input(p)).expect("horizon is positive").total_present_value)
            .collect();
        assert!(
            values.windows(2).all(|w| w[1] >= w[0] * (1.0 - 1e-12)),
            "values = {:?}",
            values
        );

        let renewed = run_dcf(&renew_or_vacate_input(90.0)).unwrap();
        let vacated = run_dcf(&renew_or_vacate_input(10.0)).unwrap();
        for (r, v) in renewed.cash_flows.iter().zip(&vacated.cash_flows) {
            assert_relative_eq!(r.potential_rental_income, v.potential_rental_income, max_relative = 1e-12);
        }
        let final_year = renewed.cash_flows.last().unwrap();
        assert_relative_eq!(final_year.scheduled_rent, 20_000.0 * 1.03_f64.powi(9), max_relative = 1e-12);
        assert!(renewed.terminal.net_reversion > 0.0);
    }

    #[test]
    fn test_losses_apply_to_rental_income_only() {
        let mut globals = GlobalAssumptions::new(date(2024, 1, 1), 3, 1_000.0, 8.0, 7.0);
        globals.general_vacancy_percent = 5.0;
        globals.credit_loss_percent = 2.0;
        let input = DcfInput::new(globals)
            .with_leases(vec![Lease::new("Suite 300", 1_000.0, 15.0, date(2024, 1, 1), date(2034, 12, 31))])
            .with_expenses(vec![ExpenseBucket::new("Taxes", ExpenseCategory::RealEstateTaxes, 5_000.0)])
            .with_other_income(vec![OtherIncomeItem::new("Signage", 3_000.0)]);

        let result = run_dcf(&input).expect("horizon is positive");
        let y1 = &result.cash_flows[0];
        let pri = y1.potential_rental_income;
        assert_relative_eq!(pri, 15_000.0);
        assert_relative_eq!(y1.vacancy_loss, pri * 0.05, max_relative = 1e-12);
        assert_relative_eq!(y1.credit_loss, pri * 0.95 * 0.02, max_relative = 1e-12);

        // Recoveries and other income reach EGI in full
        assert_relative_eq!(y1.reimbursements, 5_000.0, max_relative = 1e-12);
        assert_relative_eq!(y1.other_income, 3_000.0);
        assert_relative_eq!(
            y1.effective_gross_income,
            pri * 0.95 * 0.98 + 5_000.0 + 3_000.0,
            max_relative = 1e-12
        );
    }
}
