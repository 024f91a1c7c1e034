//! Scenario runner for sensitivity tables and renewal simulation
//!
//! Holds one base deal and re-runs the engine over modified copies of it,
//! so a rent roll is parsed once however many scenarios are valued.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assumptions::{load_input, DcfInput};
use crate::error::LoadResult;
use crate::projection::{run_dcf, DcfResult, RenewalPolicy};

/// One cell of a sensitivity table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub discount_rate_percent: f64,
    pub exit_cap_rate_percent: f64,
    pub total_present_value: f64,
    pub irr_percent: f64,
}

impl SensitivityPoint {
    fn from_result(input: &DcfInput, result: &DcfResult) -> Self {
        Self {
            discount_rate_percent: input.globals.discount_rate_percent,
            exit_cap_rate_percent: input.globals.exit_cap_rate_percent,
            total_present_value: result.total_present_value,
            irr_percent: result.irr_percent,
        }
    }
}

/// Distribution of values across seeded renewal trials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub trials: u32,
    pub mean_pv: f64,
    pub min_pv: f64,
    pub max_pv: f64,
    /// 5th percentile (nearest rank)
    pub p5_pv: f64,
    /// 95th percentile (nearest rank)
    pub p95_pv: f64,
    /// Mean over trials whose IRR converged; NaN if none did
    pub mean_irr_percent: f64,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_path("deal.json")?;
/// for point in runner.discount_rate_sensitivity(&[7.0, 8.0, 9.0]) {
///     println!("{:.2}% -> {:.0}", point.discount_rate_percent, point.total_present_value);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_input: DcfInput,
}

impl ScenarioRunner {
    pub fn new(input: DcfInput) -> Self {
        Self { base_input: input }
    }

    /// Create runner by loading a JSON deal file
    pub fn from_path<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        Ok(Self::new(load_input(path)?))
    }

    /// Value the base deal
    pub fn run(&self) -> Option<DcfResult> {
        run_dcf(&self.base_input)
    }

    /// Value a copy of the base deal after `modify` has adjusted it
    pub fn run_with<F>(&self, modify: F) -> Option<DcfResult>
    where
        F: FnOnce(&mut DcfInput),
    {
        let mut input = self.base_input.clone();
        modify(&mut input);
        run_dcf(&input)
    }

    /// Value the deal at each discount rate, holding the exit cap fixed
    pub fn discount_rate_sensitivity(&self, discount_rates_percent: &[f64]) -> Vec<SensitivityPoint> {
        let exit_cap = self.base_input.globals.exit_cap_rate_percent;
        self.sensitivity_grid(discount_rates_percent, &[exit_cap])
    }

    /// Value the deal at each exit cap rate, holding the discount rate fixed
    pub fn exit_cap_sensitivity(&self, exit_caps_percent: &[f64]) -> Vec<SensitivityPoint> {
        let rate = self.base_input.globals.discount_rate_percent;
        self.sensitivity_grid(&[rate], exit_caps_percent)
    }

    /// Value every (discount rate, exit cap) pair, discount rate major.
    ///
    /// Empty when the horizon is zero.
    pub fn sensitivity_grid(&self, discount_rates_percent: &[f64], exit_caps_percent: &[f64]) -> Vec<SensitivityPoint> {
        let mut points = Vec::with_capacity(discount_rates_percent.len() * exit_caps_percent.len());
        for &rate in discount_rates_percent {
            for &cap in exit_caps_percent {
                let mut input = self.base_input.clone();
                input.globals.discount_rate_percent = rate;
                input.globals.exit_cap_rate_percent = cap;
                if let Some(result) = run_dcf(&input) {
                    points.push(SensitivityPoint::from_result(&input, &result));
                }
            }
        }
        log::debug!("Sensitivity grid produced {} points", points.len());
        points
    }

    /// Run `trials` valuations with seeded stochastic renewals.
    ///
    /// Trial `i` uses seed `base_seed + i`, so a (trials, seed) pair always
    /// reproduces the same summary. Returns `None` for zero trials or a
    /// zero horizon.
    pub fn renewal_monte_carlo(&self, trials: u32, base_seed: u64) -> Option<MonteCarloSummary> {
        let mut values = Vec::with_capacity(trials as usize);
        let mut irrs = Vec::with_capacity(trials as usize);

        for trial in 0..trials {
            let seed = base_seed.wrapping_add(u64::from(trial));
            let result = self.run_with(|input| input.renewal_policy = RenewalPolicy::Seeded { seed })?;
            values.push(result.total_present_value);
            if result.irr_percent.is_finite() {
                irrs.push(result.irr_percent);
            }
        }

        if values.is_empty() {
            return None;
        }

        values.sort_by(|a, b| a.total_cmp(b));
        let n = values.len();
        let mean_irr_percent = if irrs.is_empty() {
            f64::NAN
        } else {
            irrs.iter().sum::<f64>() / irrs.len() as f64
        };

        let summary = MonteCarloSummary {
            trials,
            mean_pv: values.iter().sum::<f64>() / n as f64,
            min_pv: values[0],
            max_pv: values[n - 1],
            p5_pv: nearest_rank(&values, 5.0),
            p95_pv: nearest_rank(&values, 95.0),
            mean_irr_percent,
        };
        log::info!(
            "Monte Carlo over {} trials: mean PV {:.2}, P5 {:.2}, P95 {:.2}",
            trials,
            summary.mean_pv,
            summary.p5_pv,
            summary.p95_pv
        );
        Some(summary)
    }

    /// Get reference to the base input for inspection
    pub fn input(&self) -> &DcfInput {
        &self.base_input
    }

    /// Get mutable reference to the base input for customization
    pub fn input_mut(&mut self) -> &mut DcfInput {
        &mut self.base_input
    }
}

/// Nearest-rank percentile of an ascending, non-empty slice
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    let rank = (percentile / 100.0 * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
