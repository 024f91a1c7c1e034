//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson on the NPV of an annual cash flow series whose first
//! element falls at time 0.

/// Starting rate for the iteration (10%)
pub const IRR_INITIAL_GUESS: f64 = 0.10;

/// Convergence threshold on |NPV|
pub const IRR_TOLERANCE: f64 = 1e-7;

pub const IRR_MAX_ITERATIONS: u32 = 100;

/// Calculate the IRR of `cashflows` using the Newton-Raphson method.
///
/// # Arguments
/// * `cashflows` - Annual cash flows, `cashflows[0]` at t = 0 (typically the
///   negative purchase price)
///
/// # Returns
/// * IRR in percent (e.g., 8.5 for 8.5%)
/// * `0.0` for an empty series
/// * `f64::NAN` if the derivative vanishes or the iteration cap is reached
pub fn calculate_irr(cashflows: &[f64]) -> f64 {
    if cashflows.is_empty() {
        return 0.0;
    }

    let mut rate = IRR_INITIAL_GUESS;

    for _ in 0..IRR_MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if npv.abs() < IRR_TOLERANCE {
            return rate * 100.0;
        }

        if dnpv == 0.0 {
            log::debug!("IRR derivative vanished at rate {}", rate);
            return f64::NAN;
        }

        rate -= npv / dnpv;
    }

    log::debug!("IRR did not converge after {} iterations", IRR_MAX_ITERATIONS);
    f64::NAN
}

/// NPV and its derivative with respect to rate, in one pass
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(npv, dnpv), (t, &cf)| {
            let discount = base.powi(t as i32);
            (npv + cf / discount, dnpv - t as f64 * cf / (discount * base))
        })
}

/// NPV of `cashflows` at a decimal `rate`, first element undiscounted
pub fn npv(cashflows: &[f64], rate: f64) -> f64 {
    npv_and_derivative(cashflows, rate).0
}
