//! Base loan resolution: monthly rate, payment count, and the level payment

use super::state::MAX_SIMULATION_MONTHS;
use crate::loan::LoanRequest;

/// Resolved terms of a fixed-rate loan
#[derive(Debug, Clone, Copy)]
pub struct LoanTerms {
    /// Financed principal
    pub principal: f64,

    /// Monthly interest rate as a decimal (annual % / 100 / 12)
    pub monthly_rate: f64,

    /// Total number of scheduled payments (years x 12, capped at the
    /// simulation limit)
    pub num_payments: u32,

    /// Level monthly payment from the annuity formula
    pub monthly_payment: f64,
}

impl LoanTerms {
    /// Resolve terms from a normalized request. Zero or missing inputs
    /// degrade to a zero payment rather than an error, matching the form's
    /// missing-field-defaults-to-zero semantics.
    pub fn resolve(request: &LoanRequest) -> Self {
        let principal = request.loan_amount;
        let rate = monthly_rate(request.interest_rate);
        // The form accepts any term; saturate and cap so the schedule loops
        // stay finite and the multiplication can never overflow.
        let num_payments = request
            .loan_term_years
            .saturating_mul(12)
            .min(MAX_SIMULATION_MONTHS);
        Self {
            principal,
            monthly_rate: rate,
            num_payments,
            monthly_payment: level_payment(principal, rate, num_payments),
        }
    }
}

/// Monthly rate from an annual percentage rate; 0 when the rate is not positive
pub fn monthly_rate(annual_pct: f64) -> f64 {
    if annual_pct > 0.0 {
        annual_pct / 100.0 / 12.0
    } else {
        0.0
    }
}

/// Level payment via the standard annuity formula:
/// `M = P * [i(1+i)^n] / [(1+i)^n - 1]`
///
/// Returns 0 unless principal, rate, and payment count are all positive.
pub fn level_payment(principal: f64, monthly_rate: f64, num_payments: u32) -> f64 {
    if principal > 0.0 && monthly_rate > 0.0 && num_payments > 0 {
        let growth = (1.0 + monthly_rate).powi(num_payments as i32);
        principal * (monthly_rate * growth) / (growth - 1.0)
    } else {
        0.0
    }
}
