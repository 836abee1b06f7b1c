//! Baseline amortization of the original loan, without extra payments
//!
//! Runs the scheduled term with the level payment to find how long PMI is
//! charged, then derives lifetime totals in closed form.

use super::state::AmortizationState;
use super::terms::LoanTerms;
use crate::loan::LoanRequest;

/// Lifetime totals of the unmodified loan
#[derive(Debug, Clone, Copy)]
pub struct BaselineTotals {
    /// Months in which PMI was charged before the 20% equity cutoff
    pub months_with_pmi: u32,

    /// PMI paid over the loan: monthly charge times months charged
    pub total_pmi: f64,

    /// Closed-form lifetime interest: `M * n - P`
    pub total_interest: f64,

    /// Lifetime cost: level payment plus carrying costs over the full term,
    /// plus PMI while charged, plus the down payment
    pub total_payments: f64,

    /// Months actually simulated (can be short of the term on early payoff)
    pub months_simulated: u32,
}

/// Simulate the original schedule and derive baseline totals
pub fn run(request: &LoanRequest, terms: &LoanTerms) -> BaselineTotals {
    let mut state = AmortizationState::new(
        terms.principal,
        request.down_payment,
        request.home_value,
        request.pmi,
    );

    for _ in 0..terms.num_payments {
        let interest = state.remaining_principal * terms.monthly_rate;
        let mut principal_paid = terms.monthly_payment - interest;
        if principal_paid > state.remaining_principal {
            principal_paid = state.remaining_principal;
        }
        state.record_month(interest, principal_paid, 0.0, 0.0, 0.0);
        state.settle_pmi();
        if state.is_paid_off() {
            break;
        }
    }

    let n = terms.num_payments as f64;
    let total_pmi = request.pmi * state.months_with_pmi as f64;
    let total_interest = terms.monthly_payment * n - terms.principal;
    let total_payments = (terms.monthly_payment
        + request.monthly_property_tax()
        + request.monthly_home_insurance()
        + request.hoa)
        * n
        + total_pmi
        + request.down_payment;

    BaselineTotals {
        months_with_pmi: state.months_with_pmi,
        total_pmi,
        total_interest,
        total_payments,
        months_simulated: state.month,
    }
}
