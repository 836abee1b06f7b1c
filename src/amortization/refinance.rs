//! Refinance splicing: original-rate months, then a re-leveled payment at
//! the new rate over the remaining term
//!
//! Runs only when the request carries both a refinance rate and a start
//! month. Extra-payment policy is ignored here: refinance and extra-payment
//! scenarios are reported independently against the same baseline.

use super::state::AmortizationState;
use super::terms::{level_payment, monthly_rate, LoanTerms};
use crate::loan::LoanRequest;

/// Totals of the spliced pre/post-refinance schedule
#[derive(Debug, Clone, Copy)]
pub struct RefinanceOutcome {
    /// Balance at the refinance month; the principal of the new loan
    pub principal: f64,

    /// Interest accrued before the refinance, at the original rate
    pub interest_before: f64,

    /// Interest accrued after the refinance, at the new rate
    pub interest_after: f64,

    /// PMI charged before the refinance
    pub pmi_before: f64,

    /// PMI charged after the refinance (latch re-initialized at phase start)
    pub pmi_after: f64,

    /// Level payment of the post-refinance loan
    pub monthly_payment: f64,

    /// Property tax over the full original term
    pub total_tax: f64,

    /// Insurance over the full original term
    pub total_insurance: f64,

    /// Interest the remaining term would have accrued at the original rate,
    /// minus the post-refinance interest; negative when refinancing costs more
    pub interest_saved: f64,

    /// Principal + interest (both phases) + tax + insurance + PMI + down payment
    pub total: f64,
}

/// Run the two-phase refinance splice plus the original-rate counterfactual.
/// Returns `None` unless the request asks for a refinance.
pub fn run(request: &LoanRequest, terms: &LoanTerms) -> Option<RefinanceOutcome> {
    if !request.refinance_requested() {
        return None;
    }

    // Phase A: original rate and payment up to the refinance month. The
    // month is form-supplied; clamp it to the term so the loop is bounded.
    let refinance_month = request.refinance_start_month.min(terms.num_payments);
    let mut pre = AmortizationState::new(
        terms.principal,
        request.down_payment,
        request.home_value,
        request.pmi,
    );
    for _ in 0..refinance_month {
        let interest = pre.remaining_principal * terms.monthly_rate;
        let mut principal_paid = terms.monthly_payment - interest;
        if principal_paid > pre.remaining_principal {
            principal_paid = pre.remaining_principal;
        }
        pre.record_month(interest, principal_paid, 0.0, 0.0, 0.0);
        pre.settle_pmi();
        if pre.is_paid_off() {
            break;
        }
    }
    let refinance_principal = pre.remaining_principal;

    // Phase B: re-leveled payment at the new rate over the remaining term
    let remaining_term = terms.num_payments - refinance_month;
    let new_rate = monthly_rate(request.refinance_interest_rate);
    let new_payment = level_payment(refinance_principal, new_rate, remaining_term);

    let mut post = AmortizationState::new(
        refinance_principal,
        request.down_payment,
        request.home_value,
        request.pmi,
    );
    for _ in 0..remaining_term {
        let interest = post.remaining_principal * new_rate;
        let mut principal_paid = new_payment - interest;
        if principal_paid > post.remaining_principal {
            principal_paid = post.remaining_principal;
        }
        post.record_month(interest, principal_paid, 0.0, 0.0, 0.0);
        post.settle_pmi();
        if post.is_paid_off() {
            break;
        }
    }

    // Counterfactual: the same remaining term at the original rate, with its
    // own re-leveled payment
    let counter_payment = level_payment(refinance_principal, terms.monthly_rate, remaining_term);
    let mut counter_balance = refinance_principal;
    let mut counter_interest = 0.0;
    for _ in 0..remaining_term {
        let interest = counter_balance * terms.monthly_rate;
        let mut principal_paid = counter_payment - interest;
        if principal_paid > counter_balance {
            principal_paid = counter_balance;
        }
        counter_balance -= principal_paid;
        counter_interest += interest;
        if counter_balance <= super::state::PAYOFF_EPSILON {
            break;
        }
    }

    let years = terms.num_payments as f64 / 12.0;
    let total_tax = request.property_tax * years;
    let total_insurance = request.home_insurance * years;
    let total = refinance_principal
        + pre.total_interest
        + post.total_interest
        + total_tax
        + total_insurance
        + pre.total_pmi
        + post.total_pmi
        + request.down_payment;

    Some(RefinanceOutcome {
        principal: refinance_principal,
        interest_before: pre.total_interest,
        interest_after: post.total_interest,
        pmi_before: pre.total_pmi,
        pmi_after: post.total_pmi,
        monthly_payment: new_payment,
        total_tax,
        total_insurance,
        interest_saved: counter_interest - post.total_interest,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::money;

    fn refinance_request() -> LoanRequest {
        LoanRequest {
            refinance_start_month: 60,
            refinance_interest_rate: 4.0,
            ..LoanRequest::new(300_000.0, 6.0, 30)
        }
    }

    #[test]
    fn test_no_refinance_without_both_fields() {
        let request = LoanRequest::new(300_000.0, 6.0, 30);
        let terms = LoanTerms::resolve(&request);
        assert!(run(&request, &terms).is_none());

        let mut rate_only = request.clone();
        rate_only.refinance_interest_rate = 4.0;
        assert!(run(&rate_only, &terms).is_none());
    }

    #[test]
    fn test_refinance_at_month_sixty_to_four_percent() {
        let request = refinance_request();
        let terms = LoanTerms::resolve(&request);
        let outcome = run(&request, &terms).unwrap();

        assert_eq!(money(outcome.interest_before), "87082.16");
        assert_eq!(money(outcome.principal), "279163.07");
        assert_eq!(money(outcome.monthly_payment), "1473.52");
        assert_eq!(money(outcome.interest_after), "162894.58");
        assert_eq!(money(outcome.interest_saved), "97537.81");
        assert_eq!(money(outcome.total), "529139.82");
    }

    #[test]
    fn test_refinancing_to_a_higher_rate_costs_interest() {
        let mut request = refinance_request();
        request.refinance_interest_rate = 8.0;
        let terms = LoanTerms::resolve(&request);
        let outcome = run(&request, &terms).unwrap();
        assert!(outcome.interest_saved < 0.0);
    }

    #[test]
    fn test_pre_refinance_interest_matches_baseline_prefix() {
        let request = refinance_request();
        let terms = LoanTerms::resolve(&request);
        let outcome = run(&request, &terms).unwrap();

        // Replay the first 60 baseline months by hand
        let mut balance = terms.principal;
        let mut interest_sum = 0.0;
        for _ in 0..60 {
            let interest = balance * terms.monthly_rate;
            interest_sum += interest;
            balance -= terms.monthly_payment - interest;
        }
        assert_eq!(money(outcome.interest_before), money(interest_sum));
    }

    #[test]
    fn test_pmi_latch_spans_both_phases() {
        let request = LoanRequest {
            home_value: 300_000.0,
            down_payment: 15_000.0,
            pmi: 150.0,
            refinance_start_month: 60,
            refinance_interest_rate: 4.0,
            ..LoanRequest::new(285_000.0, 6.0, 30)
        };
        let terms = LoanTerms::resolve(&request);
        let outcome = run(&request, &terms).unwrap();

        // Equity stays under 60k for all of phase A, so PMI is charged
        // throughout; phase B re-engages the latch and keeps charging until
        // the balance crosses 240k.
        assert_eq!(money(outcome.pmi_before), money(150.0 * 60.0));
        assert!(outcome.pmi_after > 0.0);
    }

    #[test]
    fn test_refinance_past_term_end_has_empty_tail() {
        let mut request = refinance_request();
        request.refinance_start_month = 400; // beyond the 360-month term
        let terms = LoanTerms::resolve(&request);
        let outcome = run(&request, &terms).unwrap();
        assert_eq!(outcome.interest_after, 0.0);
        assert_eq!(outcome.monthly_payment, 0.0);
    }

    #[test]
    fn test_absurd_refinance_month_is_clamped_to_term() {
        let mut request = refinance_request();
        request.refinance_start_month = u32::MAX;
        let terms = LoanTerms::resolve(&request);
        let outcome = run(&request, &terms).unwrap();

        // Phase A runs at most the full term, paying the loan down to zero;
        // nothing remains to refinance.
        assert!(outcome.principal <= 0.01);
        assert_eq!(outcome.interest_after, 0.0);
        assert_eq!(outcome.monthly_payment, 0.0);
    }
}
