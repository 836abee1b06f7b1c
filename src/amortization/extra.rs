//! Amortization with the extra-payment policy applied
//!
//! Month-by-month simulation of the loan under one-time, monthly, or yearly
//! extra principal payments. With no policy this degenerates to the plain
//! schedule, so its month count doubles as the loan's effective term.

use super::schedule::ScheduleRow;
use super::state::{AmortizationState, MAX_SIMULATION_MONTHS};
use super::terms::LoanTerms;
use crate::loan::{ExtraPaymentPolicy, LoanRequest};

/// Outcome of the extra-payment simulation
#[derive(Debug, Clone)]
pub struct ExtraPaymentOutcome {
    /// Effective loan term in months under the extra-payment policy
    pub months: u32,

    /// Interest accrued over the simulated schedule
    pub total_interest: f64,

    /// PMI charged over the simulated schedule
    pub total_pmi: f64,

    /// Interest accrued in months strictly before `months_elapsed`; an
    /// approximation of interest the borrower has already paid as of today
    pub interest_paid_so_far: f64,

    /// Direct loop accumulation of all payment components. The reported
    /// lifetime figure is derived from the baseline instead; the two agree
    /// within truncation tolerance when the down payment is added here.
    pub total_payments: f64,

    /// Full month-by-month schedule
    pub rows: Vec<ScheduleRow>,
}

/// Extra principal due in a given 0-based month under the request's policy
fn extra_for_month(request: &LoanRequest, month: u32, one_time_applied: &mut bool) -> f64 {
    let amount = request.extra_payment_amount;
    let start = request.extra_payment_start_month;
    if amount <= 0.0 || month < start {
        return 0.0;
    }
    match request.extra_payment_policy {
        ExtraPaymentPolicy::OneTime if !*one_time_applied => {
            *one_time_applied = true;
            amount
        }
        ExtraPaymentPolicy::Monthly => amount,
        ExtraPaymentPolicy::Yearly if (month - start) % 12 == 0 => amount,
        _ => 0.0,
    }
}

/// Simulate the loan with extra payments applied.
///
/// `months_elapsed` is the number of whole months between the loan start
/// date and today (0 when unknown); interest accrued before that point
/// accumulates into `interest_paid_so_far`.
pub fn run(request: &LoanRequest, terms: &LoanTerms, months_elapsed: u32) -> ExtraPaymentOutcome {
    let mut state = AmortizationState::new(
        terms.principal,
        request.down_payment,
        request.home_value,
        request.pmi,
    );
    let monthly_tax = request.monthly_property_tax();
    let monthly_insurance = request.monthly_home_insurance();
    let mut interest_paid_so_far = 0.0;
    let mut rows = Vec::new();

    while !state.is_paid_off() && state.month < MAX_SIMULATION_MONTHS {
        let month = state.month;
        let extra = extra_for_month(request, month, &mut state.extra_applied);

        // A payoff-sized extra payment retires the balance without accruing
        // interest that month; otherwise interest accrues on the pre-payment
        // balance and principal is capped so it never goes negative.
        let (interest, principal_paid) = if extra > 0.0 && extra >= state.remaining_principal {
            (0.0, state.remaining_principal)
        } else {
            let interest = state.remaining_principal * terms.monthly_rate;
            let mut principal_paid = terms.monthly_payment - interest + extra;
            if principal_paid > state.remaining_principal {
                principal_paid = state.remaining_principal;
            }
            (interest, principal_paid)
        };

        if month < months_elapsed {
            interest_paid_so_far += interest;
        }

        state.record_month(interest, principal_paid, monthly_tax, monthly_insurance, request.hoa);
        let pmi_charged = state.settle_pmi();

        rows.push(ScheduleRow {
            month,
            interest,
            principal: principal_paid,
            extra_payment: extra,
            pmi: pmi_charged,
            remaining_principal: state.remaining_principal,
            equity: state.current_equity,
        });
    }

    ExtraPaymentOutcome {
        months: state.month,
        total_interest: state.total_interest,
        total_pmi: state.total_pmi,
        interest_paid_so_far,
        total_payments: state.total_payments,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::money;
    use approx::assert_abs_diff_eq;

    fn base_terms() -> (LoanRequest, LoanTerms) {
        let request = LoanRequest::new(300_000.0, 6.0, 30);
        let terms = LoanTerms::resolve(&request);
        (request, terms)
    }

    #[test]
    fn test_no_extra_matches_closed_form_interest() {
        let (request, terms) = base_terms();
        let outcome = run(&request, &terms, 0);
        assert_eq!(outcome.months, 360);
        let closed_form = terms.monthly_payment * 360.0 - terms.principal;
        assert_abs_diff_eq!(outcome.total_interest, closed_form, epsilon = 1e-6);
    }

    #[test]
    fn test_monthly_extra_shortens_term_and_saves_interest() {
        let (mut request, terms) = base_terms();
        request.extra_payment_policy = ExtraPaymentPolicy::Monthly;
        request.extra_payment_amount = 200.0;

        let outcome = run(&request, &terms, 0);
        assert_eq!(outcome.months, 279);

        let baseline_interest = terms.monthly_payment * 360.0 - terms.principal;
        assert_eq!(money(baseline_interest - outcome.total_interest), "91173.43");
    }

    #[test]
    fn test_extra_never_increases_interest_or_term() {
        let (request, terms) = base_terms();
        let baseline = run(&request, &terms, 0);

        for (policy, amount) in [
            (ExtraPaymentPolicy::OneTime, 10_000.0),
            (ExtraPaymentPolicy::Monthly, 50.0),
            (ExtraPaymentPolicy::Yearly, 1_000.0),
        ] {
            let mut with_extra = request.clone();
            with_extra.extra_payment_policy = policy;
            with_extra.extra_payment_amount = amount;
            let outcome = run(&with_extra, &terms, 0);
            assert!(outcome.total_interest <= baseline.total_interest);
            assert!(outcome.months <= baseline.months);
        }
    }

    #[test]
    fn test_one_time_applied_exactly_once() {
        let (mut request, terms) = base_terms();
        request.extra_payment_policy = ExtraPaymentPolicy::OneTime;
        request.extra_payment_amount = 10_000.0;
        request.extra_payment_start_month = 12;

        let outcome = run(&request, &terms, 0);
        let applications: Vec<_> = outcome
            .rows
            .iter()
            .filter(|r| r.extra_payment > 0.0)
            .collect();
        assert_eq!(applications.len(), 1);
        assert_eq!(applications[0].month, 12);
    }

    #[test]
    fn test_yearly_applies_every_twelfth_month() {
        let (mut request, terms) = base_terms();
        request.extra_payment_policy = ExtraPaymentPolicy::Yearly;
        request.extra_payment_amount = 2_400.0;
        request.extra_payment_start_month = 6;

        let outcome = run(&request, &terms, 0);
        for row in outcome.rows.iter().take(40) {
            let expected = row.month >= 6 && (row.month - 6) % 12 == 0;
            assert_eq!(row.extra_payment > 0.0, expected, "month {}", row.month);
        }
    }

    #[test]
    fn test_payoff_sized_extra_accrues_no_interest() {
        let mut request = LoanRequest::new(1_000.0, 6.0, 1);
        request.extra_payment_policy = ExtraPaymentPolicy::OneTime;
        request.extra_payment_amount = 5_000.0;
        request.extra_payment_start_month = 3;
        let terms = LoanTerms::resolve(&request);

        let outcome = run(&request, &terms, 0);
        assert_eq!(outcome.months, 4);
        let last = outcome.rows.last().unwrap();
        assert_eq!(last.interest, 0.0);
        assert!(last.remaining_principal <= 0.01);
        assert_abs_diff_eq!(outcome.total_interest, 13.781976893651088, epsilon = 1e-9);
    }

    #[test]
    fn test_interest_paid_so_far_counts_elapsed_months_only() {
        let (request, terms) = base_terms();
        let outcome = run(&request, &terms, 24);
        let expected: f64 = outcome.rows.iter().take(24).map(|r| r.interest).sum();
        assert_abs_diff_eq!(outcome.interest_paid_so_far, expected, epsilon = 1e-9);
        assert!(outcome.interest_paid_so_far < outcome.total_interest);
    }

    #[test]
    fn test_zero_payment_hits_iteration_cap() {
        // Positive balance, zero rate, zero term payment: can never amortize
        let request = LoanRequest::new(10_000.0, 0.0, 0);
        let terms = LoanTerms::resolve(&request);
        let outcome = run(&request, &terms, 0);
        assert_eq!(outcome.months, MAX_SIMULATION_MONTHS);
    }

    #[test]
    fn test_loop_totals_agree_with_baseline_subtraction() {
        // Documented contract computes totalPaymentsWithExtra as
        // baseline - interestSaved; the direct accumulation (plus the down
        // payment, which only the baseline figure carries) must agree.
        let (mut request, terms) = base_terms();
        request.extra_payment_policy = ExtraPaymentPolicy::Monthly;
        request.extra_payment_amount = 200.0;

        let outcome = run(&request, &terms, 0);
        let baseline_interest = terms.monthly_payment * 360.0 - terms.principal;
        let baseline_payments = terms.monthly_payment * 360.0;
        let interest_saved = baseline_interest - outcome.total_interest;
        let derived = baseline_payments - interest_saved;
        assert_abs_diff_eq!(derived, outcome.total_payments, epsilon = 0.02);
    }
}
