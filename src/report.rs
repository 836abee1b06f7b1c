//! Response contract for the calculator boundary
//!
//! Currency fields are strings, truncated to 2 decimals before formatting.
//! Field names match the calculator form's JSON contract.

use crate::amortization::{BaselineTotals, ExtraPaymentOutcome, LoanTerms, RefinanceOutcome};
use crate::loan::LoanRequest;
use crate::money::money;
use chrono::NaiveDate;
use serde::Serialize;

/// Refinance scenario totals, reported alongside the main result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinanceTotals {
    pub principal: String,
    pub interest_paid_before_refinance: String,
    pub interest: String,
    pub monthly_payment: String,
    pub property_tax: String,
    pub home_insurance: String,
    pub pmi: String,
    pub down_payment: String,
    pub total: String,
    pub interest_saved_refinance: String,
}

impl RefinanceTotals {
    fn from_outcome(outcome: &RefinanceOutcome, down_payment: f64) -> Self {
        Self {
            principal: money(outcome.principal),
            interest_paid_before_refinance: money(outcome.interest_before),
            interest: money(outcome.interest_after),
            monthly_payment: money(outcome.monthly_payment),
            property_tax: money(outcome.total_tax),
            home_insurance: money(outcome.total_insurance),
            pmi: money(outcome.pmi_before + outcome.pmi_after),
            down_payment: money(down_payment),
            total: money(outcome.total),
            interest_saved_refinance: money(outcome.interest_saved),
        }
    }
}

/// Complete calculator response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageResult {
    pub success: bool,
    pub monthly_payment: String,
    pub total_monthly: String,
    pub monthly_principal: String,
    pub monthly_interest: String,
    #[serde(rename = "monthlyPMI")]
    pub monthly_pmi: String,
    pub monthly_insurance: String,
    pub monthly_property_tax: String,
    pub total_interest: String,
    pub total_property_tax: String,
    pub total_home_insurance: String,
    pub total_payments: String,
    pub total_payments_with_extra: String,
    #[serde(rename = "totalPMIPaidWithExtra")]
    pub total_pmi_paid_with_extra: String,
    pub interest_saved: String,
    pub new_loan_term_months: u32,
    pub new_loan_term_years: String,
    pub projected_payoff_date: Option<String>,
    pub total_interest_paid_so_far: String,
    pub refinance_totals: Option<RefinanceTotals>,
}

impl MortgageResult {
    /// Assemble the response from the stage outputs
    pub fn assemble(
        request: &LoanRequest,
        terms: &LoanTerms,
        baseline: &BaselineTotals,
        with_extra: &ExtraPaymentOutcome,
        refinance: Option<&RefinanceOutcome>,
        payoff_date: Option<NaiveDate>,
    ) -> Self {
        let monthly_tax = request.monthly_property_tax();
        let monthly_insurance = request.monthly_home_insurance();

        // First-month split of the level payment
        let (monthly_principal, monthly_interest) =
            if terms.monthly_payment > 0.0 && terms.monthly_rate > 0.0 {
                let first_interest = terms.principal * terms.monthly_rate;
                (terms.monthly_payment - first_interest, first_interest)
            } else {
                (terms.monthly_payment, 0.0)
            };

        let total_monthly =
            terms.monthly_payment + monthly_tax + request.pmi + monthly_insurance + request.hoa;

        let years = request.loan_term_years as f64;
        let interest_saved = baseline.total_interest - with_extra.total_interest;

        Self {
            success: true,
            monthly_payment: money(terms.monthly_payment),
            total_monthly: money(total_monthly),
            monthly_principal: money(monthly_principal),
            monthly_interest: money(monthly_interest),
            monthly_pmi: money(request.pmi),
            monthly_insurance: money(monthly_insurance),
            monthly_property_tax: money(monthly_tax),
            total_interest: money(baseline.total_interest),
            total_property_tax: money(request.property_tax * years),
            total_home_insurance: money(request.home_insurance * years),
            total_payments: money(baseline.total_payments),
            // Documented contract: derived from the baseline, not the loop
            total_payments_with_extra: money(baseline.total_payments - interest_saved),
            total_pmi_paid_with_extra: money(with_extra.total_pmi),
            interest_saved: money(interest_saved),
            new_loan_term_months: with_extra.months,
            new_loan_term_years: money(with_extra.months as f64 / 12.0),
            projected_payoff_date: payoff_date.map(|d| d.format("%Y-%m-%d").to_string()),
            total_interest_paid_so_far: money(with_extra.interest_paid_so_far),
            refinance_totals: refinance
                .map(|outcome| RefinanceTotals::from_outcome(outcome, request.down_payment)),
        }
    }
}
