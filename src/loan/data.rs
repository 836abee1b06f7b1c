//! Loan request data structures matching the calculator form fields

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// When extra principal payments are applied during the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtraPaymentPolicy {
    /// No extra payments
    #[default]
    None,
    /// A single extra payment on the first month at or after the start month
    OneTime,
    /// An extra payment every month from the start month onward
    Monthly,
    /// An extra payment every 12th month starting at the start month
    Yearly,
}

impl ExtraPaymentPolicy {
    /// Parse the form's string value ("one-time", "monthly", "yearly").
    /// Anything else, including an empty string, means no extra payments.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "one-time" => ExtraPaymentPolicy::OneTime,
            "monthly" => ExtraPaymentPolicy::Monthly,
            "yearly" => ExtraPaymentPolicy::Yearly,
            _ => ExtraPaymentPolicy::None,
        }
    }
}

/// A fully-normalized loan request. Every numeric field has already been
/// defaulted (missing/blank/unparseable form input becomes 0), so the
/// simulation stages never re-check for absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Purchase price of the home
    pub home_value: f64,

    /// Down payment made at closing
    pub down_payment: f64,

    /// Financed principal. Authoritative as received; the caller derives it
    /// from home value minus down payment when the form leaves it blank.
    pub loan_amount: f64,

    /// Annual interest rate as a percentage (6.5 means 6.5%)
    pub interest_rate: f64,

    /// Loan term in years
    pub loan_term_years: u32,

    /// First payment date; anchors months-elapsed and the payoff projection
    pub start_date: Option<NaiveDate>,

    /// Annual property tax
    pub property_tax: f64,

    /// Annual homeowner's insurance premium
    pub home_insurance: f64,

    /// Flat monthly PMI charge (not annual)
    pub pmi: f64,

    /// Flat monthly HOA fee
    pub hoa: f64,

    /// Extra principal payment policy
    pub extra_payment_policy: ExtraPaymentPolicy,

    /// Extra payment amount per application
    pub extra_payment_amount: f64,

    /// 0-based month index at which extra payments begin
    pub extra_payment_start_month: u32,

    /// 0-based month index at which the refinance takes effect
    pub refinance_start_month: u32,

    /// New annual interest rate after refinancing, as a percentage
    pub refinance_interest_rate: f64,
}

impl LoanRequest {
    /// Convenience constructor for the bare loan terms
    pub fn new(loan_amount: f64, interest_rate: f64, loan_term_years: u32) -> Self {
        Self {
            loan_amount,
            interest_rate,
            loan_term_years,
            ..Default::default()
        }
    }

    /// Annual property tax spread over 12 months
    pub fn monthly_property_tax(&self) -> f64 {
        self.property_tax / 12.0
    }

    /// Annual insurance premium spread over 12 months
    pub fn monthly_home_insurance(&self) -> f64 {
        self.home_insurance / 12.0
    }

    /// Equity level at which PMI permanently drops (20% of home value)
    pub fn pmi_target_equity(&self) -> f64 {
        0.20 * self.home_value
    }

    /// A refinance scenario runs only when both the new rate and the start
    /// month are present and non-zero
    pub fn refinance_requested(&self) -> bool {
        self.refinance_interest_rate > 0.0 && self.refinance_start_month > 0
    }
}
