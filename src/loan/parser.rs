//! Raw form request parsing and normalization
//!
//! The calculator form posts every field as an optional string or number,
//! with whitespace and empty strings meaning "absent". Normalization happens
//! exactly once, here; downstream simulation code assumes fully-defaulted
//! numeric inputs.

use super::data::{ExtraPaymentPolicy, LoanRequest};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Error returned when a request body cannot be deserialized at all.
/// Field-level problems never error: they default to zero.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A form field that may arrive as a JSON number or a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl RawField {
    /// Coerce to a number the way the form layer does: blank or unparseable
    /// text becomes 0.
    fn as_f64(&self) -> f64 {
        match self {
            RawField::Number(v) => *v,
            RawField::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

/// The wire shape of a calculator request: every field optional,
/// string-or-number tolerant
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLoanRequest {
    pub home_value: Option<RawField>,
    pub down_payment: Option<RawField>,
    pub loan_amount: Option<RawField>,
    pub interest_rate: Option<RawField>,
    pub loan_term: Option<RawField>,
    pub start_date: Option<String>,
    pub property_tax: Option<RawField>,
    pub home_insurance: Option<RawField>,
    pub pmi: Option<RawField>,
    pub hoa: Option<RawField>,
    pub extra_payment_type: Option<String>,
    pub extra_payment_amount: Option<RawField>,
    pub extra_payment_start_month: Option<RawField>,
    pub refinance_start_month: Option<RawField>,
    pub refinance_interest_rate: Option<RawField>,
}

fn numeric(field: &Option<RawField>) -> f64 {
    field.as_ref().map(RawField::as_f64).unwrap_or(0.0)
}

fn whole_number(field: &Option<RawField>) -> u32 {
    numeric(field).max(0.0) as u32
}

/// Parse a form date. An unparseable date is treated as absent: it suppresses
/// the months-elapsed and payoff-date outputs without failing the request.
fn parse_start_date(value: &Option<String>) -> Option<NaiveDate> {
    value
        .as_ref()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

impl RawLoanRequest {
    /// Apply the documented defaulting rules and produce a normalized request
    pub fn normalize(self) -> LoanRequest {
        LoanRequest {
            home_value: numeric(&self.home_value),
            down_payment: numeric(&self.down_payment),
            loan_amount: numeric(&self.loan_amount),
            interest_rate: numeric(&self.interest_rate),
            loan_term_years: whole_number(&self.loan_term),
            start_date: parse_start_date(&self.start_date),
            property_tax: numeric(&self.property_tax),
            home_insurance: numeric(&self.home_insurance),
            pmi: numeric(&self.pmi),
            hoa: numeric(&self.hoa),
            extra_payment_policy: self
                .extra_payment_type
                .as_deref()
                .map(ExtraPaymentPolicy::from_form_value)
                .unwrap_or_default(),
            extra_payment_amount: numeric(&self.extra_payment_amount),
            extra_payment_start_month: whole_number(&self.extra_payment_start_month),
            refinance_start_month: whole_number(&self.refinance_start_month),
            refinance_interest_rate: numeric(&self.refinance_interest_rate),
        }
    }
}

/// Parse and normalize a JSON request body
pub fn parse_loan_request(json: &str) -> Result<LoanRequest, RequestError> {
    let raw: RawLoanRequest = serde_json::from_str(json)?;
    Ok(raw.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_strings_coerce() {
        let request = parse_loan_request(
            r#"{
                "loanAmount": "300000",
                "interestRate": 6.0,
                "loanTerm": "30",
                "pmi": " 150.0 "
            }"#,
        )
        .unwrap();

        assert_eq!(request.loan_amount, 300_000.0);
        assert_eq!(request.interest_rate, 6.0);
        assert_eq!(request.loan_term_years, 30);
        assert_eq!(request.pmi, 150.0);
    }

    #[test]
    fn test_blank_and_garbage_default_to_zero() {
        let request = parse_loan_request(
            r#"{
                "loanAmount": "",
                "interestRate": "   ",
                "propertyTax": "n/a"
            }"#,
        )
        .unwrap();

        assert_eq!(request.loan_amount, 0.0);
        assert_eq!(request.interest_rate, 0.0);
        assert_eq!(request.property_tax, 0.0);
    }

    #[test]
    fn test_empty_body_is_all_defaults() {
        let request = parse_loan_request("{}").unwrap();
        assert_eq!(request.loan_amount, 0.0);
        assert_eq!(request.loan_term_years, 0);
        assert!(request.start_date.is_none());
        assert_eq!(request.extra_payment_policy, ExtraPaymentPolicy::None);
    }

    #[test]
    fn test_start_date_parses_iso() {
        let request = parse_loan_request(r#"{"startDate": "2024-03-01"}"#).unwrap();
        assert_eq!(
            request.start_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_invalid_start_date_is_absent_not_an_error() {
        let request = parse_loan_request(r#"{"startDate": "not-a-date"}"#).unwrap();
        assert!(request.start_date.is_none());
    }

    #[test]
    fn test_extra_payment_type_maps_to_policy() {
        let request =
            parse_loan_request(r#"{"extraPaymentType": "one-time", "extraPaymentAmount": 5000}"#)
                .unwrap();
        assert_eq!(request.extra_payment_policy, ExtraPaymentPolicy::OneTime);
        assert_eq!(request.extra_payment_amount, 5000.0);
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(parse_loan_request("not json").is_err());
    }
}
