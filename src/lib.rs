//! Mortgage System - amortization schedules and cost projections for fixed-rate loans
//!
//! This library provides:
//! - Loan request normalization with form-style defaulting
//! - Baseline and extra-payment amortization simulations
//! - Refinance splicing with a counterfactual interest comparison
//! - The JSON response contract for the calculator boundary

pub mod amortization;
pub mod loan;
pub mod money;
pub mod report;

// Re-export commonly used types
pub use amortization::{LoanTerms, MortgageEngine, ScheduleRow};
pub use loan::{parse_loan_request, ExtraPaymentPolicy, LoanRequest, RequestError};
pub use report::{MortgageResult, RefinanceTotals};
