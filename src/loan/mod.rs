//! Loan request model and form-input normalization

mod data;
pub mod parser;

pub use data::{ExtraPaymentPolicy, LoanRequest};
pub use parser::{parse_loan_request, RawLoanRequest, RequestError};
