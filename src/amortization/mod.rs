//! Month-by-month amortization simulations and the mortgage engine

pub mod baseline;
pub mod engine;
pub mod extra;
pub mod refinance;
pub mod schedule;
pub mod state;
pub mod terms;

pub use baseline::BaselineTotals;
pub use engine::MortgageEngine;
pub use extra::ExtraPaymentOutcome;
pub use refinance::RefinanceOutcome;
pub use schedule::{write_schedule_csv, ScheduleRow};
pub use state::AmortizationState;
pub use terms::LoanTerms;
