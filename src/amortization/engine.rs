//! Mortgage engine: runs the four stages and assembles the response
//!
//! The engine is a pure, synchronous computation. "Today" is injected at
//! construction rather than read from the ambient clock, so identical input
//! always yields identical output.

use super::schedule::ScheduleRow;
use super::terms::LoanTerms;
use super::{baseline, extra, refinance};
use crate::loan::LoanRequest;
use crate::report::MortgageResult;
use chrono::{Datelike, Months, NaiveDate};
use log::debug;

/// Amortization engine for a single loan request
pub struct MortgageEngine {
    today: NaiveDate,
}

impl MortgageEngine {
    /// Create an engine anchored at the given "today" date
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Compute monthly and lifetime totals for a normalized request.
    /// Always succeeds: degenerate inputs flow through as zeros.
    pub fn calculate(&self, request: &LoanRequest) -> MortgageResult {
        let terms = LoanTerms::resolve(request);
        debug!(
            "resolved terms: principal={:.2} rate={:.6} payments={} level={:.2}",
            terms.principal, terms.monthly_rate, terms.num_payments, terms.monthly_payment
        );

        let baseline = baseline::run(request, &terms);
        let months_elapsed = self.months_elapsed(request.start_date);
        let with_extra = extra::run(request, &terms, months_elapsed);
        let refinance = refinance::run(request, &terms);
        debug!(
            "simulated {} months with extra payments ({} elapsed), refinance={}",
            with_extra.months,
            months_elapsed,
            refinance.is_some()
        );

        let payoff_date = self.payoff_date(request.start_date, with_extra.months);
        MortgageResult::assemble(
            request,
            &terms,
            &baseline,
            &with_extra,
            refinance.as_ref(),
            payoff_date,
        )
    }

    /// Month-by-month schedule under the request's extra-payment policy
    pub fn schedule(&self, request: &LoanRequest) -> Vec<ScheduleRow> {
        let terms = LoanTerms::resolve(request);
        let months_elapsed = self.months_elapsed(request.start_date);
        extra::run(request, &terms, months_elapsed).rows
    }

    /// Whole calendar months between the start date and today; 0 when the
    /// start date is absent or in the future
    fn months_elapsed(&self, start_date: Option<NaiveDate>) -> u32 {
        match start_date {
            Some(start) if start < self.today => {
                let months = (self.today.year() - start.year()) * 12
                    + (self.today.month() as i32 - start.month() as i32);
                months.max(0) as u32
            }
            _ => 0,
        }
    }

    /// Projected payoff date: start date plus the simulated term
    fn payoff_date(&self, start_date: Option<NaiveDate>, months: u32) -> Option<NaiveDate> {
        start_date.and_then(|start| start.checked_add_months(Months::new(months)))
    }
}
