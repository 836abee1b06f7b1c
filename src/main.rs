//! Mortgage System CLI
//!
//! Command-line interface for computing a loan's amortization and cost
//! projection. Accepts either a JSON request file (the same shape the
//! calculator form posts) or individual flags.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use mortgage_system::amortization::write_schedule_csv;
use mortgage_system::{parse_loan_request, ExtraPaymentPolicy, LoanRequest, MortgageEngine};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mortgage_system",
    about = "Amortization and cost projection for fixed-rate mortgage loans"
)]
struct Args {
    /// JSON request file with the calculator form fields
    #[arg(long, conflicts_with_all = ["loan_amount", "interest_rate", "loan_term"])]
    input: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    loan_amount: f64,

    /// Annual interest rate as a percentage (6.5 means 6.5%)
    #[arg(long, default_value_t = 0.0)]
    interest_rate: f64,

    /// Loan term in years
    #[arg(long, default_value_t = 0)]
    loan_term: u32,

    #[arg(long, default_value_t = 0.0)]
    home_value: f64,

    #[arg(long, default_value_t = 0.0)]
    down_payment: f64,

    /// First payment date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Annual property tax
    #[arg(long, default_value_t = 0.0)]
    property_tax: f64,

    /// Annual homeowner's insurance premium
    #[arg(long, default_value_t = 0.0)]
    home_insurance: f64,

    /// Monthly PMI charge
    #[arg(long, default_value_t = 0.0)]
    pmi: f64,

    /// Monthly HOA fee
    #[arg(long, default_value_t = 0.0)]
    hoa: f64,

    /// Extra payment policy: one-time, monthly, or yearly
    #[arg(long)]
    extra_payment_type: Option<String>,

    #[arg(long, default_value_t = 0.0)]
    extra_payment_amount: f64,

    /// 0-based month at which extra payments begin
    #[arg(long, default_value_t = 0)]
    extra_payment_start_month: u32,

    /// 0-based month at which the refinance takes effect
    #[arg(long, default_value_t = 0)]
    refinance_start_month: u32,

    /// New annual interest rate after refinancing
    #[arg(long, default_value_t = 0.0)]
    refinance_interest_rate: f64,

    /// Write the month-by-month schedule to this CSV path
    #[arg(long)]
    schedule_csv: Option<PathBuf>,

    /// Print the full response as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

impl Args {
    fn to_request(&self) -> anyhow::Result<LoanRequest> {
        if let Some(path) = &self.input {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("reading request file {}", path.display()))?;
            return Ok(parse_loan_request(&body)?);
        }
        Ok(LoanRequest {
            home_value: self.home_value,
            down_payment: self.down_payment,
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate,
            loan_term_years: self.loan_term,
            start_date: self.start_date,
            property_tax: self.property_tax,
            home_insurance: self.home_insurance,
            pmi: self.pmi,
            hoa: self.hoa,
            extra_payment_policy: self
                .extra_payment_type
                .as_deref()
                .map(ExtraPaymentPolicy::from_form_value)
                .unwrap_or_default(),
            extra_payment_amount: self.extra_payment_amount,
            extra_payment_start_month: self.extra_payment_start_month,
            refinance_start_month: self.refinance_start_month,
            refinance_interest_rate: self.refinance_interest_rate,
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let request = args.to_request()?;

    let engine = MortgageEngine::new(Local::now().date_naive());
    let result = engine.calculate(&request);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Mortgage System v0.1.0");
        println!("======================\n");

        println!("Monthly breakdown:");
        println!("  Payment:        ${}", result.monthly_payment);
        println!("  Principal:      ${}", result.monthly_principal);
        println!("  Interest:       ${}", result.monthly_interest);
        println!("  Property tax:   ${}", result.monthly_property_tax);
        println!("  Insurance:      ${}", result.monthly_insurance);
        println!("  PMI:            ${}", result.monthly_pmi);
        println!("  Total monthly:  ${}", result.total_monthly);
        println!();

        println!("Lifetime totals:");
        println!("  Total interest:       ${}", result.total_interest);
        println!("  Total property tax:   ${}", result.total_property_tax);
        println!("  Total insurance:      ${}", result.total_home_insurance);
        println!("  Total payments:       ${}", result.total_payments);
        println!();

        println!("With extra payments:");
        println!("  New term:             {} months ({} years)",
            result.new_loan_term_months, result.new_loan_term_years);
        println!("  Interest saved:       ${}", result.interest_saved);
        println!("  Total payments:       ${}", result.total_payments_with_extra);
        println!("  PMI paid:             ${}", result.total_pmi_paid_with_extra);
        println!("  Interest paid so far: ${}", result.total_interest_paid_so_far);
        if let Some(date) = &result.projected_payoff_date {
            println!("  Projected payoff:     {}", date);
        }

        if let Some(refi) = &result.refinance_totals {
            println!("\nRefinance:");
            println!("  Principal at refinance:  ${}", refi.principal);
            println!("  New monthly payment:     ${}", refi.monthly_payment);
            println!("  Interest before:         ${}", refi.interest_paid_before_refinance);
            println!("  Interest after:          ${}", refi.interest);
            println!("  Interest saved:          ${}", refi.interest_saved_refinance);
            println!("  Total cost:              ${}", refi.total);
        }
    }

    if let Some(path) = &args.schedule_csv {
        let schedule = engine.schedule(&request);
        let file = File::create(path)
            .with_context(|| format!("creating schedule CSV {}", path.display()))?;
        write_schedule_csv(&schedule, file)?;
        eprintln!("\nSchedule written to: {}", path.display());
    }

    Ok(())
}
