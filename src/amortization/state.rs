//! Per-simulation amortization state

/// Remaining balance at or below this threshold counts as paid off
pub const PAYOFF_EPSILON: f64 = 0.01;

/// Hard cap on simulated months; guarantees termination even for
/// pathological inputs such as a zero payment on a positive balance
pub const MAX_SIMULATION_MONTHS: u32 = 1000;

/// State of one loan simulation, mutated once per simulated month.
/// Each simulation owns its state; nothing is shared across engine calls.
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Months simulated so far (0-based month index of the next month)
    pub month: u32,

    /// Outstanding principal
    pub remaining_principal: f64,

    /// Home value minus outstanding principal, recomputed after each
    /// month's principal payment
    pub current_equity: f64,

    /// One-time extra payment already applied
    pub extra_applied: bool,

    /// Months in which PMI was charged
    pub months_with_pmi: u32,

    // Cumulative accumulators
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_tax: f64,
    pub total_insurance: f64,
    pub total_hoa: f64,
    pub total_pmi: f64,
    pub total_payments: f64,

    home_value: f64,
    target_equity: f64,
    pmi_monthly: f64,
    pmi_active: bool,
}

impl AmortizationState {
    /// Initialize a simulation. The PMI latch starts engaged whenever a
    /// monthly PMI charge exists; equity starts at the down payment.
    pub fn new(principal: f64, down_payment: f64, home_value: f64, pmi_monthly: f64) -> Self {
        Self {
            month: 0,
            remaining_principal: principal,
            current_equity: down_payment,
            extra_applied: false,
            months_with_pmi: 0,
            total_interest: 0.0,
            total_principal: 0.0,
            total_tax: 0.0,
            total_insurance: 0.0,
            total_hoa: 0.0,
            total_pmi: 0.0,
            total_payments: 0.0,
            home_value,
            target_equity: 0.20 * home_value,
            pmi_monthly,
            pmi_active: pmi_monthly > 0.0,
        }
    }

    /// Record one simulated month's amounts, reduce the balance, refresh
    /// equity, and advance the month counter
    pub fn record_month(
        &mut self,
        interest: f64,
        principal_paid: f64,
        tax: f64,
        insurance: f64,
        hoa: f64,
    ) {
        self.remaining_principal -= principal_paid;
        self.current_equity = self.home_value - self.remaining_principal;
        self.total_interest += interest;
        self.total_principal += principal_paid;
        self.total_tax += tax;
        self.total_insurance += insurance;
        self.total_hoa += hoa;
        self.total_payments += interest + principal_paid + tax + insurance + hoa;
        self.month += 1;
    }

    /// Charge PMI for the month just recorded, if the latch is still engaged
    /// and post-payment equity remains under 20% of home value. Reaching the
    /// threshold releases the latch permanently; it never re-engages even if
    /// a later equity figure were to dip back under the target.
    ///
    /// Returns the amount charged (0 when no PMI applies).
    pub fn settle_pmi(&mut self) -> f64 {
        let mut charged = 0.0;
        if self.pmi_active && self.current_equity < self.target_equity {
            self.months_with_pmi += 1;
            self.total_pmi += self.pmi_monthly;
            self.total_payments += self.pmi_monthly;
            charged = self.pmi_monthly;
        }
        if self.pmi_active && self.current_equity >= self.target_equity {
            self.pmi_active = false;
        }
        charged
    }

    /// Whether the PMI latch is still engaged
    pub fn pmi_active(&self) -> bool {
        self.pmi_active
    }

    /// Whether the balance has been retired (within the payoff epsilon)
    pub fn is_paid_off(&self) -> bool {
        self.remaining_principal <= PAYOFF_EPSILON
    }
}
