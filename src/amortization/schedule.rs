//! Month-by-month schedule output

use serde::Serialize;
use std::io::Write;

/// One simulated month of the amortization schedule
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    /// 0-based month index, matching the request's month fields
    pub month: u32,

    /// Interest accrued on the pre-payment balance
    pub interest: f64,

    /// Principal retired this month (level payment portion plus extra)
    pub principal: f64,

    /// Extra principal payment applied this month
    pub extra_payment: f64,

    /// PMI charged this month (0 once the latch releases)
    pub pmi: f64,

    /// Balance after this month's principal payment
    pub remaining_principal: f64,

    /// Home value minus remaining balance
    pub equity: f64,
}

/// Write schedule rows as CSV with a header row
pub fn write_schedule_csv<W: Write>(rows: &[ScheduleRow], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
