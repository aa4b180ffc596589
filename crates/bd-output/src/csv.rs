//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `passenger_reports.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{OutputResult, PassengerReportRow, TickSummaryRow};

/// Writes run metrics to two CSV files.
pub struct CsvWriter {
    summaries:  Writer<File>,
    passengers: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "elapsed_secs", "pending", "queued", "in_cabin", "seated", "frozen_rows",
            "finished",
        ])?;

        let mut passengers = Writer::from_path(dir.join("passenger_reports.csv"))?;
        passengers.write_record([
            "policy", "seed", "passenger_id", "seat", "arrival_tick", "entered_tick",
            "seated_tick", "shuffle_type", "shuffle_secs", "shuffle_wait_secs",
            "times_displaced",
        ])?;

        debug!(dir = %dir.display(), "opened CSV output");
        Ok(Self { summaries, passengers, finished: false })
    }
}

fn opt(v: Option<u64>) -> String {
    v.map(|t| t.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.elapsed_secs),
            row.pending.to_string(),
            row.queued.to_string(),
            row.in_cabin.to_string(),
            row.seated.to_string(),
            row.frozen_rows.to_string(),
            (row.finished as u8).to_string(),
        ])?;
        Ok(())
    }

    fn write_passenger_reports(&mut self, rows: &[PassengerReportRow]) -> OutputResult<()> {
        for row in rows {
            self.passengers.write_record(&[
                row.policy.clone(),
                row.seed.to_string(),
                row.passenger_id.to_string(),
                row.seat.clone(),
                row.arrival_tick.to_string(),
                opt(row.entered_tick),
                opt(row.seated_tick),
                row.shuffle_type.to_string(),
                format!("{:.3}", row.shuffle_secs),
                format!("{:.3}", row.shuffle_wait_secs),
                row.times_displaced.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.passengers.flush()?;
        Ok(())
    }
}
