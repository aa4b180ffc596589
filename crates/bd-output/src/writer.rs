//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, PassengerReportRow, TickSummaryRow};

/// A destination for run metrics.
///
/// [`SimOutputObserver`][crate::SimOutputObserver] stores the first error a
/// writer returns; retrieve it with `take_error` after the run.
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the per-passenger outcome rows of a finished run.
    fn write_passenger_reports(&mut self, rows: &[PassengerReportRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
