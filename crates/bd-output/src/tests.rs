//! Integration tests for bd-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use bd_passenger::ShuffleType;

    use crate::csv::CsvWriter;
    use crate::row::{PassengerReportRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            elapsed_secs: (tick + 1) as f64 * 0.5,
            pending:      3,
            queued:       2,
            in_cabin:     1,
            seated:       tick,
            frozen_rows:  0,
            finished:     false,
        }
    }

    fn report_row(passenger_id: u32, seated_tick: Option<u64>) -> PassengerReportRow {
        PassengerReportRow {
            policy: "back_to_front".into(),
            seed: 7,
            passenger_id,
            seat: format!("{}A", passenger_id + 1),
            arrival_tick: 0,
            entered_tick: Some(1),
            seated_tick,
            shuffle_type: ShuffleType::C,
            shuffle_secs: 2.5,
            shuffle_wait_secs: 0.5,
            times_displaced: 0,
        }
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("passenger_reports.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("seed_1");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["tick", "elapsed_secs", "pending", "queued", "in_cabin", "seated", "frozen_rows", "finished"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("passenger_reports.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2[0], "policy");
        assert_eq!(headers2[3], "seat");
        assert_eq!(headers2[7], "shuffle_type");
        assert_eq!(headers2.len(), 11);
    }

    #[test]
    fn csv_tick_summary_values() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");     // tick
        assert_eq!(&rows[0][1], "2.000"); // (3 + 1) * 0.5
        assert_eq!(&rows[0][5], "3");     // seated
        assert_eq!(&rows[0][7], "0");     // finished
    }

    #[test]
    fn csv_passenger_report_values() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_passenger_reports(&[report_row(0, Some(12)), report_row(1, None)]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "passenger_reports.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "back_to_front");
        assert_eq!(&rows[0][3], "1A");
        assert_eq!(&rows[0][6], "12");
        assert_eq!(&rows[0][7], "C");
        assert_eq!(&rows[0][8], "2.500");
        // unseated passengers leave the column empty
        assert_eq!(&rows[1][6], "");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_reports_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_passenger_reports(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use bd_assign::Explicit;
    use bd_cabin::{Layout, LayoutConfig};
    use bd_core::{SimConfig, Tick};
    use bd_passenger::PassengerProfile;
    use bd_sim::{PassengerCount, SimBuilder, SimObserver, TickSummary};

    use crate::csv::CsvWriter;
    use crate::row::{PassengerReportRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult, SimOutputObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// Collects rows in memory; fails every write once `fail` is set.
    #[derive(Default)]
    struct MemoryWriter {
        summaries:  Vec<TickSummaryRow>,
        passengers: Vec<PassengerReportRow>,
        finishes:   u32,
        fail:       bool,
    }

    impl OutputWriter for MemoryWriter {
        fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other(format!("tick {}", row.tick))));
            }
            self.summaries.push(*row);
            Ok(())
        }

        fn write_passenger_reports(&mut self, rows: &[PassengerReportRow]) -> OutputResult<()> {
            self.passengers.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    fn summary(tick: u64) -> TickSummary {
        TickSummary {
            tick: Tick(tick),
            elapsed_secs: tick as f64 + 1.0,
            pending: 0,
            queued: 0,
            in_cabin: 1,
            seated: 0,
            frozen_rows: 0,
            finished: false,
        }
    }

    #[test]
    fn observer_keeps_first_error() {
        let mut obs = SimOutputObserver::new(MemoryWriter { fail: true, ..Default::default() });
        obs.on_tick_end(Tick(0), &summary(0));
        obs.on_tick_end(Tick(1), &summary(1));
        let err = obs.take_error().expect("write error stored");
        assert!(err.to_string().contains("tick 0"), "{err}");
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn reports_only_skips_summaries() {
        let mut obs = SimOutputObserver::new(MemoryWriter::default()).reports_only();
        obs.on_tick_end(Tick(0), &summary(0));
        assert!(obs.into_writer().summaries.is_empty());
    }

    #[test]
    fn integration_csv() {
        // one passenger, two cells from the aisle: seated at T3
        let layout = LayoutConfig::compact(1, 5, 2);
        let seat = Layout::new(layout.clone()).unwrap().seat_at(0, 0).unwrap().id;
        let config = SimConfig {
            seed:             1,
            activation_seed:  None,
            ticks_per_second: 1,
            aisle_speed:      1.0,
            max_ticks:        100,
        };
        let mut sim = SimBuilder::new(config)
            .layout(layout)
            .passengers(PassengerCount::Exact(1))
            .policy(Explicit(vec![seat]))
            .passenger_profiles(vec![PassengerProfile::instant()])
            .arrival_ticks(vec![Tick(0)])
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        assert!(sim.run(&mut obs).unwrap().is_complete());
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let ticks: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(ticks.len(), 4, "one summary row per tick");
        assert_eq!(&ticks[3][7], "1");
        assert_eq!(&ticks[3][5], "1");

        let mut rdr = csv::Reader::from_path(dir.path().join("passenger_reports.csv")).unwrap();
        let passengers: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(passengers.len(), 1);
        assert_eq!(&passengers[0][0], "explicit");
        assert_eq!(&passengers[0][3], "1A");
        assert_eq!(&passengers[0][6], "3");
        assert_eq!(&passengers[0][7], "A");
    }
}
