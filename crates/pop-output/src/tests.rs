//! Integration tests for pop-output.

use chrono::NaiveDate;

use pop_sim::DailyReport;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, day).unwrap()
}

fn report(day: u32, cases: u64, deaths: u64) -> DailyReport {
    DailyReport::new(date(day)).with("cases", cases).with("deaths", deaths)
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::ReportWriter;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_file_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("daily_reports.csv").exists());
    }

    #[test]
    fn csv_header_from_first_report() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_report(&report(1, 3, 0)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("daily_reports.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["date", "cases", "deaths"]);
    }

    #[test]
    fn csv_rows_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_report(&report(1, 3, 0)).unwrap();
        w.write_report(&report(2, 7, 1)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("daily_reports.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "2021-03-01");
        assert_eq!(&rows[1][0], "2021-03-02");
        assert_eq!(&rows[1][1], "7");
        assert_eq!(&rows[1][2], "1");
    }

    #[test]
    fn csv_rejects_changed_columns() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_report(&report(1, 3, 0)).unwrap();
        let other = DailyReport::new(date(2)).with("deaths", 1);
        let err = w.write_report(&other).unwrap_err();
        assert!(matches!(err, OutputError::Columns { .. }));
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn integration_csv() {
        use pop_core::SimConfig;
        use pop_data::DailyRecord;
        use pop_sim::{Outbreak, SimBuilder};

        use crate::observer::ReportObserver;

        let days: Vec<DailyRecord> = (1..=5)
            .map(|d| DailyRecord {
                date:             date(d),
                new_cases:        10,
                new_deaths:       if d == 1 { 0 } else { 1 },
                new_vaccinations: 20,
            })
            .collect();

        let mut sim = SimBuilder::new(SimConfig::new(1_000, 1), Outbreak).build().unwrap();
        let dir = tmp();
        let mut obs = ReportObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&days, &mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.written(), 5);

        let mut rdr = csv::Reader::from_path(dir.path().join("daily_reports.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[0], "date");
        assert_eq!(headers.len(), 6);
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[4][1], "50"); // cases
        assert_eq!(&rows[4][2], "4"); // deaths
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::observer::ReportObserver;
    use crate::writer::ReportWriter;
    use crate::{OutputError, OutputResult};
    use pop_sim::SimObserver;

    /// Fails on every write after the first.
    #[derive(Default)]
    struct Flaky {
        writes:   usize,
        finished: bool,
    }

    impl ReportWriter for Flaky {
        fn write_report(&mut self, _report: &DailyReport) -> OutputResult<()> {
            self.writes += 1;
            if self.writes > 1 {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn keeps_first_error_and_keeps_going() {
        let mut obs = ReportObserver::new(Flaky::default());
        for d in 1..=3 {
            obs.on_day_end(&report(d, 0, 0));
        }
        obs.on_sim_end(3);
        assert_eq!(obs.written(), 1);
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
        let writer = obs.into_writer();
        assert_eq!(writer.writes, 3);
        assert!(writer.finished);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::sqlite::SqliteWriter;
    use crate::writer::ReportWriter;

    #[test]
    fn sqlite_long_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_report(&report(1, 3, 0)).unwrap();
        w.write_report(&report(2, 7, 1)).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM daily_metrics", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 4);
        let cases: i64 = conn
            .query_row(
                "SELECT value FROM daily_metrics WHERE date = '2021-03-02' AND metric = 'cases'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(cases, 7);
    }
}
