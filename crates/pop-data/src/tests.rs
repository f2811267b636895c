//! Unit tests for pop-data.

#[cfg(test)]
mod owid_tests {
    use std::io::{Cursor, Write};

    use chrono::NaiveDate;

    use crate::{DataError, load_country_csv, load_country_reader};

    const SAMPLE: &str = "\
iso_code,continent,location,date,total_cases,new_cases,new_deaths,new_vaccinations,population\n\
POL,Europe,Poland,2020-03-04,1.0,1.0,,,37846605.0\n\
POL,Europe,Poland,2020-03-05,1.0,0.0,,,37846605.0\n\
CZE,Europe,Czechia,2020-03-05,3.0,3.0,,,10708982.0\n\
POL,Europe,Poland,2020-03-06,5.0,4.0,1.0,12.7,37846605.0\n\
POL,Europe,Poland,2020-03-07,4.0,-1.0,0.0,,37846605.0\n\
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn loads_only_requested_location() {
        let data = load_country_reader(Cursor::new(SAMPLE), "Poland").unwrap();
        assert_eq!(data.location, "Poland");
        assert_eq!(data.population, 37_846_605);
        assert_eq!(data.days.len(), 4);
        assert_eq!(data.span(), Some((date(2020, 3, 4), date(2020, 3, 7))));

        let czechia = load_country_reader(Cursor::new(SAMPLE), "Czechia").unwrap();
        assert_eq!(czechia.population, 10_708_982);
        assert_eq!(czechia.days.len(), 1);
        assert_eq!(czechia.days[0].new_cases, 3);
    }

    #[test]
    fn empty_cells_are_zero_and_fractions_truncate() {
        let data = load_country_reader(Cursor::new(SAMPLE), "Poland").unwrap();
        let first = data.days[0];
        assert_eq!(first.new_cases, 1);
        assert_eq!(first.new_deaths, 0);
        assert_eq!(first.new_vaccinations, 0);

        let third = data.days[2];
        assert_eq!(third.new_deaths, 1);
        assert_eq!(third.new_vaccinations, 12);
    }

    #[test]
    fn negative_corrections_clamp_to_zero() {
        let data = load_country_reader(Cursor::new(SAMPLE), "Poland").unwrap();
        assert_eq!(data.days[3].new_cases, 0);
    }

    #[test]
    fn unknown_location() {
        let err = load_country_reader(Cursor::new(SAMPLE), "Atlantis").unwrap_err();
        assert!(matches!(err, DataError::LocationNotFound(ref l) if l == "Atlantis"));
    }

    #[test]
    fn missing_population() {
        let csv = "location,date,new_cases,population\nNowhere,2021-01-01,3,\n";
        let err = load_country_reader(Cursor::new(csv), "Nowhere").unwrap_err();
        assert!(matches!(err, DataError::InvalidPopulation { value: None, .. }));
    }

    #[test]
    fn missing_columns_read_as_zero() {
        let csv = "location,date,population\nTiny,2021-01-01,10\n";
        let data = load_country_reader(Cursor::new(csv), "Tiny").unwrap();
        assert_eq!(data.days[0].new_cases, 0);
        assert_eq!(data.days[0].new_vaccinations, 0);
    }

    #[test]
    fn days_sorted_by_date() {
        let csv = "location,date,population,new_cases\n\
                   X,2021-01-03,10,3\nX,2021-01-01,10,1\nX,2021-01-02,10,2\n";
        let data = load_country_reader(Cursor::new(csv), "X").unwrap();
        let cases: Vec<u64> = data.days.iter().map(|d| d.new_cases).collect();
        assert_eq!(cases, [1, 2, 3]);
        // Population still comes from the first row in file order.
        assert_eq!(data.population, 10);
    }

    #[test]
    fn bad_date_is_csv_error() {
        let csv = "location,date,population\nX,yesterday,10\n";
        let err = load_country_reader(Cursor::new(csv), "X").unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("owid-covid-data.csv");
        std::fs::File::create(&path).unwrap().write_all(SAMPLE.as_bytes()).unwrap();

        let data = load_country_csv(&path, "Poland").unwrap();
        assert_eq!(data.days.len(), 4);

        let err = load_country_csv(&dir.path().join("missing.csv"), "Poland").unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
