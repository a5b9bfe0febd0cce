use crate::types::hourly_frame::HourlyFrame;
use crate::weather_data::error::WeatherDataError;
use log::info;
use polars::prelude::*;
use std::path::Path;

/// `date` holds UTC instants, so the offset is always `+00:00`.
const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S+00:00";

/// Writes the table as comma separated text with a header row and no index column.
///
/// Missing values become empty fields. An existing file at `path` is overwritten.
pub fn write_csv(table: &mut HourlyFrame, path: &Path) -> Result<(), WeatherDataError> {
    let file = std::fs::File::create(path)
        .map_err(|e| WeatherDataError::CsvWriteIo(path.to_path_buf(), e))?;

    CsvWriter::new(file)
        .include_header(true)
        .with_separator(b',')
        .with_datetime_format(Some(CSV_DATETIME_FORMAT.to_string()))
        .finish(&mut table.frame)
        .map_err(|e| WeatherDataError::CsvWritePolars(path.to_path_buf(), e))?;

    info!("Wrote {} rows to {}", table.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::hourly_response::{HourlyResponse, VariableSeries};
    use crate::types::hourly_variable::HourlyVariable;
    use crate::weather_data::extractor::extract;
    use tempfile::tempdir;

    const START: i64 = 1680307200; // 2023-04-01T00:00:00Z

    fn table(variables: &[HourlyVariable], values: Vec<Vec<Option<f32>>>) -> HourlyFrame {
        let steps = values.first().map_or(0, Vec::len) as i64;
        let response = HourlyResponse {
            time: START,
            time_end: START + 3600 * steps,
            interval: 3600,
            variables: variables
                .iter()
                .zip(values)
                .map(|(&variable, values)| VariableSeries { variable, values })
                .collect(),
            timezone: None,
            utc_offset_seconds: 0,
        };
        extract(&response, variables).unwrap()
    }

    #[test]
    fn test_csv_layout() -> Result<(), WeatherDataError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("k12.csv");
        let mut frame = table(
            &[HourlyVariable::Temperature2m, HourlyVariable::CloudCover],
            vec![vec![Some(-1.5), Some(2.25)], vec![Some(87.5), None]],
        );

        write_csv(&mut frame, &path)?;

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "date,temperature_2m,cloud_cover",
                "2023-04-01 00:00:00+00:00,-1.5,87.5",
                "2023-04-01 01:00:00+00:00,2.25,",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<(), WeatherDataError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("k8.csv");
        let variables = [
            HourlyVariable::Temperature2m,
            HourlyVariable::RelativeHumidity2m,
            HourlyVariable::WindSpeed10m,
        ];
        let mut frame = table(
            &variables,
            vec![
                vec![Some(3.5), Some(4.25), Some(-0.75)],
                vec![Some(80.5), Some(81.5), Some(79.5)],
                vec![Some(5.5), Some(6.125), Some(0.5)],
            ],
        );
        write_csv(&mut frame, &path)?;

        let read_back = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.clone()))?
            .finish()?;

        assert_eq!(read_back.get_column_names(), frame.frame.get_column_names());
        assert_eq!(read_back.height(), 3);

        let dates = read_back.column("date")?.str()?;
        assert_eq!(dates.get(0), Some("2023-04-01 00:00:00+00:00"));
        assert_eq!(dates.get(2), Some("2023-04-01 02:00:00+00:00"));

        for variable in variables {
            let name = variable.api_name();
            let written = frame.frame.column(name)?.cast(&DataType::Float64)?;
            let read = read_back.column(name)?.cast(&DataType::Float64)?;
            let written: Vec<Option<f64>> = written.f64()?.into_iter().collect();
            let read: Vec<Option<f64>> = read.f64()?.into_iter().collect();
            assert_eq!(written, read, "column {}", name);
        }
        Ok(())
    }

    #[test]
    fn test_zero_rows_writes_header_only() -> Result<(), WeatherDataError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("k12.csv");
        let mut frame = table(&[HourlyVariable::Temperature2m], vec![vec![]]);

        write_csv(&mut frame, &path)?;

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "date,temperature_2m");
        Ok(())
    }

    #[test]
    fn test_existing_file_is_overwritten() -> Result<(), WeatherDataError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("k9.csv");
        std::fs::write(&path, "stale contents\nmore stale contents\n").unwrap();

        let mut frame = table(&[HourlyVariable::Precipitation], vec![vec![Some(0.5)]]);
        write_csv(&mut frame, &path)?;

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.starts_with("date,precipitation\n"));
        Ok(())
    }

    #[test]
    fn test_unwritable_path_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("k7.csv");
        let mut frame = table(&[HourlyVariable::Precipitation], vec![vec![Some(0.5)]]);

        let err = write_csv(&mut frame, &path).unwrap_err();
        assert!(matches!(err, WeatherDataError::CsvWriteIo(..)));
    }
}
