use crate::persistence::codec::{decode_bytes, encode_point};
use crate::prelude::{TrackerError, TrackerResult};
use crate::series::{EventSeries, Point};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Outcome of reading a persisted series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub series: EventSeries,
    pub parsed: usize,
    pub skipped: usize,
}

/// Writes one line per point, truncating whatever was at `path`.
pub fn save(series: &EventSeries, path: &Path) -> TrackerResult<()> {
    let file = File::create(path).map_err(|err| TrackerError::file_access(path, err))?;
    let mut writer = BufWriter::new(file);
    for point in series.snapshot() {
        writer
            .write_all(encode_point(point).as_bytes())
            .map_err(|err| TrackerError::file_access(path, err))?;
    }
    writer
        .flush()
        .map_err(|err| TrackerError::file_access(path, err))?;
    debug!("saved {} points to {}", series.len(), path.display());
    Ok(())
}

/// Like [`save`], creating missing parent directories first.
pub fn save_autosave(series: &EventSeries, path: &Path) -> TrackerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| TrackerError::file_access(parent, err))?;
    }
    save(series, path)
}

/// Reads a series; lines that are not two numeric fields are skipped,
/// including lines that are not valid UTF-8.
pub fn load(path: &Path) -> TrackerResult<LoadReport> {
    let file = File::open(path).map_err(|err| TrackerError::file_access(path, err))?;
    let mut points = Vec::new();
    let mut skipped = 0;

    for (number, line) in BufReader::new(file).split(b'\n').enumerate() {
        let line = line.map_err(|err| TrackerError::file_access(path, err))?;
        match decode_bytes(&line) {
            Some(point) => points.push(point),
            None => {
                debug!(
                    "skipping line {} of {}: {:?}",
                    number + 1,
                    path.display(),
                    String::from_utf8_lossy(&line)
                );
                skipped += 1;
            }
        }
    }

    Ok(build_report(points, skipped))
}

/// Reads the autosave file; a missing file yields an empty series.
pub fn load_autosave(path: &Path) -> TrackerResult<LoadReport> {
    match load(path) {
        Err(err) if err.is_not_found() => {
            info!("no autosave at {}, starting empty", path.display());
            Ok(LoadReport::default())
        }
        other => other,
    }
}

fn build_report(points: Vec<Point>, skipped: usize) -> LoadReport {
    let parsed = points.len();
    LoadReport {
        series: EventSeries::from_points(points),
        parsed,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn malformed_lines_are_skipped() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"3.0,4.0\ngarbage\n5.0,6.0\n").unwrap();

        let report = load(temp.path()).unwrap();
        assert_eq!(
            report.series.snapshot(),
            &[Point::new(3.0, 4.0), Point::new(5.0, 6.0)]
        );
        assert_eq!(report.series.current_value(), 6.0);
        assert_eq!(report.parsed, 2);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn non_utf8_line_is_skipped_not_fatal() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"3.0,4.0\n\xff\xfe\n5.0,6.0\n").unwrap();

        let report = load(temp.path()).unwrap();
        assert_eq!(
            report.series.snapshot(),
            &[Point::new(3.0, 4.0), Point::new(5.0, 6.0)]
        );
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn corrupt_autosave_keeps_readable_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, b"0.0,1.0\n1.0,\xc3\x28\n2.0,0.5\n").unwrap();

        let report = load_autosave(&path).unwrap();
        assert_eq!(report.parsed, 2);
        assert_eq!(report.series.current_value(), 0.5);
    }

    #[test]
    fn save_then_load_preserves_fractional_indices() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.txt");
        let mut series = EventSeries::new();
        series.append(0.1 + 0.2);
        series.append(-0.7);
        series.push_filler(0.1);
        series.push_filler(0.1);

        save(&series, &path).unwrap();
        let report = load(&path).unwrap();
        assert_eq!(report.series, series);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn save_truncates_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.txt");
        let mut long = EventSeries::new();
        (0..5).for_each(|i| long.append(i as f64));
        save(&long, &path).unwrap();

        let mut short = EventSeries::new();
        short.append(1.5);
        save(&short, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "0.0,1.5\n");
    }

    #[test]
    fn empty_file_loads_empty_series() {
        let temp = NamedTempFile::new().unwrap();
        let report = load(temp.path()).unwrap();
        assert!(report.series.is_empty());
        assert_eq!(report.series.current_value(), 0.0);
    }

    #[test]
    fn missing_user_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("absent.txt")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_autosave_starts_empty() {
        let dir = tempdir().unwrap();
        let report = load_autosave(&dir.path().join("data.txt")).unwrap();
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("chart.txt");
        let err = save(&EventSeries::new(), &path).unwrap_err();
        assert!(matches!(err, TrackerError::FileAccess { .. }));
    }

    #[test]
    fn autosave_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("data.txt");
        let mut series = EventSeries::new();
        series.append(0.4);
        save_autosave(&series, &path).unwrap();
        assert_eq!(load_autosave(&path).unwrap().series, series);
    }
}
