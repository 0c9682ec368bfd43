use crate::classifier::{classify_and_append, EventKind};
use crate::config::TrackerConfig;
use crate::persistence::{self, LoadReport};
use crate::prelude::{ChartRenderer, Point, TrackerResult};
use crate::scheduler::{RedrawScheduler, TickOutcome};
use crate::series::EventSeries;
use crate::telemetry::{LogManager, Metrics, MetricsRecorder};
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};

/// The single owned tracker instance handed to a presentation shell.
///
/// Every mutation of the series goes through here, so shells only forward
/// user intents and render snapshots.
pub struct Tracker {
    series: EventSeries,
    scheduler: RedrawScheduler,
    autosave_path: PathBuf,
    autosave_enabled: bool,
    rng: StdRng,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl Tracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &TrackerConfig, rng: StdRng) -> Self {
        Self {
            series: EventSeries::new(),
            scheduler: config.to_scheduler(),
            autosave_path: config.autosave_path.clone(),
            autosave_enabled: true,
            rng,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("tracker"),
        }
    }

    /// Restores the autosave file (if any) and arms the redraw scheduler.
    pub fn startup(config: &TrackerConfig) -> TrackerResult<Self> {
        let mut tracker = Self::new(config);
        tracker.restore_autosave()?;
        tracker.scheduler.arm();
        Ok(tracker)
    }

    /// An armed, empty tracker that never writes the autosave file.
    ///
    /// Used when the autosave exists but could not be restored, so closing
    /// the session leaves that file as it was.
    pub fn detached(config: &TrackerConfig) -> Self {
        let mut tracker = Self::new(config);
        tracker.autosave_enabled = false;
        tracker.scheduler.arm();
        tracker
    }

    fn restore_autosave(&mut self) -> TrackerResult<()> {
        let report = persistence::load_autosave(&self.autosave_path)?;
        self.logger.record(&format!(
            "restored {} points from {}",
            report.parsed,
            self.autosave_path.display()
        ));
        self.adopt(report);
        Ok(())
    }

    pub fn record(&mut self, kind: EventKind) -> f64 {
        let value = classify_and_append(&mut self.series, kind, &mut self.rng);
        self.metrics.record_event(kind);
        self.logger
            .detail(&format!("{kind} -> running value {value:.3}"));
        value
    }

    pub fn tick<R: ChartRenderer + ?Sized>(&mut self, renderer: &mut R) -> TickOutcome {
        let outcome = self.scheduler.tick(&mut self.series, renderer);
        if let TickOutcome::Rendered { filler_added } = outcome {
            self.metrics.record_tick(filler_added);
        }
        outcome
    }

    pub fn save_to(&self, path: &Path) -> TrackerResult<()> {
        persistence::save(&self.series, path).inspect_err(|err| self.fail(err))?;
        self.logger
            .record(&format!("saved {} points to {}", self.series.len(), path.display()));
        Ok(())
    }

    /// Replaces the series with the file contents; on error the current
    /// series is left untouched.
    pub fn load_from(&mut self, path: &Path) -> TrackerResult<usize> {
        let report = persistence::load(path).inspect_err(|err| self.fail(err))?;
        let parsed = report.parsed;
        self.logger
            .record(&format!("loaded {} points from {}", parsed, path.display()));
        self.adopt(report);
        Ok(parsed)
    }

    pub fn clear(&mut self) {
        self.series.clear();
        self.logger.record("series cleared");
    }

    /// Replaces the series wholesale.
    pub fn replace(&mut self, points: Vec<Point>) {
        self.series.replace(points);
    }

    /// Writes the autosave file and stops the scheduler.
    pub fn shutdown(&mut self) -> TrackerResult<()> {
        self.scheduler.disarm();
        if !self.autosave_enabled {
            self.logger.warn(&format!(
                "autosave disabled, leaving {} untouched",
                self.autosave_path.display()
            ));
            return Ok(());
        }
        persistence::save_autosave(&self.series, &self.autosave_path)
            .inspect_err(|err| self.fail(err))?;
        self.logger.record(&format!(
            "autosaved {} points to {}",
            self.series.len(),
            self.autosave_path.display()
        ));
        Ok(())
    }

    pub fn snapshot(&self) -> &[Point] {
        self.series.snapshot()
    }

    pub fn series(&self) -> &EventSeries {
        &self.series
    }

    pub fn current_value(&self) -> f64 {
        self.series.current_value()
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    pub fn autosave_path(&self) -> &Path {
        &self.autosave_path
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave_enabled
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    fn adopt(&mut self, report: LoadReport) {
        if report.skipped > 0 {
            self.logger
                .warn(&format!("skipped {} malformed lines", report.skipped));
            self.metrics.record_skipped_lines(report.skipped);
        }
        self.series = report.series;
    }

    fn fail(&self, err: &crate::prelude::TrackerError) {
        self.metrics.record_error();
        self.logger.warn(&err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> TrackerConfig {
        TrackerConfig {
            autosave_path: dir.join("data.txt"),
            ..TrackerConfig::default()
        }
    }

    fn seeded(config: &TrackerConfig) -> Tracker {
        Tracker::with_rng(config, StdRng::seed_from_u64(11))
    }

    #[test]
    fn startup_without_autosave_is_empty_and_armed() {
        let dir = tempdir().unwrap();
        let tracker = Tracker::startup(&config_in(dir.path())).unwrap();
        assert!(tracker.snapshot().is_empty());
        assert_eq!(tracker.current_value(), 0.0);
        assert_eq!(
            tracker.scheduler().state(),
            crate::scheduler::SchedulerState::Armed
        );
    }

    #[test]
    fn shutdown_then_startup_restores_series() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let mut tracker = seeded(&config);
        tracker.record(EventKind::BigGood);
        tracker.record(EventKind::SmallBad);
        let expected = tracker.series().clone();
        tracker.shutdown().unwrap();

        let restored = Tracker::startup(&config).unwrap();
        assert_eq!(restored.series(), &expected);
    }

    #[test]
    fn startup_skips_undecodable_autosave_lines() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.autosave_path, b"0.0,1.0\n\xff\xfe\n1.0,1.5\n").unwrap();

        let tracker = Tracker::startup(&config).unwrap();
        assert_eq!(tracker.snapshot().len(), 2);
        assert_eq!(tracker.current_value(), 1.5);
        assert_eq!(tracker.metrics().skipped_lines, 1);
    }

    #[test]
    fn detached_shutdown_leaves_autosave_untouched() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.autosave_path, "0.0,1.0\n1.0,2.0\n").unwrap();

        let mut tracker = Tracker::detached(&config);
        assert!(!tracker.autosave_enabled());
        tracker.record(EventKind::Horrible);
        let mut rendered: Vec<Point> = Vec::new();
        assert_eq!(
            tracker.tick(&mut rendered),
            TickOutcome::Rendered { filler_added: false }
        );
        tracker.shutdown().unwrap();

        assert_eq!(
            fs::read_to_string(&config.autosave_path).unwrap(),
            "0.0,1.0\n1.0,2.0\n"
        );
    }

    #[test]
    fn unreadable_autosave_fails_startup() {
        let dir = tempdir().unwrap();
        let config = TrackerConfig {
            autosave_path: dir.path().to_path_buf(),
            ..TrackerConfig::default()
        };

        let err = Tracker::startup(&config).err().unwrap();
        assert!(!err.is_not_found());

        let mut fallback = Tracker::detached(&config);
        fallback.record(EventKind::SmallGood);
        fallback.shutdown().unwrap();
        assert!(dir.path().is_dir());
    }

    #[test]
    fn failed_user_load_keeps_series() {
        let dir = tempdir().unwrap();
        let mut tracker = seeded(&config_in(dir.path()));
        tracker.record(EventKind::SmallGood);
        let before = tracker.series().clone();

        let err = tracker.load_from(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(tracker.series(), &before);
        assert_eq!(tracker.metrics().persistence_errors, 1);
    }

    #[test]
    fn load_replaces_series_and_counts_skips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.txt");
        fs::write(&path, "3.0,4.0\ngarbage\n5.0,6.0\n").unwrap();
        let mut tracker = seeded(&config_in(dir.path()));
        tracker.record(EventKind::Horrible);

        assert_eq!(tracker.load_from(&path).unwrap(), 2);
        assert_eq!(tracker.current_value(), 6.0);
        assert_eq!(tracker.metrics().skipped_lines, 1);
    }

    #[test]
    fn clear_empties_regardless_of_state() {
        let dir = tempdir().unwrap();
        let mut tracker = seeded(&config_in(dir.path()));
        for kind in EventKind::ALL {
            tracker.record(kind);
        }
        tracker.clear();
        assert!(tracker.snapshot().is_empty());
        assert_eq!(tracker.current_value(), 0.0);
    }

    #[test]
    fn tick_only_renders_once_started() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        let mut rendered: Vec<Point> = Vec::new();

        let mut idle = seeded(&config);
        idle.record(EventKind::SmallGood);
        idle.record(EventKind::SmallGood);
        assert_eq!(idle.tick(&mut rendered), TickOutcome::Skipped);

        let mut tracker = Tracker::startup(&config).unwrap();
        tracker.record(EventKind::SmallGood);
        tracker.record(EventKind::BigGood);
        let outcome = tracker.tick(&mut rendered);
        assert_eq!(outcome, TickOutcome::Rendered { filler_added: true });
        assert_eq!(rendered.len(), 3);
        assert_eq!(tracker.metrics().fillers, 1);
    }

    #[test]
    fn save_to_unwritable_path_surfaces_error() {
        let dir = tempdir().unwrap();
        let tracker = seeded(&config_in(dir.path()));
        let err = tracker
            .save_to(&dir.path().join("no_such_dir").join("chart.txt"))
            .unwrap_err();
        assert!(matches!(err, crate::prelude::TrackerError::FileAccess { .. }));
    }
}
