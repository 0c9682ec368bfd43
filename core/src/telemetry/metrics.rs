use crate::classifier::EventKind;
use serde::Serialize;
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

/// Counters accumulated over one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub small_good: usize,
    pub big_good: usize,
    pub small_bad: usize,
    pub horrible: usize,
    pub fillers: usize,
    pub ticks: usize,
    pub skipped_lines: usize,
    pub persistence_errors: usize,
}

impl Metrics {
    pub fn events(&self) -> usize {
        self.small_good + self.big_good + self.small_bad + self.horrible
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_event(&self, kind: EventKind) {
        if let Ok(mut metrics) = self.inner.lock() {
            match kind {
                EventKind::SmallGood => metrics.small_good += 1,
                EventKind::BigGood => metrics.big_good += 1,
                EventKind::SmallBad => metrics.small_bad += 1,
                EventKind::Horrible => metrics.horrible += 1,
            }
        }
    }

    pub fn record_tick(&self, filler_added: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.ticks += 1;
            if filler_added {
                metrics.fillers += 1;
            }
        }
    }

    pub fn record_skipped_lines(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.skipped_lines += count;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.persistence_errors += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_events_per_kind() {
        let recorder = MetricsRecorder::new();
        recorder.record_event(EventKind::Horrible);
        recorder.record_event(EventKind::Horrible);
        recorder.record_event(EventKind::SmallGood);
        recorder.record_tick(true);
        recorder.record_tick(false);

        let metrics = recorder.snapshot();
        assert_eq!(metrics.horrible, 2);
        assert_eq!(metrics.events(), 3);
        assert_eq!(metrics.ticks, 2);
        assert_eq!(metrics.fillers, 1);
    }
}
