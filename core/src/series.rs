use serde::{Deserialize, Serialize};

/// One sample of the running value.
///
/// `index` is a synthetic counter rather than wall-clock time: real events
/// advance it to the series length, filler ticks advance it by a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub index: f64,
    pub value: f64,
}

impl Point {
    pub fn new(index: f64, value: f64) -> Self {
        Self { index, value }
    }
}

/// Ordered log of points plus the running value all deltas accumulate onto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSeries {
    points: Vec<Point>,
    current_value: f64,
}

impl EventSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        let mut series = Self::new();
        series.replace(points);
        series
    }

    /// Appends a real event at index = current length.
    pub fn append(&mut self, value: f64) {
        let index = self.points.len() as f64;
        self.points.push(Point::new(index, value));
        self.current_value = value;
    }

    /// Substitutes the whole series; `replace(Vec::new())` clears it.
    pub fn replace(&mut self, points: Vec<Point>) {
        self.current_value = points.last().map_or(0.0, |point| point.value);
        self.points = points;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Continues the line flat from the last point.
    ///
    /// Only applies once at least two points exist; returns whether a point
    /// was pushed.
    pub fn push_filler(&mut self, step: f64) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        let Some(last) = self.points.last().copied() else {
            return false;
        };
        self.points.push(Point::new(last.index + step, last.value));
        true
    }

    pub fn snapshot(&self) -> &[Point] {
        &self.points
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest finite index, `None` when nothing finite exists.
    pub fn index_range(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|point| point.index))
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|point| point.value))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
