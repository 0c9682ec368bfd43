use std::path::PathBuf;

pub use crate::series::Point;

/// Common error type for tracker operations.
///
/// Malformed lines inside a persisted file are not errors; they are skipped
/// and counted by the loader.
#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl TrackerError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FileAccess { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Sink receiving the full series on every redraw tick.
pub trait ChartRenderer {
    fn render(&mut self, points: &[Point]);
}

impl ChartRenderer for Vec<Point> {
    fn render(&mut self, points: &[Point]) {
        self.clear();
        self.extend_from_slice(points);
    }
}
