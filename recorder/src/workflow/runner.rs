use crate::generator::profile::{build_event_script, GeneratorConfig};
use anyhow::Context;
use lifecore::telemetry::Metrics;
use lifecore::{ChartRenderer, EventKind, Point, Tracker};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

/// Steps applied to a tracker in a fixed order: import, clear, events,
/// generated events, ticks, export.
#[derive(Debug, Clone, Default)]
pub struct WorkflowPlan {
    pub import: Option<PathBuf>,
    pub clear: bool,
    pub events: Vec<EventKind>,
    pub generator: GeneratorConfig,
    pub ticks: usize,
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct WorkflowResult {
    pub points: Vec<Point>,
    pub current_value: f64,
    pub recorded: usize,
    pub rendered: usize,
    pub metrics: Metrics,
}

/// Renderer for headless runs: keeps the last frame and counts frames.
#[derive(Debug, Default)]
pub struct FrameLog {
    pub frames: usize,
    pub last: Vec<Point>,
}

impl ChartRenderer for FrameLog {
    fn render(&mut self, points: &[Point]) {
        self.frames += 1;
        self.last.clear();
        self.last.extend_from_slice(points);
        info!(
            "frame {}: {} points, running value {:.3}",
            self.frames,
            points.len(),
            points.last().map_or(0.0, |point| point.value)
        );
    }
}

pub struct Runner {
    plan: WorkflowPlan,
}

impl Runner {
    pub fn new(plan: WorkflowPlan) -> Self {
        Self { plan }
    }

    pub fn execute(&self, tracker: &mut Tracker) -> anyhow::Result<WorkflowResult> {
        if let Some(path) = &self.plan.import {
            tracker
                .load_from(path)
                .with_context(|| format!("importing {}", path.display()))?;
        }
        if self.plan.clear {
            tracker.clear();
        }

        let generated = build_event_script(&self.plan.generator);
        let mut recorded = 0;
        for kind in self.plan.events.iter().chain(generated.iter()) {
            tracker.record(*kind);
            recorded += 1;
        }

        let mut frames = FrameLog::default();
        for _ in 0..self.plan.ticks {
            tracker.tick(&mut frames);
        }

        if let Some(path) = &self.plan.export {
            tracker
                .save_to(path)
                .with_context(|| format!("exporting {}", path.display()))?;
        }

        Ok(WorkflowResult {
            points: tracker.snapshot().to_vec(),
            current_value: tracker.current_value(),
            recorded,
            rendered: frames.frames,
            metrics: tracker.metrics(),
        })
    }
}
