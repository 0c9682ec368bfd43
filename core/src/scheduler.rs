use crate::prelude::ChartRenderer;
use crate::series::EventSeries;
use crate::telemetry::log::LogManager;
use std::time::Duration;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_FILLER_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Armed,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The scheduler was not armed; nothing happened.
    Skipped,
    Rendered { filler_added: bool },
}

/// Recurring redraw: flat-line filler first, then render, then re-arm.
///
/// The timer itself belongs to the caller (an iced subscription or a tokio
/// interval). While a tick is in flight the scheduler is `Idle`, so a nested
/// tick is skipped instead of running twice.
#[derive(Debug)]
pub struct RedrawScheduler {
    period: Duration,
    filler_step: f64,
    state: SchedulerState,
    ticks: u64,
    logger: LogManager,
}

impl RedrawScheduler {
    pub fn new(period: Duration, filler_step: f64) -> Self {
        Self {
            period,
            filler_step,
            state: SchedulerState::Idle,
            ticks: 0,
            logger: LogManager::new("scheduler"),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn arm(&mut self) {
        self.state = SchedulerState::Armed;
    }

    pub fn disarm(&mut self) {
        self.state = SchedulerState::Idle;
    }

    pub fn tick<R: ChartRenderer + ?Sized>(
        &mut self,
        series: &mut EventSeries,
        renderer: &mut R,
    ) -> TickOutcome {
        if self.state != SchedulerState::Armed {
            self.logger.trace("tick skipped, scheduler idle");
            return TickOutcome::Skipped;
        }
        self.state = SchedulerState::Idle;

        let filler_added = series.push_filler(self.filler_step);
        renderer.render(series.snapshot());
        self.ticks += 1;

        self.state = SchedulerState::Armed;
        TickOutcome::Rendered { filler_added }
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL, DEFAULT_FILLER_STEP)
    }
}
