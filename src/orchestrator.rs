// src/orchestrator.rs
use crate::actions::ActionPair;
use crate::error::BotResult;
use crate::executor::CycleExecutor;
use crate::generator::DelayGenerator;
use crate::types::{CycleOutcome, CycleStatus, RunConfig, RunState, RunSummary};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at, sleep};
use tracing::{info, warn};
use uuid::Uuid;

/// Timer seam for interval mode; lets tests drive ticks by hand.
#[async_trait]
pub trait IntervalTimer: Send {
    /// Completes when the next period elapses.
    async fn tick(&mut self);
}

/// Fixed-period timer. The first tick lands one full period after start;
/// ticks that land while a cycle is in flight are skipped, not queued.
pub struct TokioIntervalTimer {
    inner: Interval,
}

impl TokioIntervalTimer {
    pub fn new(period: Duration) -> Self {
        let mut inner = interval_at(Instant::now() + period, period);
        inner.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { inner }
    }
}

#[async_trait]
impl IntervalTimer for TokioIntervalTimer {
    async fn tick(&mut self) {
        self.inner.tick().await;
    }
}

/// Drives a whole run through `Idle -> Running -> {Completed, Aborted}`.
/// Owns every `CycleOutcome`; per-cycle failures never abort the run, and
/// `Aborted` is reserved for configuration rejected before any cycle starts.
pub struct Orchestrator {
    executor: CycleExecutor,
    pair: Arc<dyn ActionPair>,
    run_config: RunConfig,
    pacing: DelayGenerator,
    shutdown: watch::Receiver<bool>,
    run_id: Uuid,
    state: RunState,
    completed: u32,
    busy: bool,
    outcomes: Vec<CycleOutcome>,
}

impl Orchestrator {
    pub fn new(
        executor: CycleExecutor,
        pair: Arc<dyn ActionPair>,
        run_config: RunConfig,
        pacing: DelayGenerator,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            executor,
            pair,
            run_config,
            pacing,
            shutdown,
            run_id: Uuid::new_v4(),
            state: RunState::Idle,
            completed: 0,
            busy: false,
            outcomes: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub async fn run(&mut self) -> BotResult<RunSummary> {
        if let Err(error) = self.run_config.validate() {
            self.state = RunState::Aborted;
            return Err(error);
        }
        self.state = RunState::Running;
        let started_at = Utc::now();
        info!(
            run = %self.run_id,
            pair = self.pair.name(),
            cycles = self.run_config.cycle_count,
            "run started"
        );

        match self.run_config.interval() {
            None => self.run_sequential().await,
            Some(period) => {
                info!(
                    period_secs = period.as_secs(),
                    "interval mode: first cycle after one full period"
                );
                let mut timer = TokioIntervalTimer::new(period);
                self.run_interval(&mut timer).await;
            }
        }

        self.state = RunState::Completed;
        let summary = RunSummary {
            run_id: self.run_id,
            pair: self.pair.name(),
            outcomes: std::mem::take(&mut self.outcomes),
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            run = %self.run_id,
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "run complete"
        );
        Ok(summary)
    }

    async fn run_sequential(&mut self) {
        let count = self.run_config.cycle_count;
        let mut shutdown = self.shutdown.clone();
        for index in 1..=count {
            if *shutdown.borrow() {
                warn!(cycle = index, "shutdown requested, skipping remaining cycles");
                break;
            }
            let outcome = self.executor.run_cycle(index, self.pair.as_ref()).await;
            self.record(outcome);
            if index < count {
                let pause = self.pacing.sample();
                info!(delay_secs = pause.as_secs(), "waiting before next cycle");
                tokio::select! {
                    _ = sleep(pause) => {}
                    _ = wait_for_shutdown(&mut shutdown) => {
                        warn!("shutdown requested, skipping remaining cycles");
                        break;
                    }
                }
            }
        }
    }

    /// Interval mode: one cycle per timer tick until the configured count is
    /// reached, at which point the timer is dropped.
    pub(crate) async fn run_interval(&mut self, timer: &mut dyn IntervalTimer) {
        let count = self.run_config.cycle_count;
        let mut shutdown = self.shutdown.clone();
        while self.completed < count {
            if *shutdown.borrow() {
                warn!("shutdown requested, cancelling the interval timer");
                break;
            }
            tokio::select! {
                _ = timer.tick() => self.tick().await,
                _ = wait_for_shutdown(&mut shutdown) => {
                    warn!("shutdown requested, cancelling the interval timer");
                    break;
                }
            }
        }
    }

    /// One interval-mode step: runs at most one cycle. The busy guard keeps
    /// a tick that lands mid-cycle from starting a second invocation.
    pub(crate) async fn tick(&mut self) {
        if self.busy {
            warn!("tick skipped: previous cycle still in flight");
            return;
        }
        if self.completed >= self.run_config.cycle_count {
            return;
        }
        self.busy = true;
        let index = self.completed + 1;
        let outcome = self.executor.run_cycle(index, self.pair.as_ref()).await;
        self.record(outcome);
        self.busy = false;
    }

    fn record(&mut self, outcome: CycleOutcome) {
        match &outcome.status {
            CycleStatus::Completed { .. } => {
                info!(cycle = outcome.index, "cycle completed");
            }
            CycleStatus::Failed { leg, error } => {
                warn!(cycle = outcome.index, leg = ?leg, %error, "cycle failed");
            }
        }
        self.completed += 1;
        self.outcomes.push(outcome);
    }
}

async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|requested| *requested).await.is_err() {
        // Sender gone: shutdown can no longer be requested.
        std::future::pending::<()>().await;
    }
}
