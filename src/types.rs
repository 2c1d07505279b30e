// src/types.rs
use crate::error::{BotError, BotResult};
use alloy::primitives::TxHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Which action pair a run drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairChoice {
    WrapUnwrap,
    StakeUnstake,
}

/// Scheduling input collected once at start, immutable for the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub cycle_count: u32,
    pub interval_hours: Option<f64>,
}

impl RunConfig {
    pub fn sequential(cycle_count: u32) -> Self {
        Self {
            cycle_count,
            interval_hours: None,
        }
    }

    pub fn with_interval(cycle_count: u32, hours: f64) -> Self {
        Self {
            cycle_count,
            interval_hours: Some(hours),
        }
    }

    pub fn validate(&self) -> BotResult<()> {
        if self.cycle_count == 0 {
            return Err(BotError::Config(
                "cycle count must be a positive number".to_string(),
            ));
        }
        if let Some(hours) = self.interval_hours {
            if !hours.is_finite() || hours <= 0.0 {
                return Err(BotError::Config(
                    "interval hours must be a positive number".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Fixed timer period, when interval mode is configured.
    pub fn interval(&self) -> Option<Duration> {
        self.interval_hours
            .map(|hours| Duration::from_secs_f64(hours * 3600.0))
    }
}

/// The two legs of a cycle, for tagging failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Aborted,
}

#[derive(Debug)]
pub enum CycleStatus {
    Completed { first_tx: TxHash, second_tx: TxHash },
    Failed { leg: Leg, error: BotError },
}

/// Terminal record of one cycle, appended in order for the final summary.
#[derive(Debug)]
pub struct CycleOutcome {
    pub index: u32,
    pub status: CycleStatus,
    pub finished_at: DateTime<Utc>,
}

impl CycleOutcome {
    pub fn completed(index: u32, first_tx: TxHash, second_tx: TxHash) -> Self {
        Self {
            index,
            status: CycleStatus::Completed { first_tx, second_tx },
            finished_at: Utc::now(),
        }
    }

    pub fn failed(index: u32, leg: Leg, error: BotError) -> Self {
        Self {
            index,
            status: CycleStatus::Failed { leg, error },
            finished_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, CycleStatus::Completed { .. })
    }
}

/// Aggregate result of a whole run.
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub pair: &'static str,
    pub outcomes: Vec<CycleOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}
