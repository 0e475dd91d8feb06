// Canonical domain state of a single timer.
//
// Purpose
// - Encode the Idle -> Running -> Stopped lifecycle as explicit data and
//   pure transitions, so invariants cannot be bypassed by adapters.
//
// Boundaries
// - This file must not perform input or output. Keep it framework-free.
//
// Invariants
// - started_at is set iff status is Running or Stopped.
// - stopped_at is set iff status is Stopped, and never precedes started_at.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::timers::core::errors::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    Running,
    Stopped,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(TimerStatus::Idle),
            "running" => Ok(TimerStatus::Running),
            "stopped" => Ok(TimerStatus::Stopped),
            _ => Err(format!("unknown timer status: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: Uuid,
    pub name: String,
    pub status: TimerStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Timer {
    pub fn new(name: &str, now: DateTime<Utc>) -> Result<Self, TimerError> {
        if name.trim().is_empty() {
            return Err(TimerError::Validation(
                "timer name must not be empty".into(),
            ));
        }
        Ok(Self {
            id: Uuid::now_v7(),
            name: name.to_string(),
            status: TimerStatus::Idle,
            started_at: None,
            stopped_at: None,
            created_at: now,
        })
    }

    /// Idle -> Running. Any other state is rejected.
    pub fn start(&self, now: DateTime<Utc>) -> Result<Self, TimerError> {
        if self.status != TimerStatus::Idle {
            return Err(TimerError::InvalidState {
                action: "start",
                status: self.status,
            });
        }
        let mut started = self.clone();
        started.status = TimerStatus::Running;
        started.started_at = Some(now);
        Ok(started)
    }

    /// Running -> Stopped. stopped_at is clamped to started_at so the
    /// ordering invariant holds even if the clock moved backwards.
    pub fn stop(&self, now: DateTime<Utc>) -> Result<Self, TimerError> {
        let started_at = match (self.status, self.started_at) {
            (TimerStatus::Running, Some(at)) => at,
            _ => {
                return Err(TimerError::InvalidState {
                    action: "stop",
                    status: self.status,
                });
            }
        };
        let mut stopped = self.clone();
        stopped.status = TimerStatus::Stopped;
        stopped.stopped_at = Some(now.max(started_at));
        Ok(stopped)
    }

    /// Duration between started_at and stopped_at (or `now` while still
    /// running). An Idle timer has nothing to measure.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Result<Duration, TimerError> {
        match (self.status, self.started_at, self.stopped_at) {
            (TimerStatus::Running, Some(started_at), _) => {
                Ok((now - started_at).max(Duration::zero()))
            }
            (TimerStatus::Stopped, Some(started_at), Some(stopped_at)) => {
                Ok(stopped_at - started_at)
            }
            _ => Err(TimerError::InvalidState {
                action: "measure",
                status: self.status,
            }),
        }
    }
}
