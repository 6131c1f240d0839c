//! Level of detail during interaction
//!
//! Panning or zooming drops the chart to a small trace budget and schedules a
//! single-shot recovery timer. Every further interaction replaces the timer;
//! only the most recent one may restore full detail.
//!
//! The manager never sleeps. It hands out [`TimerHandle`]s and the host (or a
//! test with a simulated clock) reports back when one fires.

use std::time::{Duration, Instant};
use crate::config::ChartConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelOfDetail {
    /// Full budget, trace elements accept pointer events.
    #[default]
    High,
    /// Reduced budget, trace elements ignore pointer events.
    Low,
}

/// A scheduled recovery. Stale handles are rejected by [`LodManager::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
    deadline: Instant,
}

impl TimerHandle {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left until the deadline, zero once it has passed.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

#[derive(Debug)]
pub struct LodManager {
    level: LevelOfDetail,
    high_budget: usize,
    low_budget: usize,
    recovery_delay: Duration,
    generation: u64,
    pending: Option<TimerHandle>,
}

impl LodManager {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            level: LevelOfDetail::High,
            high_budget: config.high_detail_budget,
            low_budget: config.low_detail_budget,
            recovery_delay: config.lod_recovery_delay(),
            generation: 0,
            pending: None,
        }
    }

    pub fn level(&self) -> LevelOfDetail {
        self.level
    }

    /// Maximum number of traces to show at the current level.
    pub fn budget(&self) -> usize {
        match self.level {
            LevelOfDetail::High => self.high_budget,
            LevelOfDetail::Low => self.low_budget,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.level == LevelOfDetail::High
    }

    /// Switch to low detail and (re)start the recovery timer.
    ///
    /// Any previously returned handle becomes stale.
    pub fn degrade(&mut self, now: Instant) -> TimerHandle {
        if self.level == LevelOfDetail::High {
            tracing::debug!("Level of detail: high -> low");
        }
        self.level = LevelOfDetail::Low;
        self.generation += 1;
        let handle = TimerHandle {
            generation: self.generation,
            deadline: now + self.recovery_delay,
        };
        self.pending = Some(handle);
        handle
    }

    /// Drop the pending timer without changing the level.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Report that `handle` fired. Returns `true` if it was the pending timer
    /// and the level went back to high.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending != Some(handle) {
            tracing::trace!("Ignoring stale recovery timer #{}", handle.generation);
            return false;
        }
        self.pending = None;
        self.level = LevelOfDetail::High;
        tracing::debug!("Level of detail: low -> high");
        true
    }

    /// Fire the pending timer if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(handle) if now >= handle.deadline => self.fire(handle),
            _ => false,
        }
    }
}
