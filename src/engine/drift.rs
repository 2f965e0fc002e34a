//! Drift estimation and the session activity tracker.
//!
//! Drift is sampled, not event-driven: it is recomputed from the tracker's
//! last-activity timestamp whenever a caller asks for it.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{DriftReading, DriftState};

/// Drift added per idle minute. Caps after ten minutes.
const DRIFT_PER_IDLE_MINUTE: f64 = 5.0;
const DRIFT_PER_OPEN_TASK: f64 = 2.0;
const DRIFT_PER_UNPROCESSED_DUMP: f64 = 5.0;
/// Ceiling of each drift component.
const COMPONENT_CAP: f64 = 50.0;
const MAX_DRIFT: f64 = 100.0;

/// At or above this level the user is "in the void".
pub const VOID_THRESHOLD: f64 = 75.0;

pub fn compute_drift(idle_minutes: f64, open_tasks: u32, unprocessed_dumps: u32) -> DriftReading {
    let from_inactivity = (idle_minutes.max(0.0) * DRIFT_PER_IDLE_MINUTE).min(COMPONENT_CAP);
    let from_loops = (f64::from(open_tasks) * DRIFT_PER_OPEN_TASK
        + f64::from(unprocessed_dumps) * DRIFT_PER_UNPROCESSED_DUMP)
        .min(COMPONENT_CAP);
    let drift_level = (from_inactivity + from_loops).min(MAX_DRIFT);

    DriftReading {
        drift_level,
        is_in_void: drift_level >= VOID_THRESHOLD,
    }
}

/// Holds the [`DriftState`] of one session.
///
/// `last_active_time` is the only hot field: it is written on every
/// interaction event and read by every drift sample, so it lives in an atomic
/// and only ever moves forward. A stale read under-estimates drift slightly.
#[derive(Debug)]
pub struct ActivityTracker {
    last_active_ms: AtomicI64,
    last_quest_id: Mutex<Option<Uuid>>,
    drift_triggered_at: Mutex<Option<DateTime<Utc>>>,
}

impl ActivityTracker {
    /// Start a session that is active as of `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::restore(DriftState::new(now))
    }

    /// Resume from previously saved session state.
    pub fn restore(state: DriftState) -> Self {
        Self {
            last_active_ms: AtomicI64::new(state.last_active_time.timestamp_millis()),
            last_quest_id: Mutex::new(state.last_quest_id),
            drift_triggered_at: Mutex::new(state.drift_triggered_at),
        }
    }

    /// Record a qualifying interaction (pointer or key event).
    ///
    /// Out-of-order events never move the timestamp backwards. Any pending
    /// drift trigger is cleared so the next idle spell can fire again.
    pub fn record_activity(&self, now: DateTime<Utc>) {
        self.last_active_ms
            .fetch_max(now.timestamp_millis(), Ordering::AcqRel);
        *self
            .drift_triggered_at
            .lock()
            .expect("drift trigger lock poisoned") = None;
    }

    pub fn set_quest(&self, quest_id: Option<Uuid>) {
        *self.last_quest_id.lock().expect("quest lock poisoned") = quest_id;
    }

    pub fn last_active_time(&self) -> DateTime<Utc> {
        let ms = self.last_active_ms.load(Ordering::Acquire);
        Utc.timestamp_millis_opt(ms)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Minutes since the last recorded activity, never negative.
    pub fn idle_minutes(&self, now: DateTime<Utc>) -> f64 {
        let idle_ms = now.timestamp_millis() - self.last_active_ms.load(Ordering::Acquire);
        idle_ms.max(0) as f64 / 60_000.0
    }

    /// Sample drift for the given open loops.
    pub fn sample(&self, now: DateTime<Utc>, open_tasks: u32, unprocessed_dumps: u32) -> DriftReading {
        compute_drift(self.idle_minutes(now), open_tasks, unprocessed_dumps)
    }

    /// Feed a reading back into the session state.
    ///
    /// Returns `true` only for the observation that first finds the session
    /// in the void, so the drift intervention fires once per spell. Leaving
    /// the void re-arms the trigger.
    pub fn observe(&self, reading: &DriftReading, now: DateTime<Utc>) -> bool {
        let mut triggered = self
            .drift_triggered_at
            .lock()
            .expect("drift trigger lock poisoned");

        if !reading.is_in_void {
            *triggered = None;
            return false;
        }

        if triggered.is_some() {
            return false;
        }

        *triggered = Some(now);
        tracing::info!(drift_level = reading.drift_level, "Session drifted into the void");
        true
    }

    pub fn state(&self) -> DriftState {
        DriftState {
            last_quest_id: *self.last_quest_id.lock().expect("quest lock poisoned"),
            last_active_time: self.last_active_time(),
            drift_triggered_at: *self
                .drift_triggered_at
                .lock()
                .expect("drift trigger lock poisoned"),
        }
    }
}
