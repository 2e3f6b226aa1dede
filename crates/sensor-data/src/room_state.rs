//! Per-room running average over a trailing window of readings, used to
//! flag rooms drifting outside a configured comfort range.

use std::collections::VecDeque;

/// Drift classification for a room's trailing average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftStatus {
    /// Average is within the comfort range (or the window hasn't filled).
    Ok,
    /// Average is below the comfort range's low bound.
    TooCold,
    /// Average is above the comfort range's high bound.
    TooHot,
}

/// Tracks the most recent `window` readings for one room and its running
/// sum, so the average can be recomputed in O(1) per reading.
#[derive(Debug)]
pub struct RoomState {
    window: usize,
    readings: VecDeque<f64>,
    sum: f64,
}

impl RoomState {
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            readings: VecDeque::with_capacity(window.max(1)),
            sum: 0.0,
        }
    }

    /// Records a new reading and returns the drift status against
    /// `comfort_range`. Drift is only evaluated once the trailing window
    /// has filled, so a single outlier reading doesn't immediately flag.
    pub fn push(&mut self, value: f64, comfort_range: (f64, f64)) -> DriftStatus {
        self.readings.push_back(value);
        self.sum += value;
        if self.readings.len() > self.window {
            self.sum -= self.readings.pop_front().expect("window is non-empty");
        }

        if self.readings.len() < self.window {
            return DriftStatus::Ok;
        }

        let average = self.average();
        let (low, high) = comfort_range;
        if average < low {
            DriftStatus::TooCold
        } else if average > high {
            DriftStatus::TooHot
        } else {
            DriftStatus::Ok
        }
    }

    /// Current trailing average. `0.0` when no readings have arrived yet.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.readings.is_empty() {
            0.0
        } else {
            self.sum / self.readings.len() as f64
        }
    }
}
