use std::time::Instant;

use serde::Deserialize;

use crate::errors::{Result, SimulationError};

/// How the driver picks the time step.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepMode {
    /// Fixed step of `1 / frequency_hz`. Reproducible; used for accurate runs.
    Fixed { frequency_hz: f64 },
    /// Step equal to the wall-clock frame time. Frames slower than
    /// `min_frame_rate` produce a zero step so a stall does not turn into one
    /// huge integration step.
    RealTime { min_frame_rate: f64 },
}

impl StepMode {
    pub fn validate(&self) -> Result<()> {
        match *self {
            StepMode::Fixed { frequency_hz } if !is_positive(frequency_hz) => {
                Err(SimulationError::InvalidConfig(format!(
                    "simulation frequency must be positive, got {frequency_hz} Hz"
                )))
            }
            StepMode::RealTime { min_frame_rate } if !is_positive(min_frame_rate) => {
                Err(SimulationError::InvalidConfig(format!(
                    "minimum frame rate must be positive, got {min_frame_rate} fps"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Time step for a frame rendered at `frame_rate`.
    pub fn interval(&self, frame_rate: f64) -> f64 {
        match *self {
            StepMode::Fixed { frequency_hz } => 1.0 / frequency_hz,
            StepMode::RealTime { min_frame_rate } => {
                if frame_rate < min_frame_rate || !frame_rate.is_finite() {
                    0.0
                } else {
                    1.0 / frame_rate
                }
            }
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Produces successive time steps for a [`StepMode`].
#[derive(Debug, Clone)]
pub struct StepClock {
    mode: StepMode,
    last_tick: Option<Instant>,
}

impl StepClock {
    pub fn new(mode: StepMode) -> Self {
        StepClock {
            mode,
            last_tick: None,
        }
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    pub fn next_interval(&mut self) -> f64 {
        match self.mode {
            StepMode::Fixed { .. } => self.mode.interval(0.0),
            StepMode::RealTime { .. } => {
                let now = Instant::now();
                let frame_rate = match self.last_tick.replace(now) {
                    Some(previous) => 1.0 / now.duration_since(previous).as_secs_f64(),
                    None => f64::INFINITY,
                };
                self.mode.interval(frame_rate)
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}
