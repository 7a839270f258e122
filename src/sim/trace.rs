//! Trajectory recording for regression tests
//!
//! A trace is the full bubble set captured after every tick. Two runs with
//! the same seed, config and viewport produce identical traces.

use serde::{Deserialize, Serialize};

use super::bubble::Bubble;
use super::state::SimState;
use super::tick::tick;
use super::viewport::Viewport;
use crate::config::SimConfig;
use crate::error::ConfigError;

/// Bubbles as they were at the end of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub tick: u64,
    pub bubbles: Vec<Bubble>,
}

/// Recorded run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub seed: u64,
    pub viewport: Viewport,
    pub frames: Vec<TraceFrame>,
}

impl Trace {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            viewport,
            frames: Vec::new(),
        }
    }

    /// Spawn a run and record its initial state plus `ticks` steps
    pub fn run(
        config: SimConfig,
        viewport: Viewport,
        seed: u64,
        ticks: u64,
    ) -> Result<Self, ConfigError> {
        let mut state = SimState::new(config, viewport, seed)?;
        Ok(Self::capture(&mut state, viewport, ticks))
    }

    /// Record `state` as it is now, then after each of `ticks` steps
    pub fn capture(state: &mut SimState, viewport: Viewport, ticks: u64) -> Self {
        let mut trace = Self::new(state.seed, viewport);
        trace.record(state);
        for _ in 0..ticks {
            tick(state, viewport);
            trace.record(state);
        }
        trace
    }

    /// Capture the current bubble set
    pub fn record(&mut self, state: &SimState) {
        self.frames.push(TraceFrame {
            tick: state.time_ticks,
            bubbles: state.bubbles.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Tick of the first frame where the two traces disagree
    pub fn first_divergence(&self, other: &Trace) -> Option<u64> {
        for (a, b) in self.frames.iter().zip(&other.frames) {
            if a != b {
                return Some(a.tick);
            }
        }
        if self.frames.len() != other.frames.len() {
            let shorter = self.frames.len().min(other.frames.len());
            return Some(shorter as u64);
        }
        None
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_run_records_initial_plus_ticks() {
        let trace =
            Trace::run(SimConfig::default(), Viewport::new(800.0, 600.0), 1, 10).unwrap();
        assert_eq!(trace.len(), 11);
        assert_eq!(trace.frames[0].tick, 0);
        assert_eq!(trace.frames[10].tick, 10);
    }

    #[test]
    fn test_first_divergence() {
        let viewport = Viewport::new(800.0, 600.0);
        let a = Trace::run(SimConfig::default(), viewport, 1, 20).unwrap();
        let b = Trace::run(SimConfig::default(), viewport, 1, 20).unwrap();
        let c = Trace::run(SimConfig::default(), viewport, 2, 20).unwrap();
        assert_eq!(a.first_divergence(&b), None);
        assert_eq!(a.first_divergence(&c), Some(0));

        let short = Trace::run(SimConfig::default(), viewport, 1, 5).unwrap();
        assert_eq!(a.first_divergence(&short), Some(6));
    }

    #[test]
    fn test_capture_starts_from_given_state() {
        let bubble = Bubble::new(0, Vec2::new(400.0, 300.0), Vec2::new(5.0, 0.0), 80.0);
        let mut state = SimState::with_bubbles(SimConfig::default(), vec![bubble], 9);
        let trace = Trace::capture(&mut state, Viewport::new(800.0, 600.0), 3);
        assert_eq!(trace.seed, 9);
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.frames[3].bubbles[0].pos, Vec2::new(415.0, 300.0));
        assert_eq!(state.time_ticks, 3);
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let config = SimConfig {
            entity_count: 0,
            ..Default::default()
        };
        assert!(Trace::run(config, Viewport::new(800.0, 600.0), 1, 5).is_err());
    }

    #[test]
    fn test_json_layout() {
        let mut trace = Trace::new(3, Viewport::new(100.0, 50.0));
        trace.frames.push(TraceFrame {
            tick: 0,
            bubbles: vec![Bubble::new(0, Vec2::new(1.5, 2.0), Vec2::new(-0.5, 4.0), 8.0)],
        });
        let json = trace.to_json().unwrap();
        assert!(json.contains(r#""pos":[1.5,2.0]"#), "{}", json);
        assert_eq!(Trace::from_json(&json).unwrap(), trace);
    }
}
