//! Frame driver
//!
//! The host calls [`Driver::frame`] once per display refresh. Each frame
//! samples the viewport, clears the renderer, runs exactly one simulation
//! tick and then draws every bubble. A [`StopHandle`] ends the run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::consts::FRAME_RATE_HZ;
use crate::error::RenderError;
use crate::renderer::BubbleRenderer;
use crate::sim::{SimState, TickReport, ViewportProvider, tick};

/// Cloneable flag that asks the driver to stop
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Result of one [`Driver::frame`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A tick ran and the frame was presented
    Rendered(TickReport),
    /// Stop was requested; nothing ran
    Stopped,
}

/// Owns the simulation and drives it against a viewport and a renderer
pub struct Driver<V, R> {
    state: SimState,
    viewport: V,
    renderer: R,
    stop: StopHandle,
    frames: u64,
    /// Accumulated since the last stats log
    window: TickReport,
}

impl<V: ViewportProvider, R: BubbleRenderer> Driver<V, R> {
    pub fn new(state: SimState, viewport: V, renderer: R) -> Self {
        Self {
            state,
            viewport,
            renderer,
            stop: StopHandle::new(),
            frames: 0,
            window: TickReport::default(),
        }
    }

    /// Handle the host can keep to end the run
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Clear, tick once, draw every bubble, present
    pub fn frame(&mut self) -> Result<FrameOutcome, RenderError> {
        if self.stop.is_stopped() {
            return Ok(FrameOutcome::Stopped);
        }

        let viewport = self.viewport.viewport();
        self.renderer.clear(viewport);
        let report = tick(&mut self.state, viewport);
        for bubble in &self.state.bubbles {
            self.renderer.draw_bubble(bubble.pos, bubble.radius);
        }
        self.frames += 1;
        self.window += report;
        self.log_stats();

        self.renderer.present()?;
        Ok(FrameOutcome::Rendered(report))
    }

    /// Run up to `frames` frames back to back, stopping early if asked.
    /// Returns how many frames ran.
    pub fn run_frames(&mut self, frames: u64) -> Result<u64, RenderError> {
        let mut ran = 0;
        while ran < frames {
            match self.frame()? {
                FrameOutcome::Rendered(_) => ran += 1,
                FrameOutcome::Stopped => break,
            }
        }
        Ok(ran)
    }

    fn log_stats(&mut self) {
        if self.frames % FRAME_RATE_HZ as u64 != 0 {
            return;
        }
        log::debug!(
            "Frame {}: {} contacts, {} wall bounces, {} speed fixes, {} redirects, mean speed {:.2}",
            self.frames,
            self.window.contacts,
            self.window.wall_bounces,
            self.window.speed_fixes,
            self.window.redirects,
            self.state.mean_speed()
        );
        self.window = TickReport::default();
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::Viewport;
    use glam::Vec2;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records the render calls it receives
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail_present: bool,
    }

    impl BubbleRenderer for Recorder {
        fn clear(&mut self, viewport: Viewport) {
            self.calls.push(format!("clear {}x{}", viewport.width, viewport.height));
        }

        fn draw_bubble(&mut self, _center: Vec2, radius: f32) {
            self.calls.push(format!("draw {}", radius));
        }

        fn present(&mut self) -> Result<(), RenderError> {
            self.calls.push("present".to_string());
            if self.fail_present {
                Err(RenderError::NotReady)
            } else {
                Ok(())
            }
        }
    }

    fn small_state(viewport: Viewport) -> SimState {
        let config = SimConfig {
            entity_count: 3,
            ..Default::default()
        };
        SimState::new(config, viewport, 42).unwrap()
    }

    #[test]
    fn test_frame_order_clear_draw_present() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut driver = Driver::new(small_state(viewport), viewport, Recorder::default());

        let outcome = driver.frame().unwrap();

        assert!(matches!(outcome, FrameOutcome::Rendered(_)));
        assert_eq!(
            driver.renderer().calls,
            vec!["clear 800x600", "draw 80", "draw 80", "draw 80", "present"]
        );
        assert_eq!(driver.frames(), 1);
        assert_eq!(driver.state().time_ticks, 1);
    }

    #[test]
    fn test_stop_handle_halts_frames() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut driver = Driver::new(small_state(viewport), viewport, Recorder::default());
        let stop = driver.stop_handle();

        assert_eq!(driver.run_frames(5).unwrap(), 5);
        stop.stop();
        assert_eq!(driver.frame().unwrap(), FrameOutcome::Stopped);
        assert_eq!(driver.run_frames(5).unwrap(), 0);
        assert_eq!(driver.state().time_ticks, 5);
    }

    #[test]
    fn test_frame_samples_latest_viewport() {
        let shared = Rc::new(Cell::new(Viewport::new(800.0, 600.0)));
        let mut driver = Driver::new(
            small_state(shared.get()),
            shared.clone(),
            Recorder::default(),
        );

        driver.frame().unwrap();
        shared.set(Viewport::new(1024.0, 768.0));
        driver.frame().unwrap();

        let clears: Vec<&String> = driver
            .renderer()
            .calls
            .iter()
            .filter(|c| c.starts_with("clear"))
            .collect();
        assert_eq!(clears, vec!["clear 800x600", "clear 1024x768"]);
    }

    #[test]
    fn test_present_error_propagates_after_tick() {
        let viewport = Viewport::new(800.0, 600.0);
        let renderer = Recorder {
            fail_present: true,
            ..Default::default()
        };
        let mut driver = Driver::new(small_state(viewport), viewport, renderer);

        assert!(matches!(driver.frame(), Err(RenderError::NotReady)));
        assert_eq!(driver.state().time_ticks, 1);
    }
}
