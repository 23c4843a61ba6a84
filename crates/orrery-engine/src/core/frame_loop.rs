use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable stop flag for a running `FrameLoop`.
/// Any clone may request the stop; the loop observes it between frames.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Explicit frame loop: pulls frame deltas from a source and runs one
/// tick per delta until the source dries up or the signal is raised.
pub struct FrameLoop {
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self { frames: 0 }
    }

    /// Run until stopped. Returns the number of frames run by this call.
    pub fn run_until<I, F>(&mut self, stop: &StopSignal, deltas: I, mut tick: F) -> u64
    where
        I: IntoIterator<Item = f32>,
        F: FnMut(f32),
    {
        let start = self.frames;
        for dt in deltas {
            if stop.is_stopped() {
                break;
            }
            tick(dt);
            self.frames += 1;
        }
        self.frames - start
    }

    /// Total frames run over the loop's lifetime.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_every_frame_when_not_stopped() {
        let mut lp = FrameLoop::new();
        let stop = StopSignal::new();
        let mut total = 0.0;
        let ran = lp.run_until(&stop, std::iter::repeat(0.5).take(4), |dt| total += dt);
        assert_eq!(ran, 4);
        assert_eq!(total, 2.0);
    }

    #[test]
    fn stop_from_inside_tick_ends_after_current_frame() {
        let mut lp = FrameLoop::new();
        let stop = StopSignal::new();
        let handle = stop.clone();
        let mut count = 0;
        let ran = lp.run_until(&stop, std::iter::repeat(1.0 / 60.0), |_| {
            count += 1;
            if count == 3 {
                handle.stop();
            }
        });
        assert_eq!(ran, 3);
        assert_eq!(lp.frames(), 3);
    }

    #[test]
    fn already_stopped_runs_nothing() {
        let mut lp = FrameLoop::new();
        let stop = StopSignal::new();
        stop.stop();
        assert_eq!(lp.run_until(&stop, [0.1, 0.1], |_| panic!("ticked")), 0);
    }
}
