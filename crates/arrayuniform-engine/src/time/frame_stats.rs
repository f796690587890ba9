use std::time::{Duration, Instant};

/// Frame rate over one reporting interval.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FpsReport {
    /// Frames per second averaged over the interval.
    pub fps: f32,

    /// Frames presented since the stats were created.
    pub total_frames: u64,
}

/// Counts presented frames and summarises them once per interval.
///
/// The demo has no frame pacing; these numbers only describe how fast the host
/// loop happens to run.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    window_start: Instant,
    frames_in_window: u32,
    total_frames: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::with_interval(Instant::now(), Duration::from_secs(1))
    }

    pub fn with_interval(start: Instant, interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            interval,
            window_start: start,
            frames_in_window: 0,
            total_frames: 0,
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Records one frame at the current time.
    pub fn record(&mut self) -> Option<FpsReport> {
        self.record_at(Instant::now())
    }

    /// Records one frame at `now`; returns a report once the interval has elapsed.
    pub fn record_at(&mut self, now: Instant) -> Option<FpsReport> {
        self.frames_in_window += 1;
        self.total_frames = self.total_frames.wrapping_add(1);

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        let report = FpsReport {
            fps: self.frames_in_window as f32 / elapsed.as_secs_f32(),
            total_frames: self.total_frames,
        };

        self.window_start = now;
        self.frames_in_window = 0;
        Some(report)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
