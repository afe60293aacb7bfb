use std::time::{Duration, Instant};

/// Number of frames folded into one average-frame-time report.
const BATCH_SIZE: u32 = 100;

/// Accumulates per-frame render times and reports a batched average.
///
/// A report is emitted every [`BATCH_SIZE`] frames; between reports the
/// last average stays readable via `average_ms`.
#[derive(Debug)]
pub struct FrameTimer {
    frame_start: Option<Instant>,
    frames_time_sum: Duration,
    frames_count: u32,
    pub last_frame_ms: f32,
    pub average_ms: f32,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame_start: None,
            frames_time_sum: Duration::ZERO,
            frames_count: 0,
            last_frame_ms: 0.0,
            average_ms: 0.0,
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Ends the current frame. Returns the batched average when a full
    /// batch has been accumulated.
    pub fn end_frame(&mut self) -> Option<f32> {
        let start = self.frame_start.take()?;
        let elapsed = start.elapsed();
        self.last_frame_ms = elapsed.as_secs_f32() * 1000.0;

        self.frames_time_sum += elapsed;
        self.frames_count += 1;

        if self.frames_count >= BATCH_SIZE {
            self.average_ms =
                self.frames_time_sum.as_secs_f32() * 1000.0 / self.frames_count as f32;
            self.frames_time_sum = Duration::ZERO;
            self.frames_count = 0;
            return Some(self.average_ms);
        }

        None
    }
}
