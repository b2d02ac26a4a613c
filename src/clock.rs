use std::thread::sleep;
use std::time::{Duration, Instant};

/// Frame pacing: `tick` blocks until the next frame is due.
pub struct Clock {
    last_tick: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Clock { last_tick: None }
    }

    /// Sleeps until `1 / fps` seconds have passed since the previous tick and
    /// returns the time elapsed since it. The first tick returns immediately.
    pub fn tick(&mut self, fps: u32) -> Duration {
        if let Some(wait) = self.remaining(Instant::now(), fps) {
            sleep(wait);
        }

        let now = Instant::now();
        let elapsed = self.last_tick.map_or(Duration::ZERO, |last| now - last);
        self.last_tick = Some(now);
        elapsed
    }

    fn remaining(&self, now: Instant, fps: u32) -> Option<Duration> {
        let frame = Duration::from_secs(1) / fps.max(1);
        let last = self.last_tick?;
        frame.checked_sub(now.saturating_duration_since(last)).filter(|wait| !wait.is_zero())
    }
}
