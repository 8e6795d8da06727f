use anyhow::bail;
use std::thread;
use std::time::{Duration, Instant};

/// Best-effort fixed-period pacing for the detector loop.
///
/// A tick that overruns its period pushes the schedule back instead of
/// triggering catch-up ticks.
pub struct FixedRate {
    period: Duration,
    next: Instant,
}

impl FixedRate {
    pub fn from_hz(rate_hz: f32) -> anyhow::Result<Self> {
        if !(rate_hz.is_finite() && rate_hz > 0.0) {
            bail!("loop rate must be a positive frequency, got {}", rate_hz);
        }
        let period = Duration::from_secs_f64(1.0 / f64::from(rate_hz));
        Ok(Self {
            period,
            next: Instant::now() + period,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleeps until the end of the current period.
    pub fn sleep(&mut self) {
        let now = Instant::now();
        if now < self.next {
            thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}
