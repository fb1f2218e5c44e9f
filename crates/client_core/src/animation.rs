//! Timing math for the result card: count-up number, gauge fill and fade-in.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    pub count_up: Duration,
    pub gauge_delay: Duration,
    pub gauge_transition: Duration,
    pub fade_in: Duration,
    /// Prediction that fills the gauge completely.
    pub gauge_max: f64,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            count_up: Duration::from_millis(600),
            gauge_delay: Duration::from_millis(200),
            gauge_transition: Duration::from_millis(800),
            fade_in: Duration::from_millis(600),
            gauge_max: 800.0,
        }
    }
}

pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Fraction of `duration` elapsed between `started_at` and `now`, in `0..=1`.
pub fn progress(started_at: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(started_at);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

/// Gauge width in percent for `prediction`, clamped to `0..=100`.
pub fn gauge_percent(prediction: f64, gauge_max: f64) -> f64 {
    if gauge_max <= 0.0 || prediction.is_nan() {
        return 0.0;
    }
    (prediction / gauge_max * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    start: f64,
    end: f64,
    duration: Duration,
    started_at: Instant,
}

impl CountUp {
    pub fn new(start: f64, end: f64, duration: Duration, started_at: Instant) -> Self {
        Self {
            start,
            end,
            duration,
            started_at,
        }
    }

    pub fn value_at(&self, now: Instant) -> i64 {
        let eased = ease_out_cubic(progress(self.started_at, self.duration, now));
        (self.start + (self.end - self.start) * eased).round() as i64
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        progress(self.started_at, self.duration, now) >= 1.0
    }
}

/// Gauge that stays empty for `delay`, then eases toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeAnimation {
    target_percent: f64,
    delay: Duration,
    transition: Duration,
    shown_at: Instant,
}

impl GaugeAnimation {
    pub fn new(target_percent: f64, timing: &AnimationTiming, shown_at: Instant) -> Self {
        Self {
            target_percent,
            delay: timing.gauge_delay,
            transition: timing.gauge_transition,
            shown_at,
        }
    }

    pub fn target_percent(&self) -> f64 {
        self.target_percent
    }

    pub fn percent_at(&self, now: Instant) -> f64 {
        let revealed_at = self.shown_at + self.delay;
        if now < revealed_at {
            return 0.0;
        }
        self.target_percent * ease_out_cubic(progress(revealed_at, self.transition, now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.shown_at + self.delay + self.transition
    }
}
