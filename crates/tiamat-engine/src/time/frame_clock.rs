use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Scaled time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Clamped but unscaled delta, in seconds.
    pub unscaled_dt: f32,

    /// Sum of all scaled deltas since the clock was created.
    pub elapsed: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Number of ticks before this one.
    pub frame_index: u64,
}

impl FrameTime {
    /// Snapshot for a clock that has not ticked yet.
    pub fn zero(now: Instant) -> Self {
        Self { dt: 0.0, unscaled_dt: 0.0, elapsed: 0.0, now, frame_index: 0 }
    }
}

/// Scaled frame clock.
///
/// Raw deltas are clamped first (so a debugger pause cannot produce a huge
/// step), then multiplied by the time scale. A scale of `0.0` freezes scene
/// time while frames keep counting.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    elapsed: f64,
    time_scale: f32,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            elapsed: 0.0,
            time_scale: 1.0,
            dt_min,
            dt_max,
        }
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Sets the multiplier applied to every subsequent delta.
    ///
    /// Negative and non-finite values are treated as `0.0`.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    }

    /// Resets the wall-clock baseline without touching elapsed time.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances by the wall-clock time since the previous tick.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw = now.saturating_duration_since(self.last);
        self.last = now;
        self.step(raw, now)
    }

    /// Advances by an explicit raw delta (fixed-step hosts, tests).
    pub fn tick_by(&mut self, raw: Duration) -> FrameTime {
        let now = Instant::now();
        self.last = now;
        self.step(raw, now)
    }

    fn step(&mut self, raw: Duration, now: Instant) -> FrameTime {
        let clamped = raw.clamp(self.dt_min, self.dt_max);
        let unscaled_dt = clamped.as_secs_f32();
        let dt = unscaled_dt * self.time_scale;
        self.elapsed += f64::from(dt);

        let ft = FrameTime {
            dt,
            unscaled_dt,
            elapsed: self.elapsed,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_by_clamps_before_scaling() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100));
        clock.set_time_scale(2.0);

        let ft = clock.tick_by(Duration::from_secs(5));
        assert!((ft.unscaled_dt - 0.1).abs() < 1e-6);
        assert!((ft.dt - 0.2).abs() < 1e-6);

        let ft = clock.tick_by(Duration::ZERO);
        assert!((ft.unscaled_dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn frame_index_and_elapsed_accumulate() {
        let mut clock = FrameClock::new();
        let a = clock.tick_by(Duration::from_millis(10));
        let b = clock.tick_by(Duration::from_millis(10));
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert!((b.elapsed - 0.02).abs() < 1e-6);
    }

    #[test]
    fn zero_scale_freezes_time() {
        let mut clock = FrameClock::new();
        clock.set_time_scale(0.0);
        let ft = clock.tick_by(Duration::from_millis(16));
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.elapsed, 0.0);
    }

    #[test]
    fn invalid_scale_is_treated_as_zero() {
        let mut clock = FrameClock::new();
        clock.set_time_scale(-3.0);
        assert_eq!(clock.time_scale(), 0.0);
        clock.set_time_scale(f32::NAN);
        assert_eq!(clock.time_scale(), 0.0);
    }
}
