//! Monotonic elapsed-time sources for the render loop.

use instant::Instant;

/// Seconds elapsed since the clock's first read.
///
/// Only the clock mutates its own state; consumers just read it.
pub trait Clock {
    fn elapsed_secs(&mut self) -> f32;
}

/// Wall clock that starts on the first call to [`Clock::elapsed_secs`],
/// so the first frame always sees `t = 0`.
#[derive(Debug, Default)]
pub struct InstantClock {
    start: Option<Instant>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for InstantClock {
    fn elapsed_secs(&mut self) -> f32 {
        let start = *self.start.get_or_insert_with(Instant::now);
        start.elapsed().as_secs_f32()
    }
}
