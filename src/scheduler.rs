//! Fixed-rate logic scheduling with a frame-skip cap

/// Decides how many fixed logic ticks each rendered frame owes
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    tick_ms: u64,
    max_frameskip: u32,
    next_tick_ms: u64,
}

impl FrameScheduler {
    pub fn new(start_ms: u64, tick_ms: u64, max_frameskip: u32) -> Self {
        Self {
            tick_ms: tick_ms.max(1),
            max_frameskip: max_frameskip.max(1),
            next_tick_ms: start_ms,
        }
    }

    /// Number of logic ticks to run now; advances the schedule accordingly.
    /// Work beyond the cap stays owed and is paid off on later frames.
    pub fn ticks_due(&mut self, now_ms: u64) -> u32 {
        let mut loops = 0;
        while now_ms > self.next_tick_ms && loops < self.max_frameskip {
            self.next_tick_ms += self.tick_ms;
            loops += 1;
        }
        loops
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_rate() {
        let mut s = FrameScheduler::new(0, 20, 10);
        assert_eq!(s.ticks_due(0), 0);
        assert_eq!(s.ticks_due(1), 1);
        assert_eq!(s.ticks_due(20), 0);
        assert_eq!(s.ticks_due(21), 1);
        assert_eq!(s.ticks_due(100), 3);
    }

    #[test]
    fn test_frameskip_cap_bounds_catch_up() {
        let mut s = FrameScheduler::new(0, 20, 10);
        // A 1-second stall owes 50 ticks; only 10 run per frame
        assert_eq!(s.ticks_due(1000), 10);
        assert_eq!(s.ticks_due(1000), 10);
    }
}
