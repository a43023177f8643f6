use std::rc::Rc;
use std::time::Instant;

/// Milliseconds each candidate stays on screen.
pub const CYCLE_PERIOD_MS: i64 = 1000;

pub trait Clock {
    /// Monotonic milliseconds.
    fn now_millis(&self) -> i64;
}

/// Milliseconds since the clock was created.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        self.start.elapsed().as_millis() as i64
    }
}

/// Picks which element of a list is shown this frame. The index is derived
/// from the clock rather than counted, so timers sharing a phase offset stay in
/// lock-step no matter how many frames are skipped.
pub struct CycleTimer {
    phase_offset: i64,
    clock: Rc<dyn Clock>,
}

impl CycleTimer {
    pub fn new(phase_offset: i64, clock: Rc<dyn Clock>) -> Self {
        Self { phase_offset, clock }
    }

    pub fn phase_offset(&self) -> i64 {
        self.phase_offset
    }

    pub fn pick<'a, E>(&self, list: &'a [E]) -> Option<&'a E> {
        match list.len() {
            0 => None,
            1 => list.first(),
            n => list.get(cycle_index(self.clock.now_millis(), self.phase_offset, n)),
        }
    }

    /// Per-frame hook. Selection is a pure function of the clock, so there is
    /// nothing to advance.
    pub fn on_draw(&self) {}
}

/// `floor((now + phase_offset) / period) mod len`, never negative.
pub fn cycle_index(now: i64, phase_offset: i64, len: usize) -> usize {
    let step = (now + phase_offset).div_euclid(CYCLE_PERIOD_MS);
    step.rem_euclid(len as i64) as usize
}


#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;

    #[test]
    fn test_empty_list_picks_nothing() {
        let timer = CycleTimer::new(0, Rc::new(ManualClock::default()));
        let empty: [u32; 0] = [];
        assert_eq!(timer.pick(&empty), None);
    }

    #[test]
    fn test_single_element_always_picked() {
        let clock = Rc::new(ManualClock::at(123_456));
        let timer = CycleTimer::new(777, clock.clone());
        assert_eq!(timer.pick(&[42]), Some(&42));
        clock.set(-5_000);
        assert_eq!(timer.pick(&[42]), Some(&42));
    }

    #[test]
    fn test_index_advances_once_per_period() {
        let clock = Rc::new(ManualClock::at(0));
        let timer = CycleTimer::new(0, clock.clone());
        let list = ['a', 'b', 'c'];
        assert_eq!(timer.pick(&list), Some(&'a'));
        clock.set(999);
        assert_eq!(timer.pick(&list), Some(&'a'));
        clock.set(1000);
        assert_eq!(timer.pick(&list), Some(&'b'));
        clock.set(3000);
        assert_eq!(timer.pick(&list), Some(&'a'));
    }

    #[test]
    fn test_phase_offset_shifts_index() {
        let clock = Rc::new(ManualClock::at(0));
        let timer = CycleTimer::new(2500, clock);
        assert_eq!(timer.pick(&['a', 'b', 'c']), Some(&'c'));
    }

    #[test]
    fn test_timers_with_same_offset_stay_in_step() {
        let clock = Rc::new(ManualClock::at(0));
        let a = CycleTimer::new(400, clock.clone());
        let b = CycleTimer::new(400, clock.clone());
        let list = [1, 2, 3, 4, 5];
        for now in (0..20_000).step_by(333) {
            clock.set(now);
            a.on_draw();
            assert_eq!(a.pick(&list), b.pick(&list));
        }
    }

    #[test]
    fn test_one_period_per_element_visits_each_once() {
        for len in 2..7usize {
            for offset in [0, 1, 999, 4321] {
                let mut seen: Vec<usize> = (0..len as i64)
                    .map(|k| cycle_index(k * CYCLE_PERIOD_MS, offset, len))
                    .collect();
                seen.sort_unstable();
                assert_eq!(seen, (0..len).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_negative_time_never_panics() {
        assert_eq!(cycle_index(-1, 0, 3), 2);
        assert_eq!(cycle_index(-1000, 0, 3), 2);
        assert_eq!(cycle_index(-1001, 0, 3), 1);
    }
}
