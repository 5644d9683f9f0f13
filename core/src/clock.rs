use std::time::Duration;

use crate::constants::TIMER_FREQUENCY;

/// How much work is due after some amount of time has passed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Ticks {
    /// Number of `step` calls to make.
    pub cycles: u32,
    /// Number of `tick_timers` calls to make.
    pub timer_ticks: u32,
}

/// # Clock
/// Chip-8 runs on two clocks that have nothing to do with each other:
/// - the CPU, which executes a configurable number of instructions per second
/// - the delay and sound timers, which always count down at 60Hz
///
/// `Clock` turns elapsed wall-clock time into a budget for each. Time that doesn't add
/// up to a whole cycle or tick is carried over to the next call.
#[derive(Clone, Debug)]
pub struct Clock {
    cycle_period: Duration,
    timer_period: Duration,
    cycle_debt: Duration,
    timer_debt: Duration,
}

impl Clock {
    /// # Arguments
    /// * `cycles_per_second` the CPU's clock speed; clamped to at least 1
    pub fn new(cycles_per_second: u32) -> Self {
        Clock {
            cycle_period: Duration::from_secs(1) / cycles_per_second.max(1),
            timer_period: Duration::from_secs(1) / TIMER_FREQUENCY,
            cycle_debt: Duration::from_secs(0),
            timer_debt: Duration::from_secs(0),
        }
    }

    /// Time between two CPU cycles.
    pub fn cycle_period(&self) -> Duration {
        self.cycle_period
    }

    /// Accounts for `elapsed` time and returns the work that became due.
    pub fn advance(&mut self, elapsed: Duration) -> Ticks {
        Ticks {
            cycles: Self::drain(&mut self.cycle_debt, elapsed, self.cycle_period),
            timer_ticks: Self::drain(&mut self.timer_debt, elapsed, self.timer_period),
        }
    }

    fn drain(debt: &mut Duration, elapsed: Duration, period: Duration) -> u32 {
        *debt += elapsed;
        let mut due = 0;
        while *debt >= period {
            *debt -= period;
            due += 1;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_is_due_before_a_period_passes() {
        let mut clock = Clock::new(700);
        assert_eq!(clock.advance(Duration::from_micros(100)), Ticks::default());
    }

    #[test]
    fn test_one_second_yields_both_rates() {
        let mut clock = Clock::new(500);
        let ticks = clock.advance(Duration::from_secs(1));
        assert_eq!(ticks.cycles, 500);
        assert_eq!(ticks.timer_ticks, 60);
    }

    #[test]
    fn test_timer_rate_ignores_clock_speed() {
        let mut slow = Clock::new(100);
        let mut fast = Clock::new(5000);
        let elapsed = Duration::from_millis(500);
        assert_eq!(slow.advance(elapsed).timer_ticks, 30);
        assert_eq!(fast.advance(elapsed).timer_ticks, 30);
    }

    #[test]
    fn test_leftover_time_carries_over() {
        let mut clock = Clock::new(60);
        let half_tick = clock.cycle_period() / 2;
        assert_eq!(clock.advance(half_tick).timer_ticks, 0);
        assert_eq!(clock.advance(half_tick).timer_ticks, 1);
        assert_eq!(clock.advance(half_tick).cycles, 0);
    }

    #[test]
    fn test_zero_clock_speed_is_clamped() {
        let mut clock = Clock::new(0);
        assert_eq!(clock.advance(Duration::from_secs(2)).cycles, 2);
    }
}
