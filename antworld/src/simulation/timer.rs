// Tick counter for periodic world events
// Counts up from 0 to max_value, a max_value of 0 never fires

#[derive(Debug, Clone)]
pub struct Timer {
    pub max_value: u64,
    pub value: u64,
}

impl Timer {
    /// Create a new timer with a period and an initial value
    pub fn new(max_value: u64, initial_value: u64) -> Self {
        Self {
            max_value,
            value: initial_value,
        }
    }

    /// Returns true if the timer has reached its period
    pub fn is_ready(&self) -> bool {
        self.max_value > 0 && self.value >= self.max_value
    }

    /// Advance the timer by one tick
    pub fn update(&mut self) {
        self.value += 1;
    }

    /// Wraps the timer value back within bounds.
    pub fn wrap(&mut self) {
        if self.max_value > 0 {
            self.value %= self.max_value;
        }
    }

    /// Advances one tick and reports whether the period elapsed, wrapping if so.
    pub fn tick(&mut self) -> bool {
        self.update();
        if self.is_ready() {
            self.wrap();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_every_period() {
        let mut timer = Timer::new(3, 0);
        let fired: Vec<bool> = (0..7).map(|_| timer.tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_zero_period_never_fires() {
        let mut timer = Timer::new(0, 0);
        assert!((0..50).all(|_| !timer.tick()));
    }
}
