//! Bounded integer values

use serde::{Deserialize, Serialize};

/// A clamped integer with independently adjustable bounds.
///
/// After every mutation `max` is raised to `min` if it fell below it, and
/// `current` is clamped into `[min, max]`. No operation fails: out-of-range
/// requests are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    min: i32,
    max: i32,
    current: i32,
}

impl Value {
    /// Create a value, enforcing bounds regardless of argument order
    pub fn new(min: i32, max: i32, current: i32) -> Self {
        let mut value = Self { min, max, current };
        value.enforce_bounds();
        value
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn set_min(&mut self, min: i32) {
        self.min = min;
        self.enforce_bounds();
    }

    pub fn set_max(&mut self, max: i32) {
        self.max = max;
        self.enforce_bounds();
    }

    pub fn set_current(&mut self, current: i32) {
        self.current = current;
        self.enforce_bounds();
    }

    pub fn add_to_current(&mut self, delta: i32) {
        self.current = self.current.saturating_add(delta);
        self.enforce_bounds();
    }

    pub fn add_to_max(&mut self, delta: i32) {
        self.max = self.max.saturating_add(delta);
        self.enforce_bounds();
    }

    fn enforce_bounds(&mut self) {
        if self.max < self.min {
            self.max = self.min;
        }
        self.current = self.current.clamp(self.min, self.max);
    }
}
