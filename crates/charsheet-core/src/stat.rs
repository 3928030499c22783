//! Stats, hitpoints and experience
//!
//! A [`Stat`] is a named pair of [`Value`]s whose sum is its total.
//! [`Hitpoints`] and [`Experience`] embed the bounded types and expose only
//! the operations their role needs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::Named;
use crate::value::Value;

/// A named `base` + `modifier` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    name: String,
    description: String,
    base: Value,
    modifier: Value,
}

impl Stat {
    /// Create a stat whose base starts at `current` and whose modifier starts
    /// at zero, both bounded by `[min, max]`
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        min: i32,
        max: i32,
        current: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            base: Value::new(min, max, current),
            modifier: Value::new(min, max, 0),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn base(&self) -> &Value {
        &self.base
    }

    pub fn modifier(&self) -> &Value {
        &self.modifier
    }

    pub fn current_modifier(&self) -> i32 {
        self.modifier.current()
    }

    pub fn set_current_modifier(&mut self, value: i32) {
        self.modifier.set_current(value);
    }

    pub fn add_to_current_modifier(&mut self, delta: i32) {
        self.modifier.add_to_current(delta);
    }

    pub fn set_current_base(&mut self, value: i32) {
        self.base.set_current(value);
    }

    pub fn add_to_current_base(&mut self, delta: i32) {
        self.base.add_to_current(delta);
    }

    pub fn add_to_max_base(&mut self, delta: i32) {
        self.base.add_to_max(delta);
    }

    pub fn set_max_base(&mut self, value: i32) {
        self.base.set_max(value);
    }

    pub fn set_min_base(&mut self, value: i32) {
        self.base.set_min(value);
    }

    pub fn total(&self) -> i32 {
        self.base.current() + self.modifier.current()
    }

    pub fn total_min(&self) -> i32 {
        self.base.min() + self.modifier.min()
    }

    pub fn total_max(&self) -> i32 {
        self.base.max() + self.modifier.max()
    }
}

impl Named for Stat {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} : ({} + {})",
            self.name.to_uppercase(),
            self.total(),
            self.base.current(),
            self.modifier.current()
        )
    }
}

/// Hitpoints: base HP plus temporary HP carried in the modifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitpoints {
    stat: Stat,
}

impl Hitpoints {
    pub fn new(max: i32, current: i32) -> Self {
        Self {
            stat: Stat::new(
                "hitpoints",
                "Represents how much damage this Character can take",
                0,
                max,
                current,
            ),
        }
    }

    /// The underlying stat
    pub fn stat(&self) -> &Stat {
        &self.stat
    }

    pub fn base(&self) -> &Value {
        self.stat.base()
    }

    pub fn total(&self) -> i32 {
        self.stat.total()
    }

    /// Dead when the total has bottomed out
    pub fn is_dead(&self) -> bool {
        self.stat.total() == self.stat.total_min()
    }

    /// Apply damage to temp HP first, then to base HP. Returns the new total.
    pub fn damage(&mut self, value: i32) -> i32 {
        let temp = self.stat.current_modifier();
        if temp >= value {
            self.stat.add_to_current_modifier(-value);
        } else {
            let remaining = value - temp;
            self.stat.add_to_current_modifier(-temp);
            self.stat.add_to_current_base(-remaining);
        }
        self.stat.total()
    }

    /// Heal base HP only; temp HP cannot be healed. Returns the new total.
    pub fn heal(&mut self, value: i32) -> i32 {
        self.stat.add_to_current_base(value);
        self.stat.total()
    }

    pub fn set_temp_hp(&mut self, value: i32) {
        self.stat.set_current_modifier(value.max(0));
    }

    pub fn temp_hp(&self) -> i32 {
        self.stat.current_modifier()
    }

    pub fn reset_temp_hp(&mut self) {
        self.stat.set_current_modifier(0);
    }

    pub fn set_current_base(&mut self, value: i32) {
        self.stat.set_current_base(value);
    }

    pub fn add_to_max_base(&mut self, delta: i32) {
        self.stat.add_to_max_base(delta);
    }

    pub fn set_max_base(&mut self, value: i32) {
        self.stat.set_max_base(value);
    }
}

impl fmt::Display for Hitpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.base().max();
        writeln!(
            f,
            "HITPOINTS:{}/{}",
            self.base().current() + self.temp_hp(),
            max
        )?;
        writeln!(f, "{}", "[ ]".repeat(max.max(0) as usize))?;
        write!(f, "TEMP HP: {}", self.temp_hp())
    }
}

/// Experience toward the next level, floored at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    value: Value,
}

impl Experience {
    pub fn new(max: i32, current: i32) -> Self {
        Self {
            value: Value::new(0, max, current),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn current(&self) -> i32 {
        self.value.current()
    }

    pub fn max(&self) -> i32 {
        self.value.max()
    }

    pub fn can_level_up(&self) -> bool {
        self.value.current() == self.value.max()
    }

    pub fn reset_to_min(&mut self) {
        let min = self.value.min();
        self.value.set_current(min);
    }

    pub fn set_current(&mut self, value: i32) {
        self.value.set_current(value);
    }

    pub fn add_to_current(&mut self, delta: i32) {
        self.value.add_to_current(delta);
    }

    pub fn add_to_max(&mut self, delta: i32) {
        self.value.add_to_max(delta);
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "XP:{}/{}", self.current(), self.max())?;
        write!(f, "{}", "[ ]".repeat(self.max().max(0) as usize))
    }
}
