//! Dice and two-dice roll mechanics
//!
//! Rolls are uniform over `[1, sides]`. Seeded construction is deterministic
//! so that tests and replays can reproduce a sequence of rolls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A single die with its own generator
#[derive(Debug, Clone)]
pub struct Dice {
    sides: u32,
    rng: StdRng,
}

impl Dice {
    /// A die seeded from system entropy
    pub fn new(sides: u32) -> Self {
        Self {
            sides: sides.max(1),
            rng: StdRng::from_entropy(),
        }
    }

    /// A die whose rolls are fully determined by `seed`
    pub fn seeded(sides: u32, seed: u64) -> Self {
        Self {
            sides: sides.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn set_sides(&mut self, sides: u32) {
        self.sides = sides.max(1);
    }

    pub fn roll(&mut self) -> u32 {
        self.rng.gen_range(1..=self.sides)
    }
}

/// Modifiers for a two-dice roll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOptions {
    /// Roll twice and keep the better total
    pub advantage: bool,
    /// Reroll (once) any die showing this face
    pub reroll: Option<u32>,
}

/// Two dice rolled together (2d6 unless built otherwise)
#[derive(Debug, Clone)]
pub struct DiceRoller {
    first: Dice,
    second: Dice,
}

impl DiceRoller {
    pub const DEFAULT_SIDES: u32 = 6;

    pub fn new() -> Self {
        Self::with_sides(Self::DEFAULT_SIDES)
    }

    pub fn with_sides(sides: u32) -> Self {
        Self {
            first: Dice::new(sides),
            second: Dice::new(sides),
        }
    }

    /// Deterministic roller. The second die is seeded with `seed + 1` so the
    /// two dice never move in lockstep.
    pub fn seeded(seed: u64) -> Self {
        Self::seeded_with_sides(Self::DEFAULT_SIDES, seed)
    }

    pub fn seeded_with_sides(sides: u32, seed: u64) -> Self {
        Self {
            first: Dice::seeded(sides, seed),
            second: Dice::seeded(sides, seed.wrapping_add(1)),
        }
    }

    /// Sum of both dice
    pub fn roll(&mut self) -> u32 {
        self.first.roll() + self.second.roll()
    }

    /// With advantage, the better of two plain rolls
    pub fn roll_with_advantage(&mut self, advantage: bool) -> u32 {
        if advantage {
            let a = self.roll();
            let b = self.roll();
            return a.max(b);
        }
        self.roll()
    }

    /// Roll both dice; any die showing `target` is rerolled exactly once,
    /// even if the reroll shows `target` again
    pub fn roll_with_reroll(&mut self, target: u32) -> u32 {
        let mut first = self.first.roll();
        let mut second = self.second.roll();
        if first == target {
            first = self.first.roll();
        }
        if second == target {
            second = self.second.roll();
        }
        first + second
    }

    pub fn roll_with_reroll_and_advantage(&mut self, target: u32, advantage: bool) -> u32 {
        if advantage {
            let a = self.roll_with_reroll(target);
            let b = self.roll_with_reroll(target);
            return a.max(b);
        }
        self.roll_with_reroll(target)
    }

    /// Dispatch on a set of roll options
    pub fn roll_with(&mut self, options: RollOptions) -> u32 {
        match options.reroll {
            Some(target) => self.roll_with_reroll_and_advantage(target, options.advantage),
            None => self.roll_with_advantage(options.advantage),
        }
    }

    /// Lowest and highest possible two-dice totals
    pub fn range(&self) -> (u32, u32) {
        (2, self.first.sides() + self.second.sides())
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}
