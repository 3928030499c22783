//! Reversible character mutations

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::SheetError;

/// Applies a set of character mutations and can exactly reverse them
pub trait Adjuster {
    fn adjust(&self, character: &mut Character) -> Result<(), SheetError>;

    fn unadjust(&self, character: &mut Character) -> Result<(), SheetError>;
}

/// One reversible change to a single piece of character state.
///
/// `unadjust` applies `-delta` through the same path as `adjust`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    /// Shift a stat's current modifier
    Stat { stat_key: String, delta: i32 },
    /// Shift the hitpoints base maximum
    MaxHp { delta: i32 },
    /// Shift the experience maximum
    MaxXp { delta: i32 },
}

impl Adjustment {
    pub fn stat(stat_key: impl Into<String>, delta: i32) -> Self {
        Adjustment::Stat {
            stat_key: stat_key.into(),
            delta,
        }
    }

    pub fn max_hp(delta: i32) -> Self {
        Adjustment::MaxHp { delta }
    }

    pub fn max_xp(delta: i32) -> Self {
        Adjustment::MaxXp { delta }
    }

    fn apply(&self, character: &mut Character, sign: i32) -> Result<(), SheetError> {
        match self {
            Adjustment::Stat { stat_key, delta } => {
                character
                    .stat_for_rule_mut(stat_key)?
                    .add_to_current_modifier(sign * delta);
            }
            Adjustment::MaxHp { delta } => {
                character.hitpoints_mut().add_to_max_base(sign * delta);
            }
            Adjustment::MaxXp { delta } => {
                character.experience_mut().add_to_max(sign * delta);
            }
        }
        Ok(())
    }
}

impl Adjuster for Adjustment {
    fn adjust(&self, character: &mut Character) -> Result<(), SheetError> {
        self.apply(character, 1)
    }

    fn unadjust(&self, character: &mut Character) -> Result<(), SheetError> {
        self.apply(character, -1)
    }
}
