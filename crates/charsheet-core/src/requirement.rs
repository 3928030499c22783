//! Stat threshold requirements

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::entry::Named;
use crate::error::SheetError;

/// A named predicate: the character's `stat_key` total is at least `threshold`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    name: String,
    stat_key: String,
    threshold: i32,
}

impl Requirement {
    pub fn new(name: impl Into<String>, stat_key: impl Into<String>, threshold: i32) -> Self {
        Self {
            name: name.into(),
            stat_key: stat_key.into(),
            threshold,
        }
    }

    pub fn stat_key(&self) -> &str {
        &self.stat_key
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Evaluate against a character.
    ///
    /// Fails with [`SheetError::UnknownStat`] when the character has no such
    /// stat; that means the rulebook and character disagree, not that the
    /// requirement is unmet.
    pub fn check(&self, character: &Character) -> Result<bool, SheetError> {
        let stat = character.stat_for_rule(&self.stat_key)?;
        Ok(stat.total() >= self.threshold)
    }
}

impl Named for Requirement {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} >= {}", self.stat_key, self.threshold)
    }
}
