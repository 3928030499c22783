//! New-character assembly
//!
//! A [`CharacterDraft`] collects the choices made when rolling up a
//! character. [`create_character`] checks them against the rulebook and
//! either returns the finished character or the first rule the draft breaks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::character::Character;
use crate::entry::Named;
use crate::error::SheetError;
use crate::feature::HasRequirements;
use crate::rulebook::RuleBook;

/// Choices for a new character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    /// `(stat name, base value)` pairs; values come from the stat spread
    #[serde(default)]
    pub stat_assignments: Vec<(String, i32)>,
    #[serde(default)]
    pub specialty: Option<String>,
    /// Feature names picked in addition to those the specialty grants
    #[serde(default)]
    pub features: Vec<String>,
}

impl CharacterDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn assign(mut self, stat: impl Into<String>, value: i32) -> Self {
        self.stat_assignments.push((stat.into(), value));
        self
    }

    pub fn specialty(mut self, name: impl Into<String>) -> Self {
        self.specialty = Some(name.into());
        self
    }

    pub fn pick(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }
}

/// Build a character from a draft.
///
/// Stats are assigned first, then the specialty and picked features are
/// granted in order. Each grant is checked against the character as it
/// stands at that point.
pub fn create_character(
    rulebook: Arc<dyn RuleBook>,
    draft: &CharacterDraft,
) -> Result<Character, SheetError> {
    let allowed = rulebook.feature_pick_count();
    if draft.features.len() > allowed {
        return Err(SheetError::TooManyPicks {
            picked: draft.features.len(),
            allowed,
        });
    }

    let mut character = Character::new(draft.name.clone(), Arc::clone(&rulebook));
    let mut spread = rulebook.stat_spread();
    let mut assigned: Vec<String> = Vec::new();

    for (stat_name, value) in &draft.stat_assignments {
        if assigned.iter().any(|s| s.eq_ignore_ascii_case(stat_name)) {
            return Err(SheetError::InvalidAllocation {
                reason: format!("stat '{}' assigned more than once", stat_name),
            });
        }
        let Some(slot) = spread.iter().position(|v| v == value) else {
            return Err(SheetError::InvalidAllocation {
                reason: format!("value {} is not available for '{}'", value, stat_name),
            });
        };
        spread.remove(slot);
        character.stat_by_name_mut(stat_name)?.set_current_base(*value);
        assigned.push(stat_name.clone());
        debug!(stat = %stat_name, value, "assigned stat");
    }

    if let Some(name) = &draft.specialty {
        let specialty = rulebook.specialty_by_name(name)?;
        if !specialty.meets_requirements(&character)? {
            return Err(SheetError::RequirementsNotMet {
                name: specialty.name().to_string(),
            });
        }
        character.add_specialty(specialty)?;
    }

    for name in &draft.features {
        let feature = rulebook.feature_by_name(name)?;
        if !feature.meets_requirements(&character)? {
            return Err(SheetError::RequirementsNotMet {
                name: feature.name().to_string(),
            });
        }
        character.add_feature(feature)?;
    }

    info!(
        character = %character.name(),
        specialties = character.specialties().len(),
        features = character.features().len(),
        "created character"
    );
    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rulebook::DemoWorld;

    fn rules() -> Arc<dyn RuleBook> {
        Arc::new(DemoWorld::new())
    }

    fn full_spread(draft: CharacterDraft) -> CharacterDraft {
        draft
            .assign("force", 2)
            .assign("quickness", -2)
            .assign("resilience", 1)
            .assign("analytical", 0)
            .assign("empathy", -1)
    }

    #[test]
    fn test_create_full_character() {
        let draft = full_spread(CharacterDraft::new("Brakka"))
            .specialty("smith")
            .pick("write");
        let character = create_character(rules(), &draft).unwrap();

        assert_eq!(character.name(), "Brakka");
        assert_eq!(character.stat_by_name("force").unwrap().total(), 2);
        assert_eq!(character.stat_by_name("quickness").unwrap().total(), -2);
        // smith grants grit (+1 resilience) and analytical mind (+1 analytical)
        assert_eq!(character.stat_by_name("resilience").unwrap().total(), 2);
        assert_eq!(character.stat_by_name("analytical").unwrap().total(), 1);
        assert_eq!(character.hitpoints().base().max(), 7);
        assert!(character.has_feature_named("write"));
        assert!(character.has_feature_named("heat resistant"));
    }

    #[test]
    fn test_unassigned_stats_keep_defaults() {
        let draft = CharacterDraft::new("Plain").assign("force", 1);
        let character = create_character(rules(), &draft).unwrap();
        assert_eq!(character.stat_by_name("force").unwrap().total(), 1);
        assert_eq!(character.stat_by_name("empathy").unwrap().total(), 0);
    }

    #[test]
    fn test_value_outside_spread() {
        let draft = CharacterDraft::new("Greedy").assign("force", 5);
        let err = create_character(rules(), &draft).unwrap_err();
        assert!(matches!(err, SheetError::InvalidAllocation { .. }));
    }

    #[test]
    fn test_value_reused() {
        let draft = CharacterDraft::new("Twice")
            .assign("force", 2)
            .assign("quickness", 2);
        let err = create_character(rules(), &draft).unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[test]
    fn test_stat_assigned_twice() {
        let draft = CharacterDraft::new("Twice").assign("force", 2).assign("Force", 1);
        let err = create_character(rules(), &draft).unwrap_err();
        assert!(matches!(err, SheetError::InvalidAllocation { .. }));
    }

    #[test]
    fn test_unknown_stat() {
        let draft = CharacterDraft::new("Lucky").assign("luck", 2);
        let err = create_character(rules(), &draft).unwrap_err();
        assert!(matches!(err, SheetError::NotFound { kind: "stat", .. }));
    }

    #[test]
    fn test_too_many_picks() {
        let draft = CharacterDraft::new("Greedy")
            .pick("read")
            .pick("write")
            .pick("grit");
        let err = create_character(rules(), &draft).unwrap_err();
        assert!(matches!(
            err,
            SheetError::TooManyPicks {
                picked: 3,
                allowed: 2
            }
        ));
    }

    #[test]
    fn test_specialty_requirements_checked_after_stats() {
        let draft = CharacterDraft::new("Frail")
            .assign("resilience", -1)
            .specialty("farmer");
        let err = create_character(rules(), &draft).unwrap_err();
        assert!(matches!(err, SheetError::RequirementsNotMet { ref name } if name == "farmer"));
    }

    #[test]
    fn test_feature_requirements_see_specialty_adjustments() {
        // bandit's callous drops empathy below the socially fluent gate
        let draft = CharacterDraft::new("Rogue")
            .specialty("bandit")
            .pick("socially fluent");
        let err = create_character(rules(), &draft).unwrap_err();
        assert!(
            matches!(err, SheetError::RequirementsNotMet { ref name } if name == "socially fluent")
        );
    }

    #[test]
    fn test_unknown_feature() {
        let draft = CharacterDraft::new("Mage").pick("fireball");
        let err = create_character(rules(), &draft).unwrap_err();
        assert!(matches!(err, SheetError::NotFound { kind: "feature", .. }));
    }
}
