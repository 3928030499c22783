//! The character aggregate

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::adjustment::Adjuster;
use crate::entry::{EntryManager, Named};
use crate::error::SheetError;
use crate::feature::{Feature, Specialty};
use crate::rulebook::RuleBook;
use crate::stat::{Experience, Hitpoints, Stat};

/// A character's complete state under one rulebook.
///
/// Stats, hitpoints and experience are owned exclusively by the character;
/// features and specialties are shared with the rulebook and compared by
/// identity.
#[derive(Clone)]
pub struct Character {
    name: String,
    rulebook: Arc<dyn RuleBook>,
    stats: EntryManager<Stat>,
    features: EntryManager<Arc<Feature>>,
    specialties: EntryManager<Arc<Specialty>>,
    hitpoints: Hitpoints,
    experience: Experience,
}

impl Character {
    /// Build a character with the rulebook's starting stats, hitpoints and
    /// experience, and no features or specialties
    pub fn new(name: impl Into<String>, rulebook: Arc<dyn RuleBook>) -> Self {
        let stats = rulebook.create_stats();
        let hitpoints = rulebook.starting_hitpoints();
        let experience = rulebook.starting_experience();
        Self {
            name: name.into(),
            rulebook,
            stats,
            features: EntryManager::new("feature"),
            specialties: EntryManager::new("specialty"),
            hitpoints,
            experience,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn rulebook(&self) -> &Arc<dyn RuleBook> {
        &self.rulebook
    }

    pub fn stats(&self) -> &EntryManager<Stat> {
        &self.stats
    }

    pub fn stat_by_name(&self, name: &str) -> Result<&Stat, SheetError> {
        self.stats.by_name(name)
    }

    pub fn stat_by_name_mut(&mut self, name: &str) -> Result<&mut Stat, SheetError> {
        self.stats.by_name_mut(name)
    }

    /// Stat lookup on behalf of a rule; a miss is a rulebook inconsistency
    pub(crate) fn stat_for_rule(&self, key: &str) -> Result<&Stat, SheetError> {
        self.stats.by_name(key).map_err(|_| SheetError::UnknownStat {
            stat: key.to_string(),
        })
    }

    pub(crate) fn stat_for_rule_mut(&mut self, key: &str) -> Result<&mut Stat, SheetError> {
        self.stats.by_name_mut(key).map_err(|_| SheetError::UnknownStat {
            stat: key.to_string(),
        })
    }

    pub fn features(&self) -> &EntryManager<Arc<Feature>> {
        &self.features
    }

    pub fn specialties(&self) -> &EntryManager<Arc<Specialty>> {
        &self.specialties
    }

    pub fn hitpoints(&self) -> &Hitpoints {
        &self.hitpoints
    }

    pub fn hitpoints_mut(&mut self) -> &mut Hitpoints {
        &mut self.hitpoints
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn experience_mut(&mut self) -> &mut Experience {
        &mut self.experience
    }

    pub fn has_feature(&self, feature: &Arc<Feature>) -> bool {
        self.features.contains(feature)
    }

    pub fn has_specialty(&self, specialty: &Arc<Specialty>) -> bool {
        self.specialties.contains(specialty)
    }

    pub fn has_feature_named(&self, name: &str) -> bool {
        self.features.contains_name(name)
    }

    pub fn has_specialty_named(&self, name: &str) -> bool {
        self.specialties.contains_name(name)
    }

    /// Grant a feature and apply its adjustments. Returns `false` without
    /// changing anything if the character already has it.
    pub fn add_feature(&mut self, feature: Arc<Feature>) -> Result<bool, SheetError> {
        if self.features.contains(&feature) {
            return Ok(false);
        }
        debug!(feature = feature.name(), character = %self.name, "adding feature");
        self.features.add(Arc::clone(&feature));
        feature.adjust(self)?;
        Ok(true)
    }

    /// Retract a feature's adjustments, then drop it. Returns `false` if the
    /// character does not have it.
    pub fn remove_feature(&mut self, feature: &Arc<Feature>) -> Result<bool, SheetError> {
        if !self.features.contains(feature) {
            return Ok(false);
        }
        debug!(feature = feature.name(), character = %self.name, "removing feature");
        feature.unadjust(self)?;
        self.features.remove(feature);
        Ok(true)
    }

    /// Grant a specialty and every feature it bundles
    pub fn add_specialty(&mut self, specialty: Arc<Specialty>) -> Result<bool, SheetError> {
        if self.specialties.contains(&specialty) {
            return Ok(false);
        }
        debug!(specialty = specialty.name(), character = %self.name, "adding specialty");
        self.specialties.add(Arc::clone(&specialty));
        specialty.adjust(self)?;
        Ok(true)
    }

    /// Retract a specialty's features that are still present, then drop it
    pub fn remove_specialty(&mut self, specialty: &Arc<Specialty>) -> Result<bool, SheetError> {
        if !self.specialties.contains(specialty) {
            return Ok(false);
        }
        debug!(specialty = specialty.name(), character = %self.name, "removing specialty");
        specialty.unadjust(self)?;
        self.specialties.remove(specialty);
        Ok(true)
    }

    /// Take damage; a character brought to zero gains the downed feature
    pub fn damage(&mut self, value: i32) -> Result<(), SheetError> {
        self.hitpoints.damage(value);
        if self.hitpoints.is_dead() {
            let downed = self.rulebook.downed_feature()?;
            self.add_feature(downed)?;
        }
        Ok(())
    }

    /// Heal base hitpoints; a character above zero loses the downed feature
    pub fn heal(&mut self, value: i32) -> Result<(), SheetError> {
        self.hitpoints.heal(value);
        if !self.hitpoints.is_dead() {
            let downed = self.rulebook.downed_feature()?;
            self.remove_feature(&downed)?;
        }
        Ok(())
    }

    pub fn set_temp_hp(&mut self, value: i32) {
        self.hitpoints.set_temp_hp(value);
    }

    /// Gain (or lose) experience. Reaching the maximum resets experience to
    /// zero and raises max hitpoints by one; at most one level is gained per
    /// call however large `value` is. Returns whether a level was gained.
    pub fn adjust_xp(&mut self, value: i32) -> bool {
        self.experience.add_to_current(value);
        if self.experience.can_level_up() {
            self.experience.reset_to_min();
            self.hitpoints.add_to_max_base(1);
            debug!(character = %self.name, max_hp = self.hitpoints.base().max(), "level up");
            return true;
        }
        false
    }

    /// Rulebook features whose requirements this character meets
    pub fn available_features(&self) -> Result<Vec<Arc<Feature>>, SheetError> {
        self.rulebook.features_meeting_requirements(self)
    }

    /// Rulebook specialties whose requirements this character meets
    pub fn available_specialties(&self) -> Result<Vec<Arc<Specialty>>, SheetError> {
        self.rulebook.specialties_meeting_requirements(self)
    }

    fn max_stat_width(&self) -> usize {
        self.stats
            .iter()
            .map(|stat| stat.to_string().len())
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Debug for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Character")
            .field("name", &self.name)
            .field("rulebook", &self.rulebook.name())
            .field("stats", &self.stats)
            .field("features", &self.features.names())
            .field("specialties", &self.specialties.names())
            .field("hitpoints", &self.hitpoints)
            .field("experience", &self.experience)
            .finish()
    }
}

/// The character sheet. This layout is also the save format read back by
/// [`crate::scholar::Scholar`].
impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   _______________________________")?;
        writeln!(f, " / \\                              |")?;
        writeln!(f, " \\__|                             |")?;
        writeln!(f, "    |          * {} *          |", self.name)?;
        writeln!(f, "    |                             |")?;

        let width = self.max_stat_width();
        for stat in &self.stats {
            writeln!(f, "    |  {:<width$}     |", stat.to_string())?;
        }

        writeln!(f, "    |                             |")?;
        writeln!(f, "    |  ___________________________|__")?;
        writeln!(f, "    \\_/_____________________________/")?;

        writeln!(f, "{}", self.hitpoints)?;
        writeln!(f, "{}", self.experience)?;

        writeln!(f, "        |================================\\")?;
        writeln!(f, "[0]#####>--------  SPECIALTIES  ---------->")?;
        writeln!(f, "        |================================/")?;
        writeln!(f)?;
        for (index, specialty) in self.specialties.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, specialty)?;
            writeln!(f)?;
        }

        writeln!(f, "        |================================\\")?;
        writeln!(f, "[0]#####>----------  FEATURES  ----------->")?;
        writeln!(f, "        |================================/")?;
        writeln!(f)?;
        for (index, feature) in self.features.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, feature)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rulebook::{DOWNED_FEATURE, DemoWorld};

    fn rulebook() -> Arc<DemoWorld> {
        Arc::new(DemoWorld::new())
    }

    fn character() -> Character {
        Character::new("Test Character", rulebook())
    }

    #[test]
    fn test_initialization() {
        let character = character();
        assert_eq!(character.name(), "Test Character");
        assert_eq!(character.hitpoints().total(), 6);
        assert_eq!(character.experience().current(), 0);
        assert_eq!(character.experience().max(), 5);
        assert_eq!(character.stats().len(), 5);
        assert!(character.features().is_empty());
        assert!(character.specialties().is_empty());
    }

    #[test]
    fn test_add_specialty_grants_features() {
        let rules = rulebook();
        let mut character = Character::new("Farmer", rules.clone());
        let farmer = rules.specialty_by_name("farmer").unwrap();

        assert!(character.add_specialty(Arc::clone(&farmer)).unwrap());
        assert!(character.has_specialty(&farmer));
        assert!(character.has_feature_named("grit"));
        assert!(character.has_feature_named("early riser"));
        assert!(character.has_feature_named("weather minded"));
        assert_eq!(character.hitpoints().base().max(), 7);
        assert_eq!(character.stat_by_name("resilience").unwrap().total(), 1);
    }

    #[test]
    fn test_add_specialty_twice_is_noop() {
        let rules = rulebook();
        let mut character = Character::new("Farmer", rules.clone());
        let farmer = rules.specialty_by_name("farmer").unwrap();
        character.add_specialty(Arc::clone(&farmer)).unwrap();
        assert!(!character.add_specialty(Arc::clone(&farmer)).unwrap());
        assert_eq!(character.specialties().len(), 1);
        assert_eq!(character.hitpoints().base().max(), 7);
    }

    #[test]
    fn test_remove_specialty_retracts_features() {
        let rules = rulebook();
        let mut character = Character::new("Farmer", rules.clone());
        let farmer = rules.specialty_by_name("farmer").unwrap();
        character.add_specialty(Arc::clone(&farmer)).unwrap();

        assert!(character.remove_specialty(&farmer).unwrap());
        assert!(!character.has_specialty(&farmer));
        assert!(character.features().is_empty());
        assert_eq!(character.hitpoints().base().max(), 6);
        assert_eq!(character.stat_by_name("resilience").unwrap().total(), 0);
    }

    #[test]
    fn test_remove_absent_feature_is_noop() {
        let rules = rulebook();
        let mut character = Character::new("Nobody", rules.clone());
        let grit = rules.feature_by_name("grit").unwrap();
        assert!(!character.remove_feature(&grit).unwrap());
        assert_eq!(character.hitpoints().base().max(), 6);
    }

    #[test]
    fn test_damage_and_heal() {
        let mut character = character();
        character.damage(3).unwrap();
        assert_eq!(character.hitpoints().total(), 3);
        character.heal(2).unwrap();
        assert_eq!(character.hitpoints().total(), 5);
    }

    #[test]
    fn test_death_adds_downed_and_healing_removes_it() {
        let mut character = character();
        character.damage(6).unwrap();
        assert!(character.hitpoints().is_dead());
        assert!(character.has_feature_named(DOWNED_FEATURE));

        character.damage(1).unwrap();
        assert_eq!(character.features().len(), 1);

        character.heal(1).unwrap();
        assert!(!character.hitpoints().is_dead());
        assert!(!character.has_feature_named(DOWNED_FEATURE));
    }

    #[test]
    fn test_heal_while_alive_without_downed() {
        let mut character = character();
        character.heal(1).unwrap();
        assert!(character.features().is_empty());
    }

    #[test]
    fn test_adjust_xp_levels_up() {
        let mut character = character();
        assert!(character.adjust_xp(5));
        assert_eq!(character.experience().current(), 0);
        assert_eq!(character.hitpoints().base().max(), 7);
    }

    #[test]
    fn test_adjust_xp_single_level_per_call() {
        let mut character = character();
        character.adjust_xp(4);
        assert!(character.adjust_xp(1));
        assert_eq!(character.experience().current(), 0);
        assert_eq!(character.hitpoints().base().max(), 7);

        // Clamped at max: still exactly one level for a huge grant.
        assert!(character.adjust_xp(50));
        assert_eq!(character.experience().current(), 0);
        assert_eq!(character.hitpoints().base().max(), 8);
    }

    #[test]
    fn test_adjust_xp_below_max() {
        let mut character = character();
        assert!(!character.adjust_xp(2));
        assert!(!character.adjust_xp(-5));
        assert_eq!(character.experience().current(), 0);
        assert_eq!(character.hitpoints().base().max(), 6);
    }

    #[test]
    fn test_characters_do_not_share_stats() {
        let rules = rulebook();
        let mut first = Character::new("First", rules.clone());
        let second = Character::new("Second", rules.clone());

        first.stat_by_name_mut("force").unwrap().set_current_base(3);
        let callous = rules.feature_by_name("callous").unwrap();
        first.add_feature(callous).unwrap();

        assert_eq!(second.stat_by_name("force").unwrap().total(), 0);
        assert_eq!(second.stat_by_name("empathy").unwrap().total(), 0);
    }

    #[test]
    fn test_available_features_respect_requirements() {
        let rules = rulebook();
        let mut character = Character::new("Picky", rules.clone());
        assert!(
            character
                .available_features()
                .unwrap()
                .iter()
                .any(|f| f.name() == "early riser")
        );

        character
            .stat_by_name_mut("resilience")
            .unwrap()
            .set_current_base(-1);
        let names: Vec<String> = character
            .available_features()
            .unwrap()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert!(!names.contains(&"early riser".to_string()));
        assert!(names.contains(&"weather minded".to_string()));

        let specialties: Vec<String> = character
            .available_specialties()
            .unwrap()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert!(!specialties.contains(&"farmer".to_string()));
        assert!(specialties.contains(&"bandit".to_string()));
    }

    #[test]
    fn test_display_layout() {
        let rules = rulebook();
        let mut character = Character::new("HERO", rules.clone());
        character
            .add_specialty(rules.specialty_by_name("bandit").unwrap())
            .unwrap();
        let sheet = character.to_string();

        assert!(sheet.contains("    |          * HERO *          |\n"));
        // Stat rows pad to the widest row, "RESILIENCE 0 : (0 + 0)".
        assert!(sheet.contains(&format!("    |  {:<22}     |\n", "FORCE 1 : (0 + 1)")));
        assert!(sheet.contains("    |  EMPATHY -2 : (0 + -2)      |\n"));
        assert!(sheet.contains("HITPOINTS:6/6\n[ ][ ][ ][ ][ ][ ]\nTEMP HP: 0\n"));
        assert!(sheet.contains("XP:0/5\n[ ][ ][ ][ ][ ]\n"));
        assert!(sheet.contains("[0]#####>--------  SPECIALTIES  ---------->\n"));
        assert!(sheet.contains("1. BANDIT\n"));
        assert!(sheet.contains("[0]#####>----------  FEATURES  ----------->\n"));
        assert!(sheet.contains("1. CALLOUS [**]\n"));
        assert!(sheet.contains("2. VIOLENT [*]\n"));
    }
}
