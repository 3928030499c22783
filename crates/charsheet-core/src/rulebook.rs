//! Rulebook contract and the bundled demo world
//!
//! A [`RuleBook`] owns the catalogues of features, specialties and
//! requirements for one game system, and manufactures the per-character
//! starting state (stats, hitpoints, experience). Catalogue entries are
//! shared with characters through `Arc`; starting state is created fresh for
//! every character.

use std::sync::Arc;

use crate::adjustment::Adjustment;
use crate::character::Character;
use crate::dice::DiceRoller;
use crate::entry::EntryManager;
use crate::error::SheetError;
use crate::feature::{Feature, HasRequirements, Specialty};
use crate::requirement::Requirement;
use crate::stat::{Experience, Hitpoints, Stat};

/// Name of the feature granted to a character at zero hitpoints
pub const DOWNED_FEATURE: &str = "downed";

/// The rules of one game system
pub trait RuleBook: Send + Sync {
    fn name(&self) -> &str;

    fn edition(&self) -> f64;

    /// A roller configured for this system
    fn dice_roller(&self) -> DiceRoller;

    /// Primary stats for a new character. Every call returns fresh instances.
    fn create_stats(&self) -> EntryManager<Stat>;

    fn starting_hitpoints(&self) -> Hitpoints;

    fn starting_experience(&self) -> Experience;

    fn features(&self) -> &EntryManager<Arc<Feature>>;

    fn specialties(&self) -> &EntryManager<Arc<Specialty>>;

    fn requirements(&self) -> &EntryManager<Requirement>;

    /// How many features a new character may pick
    fn feature_pick_count(&self) -> usize;

    /// Values to distribute over a new character's primary stats
    fn stat_spread(&self) -> Vec<i32>;

    fn feature_by_name(&self, name: &str) -> Result<Arc<Feature>, SheetError> {
        self.features().by_name(name).map(Arc::clone)
    }

    fn specialty_by_name(&self, name: &str) -> Result<Arc<Specialty>, SheetError> {
        self.specialties().by_name(name).map(Arc::clone)
    }

    fn requirement_by_name(&self, name: &str) -> Result<&Requirement, SheetError> {
        self.requirements().by_name(name)
    }

    /// The feature granted when a character is downed
    fn downed_feature(&self) -> Result<Arc<Feature>, SheetError> {
        self.feature_by_name(DOWNED_FEATURE)
    }

    /// Features the character qualifies for, in catalogue order
    fn features_meeting_requirements(
        &self,
        character: &Character,
    ) -> Result<Vec<Arc<Feature>>, SheetError> {
        let mut available = Vec::new();
        for feature in self.features() {
            if feature.meets_requirements(character)? {
                available.push(Arc::clone(feature));
            }
        }
        Ok(available)
    }

    /// Specialties the character qualifies for, in catalogue order
    fn specialties_meeting_requirements(
        &self,
        character: &Character,
    ) -> Result<Vec<Arc<Specialty>>, SheetError> {
        let mut available = Vec::new();
        for specialty in self.specialties() {
            if specialty.meets_requirements(character)? {
                available.push(Arc::clone(specialty));
            }
        }
        Ok(available)
    }
}

const STAT_MIN: i32 = -2;
const STAT_MAX: i32 = 5;
const STAT_DEFAULT: i32 = 0;
const MILD_THRESHOLD: i32 = 0;
const STARTING_HP: i32 = 6;
const XP_MAX: i32 = 5;
const BOOST: i32 = 1;
const DROP: i32 = -2;

const PRIMARY_STATS: [(&str, &str); 5] = [
    (
        "force",
        "Reflects the amount of force your character uses both physically, mentally and socially.",
    ),
    (
        "quickness",
        "Indicates how swiftly your character can react physically, mentally and socially.",
    ),
    (
        "resilience",
        "Indicates how well your character handles setbacks, physically, socially and mentally.",
    ),
    (
        "analytical",
        "Shows your character's willingness to learn and explore new ideas.",
    ),
    (
        "empathy",
        "Reflects your character's ability to gauge, understand and share the feelings of others. \
         Enabling better communication etc",
    ),
];

/// The demo world ruleset: five primary stats, a dozen features and five
/// specialties
#[derive(Debug, Clone)]
pub struct DemoWorld {
    requirements: EntryManager<Requirement>,
    features: EntryManager<Arc<Feature>>,
    specialties: EntryManager<Arc<Specialty>>,
    dice_seed: Option<u64>,
}

impl DemoWorld {
    pub const NAME: &'static str = "demo world";
    pub const EDITION: f64 = 1.0;

    pub fn new() -> Self {
        let requirements = build_requirements();
        let features = build_features(&requirements);
        let specialties = build_specialties(&features, &requirements);
        Self {
            requirements,
            features,
            specialties,
            dice_seed: None,
        }
    }

    /// Make every roller handed out from now on deterministic
    pub fn seed_dice_roller(&mut self, seed: u64) {
        self.dice_seed = Some(seed);
    }

    pub fn with_dice_seed(mut self, seed: Option<u64>) -> Self {
        self.dice_seed = seed;
        self
    }

    pub fn dice_seed(&self) -> Option<u64> {
        self.dice_seed
    }
}

impl Default for DemoWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBook for DemoWorld {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn edition(&self) -> f64 {
        Self::EDITION
    }

    fn dice_roller(&self) -> DiceRoller {
        match self.dice_seed {
            Some(seed) => DiceRoller::seeded(seed),
            None => DiceRoller::new(),
        }
    }

    fn create_stats(&self) -> EntryManager<Stat> {
        let mut stats = EntryManager::new("stat");
        for (name, description) in PRIMARY_STATS {
            stats.add(Stat::new(name, description, STAT_MIN, STAT_MAX, STAT_DEFAULT));
        }
        stats
    }

    fn starting_hitpoints(&self) -> Hitpoints {
        Hitpoints::new(STARTING_HP, STARTING_HP)
    }

    fn starting_experience(&self) -> Experience {
        Experience::new(XP_MAX, 0)
    }

    fn features(&self) -> &EntryManager<Arc<Feature>> {
        &self.features
    }

    fn specialties(&self) -> &EntryManager<Arc<Specialty>> {
        &self.specialties
    }

    fn requirements(&self) -> &EntryManager<Requirement> {
        &self.requirements
    }

    fn feature_pick_count(&self) -> usize {
        2
    }

    fn stat_spread(&self) -> Vec<i32> {
        vec![-2, -1, 0, 1, 2]
    }
}

/// One mild requirement per primary stat, named after the stat
fn build_requirements() -> EntryManager<Requirement> {
    let mut requirements = EntryManager::new("requirement");
    for (name, _) in PRIMARY_STATS {
        requirements.add(Requirement::new(name, name, MILD_THRESHOLD));
    }
    requirements
}

fn requirement(requirements: &EntryManager<Requirement>, name: &str) -> Requirement {
    requirements
        .by_name(name)
        .cloned()
        .unwrap_or_else(|_| Requirement::new(name, name, MILD_THRESHOLD))
}

fn build_features(requirements: &EntryManager<Requirement>) -> EntryManager<Arc<Feature>> {
    let resilience = requirement(requirements, "resilience");
    let analytical = requirement(requirements, "analytical");
    let empathy = requirement(requirements, "empathy");

    let catalogue = vec![
        Feature::new(DOWNED_FEATURE, "you are near death!"),
        Feature::new(
            "early riser",
            "You've spent your life having to get up early, you are not afflicted by \
             drowsy or similar effects in the morning.",
        )
        .with_requirement(resilience.clone()),
        Feature::new(
            "heat resistant",
            "You've spent your life working around intense heat, it doesn't bother you \
             much anymore. You can roll twice and take the best result on checks related \
             to heat.",
        )
        .with_requirement(resilience),
        Feature::new(
            "weather minded",
            "You've developed a strong set of heuristics you use to predict the weather \
             and have gotten pretty good at it. You can roll twice and take the best \
             result when doing rolls related to the weather",
        ),
        Feature::new("read", "You have learned to read!, a valuable rare skill.")
            .with_adjustment(Adjustment::max_xp(-1)),
        Feature::new("write", "You have learned to write! a valuable rare skill."),
        Feature::new(
            "violent",
            "You are worryingly comfortable inflicting violence on others, You can roll \
             twice and take the best result when doing violent activities such as combat.",
        )
        .with_adjustment(Adjustment::stat("empathy", DROP)),
        Feature::new(
            "basic mathematics",
            "You have learned basic mathematics like arithmetic ! a valuable rare skill.",
        )
        .with_requirement(analytical.clone()),
        Feature::new(
            "analytical mind",
            format!(
                "You have developed a sharp analytical mind with steady constant practice. \
                 +{BOOST} analytical"
            ),
        )
        .with_requirement(analytical)
        .with_adjustment(Adjustment::stat("analytical", BOOST)),
        Feature::new(
            "socially fluent",
            format!("You have developed a strong social fluency. +{BOOST} empathy."),
        )
        .with_requirement(empathy)
        .with_adjustment(Adjustment::stat("empathy", BOOST)),
        Feature::new(
            "callous",
            format!(
                "You are indifferent to the impact of your actions on others. \
                 {DROP} empathy, +{BOOST} force."
            ),
        )
        .with_adjustment(Adjustment::stat("empathy", DROP))
        .with_adjustment(Adjustment::stat("force", BOOST)),
        Feature::new(
            "grit",
            "Through your life you've built up a good tolerance for long hours and hard work.",
        )
        .with_adjustment(Adjustment::stat("resilience", BOOST))
        .with_adjustment(Adjustment::max_hp(BOOST)),
    ];

    let mut features = EntryManager::new("feature");
    for feature in catalogue {
        features.add(Arc::new(feature));
    }
    features
}

fn build_specialties(
    features: &EntryManager<Arc<Feature>>,
    requirements: &EntryManager<Requirement>,
) -> EntryManager<Arc<Specialty>> {
    // (name, description, bundled features, gating requirement)
    let catalogue: [(&str, &str, &[&str], Option<&str>); 5] = [
        (
            "farmer",
            "You've spent much of your life waking early and working hard on the field.",
            &["grit", "early riser", "weather minded"],
            Some("resilience"),
        ),
        (
            "smith",
            "You've spent much of your life working in the heat of the smithy.",
            &["grit", "heat resistant", "analytical mind"],
            Some("force"),
        ),
        (
            "merchant",
            "You've spent much of your life travelling, managing logistics and bartering \
             with people.",
            &["read", "write", "basic mathematics", "socially fluent"],
            Some("analytical"),
        ),
        (
            "innkeeper",
            "You've spent much of your life as an innkeeper, acting as a community \
             figurehead, and running an establishment",
            &["read", "socially fluent", "basic mathematics", "early riser"],
            Some("empathy"),
        ),
        (
            "bandit",
            "You've spent much of your life violently stealing from those weaker then you",
            &["callous", "violent"],
            None,
        ),
    ];

    let mut specialties = EntryManager::new("specialty");
    for (name, description, bundled, gate) in catalogue {
        let mut specialty = Specialty::new(name, description);
        for feature_name in bundled {
            if let Ok(feature) = features.by_name(feature_name) {
                specialty.add_feature(Arc::clone(feature));
            }
        }
        if let Some(gate) = gate {
            specialty.add_requirement(requirement(requirements, gate));
        }
        specialties.add(Arc::new(specialty));
    }
    specialties
}
