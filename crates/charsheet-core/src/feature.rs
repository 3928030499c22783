//! Features and specialties
//!
//! A [`Feature`] bundles [`Adjustment`]s; a [`Specialty`] bundles features.
//! Both are gated by [`Requirement`]s and both can be applied to and
//! retracted from a [`Character`].

use std::fmt;
use std::sync::Arc;

use crate::adjustment::{Adjuster, Adjustment};
use crate::character::Character;
use crate::entry::{EntryManager, Named};
use crate::error::SheetError;
use crate::requirement::Requirement;

/// Something gated by a set of requirements
pub trait HasRequirements {
    fn requirements(&self) -> &EntryManager<Requirement>;

    fn add_requirement(&mut self, requirement: Requirement);

    /// True when every requirement passes (vacuously true when there are none)
    fn meets_requirements(&self, character: &Character) -> Result<bool, SheetError> {
        for requirement in self.requirements() {
            if !requirement.check(character)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A named bundle of adjustments
#[derive(Debug, Clone)]
pub struct Feature {
    name: String,
    description: String,
    adjustments: Vec<Adjustment>,
    requirements: EntryManager<Requirement>,
}

impl Feature {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            adjustments: Vec::new(),
            requirements: EntryManager::new("requirement"),
        }
    }

    /// Builder-style adjustment
    pub fn with_adjustment(mut self, adjustment: Adjustment) -> Self {
        self.adjustments.push(adjustment);
        self
    }

    /// Builder-style requirement
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.add(requirement);
        self
    }

    pub fn add_adjustment(&mut self, adjustment: Adjustment) {
        self.adjustments.push(adjustment);
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }
}

impl Named for Feature {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasRequirements for Feature {
    fn requirements(&self) -> &EntryManager<Requirement> {
        &self.requirements
    }

    fn add_requirement(&mut self, requirement: Requirement) {
        self.requirements.add(requirement);
    }
}

impl Adjuster for Feature {
    fn adjust(&self, character: &mut Character) -> Result<(), SheetError> {
        for adjustment in &self.adjustments {
            adjustment.adjust(character)?;
        }
        Ok(())
    }

    // Same order as adjust; each adjustment commutes with itself.
    fn unadjust(&self, character: &mut Character) -> Result<(), SheetError> {
        for adjustment in &self.adjustments {
            adjustment.unadjust(character)?;
        }
        Ok(())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} [{}]",
            self.name.to_uppercase(),
            "*".repeat(self.adjustments.len())
        )?;
        for requirement in &self.requirements {
            writeln!(f, "requires: {}", requirement)?;
        }
        writeln!(f, "\"{}\"", self.description)
    }
}

/// A named bundle of features
#[derive(Debug, Clone)]
pub struct Specialty {
    name: String,
    description: String,
    features: EntryManager<Arc<Feature>>,
    requirements: EntryManager<Requirement>,
}

impl Specialty {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            features: EntryManager::new("feature"),
            requirements: EntryManager::new("requirement"),
        }
    }

    pub fn with_feature(mut self, feature: Arc<Feature>) -> Self {
        self.features.add(feature);
        self
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.add(requirement);
        self
    }

    pub fn add_feature(&mut self, feature: Arc<Feature>) {
        self.features.add(feature);
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn features(&self) -> Vec<Arc<Feature>> {
        self.features.all()
    }
}

impl Named for Specialty {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasRequirements for Specialty {
    fn requirements(&self) -> &EntryManager<Requirement> {
        &self.requirements
    }

    fn add_requirement(&mut self, requirement: Requirement) {
        self.requirements.add(requirement);
    }
}

impl Adjuster for Specialty {
    /// Grant every bundled feature through the character, so features it
    /// already has are not applied twice
    fn adjust(&self, character: &mut Character) -> Result<(), SheetError> {
        for feature in &self.features {
            character.add_feature(Arc::clone(feature))?;
        }
        Ok(())
    }

    /// Retract bundled features the character still has; ones removed by
    /// other means are skipped
    fn unadjust(&self, character: &mut Character) -> Result<(), SheetError> {
        for feature in &self.features {
            if character.has_feature(feature) {
                character.remove_feature(feature)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.name.to_uppercase(), self.description)
    }
}
