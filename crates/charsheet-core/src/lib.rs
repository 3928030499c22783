//! charsheet-core: Rules engine, sheet parsing and sheet writing
//!
//! This crate provides the character model (stats, hitpoints, experience,
//! features, specialties), the rulebook contract with the bundled demo world,
//! and the plain-text sheet format used to save and load characters.

/// Core error types for charsheet operations
pub mod error;

/// Configuration handling
pub mod config;

/// Bounded integers
pub mod value;

/// Stats, hitpoints and experience
pub mod stat;

/// Name-indexed collections
pub mod entry;

pub mod requirement;

/// Reversible character mutations
pub mod adjustment;

/// Features and specialties
pub mod feature;

pub mod character;

/// Dice rolling
pub mod dice;

/// Rulebook contract and demo world
pub mod rulebook;

/// New-character assembly
pub mod creation;

/// Sheet parser
pub mod scholar;

/// Sheet writer
pub mod scribe;

// Re-exports for convenience
pub use adjustment::{Adjuster, Adjustment};
pub use character::Character;
pub use config::Config;
pub use creation::{CharacterDraft, create_character};
pub use dice::{Dice, DiceRoller, RollOptions};
pub use entry::{EntryManager, Named};
pub use error::SheetError;
pub use feature::{Feature, HasRequirements, Specialty};
pub use requirement::Requirement;
pub use rulebook::{DOWNED_FEATURE, DemoWorld, RuleBook};
pub use scholar::Scholar;
pub use scribe::Scribe;
pub use stat::{Experience, Hitpoints, Stat};
pub use value::Value;
