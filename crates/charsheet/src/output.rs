//! JSON output formatting

use charsheet_core::{Character, Feature, HasRequirements, Named, SheetError, Specialty, Stat};
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: &str = "1";

/// JSON response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    /// Schema version for forward compatibility
    pub schema_version: String,
    /// Command that generated this response
    pub command: String,
    /// Status: "ok" or "error"
    pub status: String,
    /// Command-specific payload
    pub data: T,
    /// Errors and warnings
    pub issues: Vec<JsonIssue>,
}

impl<T> JsonResponse<T> {
    /// Create a successful response
    pub fn ok(command: &str, data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "ok".to_string(),
            data,
            issues: vec![],
        }
    }

    /// Create a successful response with issues
    pub fn ok_with_issues(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "ok".to_string(),
            data,
            issues,
        }
    }

    /// Create an error response
    pub fn error(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: "error".to_string(),
            data,
            issues,
        }
    }
}

impl<T: Serialize> JsonResponse<T> {
    /// Print as pretty JSON on stdout
    pub fn print(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("error: failed to serialize response: {}", e),
        }
    }
}

/// Issue object structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIssue {
    /// Error/warning code (e.g., "E001")
    pub code: String,
    /// Severity level
    pub severity: String,
    /// Human-readable message
    pub message: String,
    /// Sheet path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Line number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl From<&SheetError> for JsonIssue {
    fn from(error: &SheetError) -> Self {
        Self {
            code: error.code().to_string(),
            severity: "error".to_string(),
            message: error.to_string(),
            file: None,
            line: error.line(),
        }
    }
}

impl JsonIssue {
    /// A warning that does not fail the command
    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: "warning".to_string(),
            message: message.into(),
            file: None,
            line: None,
        }
    }

    /// Set the file path
    pub fn with_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }
}

/// Data payload for init command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitData {
    /// Path to the written config
    pub path: String,
    pub author_id: String,
    pub default_sheet: String,
}

/// A stat as shown on the sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatData {
    pub name: String,
    pub total: i32,
    pub base: i32,
    pub modifier: i32,
}

impl From<&Stat> for StatData {
    fn from(stat: &Stat) -> Self {
        Self {
            name: stat.name().to_string(),
            total: stat.total(),
            base: stat.base().current(),
            modifier: stat.current_modifier(),
        }
    }
}

/// Hitpoints summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitpointsData {
    pub current: i32,
    pub max: i32,
    pub temp: i32,
    pub downed: bool,
}

/// Experience summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceData {
    pub current: i32,
    pub max: i32,
}

/// Data payload describing a whole character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterData {
    /// Sheet path the character was read from or written to
    pub sheet: String,
    pub name: String,
    pub stats: Vec<StatData>,
    pub hitpoints: HitpointsData,
    pub experience: ExperienceData,
    pub specialties: Vec<String>,
    pub features: Vec<String>,
}

impl CharacterData {
    pub fn new(sheet: &str, character: &Character) -> Self {
        let hitpoints = character.hitpoints();
        Self {
            sheet: sheet.to_string(),
            name: character.name().to_string(),
            stats: character.stats().iter().map(StatData::from).collect(),
            hitpoints: HitpointsData {
                current: hitpoints.base().current(),
                max: hitpoints.base().max(),
                temp: hitpoints.temp_hp(),
                downed: hitpoints.is_dead(),
            },
            experience: ExperienceData {
                current: character.experience().current(),
                max: character.experience().max(),
            },
            specialties: character.specialties().names(),
            features: character.features().names(),
        }
    }

    /// Placeholder payload for error responses
    pub fn empty(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            name: String::new(),
            stats: vec![],
            hitpoints: HitpointsData {
                current: 0,
                max: 0,
                temp: 0,
                downed: false,
            },
            experience: ExperienceData { current: 0, max: 0 },
            specialties: vec![],
            features: vec![],
        }
    }
}

/// Data payload for commands that change a sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeData {
    /// What was done (e.g. "damage", "feature add")
    pub action: String,
    /// Whether the character actually changed
    pub changed: bool,
    /// Set by `xp` when a level was gained
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leveled_up: Option<bool>,
    pub character: CharacterData,
}

/// Data payload for roll command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollData {
    pub advantage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reroll: Option<u32>,
    pub rolls: Vec<u32>,
}

/// A feature as listed by the rules command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub name: String,
    pub description: String,
    pub requires: Vec<String>,
    pub adjustments: usize,
}

impl From<&Feature> for FeatureSummary {
    fn from(feature: &Feature) -> Self {
        Self {
            name: feature.name().to_string(),
            description: feature.description().to_string(),
            requires: feature
                .requirements()
                .iter()
                .map(|r| r.to_string())
                .collect(),
            adjustments: feature.adjustments().len(),
        }
    }
}

/// A specialty as listed by the rules command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtySummary {
    pub name: String,
    pub description: String,
    pub requires: Vec<String>,
    pub features: Vec<String>,
}

impl From<&Specialty> for SpecialtySummary {
    fn from(specialty: &Specialty) -> Self {
        Self {
            name: specialty.name().to_string(),
            description: specialty.description().to_string(),
            requires: specialty
                .requirements()
                .iter()
                .map(|r| r.to_string())
                .collect(),
            features: specialty
                .features()
                .iter()
                .map(|f| f.name().to_string())
                .collect(),
        }
    }
}

/// Data payload for rules command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesData {
    pub name: String,
    pub edition: f64,
    pub feature_pick_count: usize,
    pub stat_spread: Vec<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<StatData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specialties: Vec<SpecialtySummary>,
}

/// Data payload for the `available` subcommands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableData {
    pub kind: String,
    pub sheet: String,
    pub names: Vec<String>,
}
