//! Error types for charsheet operations

use thiserror::Error;

/// Core error type for charsheet operations
#[derive(Error, Debug)]
pub enum SheetError {
    // === Lookup errors (E001-E002) ===
    /// E001: No entry with the requested name
    #[error("E001: No {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },

    /// E002: A rule referenced a stat the character does not have
    #[error("E002: Character has no stat named '{stat}'")]
    UnknownStat { stat: String },

    // === Sheet parsing errors (E003-E004) ===
    /// E003: A numeric field on the sheet could not be read
    #[error("E003: No valid number found in line: {line}")]
    MalformedNumber { line: String, line_number: Option<usize> },

    /// E004: General sheet structure issue
    #[error("E004: parse error: {message}")]
    Parse {
        message: String,
        line_number: Option<usize>,
    },

    // === Character creation errors (E005-E007) ===
    /// E005: Stat allocation does not match the rulebook's spread
    #[error("E005: Invalid stat allocation: {reason}")]
    InvalidAllocation { reason: String },

    /// E006: More features picked than the rulebook allows
    #[error("E006: Too many features picked: {picked} (at most {allowed})")]
    TooManyPicks { picked: usize, allowed: usize },

    /// E007: A picked feature or specialty is gated by unmet requirements
    #[error("E007: Requirements not met for '{name}'")]
    RequirementsNotMet { name: String },

    // === Command errors (E010) ===
    /// E010: A command argument was rejected before touching the sheet
    #[error("E010: Invalid input: {reason}")]
    InvalidInput { reason: String },

    // === IO and system errors ===
    /// File not found or unreadable
    #[error("file not found or unreadable: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl SheetError {
    /// Shorthand for a failed name lookup
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        SheetError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Get the error code (e.g., "E001", "E002")
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::NotFound { .. } => "E001",
            SheetError::UnknownStat { .. } => "E002",
            SheetError::MalformedNumber { .. } => "E003",
            SheetError::Parse { .. } => "E004",
            SheetError::InvalidAllocation { .. } => "E005",
            SheetError::TooManyPicks { .. } => "E006",
            SheetError::RequirementsNotMet { .. } => "E007",
            SheetError::FileNotFound(_) => "E008",
            SheetError::Io(_) => "E008",
            SheetError::Config(_) => "E009",
            SheetError::InvalidInput { .. } => "E010",
        }
    }

    /// Get the sheet line number associated with this error, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            SheetError::MalformedNumber { line_number, .. } => *line_number,
            SheetError::Parse { line_number, .. } => *line_number,
            _ => None,
        }
    }

    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            SheetError::NotFound { .. } => 3, // Unknown rule or entry

            SheetError::UnknownStat { .. } => 70, // Rulebook and character disagree

            SheetError::MalformedNumber { .. } | SheetError::Parse { .. } => 1, // Bad sheet

            SheetError::InvalidAllocation { .. }
            | SheetError::TooManyPicks { .. }
            | SheetError::RequirementsNotMet { .. } => 1, // Creation rejected

            SheetError::InvalidInput { .. } => 1, // Bad argument

            SheetError::FileNotFound(_) | SheetError::Io(_) => 2, // File errors

            SheetError::Config(_) => 4, // Configuration error
        }
    }
}
