//! Sheet parser
//!
//! Reads the plain-text sheet produced by `Character`'s `Display` impl back
//! into a character. Parsing is a line-oriented state machine: each trimmed
//! line is classified by the first rule it matches, in this order:
//!
//! 1. border lines made only of `| = [ ] # > / -` are skipped
//! 2. a line with both `*` and `|` carries the name
//! 3. a pipe-bordered line naming a primary stat carries that stat's value
//! 4. `HITPOINTS:`, `TEMP HP:` and `XP:` lines carry the vitals
//! 5. `SPECIALTIES` and `FEATURES` banners switch the list being read
//! 6. `N. name` lines add to the current list
//!
//! Anything else is ignored. Unreadable files and malformed numbers do not
//! abort the load: the error is logged and kept, and whatever was parsed
//! before it is still turned into a character.
//!
//! The sheet shows stat totals and hitpoints including temporary hitpoints.
//! By default those figures are loaded as bases and specialties and features
//! are replayed on top, so their adjustments count twice. A
//! [`Scholar::reconciled`] scholar instead backs the replayed modifiers and
//! temporary hitpoints out and restores max hitpoints gained by leveling,
//! reproducing the saved character exactly.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::character::Character;
use crate::entry::Named;
use crate::error::SheetError;
use crate::rulebook::RuleBook;

/// Name given to a character whose sheet has no name line
pub const UNNAMED_CHARACTER: &str = "Unnamed Character";

/// Largest max hitpoints accepted from a sheet
pub const MAX_SHEET_HITPOINTS: i32 = 999;

mod patterns {
    use std::sync::LazyLock;

    pub static BORDER: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"^[|=\[\]#>/-]+$").unwrap());

    pub static NUMBERED_ENTRY: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"^\d+\.\s+(.*)$").unwrap());

    pub static TRAILING_ANNOTATION: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"\[.*?\]$").unwrap());

    pub static INTEGER: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"-?\d+").unwrap());
}

/// Which list numbered entries are currently added to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    None,
    Specialties,
    Features,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::None => "NONE",
            Mode::Specialties => "SPECIALTIES",
            Mode::Features => "FEATURES",
        };
        f.write_str(label)
    }
}

/// Accumulates the fields of one sheet
pub struct Scholar {
    rulebook: Arc<dyn RuleBook>,
    stat_names: Vec<String>,
    mode: Mode,
    name: Option<String>,
    stats: Vec<(String, i32)>,
    hitpoints: Option<i32>,
    max_hitpoints: Option<i32>,
    temp_hp: Option<i32>,
    experience: Option<i32>,
    specialties: Vec<String>,
    features: Vec<String>,
    load_error: Option<SheetError>,
    reconcile: bool,
}

impl Scholar {
    pub fn new(rulebook: Arc<dyn RuleBook>) -> Self {
        let stat_names = rulebook.create_stats().names();
        Self {
            rulebook,
            stat_names,
            mode: Mode::None,
            name: None,
            stats: Vec::new(),
            hitpoints: None,
            max_hitpoints: None,
            temp_hp: None,
            experience: None,
            specialties: Vec::new(),
            features: Vec::new(),
            load_error: None,
            reconcile: false,
        }
    }

    /// Treat sheet figures as totals when building the character
    pub fn reconciled(mut self) -> Self {
        self.reconcile = true;
        self
    }

    /// Read and parse the sheet at `path`. A read failure is logged and
    /// recorded; see [`Scholar::load_error`].
    pub fn build(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        info!(path = %path.display(), "reading character sheet");
        match std::fs::read_to_string(path) {
            Ok(content) => self.parse_str(&content),
            Err(e) => {
                error!(path = %path.display(), error = %e, "could not read character sheet");
                let mut scholar = self;
                scholar.load_error = Some(SheetError::FileNotFound(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
                scholar
            }
        }
    }

    /// Parse sheet text. Stops at the first malformed numeric field.
    pub fn parse_str(mut self, content: &str) -> Self {
        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            if let Err(e) = self.process_line(line) {
                let e = at_line(e, line_number);
                error!(line = line_number, error = %e, "stopped reading character sheet");
                self.load_error = Some(e);
                break;
            }
        }
        info!(
            name = self.name.as_deref().unwrap_or(UNNAMED_CHARACTER),
            specialties = self.specialties.len(),
            features = self.features.len(),
            "finished reading character sheet"
        );
        self
    }

    /// Classify and absorb one line
    pub fn process_line(&mut self, line: &str) -> Result<(), SheetError> {
        let line = line.trim();
        if patterns::BORDER.is_match(line) {
            return Ok(());
        }
        debug!(mode = %self.mode, line, "processing line");

        if line.contains('*') && line.contains('|') {
            let name = Self::extract_name(line);
            if name.is_empty() {
                warn!(line, "name line without a name");
            } else {
                self.name = Some(name);
            }
        } else if self.is_stat_line(line) {
            let value = Self::extract_stat(line)?;
            self.record_stat(line, value);
        } else if line.starts_with("HITPOINTS") {
            self.hitpoints = Some(Self::extract_current_hp(line)?);
            self.max_hitpoints = Self::extract_max_hp(line);
        } else if line.starts_with("TEMP HP") {
            self.temp_hp = Some(Self::extract_temp_hp(line)?);
        } else if line.starts_with("XP") {
            self.experience = Some(Self::extract_current_xp(line)?);
        } else if line.contains("SPECIALTIES") {
            self.mode = Mode::Specialties;
        } else if line.contains("FEATURES") {
            self.mode = Mode::Features;
        } else if let Some(entry) = Self::extract_named_entry(line) {
            match self.mode {
                Mode::Specialties => self.specialties.push(entry),
                Mode::Features => self.features.push(entry),
                Mode::None => {}
            }
        }
        Ok(())
    }

    /// Stat rows are the pipe-bordered lines inside the sheet frame that
    /// mention a primary stat keyword
    fn is_stat_line(&self, line: &str) -> bool {
        line.starts_with('|')
            && self
                .stat_names
                .iter()
                .any(|name| line.contains(&name.to_uppercase()))
    }

    fn record_stat(&mut self, line: &str, value: i32) {
        // The stat name is the second token; the first is the left border.
        let Some(token) = line.split_whitespace().nth(1) else {
            warn!(line, "stat line without a stat name");
            return;
        };
        let stat = token.to_lowercase();
        if !self.stat_names.iter().any(|name| name == &stat) {
            warn!(line, stat = %stat, "unknown stat on sheet");
            return;
        }
        debug!(stat = %stat, value, "read stat");
        self.stats.push((stat, value));
    }

    /// Build a fresh character from what was parsed.
    ///
    /// Specialties and features are granted through the rulebook. Unless the
    /// scholar is [reconciled](Scholar::reconciled), their adjustments are
    /// applied on top of the stat values read from the sheet. A reconciled
    /// scholar also retracts bundled features the sheet no longer lists.
    /// Fails with [`SheetError::NotFound`] for names the rulebook lacks.
    pub fn character(&self) -> Result<Character, SheetError> {
        let name = self.name.as_deref().unwrap_or(UNNAMED_CHARACTER);
        let mut character = Character::new(name, Arc::clone(&self.rulebook));

        if !self.reconcile {
            self.apply_figures(&mut character)?;
        }
        for specialty in &self.specialties {
            let specialty = self.rulebook.specialty_by_name(specialty)?;
            character.add_specialty(specialty)?;
        }
        if self.reconcile {
            self.retract_unlisted_features(&mut character)?;
        }
        for feature in &self.features {
            let feature = self.rulebook.feature_by_name(feature)?;
            character.add_feature(feature)?;
        }
        if self.reconcile {
            self.apply_figures(&mut character)?;
        }
        Ok(character)
    }

    /// Strict variant of [`Scholar::character`]: a sheet that was not read
    /// to the end is an error instead of a partial character
    pub fn into_character(mut self) -> Result<Character, SheetError> {
        if let Some(e) = self.load_error.take() {
            return Err(e);
        }
        self.character()
    }

    /// Drop features granted by a specialty but removed before the sheet
    /// was saved
    fn retract_unlisted_features(&self, character: &mut Character) -> Result<(), SheetError> {
        let unlisted: Vec<_> = character
            .features()
            .iter()
            .filter(|feature| {
                !self
                    .features
                    .iter()
                    .any(|listed| listed.eq_ignore_ascii_case(feature.name()))
            })
            .cloned()
            .collect();
        for feature in unlisted {
            debug!(feature = feature.name(), "retracting feature missing from sheet");
            character.remove_feature(&feature)?;
        }
        Ok(())
    }

    fn apply_figures(&self, character: &mut Character) -> Result<(), SheetError> {
        // Vitals the sheet does not carry keep the rulebook's starting
        // values rather than dropping to zero.
        for (stat, value) in &self.stats {
            let stat = character.stat_by_name_mut(stat)?;
            let base = if self.reconcile {
                value.saturating_sub(stat.current_modifier())
            } else {
                *value
            };
            stat.set_current_base(base);
        }
        if let Some(max) = self.max_hitpoints.filter(|_| self.reconcile) {
            character.hitpoints_mut().set_max_base(max);
        }
        if let Some(hp) = self.hitpoints {
            let base = match self.temp_hp {
                Some(temp) if self.reconcile => hp.saturating_sub(temp.max(0)),
                _ => hp,
            };
            character.hitpoints_mut().set_current_base(base);
        }
        if let Some(temp) = self.temp_hp {
            character.set_temp_hp(temp);
        }
        if let Some(xp) = self.experience {
            character.experience_mut().set_current(xp);
        }
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn specialty_names(&self) -> &[String] {
        &self.specialties
    }

    pub fn feature_names(&self) -> &[String] {
        &self.features
    }

    /// The error that cut the load short, if any
    pub fn load_error(&self) -> Option<&SheetError> {
        self.load_error.as_ref()
    }

    /// Whether the whole sheet was read and it carried a name
    pub fn is_complete(&self) -> bool {
        self.load_error.is_none() && self.name.is_some()
    }

    /// Text between the first and last `*`, uppercased
    pub fn extract_name(line: &str) -> String {
        match (line.find('*'), line.rfind('*')) {
            (Some(first), Some(last)) if first < last => {
                line[first + 1..last].trim().to_uppercase()
            }
            _ => String::new(),
        }
    }

    /// First integer on a stat row, ignoring the frame borders
    pub fn extract_stat(line: &str) -> Result<i32, SheetError> {
        let inner = line.trim();
        let inner = inner.strip_prefix('|').unwrap_or(inner).trim();
        let inner = inner.strip_suffix('|').unwrap_or(inner).trim();
        patterns::INTEGER
            .find_iter(inner)
            .find_map(|m| m.as_str().parse::<i32>().ok())
            .ok_or_else(|| malformed(line))
    }

    /// Numerator of `HITPOINTS:<current>/<max>`
    pub fn extract_current_hp(line: &str) -> Result<i32, SheetError> {
        numerator_after_colon(line)
    }

    /// Denominator of `HITPOINTS:<current>/<max>`, if readable and within
    /// `0..=MAX_SHEET_HITPOINTS`
    pub fn extract_max_hp(line: &str) -> Option<i32> {
        let (_, max) = line.split_once('/')?;
        let max: i32 = max.trim().parse().ok()?;
        if !(0..=MAX_SHEET_HITPOINTS).contains(&max) {
            warn!(line, max, "ignoring implausible max hitpoints");
            return None;
        }
        Some(max)
    }

    /// Numerator of `XP:<current>/<max>`
    pub fn extract_current_xp(line: &str) -> Result<i32, SheetError> {
        numerator_after_colon(line)
    }

    /// Value of `TEMP HP: <n>`
    pub fn extract_temp_hp(line: &str) -> Result<i32, SheetError> {
        let (_, value) = line.split_once(':').ok_or_else(|| malformed(line))?;
        value.trim().parse().map_err(|_| malformed(line))
    }

    /// Lowercased name from an `N. name [annotation]` line
    pub fn extract_named_entry(line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() || patterns::BORDER.is_match(line) {
            return None;
        }
        let caps = patterns::NUMBERED_ENTRY.captures(line)?;
        let entry = caps.get(1).map_or("", |m| m.as_str()).trim();
        let entry = patterns::TRAILING_ANNOTATION.replace(entry, "");
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }
        Some(entry.to_lowercase())
    }
}

impl fmt::Debug for Scholar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scholar")
            .field("rulebook", &RuleBook::name(self.rulebook.as_ref()))
            .field("mode", &self.mode)
            .field("name", &self.name)
            .field("stats", &self.stats)
            .field("hitpoints", &self.hitpoints)
            .field("max_hitpoints", &self.max_hitpoints)
            .field("temp_hp", &self.temp_hp)
            .field("experience", &self.experience)
            .field("specialties", &self.specialties)
            .field("features", &self.features)
            .field("load_error", &self.load_error)
            .field("reconcile", &self.reconcile)
            .finish()
    }
}

impl fmt::Display for Scholar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scholar processing mode: {}, characterName: {}",
            self.mode,
            self.name.as_deref().unwrap_or(UNNAMED_CHARACTER)
        )
    }
}

fn malformed(line: &str) -> SheetError {
    SheetError::MalformedNumber {
        line: line.to_string(),
        line_number: None,
    }
}

fn at_line(error: SheetError, number: usize) -> SheetError {
    match error {
        SheetError::MalformedNumber { line, .. } => SheetError::MalformedNumber {
            line,
            line_number: Some(number),
        },
        other => other,
    }
}

fn numerator_after_colon(line: &str) -> Result<i32, SheetError> {
    let (_, fraction) = line.split_once(':').ok_or_else(|| malformed(line))?;
    let numerator = fraction.split('/').next().unwrap_or("");
    numerator.trim().parse().map_err(|_| malformed(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rulebook::DemoWorld;

    fn rules() -> Arc<dyn RuleBook> {
        Arc::new(DemoWorld::new())
    }

    const HERO_SHEET: &str = "\
Student ID: 0
   _______________________________
 / \\                              |
 \\__|                             |
    |          * HERO *          |
    |                             |
    |                             |
    |  ___________________________|__
    \\_/_____________________________/
HITPOINTS:4/6
[ ][ ][ ][ ][ ][ ]
TEMP HP: 1
XP:2/5
[ ][ ][ ][ ][ ]
        |================================\\
[0]#####>--------  SPECIALTIES  ---------->
        |================================/

1. farmer

        |================================\\
[0]#####>----------  FEATURES  ----------->
        |================================/

1. grit

";

    #[test]
    fn test_hero_sheet() {
        let scholar = Scholar::new(rules()).parse_str(HERO_SHEET);
        assert!(scholar.is_complete());
        assert_eq!(scholar.mode(), Mode::Features);

        let character = scholar.character().unwrap();
        assert_eq!(character.name(), "HERO");
        assert_eq!(character.hitpoints().base().current(), 4);
        assert_eq!(character.hitpoints().temp_hp(), 1);
        assert_eq!(character.experience().current(), 2);
        assert!(character.has_specialty_named("farmer"));
        assert!(character.has_feature_named("grit"));
        assert!(character.has_feature_named("early riser"));
        assert!(character.has_feature_named("weather minded"));
        // grit came in through farmer and is not granted twice
        assert_eq!(character.features().len(), 3);
    }

    #[test]
    fn test_build_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.txt");
        std::fs::write(&path, HERO_SHEET).unwrap();

        let character = Scholar::new(rules()).build(&path).character().unwrap();
        assert_eq!(character.name(), "HERO");
        assert_eq!(character.hitpoints().base().current(), 4);
    }

    #[test]
    fn test_missing_file_yields_default_character() {
        let dir = tempfile::tempdir().unwrap();
        let scholar = Scholar::new(rules()).build(dir.path().join("missing.txt"));

        assert!(matches!(scholar.load_error(), Some(SheetError::FileNotFound(_))));
        assert!(!scholar.is_complete());
        let character = scholar.character().unwrap();
        assert_eq!(character.name(), UNNAMED_CHARACTER);
        assert_eq!(character.hitpoints().total(), 6);
    }

    #[test]
    fn test_plain_character_round_trip() {
        let rules = rules();
        let mut character = Character::new("ADA", Arc::clone(&rules));
        character.stat_by_name_mut("force").unwrap().set_current_base(2);
        character.stat_by_name_mut("empathy").unwrap().set_current_base(-1);
        character.damage(2).unwrap();
        character.adjust_xp(3);
        character
            .add_feature(rules.feature_by_name("write").unwrap())
            .unwrap();

        let sheet = character.to_string();
        let loaded = Scholar::new(rules).parse_str(&sheet).character().unwrap();
        assert_eq!(loaded.to_string(), sheet);
    }

    #[test]
    fn test_load_reapplies_stat_adjustments() {
        let rules = rules();
        let mut character = Character::new("GRITTY", Arc::clone(&rules));
        character
            .add_feature(rules.feature_by_name("grit").unwrap())
            .unwrap();
        assert_eq!(character.stat_by_name("resilience").unwrap().total(), 1);

        let loaded = Scholar::new(rules)
            .parse_str(&character.to_string())
            .character()
            .unwrap();
        // The sheet shows the adjusted total, which is read as the base and
        // then adjusted again.
        assert_eq!(loaded.stat_by_name("resilience").unwrap().total(), 2);
        assert_eq!(loaded.hitpoints().base().max(), 7);
    }

    #[test]
    fn test_reconciled_load_reproduces_sheet() {
        let rules = rules();
        let mut character = Character::new("TILLER", Arc::clone(&rules));
        character.stat_by_name_mut("force").unwrap().set_current_base(2);
        character
            .add_specialty(rules.specialty_by_name("farmer").unwrap())
            .unwrap();
        character.damage(1).unwrap();
        character.set_temp_hp(2);

        let sheet = character.to_string();
        let loaded = Scholar::new(rules)
            .reconciled()
            .parse_str(&sheet)
            .character()
            .unwrap();

        assert_eq!(loaded.stat_by_name("resilience").unwrap().total(), 1);
        assert_eq!(loaded.stat_by_name("resilience").unwrap().base().current(), 0);
        assert_eq!(loaded.hitpoints().base().current(), 5);
        assert_eq!(loaded.hitpoints().base().max(), 7);
        assert_eq!(loaded.hitpoints().temp_hp(), 2);
        assert_eq!(loaded.to_string(), sheet);
    }

    #[test]
    fn test_default_load_counts_temp_hp_into_base() {
        let character = Scholar::new(rules()).parse_str(HERO_SHEET).character().unwrap();
        // HITPOINTS:4/6 already includes the 1 temporary hitpoint
        assert_eq!(character.hitpoints().total(), 5);

        let reconciled = Scholar::new(rules())
            .reconciled()
            .parse_str(HERO_SHEET)
            .character()
            .unwrap();
        assert_eq!(reconciled.hitpoints().base().current(), 3);
        assert_eq!(reconciled.hitpoints().total(), 4);
    }

    #[test]
    fn test_reconciled_load_keeps_leveled_max_hitpoints() {
        let rules = rules();
        let mut character = Character::new("VETERAN", Arc::clone(&rules));
        assert!(character.adjust_xp(5));
        assert_eq!(character.hitpoints().base().max(), 7);

        let sheet = character.to_string();
        let loaded = Scholar::new(Arc::clone(&rules))
            .reconciled()
            .parse_str(&sheet)
            .character()
            .unwrap();
        assert_eq!(loaded.hitpoints().base().max(), 7);
        assert_eq!(loaded.to_string(), sheet);

        let plain = Scholar::new(rules).parse_str(&sheet).character().unwrap();
        assert_eq!(plain.hitpoints().base().max(), 6);
    }

    #[test]
    fn test_reconciled_load_keeps_removed_bundled_feature_out() {
        let rules = rules();
        let mut character = Character::new("TILLER", Arc::clone(&rules));
        let farmer = rules.specialty_by_name("farmer").unwrap();
        character.add_specialty(Arc::clone(&farmer)).unwrap();
        character
            .remove_feature(&rules.feature_by_name("grit").unwrap())
            .unwrap();

        let sheet = character.to_string();
        let mut loaded = Scholar::new(Arc::clone(&rules))
            .reconciled()
            .parse_str(&sheet)
            .character()
            .unwrap();
        assert!(!loaded.has_feature_named("grit"));
        assert_eq!(loaded.stat_by_name("resilience").unwrap().base().current(), 0);
        assert_eq!(loaded.hitpoints().base().max(), 6);
        assert_eq!(loaded.to_string(), sheet);

        loaded.remove_specialty(&farmer).unwrap();
        assert_eq!(loaded.stat_by_name("resilience").unwrap().total(), 0);
        assert_eq!(loaded.hitpoints().base().max(), 6);
    }

    #[test]
    fn test_reconciled_load_saturates_extreme_numbers() {
        let sheet = "SPECIALTIES\n1. bandit\n|  FORCE -2147483648 : (0 + 0)  |\n";
        let character = Scholar::new(rules())
            .reconciled()
            .parse_str(sheet)
            .character()
            .unwrap();
        assert_eq!(character.stat_by_name("force").unwrap().total(), -2);

        let sheet = "HITPOINTS:-2147483648/6\nTEMP HP: 1\n";
        let character = Scholar::new(rules())
            .reconciled()
            .parse_str(sheet)
            .character()
            .unwrap();
        assert_eq!(character.hitpoints().base().current(), 0);
        assert_eq!(character.hitpoints().temp_hp(), 1);
    }

    #[test]
    fn test_implausible_max_hitpoints_ignored() {
        assert_eq!(Scholar::extract_max_hp("HITPOINTS:4/2000000000"), None);
        assert_eq!(Scholar::extract_max_hp("HITPOINTS:4/-3"), None);
        assert_eq!(
            Scholar::extract_max_hp("HITPOINTS:4/999"),
            Some(MAX_SHEET_HITPOINTS)
        );

        let character = Scholar::new(rules())
            .reconciled()
            .parse_str("HITPOINTS:4/2000000000\n")
            .character()
            .unwrap();
        assert_eq!(character.hitpoints().base().max(), 6);
        assert_eq!(character.hitpoints().base().current(), 4);
    }

    #[test]
    fn test_missing_vitals_keep_starting_values() {
        let character = Scholar::new(rules())
            .parse_str("|  * HERO *  |\n")
            .character()
            .unwrap();
        assert_eq!(character.hitpoints().base().current(), 6);
        assert_eq!(character.hitpoints().base().max(), 6);
        assert_eq!(character.experience().current(), 0);
        assert_eq!(character.experience().max(), 5);
    }

    #[test]
    fn test_feature_named_after_stat_is_not_a_stat_line() {
        let rules = rules();
        let mut character = Character::new("SMITH", Arc::clone(&rules));
        character
            .add_feature(rules.feature_by_name("analytical mind").unwrap())
            .unwrap();

        let scholar = Scholar::new(rules).parse_str(&character.to_string());
        assert!(scholar.load_error().is_none());
        assert_eq!(scholar.feature_names(), &["analytical mind".to_string()]);
    }

    #[test]
    fn test_malformed_number_stops_parsing() {
        let sheet = "|  * BAD *  |\nHITPOINTS:x/6\nXP:3/5\n";
        let scholar = Scholar::new(rules()).parse_str(sheet);
        match scholar.load_error() {
            Some(SheetError::MalformedNumber { line_number, .. }) => {
                assert_eq!(*line_number, Some(2));
            }
            other => panic!("expected malformed number, got {:?}", other),
        }
        let character = scholar.character().unwrap();
        assert_eq!(character.name(), "BAD");
        assert_eq!(character.experience().current(), 0);
    }

    #[test]
    fn test_into_character_is_strict() {
        let err = Scholar::new(rules())
            .parse_str("XP:many/5\n")
            .into_character()
            .unwrap_err();
        assert_eq!(err.code(), "E003");

        let character = Scholar::new(rules())
            .parse_str(HERO_SHEET)
            .into_character()
            .unwrap();
        assert_eq!(character.name(), "HERO");
    }

    #[test]
    fn test_unknown_entry_fails_on_character() {
        let sheet = "SPECIALTIES\n1. wizard\n";
        let scholar = Scholar::new(rules()).parse_str(sheet);
        assert_eq!(scholar.specialty_names(), &["wizard".to_string()]);
        let err = scholar.character().unwrap_err();
        assert!(matches!(err, SheetError::NotFound { kind: "specialty", .. }));
    }

    #[test]
    fn test_entries_outside_lists_are_ignored() {
        let scholar = Scholar::new(rules()).parse_str("1. grit\n");
        assert!(scholar.feature_names().is_empty());
        assert_eq!(scholar.mode(), Mode::None);
    }

    #[test]
    fn test_stat_lines() {
        let sheet = "|  FORCE 2 : (1 + 1)     |\n|  EMPATHY -2 : (0 + -2)  |\n";
        let character = Scholar::new(rules()).parse_str(sheet).character().unwrap();
        assert_eq!(character.stat_by_name("force").unwrap().base().current(), 2);
        assert_eq!(character.stat_by_name("empathy").unwrap().base().current(), -2);
    }

    #[test]
    fn test_extract_name() {
        assert_eq!(Scholar::extract_name("|   * sir kay *   |"), "SIR KAY");
        assert_eq!(Scholar::extract_name("| * |"), "");
    }

    #[test]
    fn test_extract_stat() {
        assert_eq!(Scholar::extract_stat("|  QUICKNESS 3 : (2 + 1) |").unwrap(), 3);
        assert_eq!(Scholar::extract_stat("EMPATHY -2 : (0 + -2)").unwrap(), -2);
        let err = Scholar::extract_stat("|  FORCE  |").unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[test]
    fn test_extract_vitals() {
        assert_eq!(Scholar::extract_current_hp("HITPOINTS:4/6").unwrap(), 4);
        assert_eq!(Scholar::extract_max_hp("HITPOINTS:4/6"), Some(6));
        assert_eq!(Scholar::extract_max_hp("HITPOINTS:4"), None);
        assert_eq!(Scholar::extract_current_xp("XP: 2 / 5").unwrap(), 2);
        assert_eq!(Scholar::extract_temp_hp("TEMP HP: 3").unwrap(), 3);
        assert!(Scholar::extract_temp_hp("TEMP HP").is_err());
        assert!(Scholar::extract_current_hp("HITPOINTS:/6").is_err());
    }

    #[test]
    fn test_extract_named_entry() {
        assert_eq!(
            Scholar::extract_named_entry("1. ANALYTICAL MIND [**]"),
            Some("analytical mind".to_string())
        );
        assert_eq!(
            Scholar::extract_named_entry("12.   Early Riser"),
            Some("early riser".to_string())
        );
        assert_eq!(Scholar::extract_named_entry("|====/"), None);
        assert_eq!(Scholar::extract_named_entry("requires: empathy >= 0"), None);
        assert_eq!(Scholar::extract_named_entry("1.grit"), None);
    }

    #[test]
    fn test_display() {
        let scholar = Scholar::new(rules()).parse_str("|  * HERO *  |\n");
        assert_eq!(
            scholar.to_string(),
            "Scholar processing mode: NONE, characterName: HERO"
        );
    }

    #[test]
    fn test_rulebook_name_in_debug() {
        let scholar = Scholar::new(rules());
        assert!(format!("{:?}", scholar).contains("demo world"));
    }
}
