//! CLI command implementations

pub mod entries;
pub mod init;
pub mod new;
pub mod roll;
pub mod rules;
pub mod show;
pub mod vitals;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use charsheet_core::{Character, Config, DemoWorld, RuleBook, Scholar, Scribe, SheetError};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::cli::SheetArg;
use crate::colors::COLORS;
use crate::output::{ChangeData, CharacterData, JsonIssue, JsonResponse};

pub use entries::{run_feature, run_specialty};
pub use init::run_init;
pub use new::run_new;
pub use roll::run_roll;
pub use rules::run_rules;
pub use show::run_show;
pub use vitals::{run_damage, run_heal, run_temp_hp, run_xp};

/// Configuration and rulebook for the current directory
pub struct Context {
    pub config: Config,
    pub rules: Arc<dyn RuleBook>,
}

impl Context {
    /// Load `charsheet.toml` from the working directory (defaults if absent)
    pub fn load() -> Result<Self, SheetError> {
        let dir = std::env::current_dir()?;
        let config = Config::load_from_dir(&dir)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let rules = DemoWorld::new().with_dice_seed(config.charsheet.dice_seed);
        Self {
            config,
            rules: Arc::new(rules),
        }
    }

    /// The sheet named on the command line, or the configured default
    pub fn sheet_path(&self, arg: &SheetArg) -> PathBuf {
        arg.sheet
            .clone()
            .unwrap_or_else(|| self.config.charsheet.default_sheet.clone())
    }

    /// Read a saved character. A sheet that cannot be read completely is an
    /// error, so a partial load is never written back.
    pub fn load_character(&self, path: &Path) -> Result<Character, SheetError> {
        if !path.is_file() {
            return Err(SheetError::FileNotFound(path.display().to_string()));
        }
        debug!(path = %path.display(), "loading character");
        Scholar::new(Arc::clone(&self.rules))
            .reconciled()
            .build(path)
            .into_character()
    }

    pub fn save_character(&self, path: &Path, character: &Character) -> Result<(), SheetError> {
        Scribe::write_character(path, character, &self.config.charsheet.author_id)
    }
}

/// Report a failed command and return its exit code
pub fn report_error<T: serde::Serialize>(
    command: &str,
    data: T,
    error: &SheetError,
    sheet: Option<&Path>,
    json_output: bool,
) -> i32 {
    if json_output {
        let mut issue = JsonIssue::from(error);
        if let Some(sheet) = sheet {
            issue = issue.with_file(&sheet.display().to_string());
        }
        JsonResponse::error(command, data, vec![issue]).print();
    } else {
        eprintln!("{} {}", "error:".style(COLORS.fail), error);
    }
    error.exit_code()
}

/// What a sheet change did
#[derive(Debug)]
pub struct ChangeOutcome {
    pub changed: bool,
    pub leveled_up: Option<bool>,
    /// Human-readable summary
    pub message: String,
}

impl ChangeOutcome {
    pub fn changed(message: impl Into<String>) -> Self {
        Self {
            changed: true,
            leveled_up: None,
            message: message.into(),
        }
    }

    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            leveled_up: None,
            message: message.into(),
        }
    }
}

/// Load the sheet, apply `change`, write it back and report
pub fn run_change<F>(
    command: &str,
    sheet: &SheetArg,
    json_output: bool,
    quiet: bool,
    change: F,
) -> Result<i32, String>
where
    F: FnOnce(&Context, &mut Character) -> Result<ChangeOutcome, SheetError>,
{
    let context = match Context::load() {
        Ok(context) => context,
        Err(e) => return Ok(report_error(command, CharacterData::empty(""), &e, None, json_output)),
    };
    let path = context.sheet_path(sheet);
    let path_str = path.display().to_string();

    let result = context.load_character(&path).and_then(|mut character| {
        let outcome = change(&context, &mut character)?;
        if outcome.changed {
            context.save_character(&path, &character)?;
        }
        Ok((character, outcome))
    });

    let (character, outcome) = match result {
        Ok(done) => done,
        Err(e) => {
            return Ok(report_error(
                command,
                CharacterData::empty(&path_str),
                &e,
                Some(&path),
                json_output,
            ));
        }
    };

    let downed = character.hitpoints().is_dead();
    if json_output {
        let mut issues = vec![];
        if downed {
            issues.push(
                JsonIssue::warning("W001", format!("{} is downed", character.name()))
                    .with_file(&path_str),
            );
        }
        let data = ChangeData {
            action: command.to_string(),
            changed: outcome.changed,
            leveled_up: outcome.leveled_up,
            character: CharacterData::new(&path_str, &character),
        };
        JsonResponse::ok_with_issues(command, data, issues).print();
    } else if !quiet {
        if outcome.changed {
            println!("{}", outcome.message.style(COLORS.success));
        } else {
            println!("{}", outcome.message.style(COLORS.warning));
        }
        let hitpoints = character.hitpoints();
        println!(
            "  HP {}/{} (temp {})  XP {}/{}",
            hitpoints.base().current(),
            hitpoints.base().max(),
            hitpoints.temp_hp(),
            character.experience().current(),
            character.experience().max()
        );
        if downed {
            println!("  {}", format!("{} is downed", character.name()).style(COLORS.fail));
        }
    }
    Ok(0)
}
