//! CLI argument parsing with clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Charsheet - Tabletop character sheets from the command line
#[derive(Parser)]
#[command(name = "charsheet")]
#[command(version = VERSION)]
#[command(about = "Build, track, and roll for tabletop characters")]
#[command(long_about = "Charsheet keeps a tabletop character in a plain-text sheet.\n\nCreate a character against the demo world rulebook, then track damage, healing, experience, features and specialties. Every change is written back to the sheet file.")]
pub struct Cli {
    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which sheet a command works on
#[derive(Args, Debug, Clone, Default)]
pub struct SheetArg {
    /// Sheet file (defaults to `default_sheet` from charsheet.toml)
    #[arg(short, long)]
    pub sheet: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default charsheet.toml in the current directory
    #[command(long_about = "Write a default charsheet.toml in the current directory.\n\nSettings:\n  author_id      Written as the Student ID header of saved sheets\n  default_sheet  Sheet used when --sheet is not given\n  dice_seed      Optional seed for reproducible rolls")]
    Init {
        /// Overwrite an existing charsheet.toml
        #[arg(long)]
        force: bool,

        /// Author id for saved sheets
        #[arg(long)]
        author_id: Option<String>,
    },

    /// Create a new character sheet
    ///
    /// Stats are assigned from the rulebook's stat spread, each value used once.
    #[command(long_about = "Create a new character sheet.\n\nStats are assigned from the rulebook's stat spread (-2, -1, 0, 1, 2 in the demo world), each value used at most once. Picked features count against the rulebook's pick limit; features granted by the specialty do not.\n\nExample:\n  charsheet new Brakka --stat force=2 --stat resilience=1 --specialty smith --feature write")]
    New {
        /// Character name
        name: String,

        /// Stat assignment as name=value (repeatable)
        #[arg(long = "stat", value_name = "NAME=VALUE", value_parser = parse_stat_assignment)]
        stats: Vec<(String, i32)>,

        /// Specialty to start with
        #[arg(long)]
        specialty: Option<String>,

        /// Feature to pick (repeatable)
        #[arg(long = "feature", value_name = "NAME")]
        features: Vec<String>,

        /// Overwrite an existing sheet
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        sheet: SheetArg,
    },

    /// Print a character sheet
    Show {
        #[command(flatten)]
        sheet: SheetArg,
    },

    /// Deal damage (temporary hitpoints absorb it first)
    Damage {
        /// Amount of damage
        amount: i32,

        #[command(flatten)]
        sheet: SheetArg,
    },

    /// Heal base hitpoints
    Heal {
        /// Amount healed
        amount: i32,

        #[command(flatten)]
        sheet: SheetArg,
    },

    /// Set temporary hitpoints
    #[command(name = "temp-hp")]
    TempHp {
        /// New temporary hitpoints (negative values count as zero)
        #[arg(allow_negative_numbers = true)]
        amount: i32,

        #[command(flatten)]
        sheet: SheetArg,
    },

    /// Gain or lose experience
    ///
    /// Reaching the experience maximum levels up: experience resets and max
    /// hitpoints rise by one.
    Xp {
        /// Experience to add (negative to remove)
        #[arg(allow_negative_numbers = true)]
        amount: i32,

        #[command(flatten)]
        sheet: SheetArg,
    },

    /// Manage the character's features
    #[command(subcommand)]
    Feature(EntryCommands),

    /// Manage the character's specialties
    #[command(subcommand)]
    Specialty(EntryCommands),

    /// Roll two dice
    #[command(long_about = "Roll two dice and print the total.\n\nWith --advantage the dice are rolled twice and the better total kept. With --reroll N any die showing N is rerolled once.")]
    Roll {
        /// Roll twice, keep the better total
        #[arg(long)]
        advantage: bool,

        /// Reroll any die showing this face, once
        #[arg(long, value_name = "FACE")]
        reroll: Option<u32>,

        /// Number of rolls
        #[arg(long, default_value_t = 1)]
        times: u32,
    },

    /// Browse the rulebook
    Rules {
        #[command(subcommand)]
        topic: Option<RulesTopic>,
    },
}

/// Add, remove or list features or specialties on a sheet
#[derive(Subcommand, Debug, Clone)]
pub enum EntryCommands {
    /// Grant an entry from the rulebook
    Add {
        /// Entry name
        name: String,

        /// Grant even if requirements are not met
        #[arg(long)]
        ignore_requirements: bool,

        #[command(flatten)]
        sheet: SheetArg,
    },

    /// Take an entry away
    Remove {
        /// Entry name
        name: String,

        #[command(flatten)]
        sheet: SheetArg,
    },

    /// List entries the character qualifies for
    Available {
        #[command(flatten)]
        sheet: SheetArg,
    },
}

/// What part of the rulebook to print
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesTopic {
    /// Primary stats
    Stats,
    /// Every feature with its requirements
    Features,
    /// Every specialty with its features
    Specialties,
}

fn parse_stat_assignment(raw: &str) -> Result<(String, i32), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let value = value
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid value for '{}': {}", name.trim(), e))?;
    Ok((name.trim().to_string(), value))
}

/// Get the command args for use in the application
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_stat_assignment() {
        assert_eq!(
            parse_stat_assignment("force=2").unwrap(),
            ("force".to_string(), 2)
        );
        assert_eq!(
            parse_stat_assignment("empathy = -1").unwrap(),
            ("empathy".to_string(), -1)
        );
        assert!(parse_stat_assignment("force").is_err());
        assert!(parse_stat_assignment("force=lots").is_err());
    }

    #[test]
    fn test_new_command_args() {
        let cli = Cli::try_parse_from([
            "charsheet",
            "new",
            "Brakka",
            "--stat",
            "force=2",
            "--stat",
            "empathy=-1",
            "--feature",
            "write",
            "--sheet",
            "brakka.txt",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::New {
                name,
                stats,
                features,
                sheet,
                ..
            }) => {
                assert_eq!(name, "Brakka");
                assert_eq!(stats.len(), 2);
                assert_eq!(stats[1], ("empathy".to_string(), -1));
                assert_eq!(features, vec!["write"]);
                assert_eq!(sheet.sheet, Some(PathBuf::from("brakka.txt")));
            }
            _ => panic!("expected new command"),
        }
    }

    #[test]
    fn test_negative_xp() {
        let cli = Cli::try_parse_from(["charsheet", "xp", "-2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Xp { amount: -2, .. })));
    }

    #[test]
    fn test_feature_subcommand() {
        let cli = Cli::try_parse_from(["charsheet", "feature", "add", "grit"]).unwrap();
        match cli.command {
            Some(Commands::Feature(EntryCommands::Add { name, .. })) => assert_eq!(name, "grit"),
            _ => panic!("expected feature add"),
        }
    }
}
