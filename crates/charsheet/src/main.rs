//! charsheet CLI - Tabletop character sheets from the command line

mod cli;
mod colors;
mod commands;
mod output;

use std::process::ExitCode;

use charsheet_core::CharacterDraft;
use cli::Commands;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log to stderr so JSON on stdout stays clean. `RUST_LOG` adds directives.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Init { force, author_id }) => {
            commands::run_init(force, author_id, cli.json, cli.quiet)
        }
        Some(Commands::New {
            name,
            stats,
            specialty,
            features,
            force,
            sheet,
        }) => {
            let mut draft = CharacterDraft::new(name);
            for (stat, value) in stats {
                draft = draft.assign(stat, value);
            }
            if let Some(specialty) = specialty {
                draft = draft.specialty(specialty);
            }
            for feature in features {
                draft = draft.pick(feature);
            }
            commands::run_new(draft, force, &sheet, cli.json, cli.quiet)
        }
        Some(Commands::Show { sheet }) => commands::run_show(&sheet, cli.json, cli.quiet),
        Some(Commands::Damage { amount, sheet }) => {
            commands::run_damage(amount, &sheet, cli.json, cli.quiet)
        }
        Some(Commands::Heal { amount, sheet }) => {
            commands::run_heal(amount, &sheet, cli.json, cli.quiet)
        }
        Some(Commands::TempHp { amount, sheet }) => {
            commands::run_temp_hp(amount, &sheet, cli.json, cli.quiet)
        }
        Some(Commands::Xp { amount, sheet }) => commands::run_xp(amount, &sheet, cli.json, cli.quiet),
        Some(Commands::Feature(entry_cmd)) => commands::run_feature(entry_cmd, cli.json, cli.quiet),
        Some(Commands::Specialty(entry_cmd)) => {
            commands::run_specialty(entry_cmd, cli.json, cli.quiet)
        }
        Some(Commands::Roll {
            advantage,
            reroll,
            times,
        }) => commands::run_roll(advantage, reroll, times, cli.json, cli.quiet),
        Some(Commands::Rules { topic }) => commands::run_rules(topic, cli.json, cli.quiet),
        None => {
            // No subcommand - print version info
            if !cli.quiet {
                println!("charsheet v{}", env!("CARGO_PKG_VERSION"));
                println!("Use --help for usage information");
            }
            Ok(0)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::cli::Cli;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
