//! Implementation of the `charsheet feature` and `charsheet specialty` commands

use std::sync::Arc;

use charsheet_core::{Character, HasRequirements, Named, SheetError};

use super::{ChangeOutcome, Context, report_error, run_change};
use crate::cli::{EntryCommands, SheetArg};
use crate::output::{AvailableData, JsonResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Feature,
    Specialty,
}

impl EntryKind {
    fn label(self) -> &'static str {
        match self {
            EntryKind::Feature => "feature",
            EntryKind::Specialty => "specialty",
        }
    }
}

/// Run a `feature` subcommand
pub fn run_feature(command: EntryCommands, json_output: bool, quiet: bool) -> Result<i32, String> {
    run_entry(EntryKind::Feature, command, json_output, quiet)
}

/// Run a `specialty` subcommand
pub fn run_specialty(
    command: EntryCommands,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    run_entry(EntryKind::Specialty, command, json_output, quiet)
}

fn run_entry(
    kind: EntryKind,
    command: EntryCommands,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    match command {
        EntryCommands::Add {
            name,
            ignore_requirements,
            sheet,
        } => {
            let action = format!("{} add", kind.label());
            run_change(&action, &sheet, json_output, quiet, |context, character| {
                add_entry(kind, context, character, &name, ignore_requirements)
            })
        }
        EntryCommands::Remove { name, sheet } => {
            let action = format!("{} remove", kind.label());
            run_change(&action, &sheet, json_output, quiet, |_, character| {
                remove_entry(kind, character, &name)
            })
        }
        EntryCommands::Available { sheet } => run_available(kind, &sheet, json_output, quiet),
    }
}

fn add_entry(
    kind: EntryKind,
    context: &Context,
    character: &mut Character,
    name: &str,
    ignore_requirements: bool,
) -> Result<ChangeOutcome, SheetError> {
    let (entry_name, added) = match kind {
        EntryKind::Feature => {
            let feature = context.rules.feature_by_name(name)?;
            if !ignore_requirements && !feature.meets_requirements(character)? {
                return Err(SheetError::RequirementsNotMet {
                    name: feature.name().to_string(),
                });
            }
            let entry_name = feature.name().to_string();
            (entry_name, character.add_feature(feature)?)
        }
        EntryKind::Specialty => {
            let specialty = context.rules.specialty_by_name(name)?;
            if !ignore_requirements && !specialty.meets_requirements(character)? {
                return Err(SheetError::RequirementsNotMet {
                    name: specialty.name().to_string(),
                });
            }
            let entry_name = specialty.name().to_string();
            (entry_name, character.add_specialty(specialty)?)
        }
    };

    if added {
        Ok(ChangeOutcome::changed(format!(
            "{} gained {} '{}'",
            character.name(),
            kind.label(),
            entry_name
        )))
    } else {
        Ok(ChangeOutcome::unchanged(format!(
            "{} already has {} '{}'",
            character.name(),
            kind.label(),
            entry_name
        )))
    }
}

fn remove_entry(
    kind: EntryKind,
    character: &mut Character,
    name: &str,
) -> Result<ChangeOutcome, SheetError> {
    let entry_name = match kind {
        EntryKind::Feature => {
            let feature = Arc::clone(character.features().by_name(name)?);
            character.remove_feature(&feature)?;
            feature.name().to_string()
        }
        EntryKind::Specialty => {
            let specialty = Arc::clone(character.specialties().by_name(name)?);
            character.remove_specialty(&specialty)?;
            specialty.name().to_string()
        }
    };
    Ok(ChangeOutcome::changed(format!(
        "{} lost {} '{}'",
        character.name(),
        kind.label(),
        entry_name
    )))
}

/// Names of rulebook entries the character qualifies for and does not hold
fn available_names(kind: EntryKind, character: &Character) -> Result<Vec<String>, SheetError> {
    let names: Vec<String> = match kind {
        EntryKind::Feature => character
            .available_features()?
            .iter()
            .filter(|feature| !character.has_feature(feature))
            .map(|feature| feature.name().to_string())
            .collect(),
        EntryKind::Specialty => character
            .available_specialties()?
            .iter()
            .filter(|specialty| !character.has_specialty(specialty))
            .map(|specialty| specialty.name().to_string())
            .collect(),
    };
    Ok(names)
}

fn run_available(
    kind: EntryKind,
    sheet: &SheetArg,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let command = format!("{} available", kind.label());
    let empty = |sheet: &str| AvailableData {
        kind: kind.label().to_string(),
        sheet: sheet.to_string(),
        names: vec![],
    };

    let context = match Context::load() {
        Ok(context) => context,
        Err(e) => return Ok(report_error(&command, empty(""), &e, None, json_output)),
    };
    let path = context.sheet_path(sheet);
    let path_str = path.display().to_string();

    let names = match context
        .load_character(&path)
        .and_then(|character| available_names(kind, &character))
    {
        Ok(names) => names,
        Err(e) => {
            return Ok(report_error(
                &command,
                empty(&path_str),
                &e,
                Some(&path),
                json_output,
            ));
        }
    };

    if json_output {
        let data = AvailableData {
            kind: kind.label().to_string(),
            sheet: path_str,
            names,
        };
        JsonResponse::ok(&command, data).print();
    } else if !quiet {
        if names.is_empty() {
            println!("No {} entries available", kind.label());
        }
        for name in names {
            println!("{}", name);
        }
    }
    Ok(0)
}
