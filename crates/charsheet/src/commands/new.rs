//! Implementation of the `charsheet new` command

use std::sync::Arc;

use charsheet_core::{CharacterDraft, SheetError, create_character};

use super::{Context, report_error};
use crate::cli::SheetArg;
use crate::output::{CharacterData, JsonResponse};

/// Run the new command
pub fn run_new(
    draft: CharacterDraft,
    force: bool,
    sheet: &SheetArg,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let context = match Context::load() {
        Ok(context) => context,
        Err(e) => return Ok(report_error("new", CharacterData::empty(""), &e, None, json_output)),
    };
    let path = context.sheet_path(sheet);
    let path_str = path.display().to_string();

    if path.exists() && !force {
        let error = SheetError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", path_str),
        ));
        return Ok(report_error(
            "new",
            CharacterData::empty(&path_str),
            &error,
            Some(&path),
            json_output,
        ));
    }

    let result = create_character(Arc::clone(&context.rules), &draft).and_then(|character| {
        context.save_character(&path, &character)?;
        Ok(character)
    });

    match result {
        Ok(character) => {
            if json_output {
                JsonResponse::ok("new", CharacterData::new(&path_str, &character)).print();
            } else if !quiet {
                println!("Created {} in {}", character.name(), path_str);
                println!();
                print!("{}", character);
            }
            Ok(0)
        }
        Err(e) => Ok(report_error(
            "new",
            CharacterData::empty(&path_str),
            &e,
            Some(&path),
            json_output,
        )),
    }
}
