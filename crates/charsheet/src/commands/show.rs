//! Implementation of the `charsheet show` command

use super::{Context, report_error};
use crate::cli::SheetArg;
use crate::output::{CharacterData, JsonResponse};

/// Run the show command
pub fn run_show(sheet: &SheetArg, json_output: bool, quiet: bool) -> Result<i32, String> {
    let context = match Context::load() {
        Ok(context) => context,
        Err(e) => return Ok(report_error("show", CharacterData::empty(""), &e, None, json_output)),
    };
    let path = context.sheet_path(sheet);
    let path_str = path.display().to_string();

    let character = match context.load_character(&path) {
        Ok(character) => character,
        Err(e) => {
            return Ok(report_error(
                "show",
                CharacterData::empty(&path_str),
                &e,
                Some(&path),
                json_output,
            ));
        }
    };

    if json_output {
        JsonResponse::ok("show", CharacterData::new(&path_str, &character)).print();
    } else if !quiet {
        print!("{}", character);
    }
    Ok(0)
}
