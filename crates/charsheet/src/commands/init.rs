//! Implementation of the `charsheet init` command

use std::fs;
use std::path::Path;

use charsheet_core::SheetError;
use charsheet_core::config::CONFIG_FILE_NAME;

use crate::output::{InitData, JsonIssue, JsonResponse};

/// Default charsheet.toml content; `{author_id}` is filled in
const DEFAULT_CONFIG: &str = r#"[charsheet]
# Written as the "Student ID:" header of every saved sheet
author_id = "{author_id}"

# Sheet used when a command is given no --sheet
default_sheet = "character.txt"

# Seed for reproducible dice rolls (omit for random rolls)
# dice_seed = 1
"#;

/// Run the init command
pub fn run_init(
    force: bool,
    author_id: Option<String>,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    let author_id = author_id.unwrap_or_else(|| "0".to_string());
    let data = InitData {
        path: CONFIG_FILE_NAME.to_string(),
        author_id: author_id.clone(),
        default_sheet: "character.txt".to_string(),
    };

    if config_path.exists() && !force {
        let message = format!("{} already exists (use --force to overwrite)", CONFIG_FILE_NAME);
        if json_output {
            let issues = vec![JsonIssue {
                code: SheetError::Config(String::new()).code().to_string(),
                severity: "error".to_string(),
                message: message.clone(),
                file: Some(CONFIG_FILE_NAME.to_string()),
                line: None,
            }];
            JsonResponse::error("init", data, issues).print();
        } else {
            eprintln!("error: {}", message);
        }
        return Ok(1);
    }

    if author_id.contains('"') || author_id.contains('\n') {
        return Err(format!("invalid author id: {:?}", author_id));
    }

    let content = DEFAULT_CONFIG.replace("{author_id}", &author_id);
    fs::write(config_path, content)
        .map_err(|e| format!("failed to write {}: {}", CONFIG_FILE_NAME, e))?;

    if json_output {
        JsonResponse::ok("init", data).print();
    } else if !quiet {
        println!("Initialized charsheet in current directory");
        println!("  Created: {}", CONFIG_FILE_NAME);
    }

    Ok(0)
}
