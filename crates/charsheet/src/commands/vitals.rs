//! Implementation of the `damage`, `heal`, `temp-hp` and `xp` commands

use charsheet_core::{Character, SheetError};

use super::{ChangeOutcome, run_change};
use crate::cli::SheetArg;

/// Run the damage command
pub fn run_damage(
    amount: i32,
    sheet: &SheetArg,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    run_change("damage", sheet, json_output, quiet, |_, character| {
        apply_damage(character, amount)
    })
}

/// Run the heal command
pub fn run_heal(amount: i32, sheet: &SheetArg, json_output: bool, quiet: bool) -> Result<i32, String> {
    run_change("heal", sheet, json_output, quiet, |_, character| {
        apply_heal(character, amount)
    })
}

/// Run the temp-hp command
pub fn run_temp_hp(
    amount: i32,
    sheet: &SheetArg,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    run_change("temp-hp", sheet, json_output, quiet, |_, character| {
        character.set_temp_hp(amount);
        Ok(ChangeOutcome::changed(format!(
            "{} has {} temporary hitpoints",
            character.name(),
            character.hitpoints().temp_hp()
        )))
    })
}

/// Run the xp command
pub fn run_xp(amount: i32, sheet: &SheetArg, json_output: bool, quiet: bool) -> Result<i32, String> {
    run_change("xp", sheet, json_output, quiet, |_, character| {
        Ok(apply_xp(character, amount))
    })
}

fn apply_damage(character: &mut Character, amount: i32) -> Result<ChangeOutcome, SheetError> {
    if amount < 0 {
        return Err(SheetError::InvalidInput {
            reason: format!("damage must not be negative, got {}", amount),
        });
    }
    character.damage(amount)?;
    Ok(ChangeOutcome::changed(format!(
        "{} took {} damage",
        character.name(),
        amount
    )))
}

fn apply_heal(character: &mut Character, amount: i32) -> Result<ChangeOutcome, SheetError> {
    if amount < 0 {
        return Err(SheetError::InvalidInput {
            reason: format!("healing must not be negative, got {}", amount),
        });
    }
    character.heal(amount)?;
    Ok(ChangeOutcome::changed(format!(
        "{} healed {} hitpoints",
        character.name(),
        amount
    )))
}

fn apply_xp(character: &mut Character, amount: i32) -> ChangeOutcome {
    let leveled_up = character.adjust_xp(amount);
    let message = if leveled_up {
        format!(
            "{} leveled up! Max hitpoints are now {}",
            character.name(),
            character.hitpoints().base().max()
        )
    } else {
        format!("{} gained {} experience", character.name(), amount)
    };
    ChangeOutcome {
        changed: true,
        leveled_up: Some(leveled_up),
        message,
    }
}
