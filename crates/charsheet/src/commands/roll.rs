//! Implementation of the `charsheet roll` command

use charsheet_core::{DiceRoller, RollOptions, SheetError};
use owo_colors::OwoColorize;

use super::{Context, report_error};
use crate::colors::COLORS;
use crate::output::{JsonResponse, RollData};

/// Roll `times` totals with the given options
fn roll_many(roller: &mut DiceRoller, options: RollOptions, times: u32) -> Vec<u32> {
    (0..times).map(|_| roller.roll_with(options)).collect()
}

/// Run the roll command
pub fn run_roll(
    advantage: bool,
    reroll: Option<u32>,
    times: u32,
    json_output: bool,
    quiet: bool,
) -> Result<i32, String> {
    let options = RollOptions { advantage, reroll };
    let empty = RollData {
        advantage,
        reroll,
        rolls: vec![],
    };

    let context = match Context::load() {
        Ok(context) => context,
        Err(e) => return Ok(report_error("roll", empty, &e, None, json_output)),
    };
    if times == 0 {
        let error = SheetError::InvalidInput {
            reason: "--times must be at least 1".to_string(),
        };
        return Ok(report_error("roll", empty, &error, None, json_output));
    }

    let mut roller = context.rules.dice_roller();
    let rolls = roll_many(&mut roller, options, times);

    if json_output {
        JsonResponse::ok(
            "roll",
            RollData {
                advantage,
                reroll,
                rolls,
            },
        )
        .print();
    } else if !quiet {
        let (low, high) = roller.range();
        for total in rolls {
            if total == high {
                println!("{}", total.style(COLORS.success));
            } else if total == low {
                println!("{}", total.style(COLORS.fail));
            } else {
                println!("{}", total);
            }
        }
    }
    Ok(0)
}
