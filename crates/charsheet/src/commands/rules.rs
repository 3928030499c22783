//! Implementation of the `charsheet rules` command

use charsheet_core::{HasRequirements, Named, RuleBook};
use owo_colors::OwoColorize;

use super::{Context, report_error};
use crate::cli::RulesTopic;
use crate::colors::COLORS;
use crate::output::{FeatureSummary, JsonResponse, RulesData, SpecialtySummary, StatData};

/// Collect the requested part of the rulebook; everything when no topic is given
fn rules_data(rules: &dyn RuleBook, topic: Option<RulesTopic>) -> RulesData {
    let wants = |wanted: RulesTopic| topic.is_none() || topic == Some(wanted);

    let stats = if wants(RulesTopic::Stats) {
        rules.create_stats().iter().map(StatData::from).collect()
    } else {
        vec![]
    };
    let features = if wants(RulesTopic::Features) {
        rules
            .features()
            .iter()
            .map(|feature| FeatureSummary::from(feature.as_ref()))
            .collect()
    } else {
        vec![]
    };
    let specialties = if wants(RulesTopic::Specialties) {
        rules
            .specialties()
            .iter()
            .map(|specialty| SpecialtySummary::from(specialty.as_ref()))
            .collect()
    } else {
        vec![]
    };

    RulesData {
        name: RuleBook::name(rules).to_string(),
        edition: rules.edition(),
        feature_pick_count: rules.feature_pick_count(),
        stat_spread: rules.stat_spread(),
        stats,
        features,
        specialties,
    }
}

/// Run the rules command
pub fn run_rules(topic: Option<RulesTopic>, json_output: bool, quiet: bool) -> Result<i32, String> {
    let context = match Context::load() {
        Ok(context) => context,
        Err(e) => {
            let data = rules_data(&charsheet_core::DemoWorld::new(), None);
            return Ok(report_error("rules", data, &e, None, json_output));
        }
    };
    let data = rules_data(context.rules.as_ref(), topic);

    if json_output {
        JsonResponse::ok("rules", data).print();
        return Ok(0);
    }
    if quiet {
        return Ok(0);
    }

    println!(
        "{} (edition {})",
        data.name.style(COLORS.active),
        data.edition
    );
    println!(
        "Stat spread: {:?}  Feature picks: {}",
        data.stat_spread, data.feature_pick_count
    );

    if !data.stats.is_empty() {
        println!();
        println!("{}", "STATS".style(COLORS.active));
        for stat in context.rules.create_stats().iter() {
            println!("  {:<12} {}", stat.name().to_uppercase(), stat.description());
        }
    }

    if !data.features.is_empty() {
        println!();
        println!("{}", "FEATURES".style(COLORS.active));
        for feature in context.rules.features() {
            print!("  {}", feature.name().to_uppercase());
            if !feature.requirements().is_empty() {
                let requires: Vec<String> =
                    feature.requirements().iter().map(|r| r.to_string()).collect();
                print!(" {}", format!("[requires {}]", requires.join(", ")).style(COLORS.warning));
            }
            println!();
            println!("      {}", feature.description());
        }
    }

    if !data.specialties.is_empty() {
        println!();
        println!("{}", "SPECIALTIES".style(COLORS.active));
        for specialty in &data.specialties {
            println!("  {}", specialty.name.to_uppercase());
            println!("      {}", specialty.description);
            println!("      features: {}", specialty.features.join(", "));
        }
    }

    Ok(0)
}
