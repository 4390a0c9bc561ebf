//! Combat example: two units charging a regiment
//!
//! This example demonstrates:
//! - Building hits and wounds tables
//! - Blast and reroll rules
//! - Combining attackers and taking a nerve test
//! - Comparing two set-ups
//!
//! Run with `RUST_LOG=combat_odds=debug` to see the engine's trace.

use combat_odds::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DiceError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let spearmen = Attacker::new("Spearmen", 10, Threshold::new(4)?)
        .with_hit_reroll(Reroll::up_to(DicePlusNumber::die(Die::D3)));
    let giant = Attacker::new("Giant", 1, Threshold::new(3)?)
        .with_blast(DicePlusNumber::die_plus(Die::D6, 1))
        .vicious();

    let scenario = Scenario {
        attackers: vec![spearmen.clone(), giant],
        defense: Threshold::new(4)?,
        defender: Defender::new(NerveThresholds::new(14, 16)).inspired(),
        nerve_modifiers: Vec::new(),
    };
    let report = scenario.run()?;

    for attacker in &report.attackers {
        println!("=== {} ===", attacker.name);
        println!("Hits:\n{}", attacker.hits);
        println!("Wounds:\n{}", attacker.wounds);
    }

    println!("=== Combined wounds ===");
    println!("{}", report.wounds);
    println!(
        "Expected wounds: {:.2}",
        numeric::to_f64(&report.wounds.expected_value())
    );

    let (steady, waver, rout) = report.nerve.percentages();
    println!("\n=== Nerve ===");
    println!("  Steady: {:.2}%", steady);
    println!("  Waver:  {:.2}%", waver);
    println!("  Rout:   {:.2}%", rout);

    // Same charge without the giant
    let alone = Scenario {
        attackers: vec![spearmen],
        ..scenario
    }
    .run()?;
    println!("\n=== Wounds gained from the giant ===");
    for (wounds, change) in report.compare(&alone).percentages() {
        println!("  {:>3}: {:+.2}%", wounds, change);
    }

    Ok(())
}
