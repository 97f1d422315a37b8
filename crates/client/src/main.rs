//! Skirmish headless client binary.
//!
//! Plays one encounter to the end with every combatant under AI control.
//! The combat log and final board go to stdout, tracing output to stderr.
//!
//! # Examples
//!
//! ```bash
//! SKIRMISH_SEED=7 cargo run -p skirmish-client
//! SKIRMISH_ENCOUNTER=crates/game/content/data/encounters/skirmish.toml \
//!     SKIRMISH_SUMMARY_JSON=1 RUST_LOG=debug cargo run -p skirmish-client
//! ```

use anyhow::Result;
use skirmish_client::{ClientConfig, prepare};
use skirmish_runtime::{EncounterEvent, EncounterResult};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let mut session = prepare(&config)?;
    tracing::info!("Starting encounter (seed {})", session.seed);

    println!("{}", session.encounter.render());
    let result = session.play()?;

    for event in session.encounter.drain_events() {
        if let EncounterEvent::Log(line) = event {
            println!("{line}");
        }
    }
    println!();
    println!("{}", session.encounter.render());
    match result {
        EncounterResult::Victory { winner, rounds } => {
            println!("Team {winner} wins after {rounds} rounds")
        }
        EncounterResult::Draw { rounds } => println!("Draw after {rounds} rounds"),
    }

    if config.summary_json {
        if let Some(summary) = session.summary() {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
