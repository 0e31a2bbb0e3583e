// Demonstration: fly the three agent kinds through a scripted approach.
//
// Enemies start far from the escort and close in a fixed distance per step,
// so the run sweeps through the offensive, formation-hold, and defensive
// bands. Set RUST_LOG=escort_tactics=debug to see per-step routing, and
// ESCORT_TACTICS_CONFIG=path/to/tactics.toml to override the defaults.
//
//   cargo run --example hybrid_demo

use escort_tactics::{build_agent, AgentKind, Observation, Position, TacticsConfig};
use tracing_subscriber::EnvFilter;

const STEPS: usize = 12;
const CLOSING_SPEED: f64 = 70.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("escort_tactics=info")),
        )
        .init();

    let config = match std::env::var("ESCORT_TACTICS_CONFIG") {
        Ok(path) => match TacticsConfig::from_toml_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(2);
            }
        },
        Err(_) => TacticsConfig::default(),
    };

    for kind in [AgentKind::RuleBased, AgentKind::Learned, AgentKind::Hybrid] {
        let mut agent = match build_agent(kind, config.clone(), None) {
            Ok(agent) => agent,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(2);
            }
        };
        tracing::info!(agent = agent.id(), "running {}", agent.name());

        for step in 0..STEPS {
            let obs = scripted_observation(step);
            let action = agent.step(&obs);
            let fighters: Vec<String> = action.fighters.iter().map(|c| c.to_string()).collect();
            println!(
                "[{:>10}] step {:>2}: fighters [{}] escort {}",
                agent.name(),
                step,
                fighters.join(", "),
                action.escort
            );
        }

        if let Some(stats) = agent.performance_stats() {
            println!("{}", stats);
        }
        agent.reset();
    }
}

/// Escort at the origin in a diamond; four enemies approaching from the
/// northeast.
fn scripted_observation(step: usize) -> Observation {
    let range = 900.0 - CLOSING_SPEED * step as f64;
    let heading = Position::new(1.0, 1.0) * std::f64::consts::FRAC_1_SQRT_2;
    let lead = heading * range;
    Observation::new(
        vec![
            Position::new(0.0, 50.0),
            Position::new(-50.0, 0.0),
            Position::new(50.0, 0.0),
            Position::new(0.0, -50.0),
        ],
        Position::origin(),
        vec![
            lead,
            lead + Position::new(40.0, 0.0),
            lead + Position::new(0.0, 40.0),
            lead + Position::new(40.0, 40.0),
        ],
        lead + Position::new(60.0, 60.0),
    )
}
