//! Prism Quickstart: the reference scenario from scratch.
//!
//! Demonstrates:
//!   1. Building a SimulationConfig and Simulation
//!   2. Running the canonical script (Potentiality, Genesis, Quench)
//!   3. Reading the recorded history and its magnitude trace
//!   4. Streaming an operator by hand and cancelling it early
//!
//! Run with:
//!   RUST_LOG=info cargo run --example quickstart

use prism_core::StableConfig;
use prism_engine::{Simulation, SimulationConfig};
use prism_operator::{DurationSteps, Operator};

// ─── Display parameters ─────────────────────────────────────────

const BAR_WIDTH: u64 = 40;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Prism Quickstart ===\n");

    // 1. Build the reference simulation: 100x10 domain, 2-row band.
    let config = SimulationConfig::default();
    for step in &config.script {
        println!("  scripted: {step}");
    }
    let mut sim = Simulation::new(config)?;
    println!("Domain: {}\n", sim.domain());

    // 2. Run the whole script.
    let history = sim.run()?;
    println!("Recorded {} states.\n", history.len());

    // 3. Plot total magnitude per recorded state.
    let peak = sim.stable().active().total_magnitude().max(1);
    for entry in sim.history() {
        let magnitude = entry.state.total_magnitude();
        let bar = (magnitude * BAR_WIDTH / peak) as usize;
        println!(
            "  {:>12} #{:>2}  t={:.2}  {:>6}  {}",
            entry.operator.name(),
            entry.step,
            entry.progress,
            magnitude,
            "#".repeat(bar)
        );
    }

    for timing in &sim.last_metrics().steps {
        println!(
            "\n  step {} ({}): {} frames in {}μs",
            timing.script_index, timing.operator, timing.frames, timing.elapsed_us
        );
    }

    // 4. Stream a long Genesis by hand, take a few frames, then cancel.
    let stable = sim.stable();
    let mut stream = Operator::Genesis.apply(
        stable.get(StableConfig::Potential),
        stable.get(StableConfig::Active),
        DurationSteps::new(10_000),
    )?;
    let first: Vec<u64> = stream
        .by_ref()
        .take(3)
        .map(|f| f.state.total_magnitude())
        .collect();
    println!("\nFirst Genesis magnitudes of 10001: {first:?}");
    stream.cancel();
    println!("Cancelled remaining frames.");

    Ok(())
}
