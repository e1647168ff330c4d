//! Experiment driver: generates a batch of random instances, runs Kowalik's
//! reference strategy and the Adaptive Minimize Collisions heuristic on each
//! of them, and streams running averages of the induced outdegrees.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use dynamic_orientation::converter::{convert_instance, IntervalStatus};
use dynamic_orientation::generator::{Generator, UniformEndpoints};
use dynamic_orientation::solver::solve_instance;
use dynamic_orientation::strategies::orient_by_kowalik;

/// Number of nodes in the graph.
const NODES: usize = 40;
/// Upper bound for arboricity.
const ALPHA: usize = 1;
/// Expected fraction of possible edges.
const EDGE_DENSITY: f64 = 0.8;
/// Purge probability (see the generator module).
const PURGE_PROB: f64 = 0.0;
/// Number of insert/delete operations per instance.
const INSTANCE_LEN: usize = 1000;
/// Total number of generated instances.
const ATTEMPTS_TARGET: usize = 100;
/// Print statistics every this many attempts.
const STATS_CHECKPOINT: usize = 10;

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;

    println!("Launched testing:");
    println!("|V| = {NODES}, arboricity <= {ALPHA}, instance length = {INSTANCE_LEN}");
    println!();

    let mut gen = Generator::new(NODES, ALPHA, EDGE_DENSITY, PURGE_PROB, UniformEndpoints);
    gen.set_seed(millis_since_epoch());

    let mut avg_kowalik = 0.0;
    let mut avg_custom = 0.0;

    for attempt in 1..=ATTEMPTS_TARGET {
        let opi = gen.generate_instance(INSTANCE_LEN);
        let mut ipi = convert_instance(&opi);

        avg_kowalik += orient_by_kowalik(&opi) as f64;

        let max_outdeg_custom = solve_instance(&mut ipi);
        if ipi
            .intervals
            .iter()
            .any(|i| i.status == IntervalStatus::NotSet)
        {
            ipi.dump_counterexample("error-instance.txt")?;
            bail!("solver left an interval unassigned, instance dumped");
        }
        avg_custom += max_outdeg_custom as f64;

        if attempt % STATS_CHECKPOINT == 0 {
            println!("{attempt} / {ATTEMPTS_TARGET} attempts done.");
            println!("Avg. Kowalik outdeg: {:.6}", avg_kowalik / attempt as f64);
            println!("Avg. custom outdeg: {:.6}", avg_custom / attempt as f64);
            println!();
        }
    }
    Ok(())
}

/// Seed for the instance generator.
fn millis_since_epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before the epoch")
        .as_millis() as u64
}
