//! Selfstab Simulator CLI
//!
//! Run the distance-2 coloring protocol over a graph and report the result.
//!
//! # Example
//!
//! ```bash
//! # Built-in 12-node reference graph, 40 rounds
//! selfstab-sim
//!
//! # Ring of 8 nodes, random starting colors, stop once nothing changes
//! selfstab-sim --cycle 8 --seed 7 --rounds 500 --stop-at-fixpoint
//!
//! # Random graph, per-round colors written for a renderer
//! selfstab-sim --random 20 --edge-probability 0.2 --snapshots rounds.jsonl
//! ```
//!
//! Exits with 0 when the final coloring is valid, 2 when the round budget
//! ran out first and 1 on setup errors.

use clap::Parser;
use selfstab_simulator::{GraphSource, Simulator, SimulatorConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Selfstab Simulator
///
/// Colors a graph so that nodes within distance two differ, starting from
/// an arbitrary coloring, one synchronous round at a time.
#[derive(Parser, Debug)]
#[command(name = "selfstab-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON graph file: {"nodes": N, "adjacency": [[..], ..]}
    #[arg(long, conflicts_with_all = ["cycle", "random"])]
    graph: Option<PathBuf>,

    /// Use a ring with this many nodes
    #[arg(long, conflicts_with = "random")]
    cycle: Option<u32>,

    /// Use a random G(n, p) graph with this many nodes
    #[arg(long)]
    random: Option<u32>,

    /// Edge probability for --random
    #[arg(long, default_value = "0.3", requires = "random")]
    edge_probability: f64,

    /// Seed for --random
    #[arg(long, default_value = "12345", requires = "random")]
    graph_seed: u64,

    /// Round budget
    #[arg(short = 'r', long, default_value = "40")]
    rounds: u64,

    /// Stop once a round changes nothing
    #[arg(long)]
    stop_at_fixpoint: bool,

    /// Draw random starting colors with this seed. Without it every node
    /// starts with color 1.
    #[arg(long)]
    seed: Option<u64>,

    /// Largest random starting color
    #[arg(long, default_value = "6", requires = "seed")]
    max_initial_color: u32,

    /// Write one JSON line per round to this file
    #[arg(long)]
    snapshots: Option<PathBuf>,

    /// Do not print the summary
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Args {
    fn graph_source(&self) -> GraphSource {
        if let Some(path) = &self.graph {
            GraphSource::File(path.clone())
        } else if let Some(nodes) = self.cycle {
            GraphSource::Cycle(nodes)
        } else if let Some(nodes) = self.random {
            GraphSource::Random {
                nodes,
                edge_probability: self.edge_probability,
                seed: self.graph_seed,
            }
        } else {
            GraphSource::Reference
        }
    }

    fn to_config(&self) -> SimulatorConfig {
        let mut config = SimulatorConfig::new(self.graph_source())
            .with_rounds(self.rounds)
            .with_stop_at_fixpoint(self.stop_at_fixpoint);

        if let Some(seed) = self.seed {
            config = config.with_random_initial(seed, self.max_initial_color);
        }
        if let Some(path) = &self.snapshots {
            config = config.with_snapshots(path);
        }
        config
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("warn,selfstab_simulator=info,selfstab_simulation=info")
        }))
        .init();

    let args = Args::parse();
    let config = args.to_config();

    info!(
        source = ?config.graph,
        rounds = config.rounds,
        stop_at_fixpoint = config.stop_at_fixpoint,
        initial = ?config.initial,
        "Starting simulation"
    );

    let report = match Simulator::new(config).and_then(|mut simulator| simulator.run()) {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "Simulation failed");
            return ExitCode::FAILURE;
        }
    };

    if !args.quiet {
        report.print_summary();
    }

    if report.converged() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}
