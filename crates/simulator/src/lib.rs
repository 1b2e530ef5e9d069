//! Selfstab Simulator
//!
//! Command-line driver built on top of the simulation runner. Loads or
//! generates a graph, runs the coloring protocol over it and reports the
//! outcome.
//!
//! # Architecture
//!
//! The simulator builds on `selfstab-simulation` to provide:
//!
//! - **Graph Sources**: JSON graph files, cycles, seeded random graphs and the
//!   built-in 12-node reference graph
//! - **Snapshot Export**: One JSON object per round, for external renderers
//! - **Reporting**: End-of-run summary with conflicts left, if any
//!
//! # Example
//!
//! ```ignore
//! use selfstab_simulator::{GraphSource, Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(GraphSource::Cycle(8))
//!     .with_rounds(200)
//!     .with_stop_at_fixpoint(true);
//!
//! let mut simulator = Simulator::new(config)?;
//! let report = simulator.run()?;
//! report.print_summary();
//! ```

pub mod config;
pub mod export;
pub mod generators;
pub mod report;
pub mod runner;

pub use config::{GraphSource, SimulatorConfig};
pub use export::JsonLinesSink;
pub use generators::{Cycle, GraphGenerator, RandomGraph};
pub use report::SimulationReport;
pub use runner::{load_graph, Simulator, SimulatorError};
