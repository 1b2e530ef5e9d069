//! Configuration types for a simulation run.

use crate::SimulationError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use selfstab_types::{Color, NodeId};

/// Configuration for a simulation run.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Round budget for [`run`](crate::SimulationRunner::run).
    pub max_rounds: u64,

    /// Stop as soon as a round leaves every node's state unchanged.
    ///
    /// Such a round is a fixpoint, so the final snapshot is the same as
    /// with the full budget.
    pub stop_at_fixpoint: bool,

    /// Starting colors.
    pub initial: InitialColoring,
}

impl SimulationConfig {
    /// Create a configuration with the given round budget.
    pub fn new(max_rounds: u64) -> Self {
        Self {
            max_rounds,
            stop_at_fixpoint: false,
            initial: InitialColoring::default(),
        }
    }

    /// Set the round budget.
    pub fn with_max_rounds(mut self, max_rounds: u64) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Stop early once a round changes nothing.
    pub fn with_stop_at_fixpoint(mut self, stop: bool) -> Self {
        self.stop_at_fixpoint = stop;
        self
    }

    /// Set the starting colors.
    pub fn with_initial(mut self, initial: InitialColoring) -> Self {
        self.initial = initial;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(40)
    }
}

/// How nodes are colored before the first round.
///
/// Values use the integer encoding of [`Color::from_raw`]: `-1` and `0` are
/// placeholders, positive values are colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitialColoring {
    /// Every node starts with the same value.
    Uniform(i64),

    /// One value per node, in node order.
    Explicit(Vec<i64>),

    /// Colors drawn uniformly from `1..=max` by a seeded ChaCha8 generator.
    Random {
        /// Generator seed.
        seed: u64,
        /// Largest color drawn.
        max: u32,
    },
}

impl Default for InitialColoring {
    fn default() -> Self {
        InitialColoring::Uniform(1)
    }
}

impl InitialColoring {
    /// Produce one color per node.
    pub fn colors(&self, node_count: usize) -> Result<Vec<Color>, SimulationError> {
        match self {
            InitialColoring::Uniform(value) => {
                (0..node_count).map(|i| decode(i, *value)).collect()
            }
            InitialColoring::Explicit(values) => {
                if values.len() != node_count {
                    return Err(SimulationError::ColorCountMismatch {
                        expected: node_count,
                        actual: values.len(),
                    });
                }
                values
                    .iter()
                    .enumerate()
                    .map(|(i, &value)| decode(i, value))
                    .collect()
            }
            InitialColoring::Random { seed, max } => {
                if *max == 0 {
                    return Err(SimulationError::ZeroPaletteBound);
                }
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                Ok((0..node_count)
                    .map(|_| Color::Assigned(rng.gen_range(1..=*max)))
                    .collect())
            }
        }
    }
}

fn decode(index: usize, value: i64) -> Result<Color, SimulationError> {
    Color::from_raw(value).ok_or(SimulationError::InvalidInitialColor {
        node: NodeId(index as u32),
        value,
    })
}
