//! Settings for starting a game.

use serde::{Deserialize, Serialize};

use crate::board::check_palette;
use crate::constants::{DEFAULT_COLORS, DEFAULT_SIZE};
use crate::error::{GameError, Result};
use crate::flood::{Connectivity, FloodRule, Topology};

/// Everything needed to generate a fresh game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board size (NxN)
    pub size: usize,
    /// Number of colors in the palette
    pub num_colors: usize,
    pub topology: Topology,
    pub connectivity: Connectivity,
    /// Fixed seed for reproducible boards; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            num_colors: DEFAULT_COLORS,
            topology: Topology::default(),
            connectivity: Connectivity::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(size: usize, num_colors: usize) -> Self {
        Self {
            size,
            num_colors,
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, rule: FloodRule) -> Self {
        self.topology = rule.topology;
        self.connectivity = rule.connectivity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Step a seeded config to the next board of its sequence. Unseeded
    /// configs are left alone.
    pub fn advance_seed(&mut self) {
        self.seed = self.seed.map(|seed| seed.wrapping_add(1));
    }

    pub fn rule(&self) -> FloodRule {
        FloodRule::new(self.topology, self.connectivity)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::InvalidSize(self.size));
        }
        check_palette(self.num_colors)
    }
}
