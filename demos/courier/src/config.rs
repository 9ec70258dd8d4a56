//! `courier.toml`: session timing plus where the board comes from.
//!
//! ```toml
//! timeout_secs = 60
//! seed = 7            # random board; omit for the built-in one
//!
//! [session]
//! tick_ms = 2
//! wait_quantum_ms = 2
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use haul_board::{BoardSpec, RandomLimits, random_spec_with};
use haul_core::SessionConfig;

use crate::network::build_network;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    pub session:      SessionConfig,
    /// Halt the session if it has not finished by then.
    pub timeout_secs: u64,
    /// Generate a random board from this seed.
    pub seed:         Option<u64>,
    /// Upper bounds on trucks and parcels for random boards.
    pub max_trucks:   usize,
    pub max_parcels:  usize,
    /// An explicit board; takes precedence over `seed`.
    pub board:        Option<BoardSpec>,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            session:      SessionConfig::default(),
            timeout_secs: 120,
            seed:         None,
            max_trucks:   8,
            max_parcels:  40,
            board:        None,
        }
    }
}

impl CourierConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("invalid courier config")?;
        config.session.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn board_spec(&self) -> BoardSpec {
        if let Some(board) = &self.board {
            return board.clone();
        }
        match self.seed {
            Some(seed) => {
                let defaults = RandomLimits::default();
                let limits = RandomLimits {
                    trucks: (defaults.trucks.0.min(self.max_trucks), self.max_trucks),
                    parcels: (defaults.parcels.0.min(self.max_parcels), self.max_parcels),
                    ..defaults
                };
                random_spec_with(seed, &limits)
            }
            None => build_network(),
        }
    }
}
