use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

// World defaults
pub const DEFAULT_WORLD_WIDTH: u32 = 50;
pub const DEFAULT_WORLD_HEIGHT: u32 = 50;
pub const DEFAULT_SPECIES_SLOTS: usize = 5;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeciesConfig {
    pub included: bool,
    pub ant_size: u32,
    pub reproduction_rate: u32,
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            included: false,
            ant_size: 3,
            reproduction_rate: 3,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: u32,
    pub height: u32,
    pub torus: bool,
    pub initial_food_sites: u32,
    pub initial_obstacles: u32,
    /// Ticks between spontaneous food sites, 0 disables them.
    pub food_spawn_interval: u64,
    pub rng_seed: Option<u64>,
    /// Spawned sites draw their size from `food_units_min..food_units_max`.
    pub food_units_min: u32,
    pub food_units_max: u32,
    pub max_regen_rate: f32,
    /// One slot per species, the slot index is the species id.
    pub species: Vec<SpeciesConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let mut species = vec![SpeciesConfig::default(); DEFAULT_SPECIES_SLOTS];
        species[0].included = true;
        species[1].included = true;

        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
            torus: false,
            initial_food_sites: 15,
            initial_obstacles: 15,
            food_spawn_interval: 5,
            rng_seed: None,
            food_units_min: 1,
            food_units_max: 100,
            max_regen_rate: 2.0,
            species,
        }
    }
}

impl SimulationConfig {
    pub fn included_species(&self) -> impl Iterator<Item = (u32, &SpeciesConfig)> + '_ {
        self.species
            .iter()
            .enumerate()
            .filter(|(_, s)| s.included)
            .map(|(id, s)| (id as u32, s))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "world must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );

        for (id, species) in self.species.iter().enumerate() {
            if species.ant_size == 0 {
                bail!("species {} has an ant size of 0", id);
            }
            if species.reproduction_rate == 0 {
                bail!("species {} has a reproduction rate of 0", id);
            }
        }

        ensure!(
            self.food_units_min >= 1 && self.food_units_min < self.food_units_max,
            "food units range {}..{} is empty or starts at 0",
            self.food_units_min,
            self.food_units_max
        );
        ensure!(
            self.max_regen_rate.is_finite() && self.max_regen_rate >= 0.0,
            "max regen rate must be a non-negative number, got {}",
            self.max_regen_rate
        );

        let cells = self.width as u64 * self.height as u64;
        let fixed = self.included_species().count() as u64
            + self.initial_food_sites as u64
            + self.initial_obstacles as u64;
        if fixed > cells {
            bail!(
                "{} anthills, food sites and obstacles do not fit on {} cells",
                fixed,
                cells
            );
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse simulation config")
    }
}

/// Loads the simulation configuration from a TOML file or uses defaults.
pub fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        info!("No config file provided, using defaults");
        return Ok(SimulationConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config = SimulationConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid config file '{}'", path.display()))?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}
