pub mod ant;
mod anthill;
mod food;
mod grid;
mod pheromone;
mod species;
mod timer;
mod world;

// Re-export key types for easier imports
pub use ant::{Ant, AntKey, Role};
pub use anthill::{Anthill, AnthillKey};
pub use food::{FoodKey, FoodSite};
pub use grid::{Neighborhood, Obstacle, ObstacleKey, Occupant, SpatialGrid};
pub use pheromone::{Channel, PheromoneField};
pub use species::{Species, SpeciesId};
pub use timer::Timer;
pub use world::{Actor, World};

// Ant body constants
pub const SIZE_HEALTH_RATIO: f32 = 10.0;
pub const SIZE_DAMAGE_RATIO: f32 = 2.0;
pub const CARGO_RATIO: f32 = 3.0;
pub const MAX_ENERGY: f32 = 100.0;
pub const ENERGY_DECAY_PER_TICK: f32 = 1.0;
pub const HUNGER_THRESHOLD: f32 = 0.8; // Parked ants eat below 80% energy

// Ant navigation constants
pub const STRAIGHT_BIAS: f32 = 6.0; // Weight of the cell straight ahead, others weigh 1
pub const TRAIL_STRENGTH_DIVISOR: f32 = 3.0;

// Pheromone constants
pub const MAX_PHEROMONE_AMOUNT: f32 = 255.0;
pub const EVAPORATION_STEP: f32 = 1.0;
pub const FOOD_PROXIMITY_SCENT: f32 = 3.0;

// Colony economy constants
pub const INITIAL_ANTHILL_FOOD: f32 = 100.0;
pub const BIRTH_RATE_SCALE: f32 = 0.02;
pub const FORAGER_RELEASE_PERIOD: u64 = 5; // Turns between explorer releases
pub const QUEEN_SEASON_BASE: u64 = 300;
pub const QUEEN_SEASON_LENGTH: u64 = 10;
pub const QUEEN_FLIGHT_TICKS: u32 = 15;
pub const QUEEN_MIN_DISTANCE: i32 = 4;
pub const QUEEN_MIN_FREE_NEIGHBORS: usize = 3;
