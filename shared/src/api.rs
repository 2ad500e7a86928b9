use serde::{Deserialize, Serialize};

use crate::util::Position;

/// Which of the world's entity arenas an id points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityTag {
    Ant,
    Anthill,
    FoodSite,
    Obstacle,
}

/// Stable identity of an entity for as long as it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    pub tag: EntityTag,
    pub raw: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AntRole {
    Worker,
    Queen,
}

/// Kind-specific display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Ant {
        species: u32,
        role: AntRole,
        size: u32,
        cargo: f32,
        carrying: bool,
        lost: bool,
        foraging: bool,
    },
    Anthill {
        species: u32,
        food_units: f32,
        worker_count: u32,
    },
    FoodSite {
        food_units: f32,
    },
    Obstacle,
}

/// Read-only view of one entity on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub position: Position,
    pub kind: EntityKind,
}

impl EntityView {
    pub fn tag(&self) -> EntityTag {
        self.id.tag
    }
}

/// Per-species aggregate counters consumed by charting collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesStats {
    pub species: u32,
    pub workers: u32,
    pub queens: u32,
    pub anthills: u32,
    pub stored_food: f32,
    pub food_collected: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: u32,
    pub height: u32,
    pub entities: Vec<EntityView>,
    pub species: Vec<SpeciesStats>,
}

impl WorldSnapshot {
    pub fn count(&self, tag: EntityTag) -> usize {
        self.entities.iter().filter(|e| e.tag() == tag).count()
    }
}
