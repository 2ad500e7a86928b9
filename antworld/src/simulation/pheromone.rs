use shared::Position;
use std::collections::HashMap;

use super::species::SpeciesId;
use super::{EVAPORATION_STEP, MAX_PHEROMONE_AMOUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Outbound food trail of one colony, laid by ants carrying food home.
    Trail(SpeciesId),
    /// Low scent food sites keep around themselves.
    FoodProximity,
}

/// Sparse scalar fields over the grid, one per channel.
///
/// Only cells with a positive intensity are stored, so evaporation costs
/// O(scented cells) rather than O(grid area).
#[derive(Debug, Default, Clone)]
pub struct PheromoneField {
    channels: HashMap<Channel, HashMap<Position, f32>>,
}

impl PheromoneField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Additive deposit, capped at `MAX_PHEROMONE_AMOUNT`.
    #[inline(always)]
    pub fn deposit(&mut self, channel: Channel, pos: Position, amount: f32) {
        if amount <= 0.0 || amount.is_nan() {
            return;
        }
        let cell = self
            .channels
            .entry(channel)
            .or_default()
            .entry(pos)
            .or_insert(0.0);
        *cell = (*cell + amount).min(MAX_PHEROMONE_AMOUNT);
    }

    /// Raises the cell to at least `level`, never lowering it.
    pub fn mark(&mut self, channel: Channel, pos: Position, level: f32) {
        if level <= 0.0 || level.is_nan() {
            return;
        }
        let cell = self
            .channels
            .entry(channel)
            .or_default()
            .entry(pos)
            .or_insert(0.0);
        *cell = cell.max(level.min(MAX_PHEROMONE_AMOUNT));
    }

    /// One global decay pass: every scented cell loses `EVAPORATION_STEP`, empty cells are dropped.
    pub fn evaporate(&mut self) {
        for cells in self.channels.values_mut() {
            cells.retain(|_, value| {
                *value -= EVAPORATION_STEP;
                *value > 0.0
            });
        }
        self.channels.retain(|_, cells| !cells.is_empty());
    }

    pub fn intensity(&self, channel: Channel, pos: Position) -> f32 {
        self.channels
            .get(&channel)
            .and_then(|cells| cells.get(&pos))
            .copied()
            .unwrap_or(0.0)
    }

    /// The given cells that carry scent on `channel`, in the order given.
    pub fn smell(&self, channel: Channel, cells: &[Position]) -> Vec<(Position, f32)> {
        let Some(scents) = self.channels.get(&channel) else {
            return Vec::new();
        };
        cells
            .iter()
            .filter_map(|pos| {
                scents
                    .get(pos)
                    .filter(|&&value| value > 0.0)
                    .map(|&value| (*pos, value))
            })
            .collect()
    }

    pub fn scented_cells(&self, channel: Channel) -> usize {
        self.channels.get(&channel).map_or(0, |cells| cells.len())
    }

    pub fn total_scented_cells(&self) -> usize {
        self.channels.values().map(|cells| cells.len()).sum()
    }

    pub fn clear_channel(&mut self, channel: Channel) {
        self.channels.remove(&channel);
    }

    /// Iterates over every stored intensity.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.channels.values().flat_map(|cells| cells.values().copied())
    }
}
