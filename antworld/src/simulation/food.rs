use shared::Position;
use slotmap::new_key_type;

use super::grid::SpatialGrid;
use super::pheromone::{Channel, PheromoneField};
use super::FOOD_PROXIMITY_SCENT;

new_key_type! {
    /// Key for food site slotmap.
    pub struct FoodKey;
}

/// Depletable, optionally regenerating pile of food.
#[derive(Debug, Clone)]
pub struct FoodSite {
    pub pos: Position,
    pub food_units: f32,
    pub initial_units: f32,
    pub regen_rate: f32,
}

impl FoodSite {
    pub fn new(pos: Position, initial_units: f32, regen_rate: f32) -> Self {
        Self {
            pos,
            food_units: initial_units,
            initial_units,
            regen_rate: regen_rate.max(0.0),
        }
    }

    /// Removes up to `capacity` units and returns what was actually taken.
    pub fn take_food(&mut self, capacity: f32) -> f32 {
        let taken = capacity.min(self.food_units).max(0.0);
        self.food_units -= taken;
        taken
    }

    pub fn is_exhausted(&self) -> bool {
        self.food_units <= 0.0
    }

    /// Regenerates and refreshes the proximity scent.
    /// Returns false once the site is exhausted and must be removed.
    pub fn update(&mut self, grid: &SpatialGrid, pheromones: &mut PheromoneField) -> bool {
        if self.is_exhausted() {
            return false;
        }

        self.food_units = (self.food_units + self.regen_rate).min(self.initial_units);

        for cell in grid.moore(self.pos) {
            pheromones.mark(Channel::FoodProximity, cell, FOOD_PROXIMITY_SCENT);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_food_is_capped_by_supply() {
        let mut site = FoodSite::new(Position::new(1, 1), 10.0, 0.0);
        assert_eq!(site.take_food(9.0), 9.0);
        assert_eq!(site.take_food(9.0), 1.0);
        assert_eq!(site.food_units, 0.0);
        assert_eq!(site.take_food(9.0), 0.0);
        assert!(site.is_exhausted());
    }

    #[test]
    fn test_regeneration_is_capped_at_initial_units() {
        let grid = SpatialGrid::new(5, 5, false);
        let mut pheromones = PheromoneField::new();
        let mut site = FoodSite::new(Position::new(2, 2), 20.0, 1.5);
        site.take_food(5.0);
        assert!(site.update(&grid, &mut pheromones));
        assert_eq!(site.food_units, 16.5, "one regeneration per tick");
        for _ in 0..10 {
            site.update(&grid, &mut pheromones);
        }
        assert_eq!(site.food_units, 20.0);
    }

    #[test]
    fn test_update_marks_food_proximity_ring() {
        let grid = SpatialGrid::new(5, 5, false);
        let mut pheromones = PheromoneField::new();
        let mut site = FoodSite::new(Position::new(0, 0), 20.0, 0.0);
        site.update(&grid, &mut pheromones);
        assert_eq!(pheromones.scented_cells(Channel::FoodProximity), 3);
        assert_eq!(
            pheromones.intensity(Channel::FoodProximity, Position::new(1, 1)),
            FOOD_PROXIMITY_SCENT
        );
        assert_eq!(pheromones.intensity(Channel::FoodProximity, Position::new(0, 0)), 0.0);
    }

    #[test]
    fn test_exhausted_site_reports_removal() {
        let grid = SpatialGrid::new(5, 5, false);
        let mut pheromones = PheromoneField::new();
        let mut site = FoodSite::new(Position::new(2, 2), 6.0, 0.0);
        site.take_food(6.0);
        assert!(!site.update(&grid, &mut pheromones));
        assert_eq!(pheromones.total_scented_cells(), 0, "exhausted sites stop scenting");
    }
}
