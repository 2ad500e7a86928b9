pub type SpeciesId = u32;

/// Immutable description of an ant species, shared by every ant and anthill of that kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub id: SpeciesId,
    pub ant_size: u32,
    pub reproduction_rate: u32,
}

impl Species {
    pub fn new(id: SpeciesId, ant_size: u32, reproduction_rate: u32) -> Self {
        Self {
            id,
            ant_size,
            reproduction_rate,
        }
    }

    #[inline(always)]
    pub fn size(&self) -> f32 {
        self.ant_size as f32
    }

    /// Energy an ant of this species gains from one unit of food.
    pub fn energy_per_food_unit(&self) -> f32 {
        100.0 / self.size()
    }

    pub fn birth_food_cost(&self) -> f32 {
        2.0 * self.size()
    }

    /// Below this an anthill without workers gives up.
    pub fn minimum_reserve(&self) -> f32 {
        2.0 * self.birth_food_cost()
    }

    /// Queens cost twice as much as a worker.
    pub fn queen_food_cost(&self) -> f32 {
        2.0 * self.birth_food_cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_costs() {
        let species = Species::new(0, 4, 3);
        assert_eq!(species.energy_per_food_unit(), 25.0);
        assert_eq!(species.birth_food_cost(), 8.0);
        assert_eq!(species.minimum_reserve(), 16.0);
        assert_eq!(species.queen_food_cost(), 16.0);
    }
}
