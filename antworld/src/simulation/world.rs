use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use shared::{
    EntityId, EntityKind, EntityTag, EntityView, Position, SpeciesStats, WorldSnapshot,
};
use slotmap::{Key, SlotMap};
use std::rc::Rc;
use tracing::{debug, warn};

use crate::config::SimulationConfig;

use super::INITIAL_ANTHILL_FOOD;
use super::ant::{Ant, AntAction, AntContext, AntKey, Neighbours, Role};
use super::anthill::{Anthill, AnthillKey, HillContext, HillOutcome};
use super::food::{FoodKey, FoodSite};
use super::grid::{Obstacle, ObstacleKey, Occupant, SpatialGrid};
use super::pheromone::{Channel, PheromoneField};
use super::species::{Species, SpeciesId};
use super::timer::Timer;

/// One entry of a tick's activation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Ant(AntKey),
    Anthill(AnthillKey),
    Food(FoodKey),
}

pub struct World {
    pub config: SimulationConfig,
    seed: u64,
    tick: u64,
    rng: StdRng,
    grid: SpatialGrid,
    pheromones: PheromoneField,
    species: Vec<Rc<Species>>,
    ants: SlotMap<AntKey, Ant>,
    anthills: SlotMap<AnthillKey, Anthill>,
    food_sites: SlotMap<FoodKey, FoodSite>,
    obstacles: SlotMap<ObstacleKey, Obstacle>,
    food_spawn_timer: Timer,
}

impl World {
    /// Builds a populated world: one anthill per included species, then the
    /// configured food sites and obstacles, all on random empty cells.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let seed = config.rng_seed.unwrap_or_else(rand::random);
        let mut world = Self::empty(config.width, config.height, config.torus, seed);
        world.food_spawn_timer = Timer::new(config.food_spawn_interval, 0);

        for (id, species) in config.included_species() {
            world.add_species(id, species.ant_size, species.reproduction_rate);
            let pos = world
                .grid
                .random_empty(&mut world.rng)
                .context("no room left for an anthill")?;
            world
                .place_anthill(id, pos, INITIAL_ANTHILL_FOOD)
                .with_context(|| format!("failed to place anthill of species {}", id))?;
        }

        world.config = config;
        for _ in 0..world.config.initial_food_sites {
            world
                .spawn_random_food_site()
                .context("no room left for a food site")?;
        }
        for _ in 0..world.config.initial_obstacles {
            let pos = world
                .grid
                .random_empty(&mut world.rng)
                .context("no room left for an obstacle")?;
            world.place_obstacle(pos);
        }

        debug!(
            seed,
            width = world.grid.width,
            height = world.grid.height,
            anthills = world.anthills.len(),
            food_sites = world.food_sites.len(),
            obstacles = world.obstacles.len(),
            "world populated"
        );
        Ok(world)
    }

    /// A blank world with no species, entities or spontaneous food.
    pub fn empty(width: u32, height: u32, torus: bool, seed: u64) -> Self {
        let config = SimulationConfig {
            width,
            height,
            torus,
            initial_food_sites: 0,
            initial_obstacles: 0,
            food_spawn_interval: 0,
            rng_seed: Some(seed),
            species: Vec::new(),
            ..SimulationConfig::default()
        };
        Self {
            seed,
            tick: 0,
            rng: StdRng::seed_from_u64(seed),
            grid: SpatialGrid::new(width, height, torus),
            pheromones: PheromoneField::new(),
            species: Vec::new(),
            ants: SlotMap::with_key(),
            anthills: SlotMap::with_key(),
            food_sites: SlotMap::with_key(),
            obstacles: SlotMap::with_key(),
            food_spawn_timer: Timer::new(config.food_spawn_interval, 0),
            config,
        }
    }

    /// Registers a species, or returns the existing one with that id.
    pub fn add_species(&mut self, id: SpeciesId, ant_size: u32, reproduction_rate: u32) -> Rc<Species> {
        if let Some(existing) = self.species(id) {
            return existing.clone();
        }
        let species = Rc::new(Species::new(id, ant_size, reproduction_rate));
        self.species.push(species.clone());
        species
    }

    pub fn species(&self, id: SpeciesId) -> Option<&Rc<Species>> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn place_anthill(&mut self, species: SpeciesId, pos: Position, food_units: f32) -> Option<AnthillKey> {
        let species = self.species(species)?.clone();
        let pos = self.vacant(pos)?;
        let key = self
            .anthills
            .insert_with_key(|k| Anthill::new(k, species, pos, food_units, &self.grid));
        self.grid.place(Occupant::Anthill(key), pos);
        Some(key)
    }

    pub fn place_food_site(&mut self, pos: Position, food_units: f32, regen_rate: f32) -> Option<FoodKey> {
        let pos = self.vacant(pos)?;
        let key = self.food_sites.insert(FoodSite::new(pos, food_units, regen_rate));
        self.grid.place(Occupant::Food(key), pos);
        Some(key)
    }

    pub fn place_obstacle(&mut self, pos: Position) -> Option<ObstacleKey> {
        let pos = self.vacant(pos)?;
        let key = self.obstacles.insert(Obstacle { pos });
        self.grid.place(Occupant::Obstacle(key), pos);
        Some(key)
    }

    /// Puts an ant of `hill`'s species straight onto the grid at `pos`.
    /// The ant has no heading yet and follows trails unless told otherwise.
    pub fn spawn_ant(&mut self, hill: AnthillKey, pos: Position, role: Role) -> Option<AntKey> {
        let pos = self.vacant(pos)?;
        let anthill = self.anthills.get_mut(hill)?;

        let mut ant = Ant::new(anthill.species.clone(), hill, role, anthill.pos);
        ant.leave_hill(pos, pos, false);
        if role == Role::Worker {
            anthill.worker_count += 1;
        }

        let key = self.ants.insert_with_key(|k| {
            ant.key = k;
            ant
        });
        self.grid.place(Occupant::Ant(key), pos);
        Some(key)
    }

    fn vacant(&self, pos: Position) -> Option<Position> {
        self.grid.normalize(pos).filter(|p| self.grid.is_empty(*p))
    }

    /// A food site of random size and regeneration on a random empty cell.
    pub fn spawn_random_food_site(&mut self) -> Option<FoodKey> {
        let pos = self.grid.random_empty(&mut self.rng)?;
        let units = self
            .rng
            .random_range(self.config.food_units_min..self.config.food_units_max) as f32;
        let regen_rate = if self.config.max_regen_rate > 0.0 {
            self.rng.random_range(0.0..self.config.max_regen_rate)
        } else {
            0.0
        };
        let key = self.place_food_site(pos, units, regen_rate)?;
        debug!(tick = self.tick, ?pos, units, regen_rate, "food site spawned");
        Some(key)
    }

    /// Advances the world by one tick.
    pub fn step(&mut self) {
        self.tick += 1;

        let mut order: Vec<Actor> = Vec::with_capacity(
            self.ants.len() + self.anthills.len() + self.food_sites.len(),
        );
        order.extend(self.ants.keys().map(Actor::Ant));
        order.extend(self.anthills.keys().map(Actor::Anthill));
        order.extend(self.food_sites.keys().map(Actor::Food));
        order.shuffle(&mut self.rng);

        for actor in order {
            match actor {
                Actor::Ant(key) => self.activate_ant(key),
                Actor::Anthill(key) => self.activate_anthill(key),
                Actor::Food(key) => self.activate_food(key),
            }
        }

        self.pheromones.evaporate();

        if self.food_spawn_timer.tick() {
            self.spawn_random_food_site();
        }
    }

    /// Enemy ants and food sites in the 8-neighborhood, in row-major order.
    pub fn classify_neighbours(&self, ant: &Ant) -> Neighbours {
        let mut neighbours = Neighbours::default();
        for cell in self.grid.moore(ant.pos) {
            match self.grid.cell(cell) {
                Some(Occupant::Ant(other)) => {
                    let enemy = self
                        .ants
                        .get(other)
                        .is_some_and(|o| o.species.id != ant.species.id);
                    if enemy {
                        neighbours.enemies.push(other);
                    }
                }
                Some(Occupant::Food(site)) => neighbours.food.push(site),
                _ => {}
            }
        }
        neighbours
    }

    fn activate_ant(&mut self, key: AntKey) {
        let Some(ant) = self.ants.get(key) else {
            return;
        };
        let neighbours = if ant.inside || ant.role == Role::Queen {
            Neighbours::default()
        } else {
            self.classify_neighbours(ant)
        };

        let action = {
            let World {
                ants,
                grid,
                pheromones,
                anthills,
                food_sites,
                rng,
                ..
            } = self;
            let Some(ant) = ants.get_mut(key) else {
                return;
            };
            let mut ctx = AntContext {
                grid,
                pheromones,
                anthills,
                food_sites,
                rng,
            };
            ant.update(&neighbours, &mut ctx)
        };

        match action {
            AntAction::Died => self.despawn_ant(key),
            AntAction::Strike { target, damage } => {
                if let Some(enemy) = self.ants.get_mut(target) {
                    enemy.take_damage(damage);
                }
            }
            AntAction::FoundColony => self.found_colony(key),
            _ => {}
        }
    }

    fn activate_anthill(&mut self, key: AnthillKey) {
        let outcome = {
            let World {
                anthills,
                grid,
                pheromones,
                ants,
                rng,
                ..
            } = self;
            let Some(hill) = anthills.get_mut(key) else {
                return;
            };
            let mut ctx = HillContext {
                grid,
                pheromones,
                ants,
                rng,
            };
            hill.update(&mut ctx)
        };

        if outcome == HillOutcome::Destroyed {
            self.destroy_anthill(key);
        }
    }

    fn activate_food(&mut self, key: FoodKey) {
        let alive = {
            let World {
                food_sites,
                grid,
                pheromones,
                ..
            } = self;
            let Some(site) = food_sites.get_mut(key) else {
                return;
            };
            site.update(grid, pheromones)
        };

        if !alive {
            if let Some(site) = self.food_sites.remove(key) {
                self.release_cell(site.pos, Occupant::Food(key));
                debug!(tick = self.tick, pos = ?site.pos, "food site exhausted");
            }
        }
    }

    /// Removes an ant from the arena, the grid or its hill's queues, and the worker count.
    pub fn despawn_ant(&mut self, key: AntKey) {
        let Some(ant) = self.ants.remove(key) else {
            return;
        };

        if ant.inside {
            if let Some(hill) = self.anthills.get_mut(ant.home) {
                hill.evict(key);
            }
        } else {
            self.release_cell(ant.pos, Occupant::Ant(key));
        }

        if ant.role == Role::Worker {
            if let Some(hill) = self.anthills.get_mut(ant.home) {
                hill.worker_count = hill.worker_count.saturating_sub(1);
            }
        }
    }

    fn destroy_anthill(&mut self, key: AnthillKey) {
        let Some(hill) = self.anthills.remove(key) else {
            return;
        };
        self.release_cell(hill.pos, Occupant::Anthill(key));

        for parked in hill.parked() {
            self.ants.remove(parked);
        }

        let species = hill.species.id;
        if !self.anthills.values().any(|h| h.species.id == species) {
            self.pheromones.clear_channel(Channel::Trail(species));
        }
        debug!(tick = self.tick, species, pos = ?hill.pos, "anthill destroyed");
    }

    /// Turns a settled queen into a new anthill on her cell.
    fn found_colony(&mut self, queen: AntKey) {
        let Some(ant) = self.ants.remove(queen) else {
            return;
        };
        self.release_cell(ant.pos, Occupant::Ant(queen));

        let pos = ant.pos;
        let species = ant.species.clone();
        let key = self
            .anthills
            .insert_with_key(|k| Anthill::new(k, species, pos, ant.endowment, &self.grid));
        self.grid.place(Occupant::Anthill(key), pos);
        debug!(
            tick = self.tick,
            species = ant.species.id,
            ?pos,
            food = ant.endowment,
            "colony founded"
        );
    }

    fn release_cell(&mut self, pos: Position, expected: Occupant) {
        match self.grid.cell(pos) {
            Some(occupant) if occupant == expected => {
                self.grid.remove(pos);
            }
            found => warn!(?pos, ?expected, ?found, "grid out of sync with removed entity"),
        }
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityView> + '_ {
        self.grid
            .occupied()
            .filter_map(move |(pos, occupant)| self.view(pos, occupant))
    }

    fn view(&self, position: Position, occupant: Occupant) -> Option<EntityView> {
        let (id, kind) = match occupant {
            Occupant::Ant(key) => {
                let ant = self.ants.get(key)?;
                (
                    entity_id(EntityTag::Ant, key),
                    EntityKind::Ant {
                        species: ant.species.id,
                        role: ant.role,
                        size: ant.species.ant_size,
                        cargo: ant.cargo,
                        carrying: ant.is_carrying(),
                        lost: ant.lost,
                        foraging: ant.foraging,
                    },
                )
            }
            Occupant::Anthill(key) => {
                let hill = self.anthills.get(key)?;
                (
                    entity_id(EntityTag::Anthill, key),
                    EntityKind::Anthill {
                        species: hill.species.id,
                        food_units: hill.food_units,
                        worker_count: hill.worker_count,
                    },
                )
            }
            Occupant::Food(key) => {
                let site = self.food_sites.get(key)?;
                (
                    entity_id(EntityTag::FoodSite, key),
                    EntityKind::FoodSite {
                        food_units: site.food_units,
                    },
                )
            }
            Occupant::Obstacle(key) => (entity_id(EntityTag::Obstacle, key), EntityKind::Obstacle),
        };
        Some(EntityView { id, position, kind })
    }

    /// Per-species totals, in registration order.
    pub fn species_stats(&self) -> Vec<SpeciesStats> {
        let mut stats: Vec<SpeciesStats> = self
            .species
            .iter()
            .map(|s| SpeciesStats {
                species: s.id,
                ..SpeciesStats::default()
            })
            .collect();
        let slot = |id: SpeciesId| self.species.iter().position(|s| s.id == id);

        for ant in self.ants.values() {
            if let Some(i) = slot(ant.species.id) {
                match ant.role {
                    Role::Worker => stats[i].workers += 1,
                    Role::Queen => stats[i].queens += 1,
                }
            }
        }
        for hill in self.anthills.values() {
            if let Some(i) = slot(hill.species.id) {
                stats[i].anthills += 1;
                stats[i].stored_food += hill.food_units;
                stats[i].food_collected += hill.food_collected;
            }
        }
        stats
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            width: self.grid.width,
            height: self.grid.height,
            entities: self.entities().collect(),
            species: self.species_stats(),
        }
    }

    /// True once no anthill and no ant is left.
    pub fn is_extinct(&self) -> bool {
        self.anthills.is_empty() && self.ants.is_empty()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn pheromones(&self) -> &PheromoneField {
        &self.pheromones
    }

    pub fn pheromones_mut(&mut self) -> &mut PheromoneField {
        &mut self.pheromones
    }

    pub fn ant(&self, key: AntKey) -> Option<&Ant> {
        self.ants.get(key)
    }

    pub fn ant_mut(&mut self, key: AntKey) -> Option<&mut Ant> {
        self.ants.get_mut(key)
    }

    pub fn ants(&self) -> impl Iterator<Item = &Ant> + '_ {
        self.ants.values()
    }

    pub fn anthill(&self, key: AnthillKey) -> Option<&Anthill> {
        self.anthills.get(key)
    }

    pub fn anthill_mut(&mut self, key: AnthillKey) -> Option<&mut Anthill> {
        self.anthills.get_mut(key)
    }

    pub fn anthills(&self) -> impl Iterator<Item = &Anthill> + '_ {
        self.anthills.values()
    }

    pub fn food_site(&self, key: FoodKey) -> Option<&FoodSite> {
        self.food_sites.get(key)
    }

    pub fn food_site_mut(&mut self, key: FoodKey) -> Option<&mut FoodSite> {
        self.food_sites.get_mut(key)
    }

    pub fn food_sites(&self) -> impl Iterator<Item = &FoodSite> + '_ {
        self.food_sites.values()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }
}

fn entity_id<K: Key>(tag: EntityTag, key: K) -> EntityId {
    EntityId {
        tag,
        raw: key.data().as_ffi(),
    }
}
