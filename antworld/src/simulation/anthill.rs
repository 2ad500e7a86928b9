use super::ant::{Ant, AntKey, Role};
use super::grid::{Occupant, SpatialGrid};
use super::pheromone::{Channel, PheromoneField};
use super::species::Species;
use super::{BIRTH_RATE_SCALE, FORAGER_RELEASE_PERIOD, QUEEN_SEASON_BASE, QUEEN_SEASON_LENGTH};

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use shared::Position;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::warn;

new_key_type! {
    /// Key for anthill slotmap.
    pub struct AnthillKey;
}

/// The parts of the world an anthill may touch while acting.
pub struct HillContext<'a> {
    pub grid: &'a mut SpatialGrid,
    pub pheromones: &'a PheromoneField,
    pub ants: &'a mut SlotMap<AntKey, Ant>,
    pub rng: &'a mut StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HillOutcome {
    Active,
    Destroyed,
}

/// Colony economy, ant factory and holding pen.
pub struct Anthill {
    pub key: AnthillKey,
    pub species: Rc<Species>,
    pub pos: Position,
    pub food_units: f32,
    /// Total cargo ever delivered.
    pub food_collected: f32,
    /// Live workers spawned here, queens excluded.
    pub worker_count: u32,
    pub holding: VecDeque<AntKey>,
    pub waiting_queens: VecDeque<AntKey>,
    pub surrounding: Vec<Position>,
    pub turn_counter: u64,
}

impl Anthill {
    pub fn new(
        key: AnthillKey,
        species: Rc<Species>,
        pos: Position,
        food_units: f32,
        grid: &SpatialGrid,
    ) -> Self {
        Self {
            key,
            species,
            pos,
            food_units,
            food_collected: 0.0,
            worker_count: 0,
            holding: VecDeque::new(),
            waiting_queens: VecDeque::new(),
            surrounding: grid.moore(pos),
            turn_counter: 0,
        }
    }

    pub fn update(&mut self, ctx: &mut HillContext) -> HillOutcome {
        self.turn_counter += 1;

        if self.is_bankrupt() {
            return HillOutcome::Destroyed;
        }

        self.breed(ctx);
        self.release(ctx);
        HillOutcome::Active
    }

    /// No workers left and not enough food to raise new ones.
    pub fn is_bankrupt(&self) -> bool {
        self.worker_count == 0 && self.food_units < self.species.minimum_reserve()
    }

    /// Whole birth costs available above the minimum reserve.
    pub fn food_surplus(&self) -> u32 {
        let spare = self.food_units - self.species.minimum_reserve();
        if spare <= 0.0 {
            return 0;
        }
        (spare / self.species.birth_food_cost()).floor() as u32
    }

    pub fn birth_probability(&self) -> f64 {
        let rate = (self.food_surplus() + 1) as f32
            * self.species.reproduction_rate as f32
            * BIRTH_RATE_SCALE;
        rate.clamp(0.0, 1.0) as f64
    }

    /// Queen season recurs every `QUEEN_SEASON_BASE / reproduction_rate` turns.
    pub fn in_queen_season(&self) -> bool {
        let period = (QUEEN_SEASON_BASE / self.species.reproduction_rate.max(1) as u64).max(1);
        let offset = period / 2;
        (self.turn_counter + offset) % period < QUEEN_SEASON_LENGTH
    }

    fn breed(&mut self, ctx: &mut HillContext) {
        let reserve = self.species.minimum_reserve();

        if self.food_units >= reserve && ctx.rng.random_bool(self.birth_probability()) {
            self.spawn_worker(ctx.ants);
        }

        let queen_cost = self.species.queen_food_cost();
        if self.in_queen_season()
            && self.food_units >= reserve + queen_cost
            && ctx.rng.random_bool(self.birth_probability())
        {
            self.spawn_queen(ctx.ants);
        }
    }

    pub fn spawn_worker(&mut self, ants: &mut SlotMap<AntKey, Ant>) -> AntKey {
        self.food_units -= self.species.birth_food_cost();
        let key = self.spawn(ants, Role::Worker, 0.0);
        self.holding.push_back(key);
        self.worker_count += 1;
        key
    }

    pub fn spawn_queen(&mut self, ants: &mut SlotMap<AntKey, Ant>) -> AntKey {
        let cost = self.species.queen_food_cost();
        self.food_units -= cost;
        let key = self.spawn(ants, Role::Queen, cost);
        self.waiting_queens.push_back(key);
        key
    }

    fn spawn(&self, ants: &mut SlotMap<AntKey, Ant>, role: Role, endowment: f32) -> AntKey {
        let mut ant = Ant::new(self.species.clone(), self.key, role, self.pos);
        ant.endowment = endowment;
        ants.insert_with_key(|k| {
            ant.key = k;
            ant
        })
    }

    /// Lets at most one ant out per turn. Queens leave first; workers follow a
    /// known trail, or go exploring on the forager cadence.
    fn release(&mut self, ctx: &mut HillContext) {
        let free: Vec<Position> = self
            .surrounding
            .iter()
            .copied()
            .filter(|c| ctx.grid.is_empty(*c))
            .collect();
        if free.is_empty() {
            return;
        }

        if let Some(queen) = self.waiting_queens.pop_front() {
            if let Some(&cell) = free.choose(ctx.rng) {
                self.release_ant(queen, cell, true, ctx);
            }
            return;
        }

        if self.holding.is_empty() {
            return;
        }

        let scented = ctx
            .pheromones
            .smell(Channel::Trail(self.species.id), &free);
        if let Ok(&(cell, _)) = scented.choose_weighted(ctx.rng, |(_, intensity)| *intensity) {
            if let Some(key) = self.holding.pop_front() {
                self.release_ant(key, cell, false, ctx);
            }
            return;
        }

        if self.turn_counter % FORAGER_RELEASE_PERIOD == 0 {
            if let (Some(&cell), Some(key)) = (free.choose(ctx.rng), self.holding.pop_front()) {
                self.release_ant(key, cell, true, ctx);
            }
        }
    }

    fn release_ant(&mut self, key: AntKey, cell: Position, foraging: bool, ctx: &mut HillContext) {
        let Some(ant) = ctx.ants.get_mut(key) else {
            warn!(
                ant = ?key,
                anthill = ?self.key,
                "parked ant missing from the ant arena, dropping it from the queue"
            );
            return;
        };
        ant.leave_hill(cell, self.pos, foraging);
        ctx.grid.place(Occupant::Ant(key), cell);
    }

    pub fn receive_food(&mut self, amount: f32) {
        self.food_units += amount;
        self.food_collected += amount;
    }

    /// Parks a returning ant at the back of the holding queue.
    pub fn admit(&mut self, key: AntKey) {
        self.holding.push_back(key);
    }

    /// Forgets a parked ant that died inside.
    pub fn evict(&mut self, key: AntKey) {
        self.holding.retain(|k| *k != key);
        self.waiting_queens.retain(|k| *k != key);
    }

    pub fn parked(&self) -> impl Iterator<Item = AntKey> + '_ {
        self.holding.iter().chain(self.waiting_queens.iter()).copied()
    }
}
