use super::anthill::{Anthill, AnthillKey};
use super::food::{FoodKey, FoodSite};
use super::grid::{Occupant, SpatialGrid};
use super::pheromone::{Channel, PheromoneField};
use super::species::Species;
use super::{
    CARGO_RATIO, ENERGY_DECAY_PER_TICK, HUNGER_THRESHOLD, MAX_ENERGY, QUEEN_FLIGHT_TICKS,
    QUEEN_MIN_DISTANCE, QUEEN_MIN_FREE_NEIGHBORS, SIZE_DAMAGE_RATIO, SIZE_HEALTH_RATIO,
    STRAIGHT_BIAS, TRAIL_STRENGTH_DIVISOR,
};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use shared::Position;
use shared::util::KING_MOVES;
use slotmap::{Key, SlotMap, new_key_type};
use std::rc::Rc;
use tracing::warn;

pub use shared::AntRole as Role;

new_key_type! {
    /// Key for ant slotmap.
    pub struct AntKey;
}

/// What an ant sees in its 8-neighborhood, classified by the world before the ant acts.
#[derive(Debug, Default, Clone)]
pub struct Neighbours {
    pub enemies: Vec<AntKey>,
    pub food: Vec<FoodKey>,
}

/// The parts of the world an ant may touch while acting.
pub struct AntContext<'a> {
    pub grid: &'a mut SpatialGrid,
    pub pheromones: &'a mut PheromoneField,
    pub anthills: &'a mut SlotMap<AnthillKey, Anthill>,
    pub food_sites: &'a mut SlotMap<FoodKey, FoodSite>,
    pub rng: &'a mut StdRng,
}

/// Result of one activation. The world applies the ones that reach beyond the ant itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AntAction {
    Died,
    Rested,
    Strike { target: AntKey, damage: f32 },
    Collected(f32),
    Delivered(f32),
    Moved,
    TurnedAround,
    Waited,
    FoundColony,
}

/// Outcome of a cone step.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stride {
    /// Moved, following the given channel if scent decided the cell.
    Moved(Option<Channel>),
    TurnedAround,
}

/// State of an ant.
#[derive(Debug, Clone)]
pub struct Ant {
    pub key: AntKey,
    pub species: Rc<Species>,
    pub home: AnthillKey,
    pub role: Role,

    pub pos: Position,
    pub last_pos: Position,
    pub health: f32,
    pub energy: f32,
    pub cargo: f32,
    pub trail_strength: f32,
    pub foraging: bool,
    pub lost: bool,
    /// Parked in the home anthill's holding queue, off the grid.
    pub inside: bool,

    /// Food a queen takes with her to found a colony.
    pub endowment: f32,
    pub flight_ticks: u32,
}

impl Ant {
    /// Create a new ant, parked inside its anthill.
    pub fn new(species: Rc<Species>, home: AnthillKey, role: Role, hill_pos: Position) -> Self {
        Self {
            key: AntKey::null(),
            health: species.size() * SIZE_HEALTH_RATIO,
            species,
            home,
            role,
            pos: hill_pos,
            last_pos: hill_pos,
            energy: MAX_ENERGY,
            cargo: 0.0,
            trail_strength: 0.0,
            foraging: false,
            lost: false,
            inside: true,
            endowment: 0.0,
            flight_ticks: 0,
        }
    }

    #[inline(always)]
    pub fn size(&self) -> f32 {
        self.species.size()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0 || self.energy <= 0.0
    }

    pub fn is_carrying(&self) -> bool {
        self.cargo > 0.0
    }

    pub fn take_damage(&mut self, damage: f32) {
        self.health -= damage;
    }

    /// Heading as a king move, `pos - last_pos`.
    pub fn orientation(&self, grid: &SpatialGrid) -> Position {
        grid.delta(self.last_pos, self.pos).signum()
    }

    /// Leaves the anthill onto `cell`, facing away from the hill.
    pub fn leave_hill(&mut self, cell: Position, hill_pos: Position, foraging: bool) {
        self.pos = cell;
        self.last_pos = hill_pos;
        self.inside = false;
        self.foraging = foraging;
        self.lost = false;
        self.flight_ticks = 0;
    }

    /// Update ant state and behavior.
    pub fn update(&mut self, neighbours: &Neighbours, ctx: &mut AntContext) -> AntAction {
        if self.is_dead() {
            return AntAction::Died;
        }

        self.energy = (self.energy - ENERGY_DECAY_PER_TICK).max(0.0);

        if self.inside {
            return self.rest(ctx);
        }

        match self.role {
            Role::Worker => self.work(neighbours, ctx),
            Role::Queen => self.fly(ctx),
        }
    }

    fn rest(&mut self, ctx: &mut AntContext) -> AntAction {
        if self.energy >= MAX_ENERGY * HUNGER_THRESHOLD {
            return AntAction::Rested;
        }
        if let Some(hill) = ctx.anthills.get_mut(self.home) {
            let bite = hill.food_units.min(1.0);
            if bite > 0.0 {
                hill.food_units -= bite;
                self.energy =
                    (self.energy + bite * self.species.energy_per_food_unit()).min(MAX_ENERGY);
            }
        }
        AntAction::Rested
    }

    fn work(&mut self, neighbours: &Neighbours, ctx: &mut AntContext) -> AntAction {
        if let Some(&target) = neighbours.enemies.first() {
            return AntAction::Strike {
                target,
                damage: self.size() * SIZE_DAMAGE_RATIO,
            };
        }

        if !self.is_carrying() {
            if let Some(&food_key) = neighbours.food.first() {
                if let Some(action) = self.collect(food_key, ctx) {
                    return action;
                }
            }
        }

        if self.is_carrying() {
            return self.return_home(ctx);
        }

        if self.foraging {
            return self.forage(ctx);
        }

        if self.lost {
            return self.recover(ctx);
        }

        self.follow_trail(ctx)
    }

    fn collect(&mut self, food_key: FoodKey, ctx: &mut AntContext) -> Option<AntAction> {
        let site = ctx.food_sites.get_mut(food_key)?;
        let taken = site.take_food(self.size() * CARGO_RATIO);
        if taken <= 0.0 {
            return None;
        }
        self.cargo = taken;
        self.trail_strength = site.food_units / TRAIL_STRENGTH_DIVISOR;
        ctx.pheromones
            .deposit(self.trail_channel(), self.pos, self.trail_strength);
        self.turn_around(ctx.grid);
        self.foraging = false;
        self.lost = false;
        Some(AntAction::Collected(taken))
    }

    fn return_home(&mut self, ctx: &mut AntContext) -> AntAction {
        let Some(hill) = ctx.anthills.get_mut(self.home) else {
            // Colony is gone, nobody to bring the food to
            self.cargo = 0.0;
            self.trail_strength = 0.0;
            self.lost = true;
            return AntAction::Waited;
        };

        if hill.surrounding.contains(&self.pos) {
            let delivered = self.cargo;
            hill.receive_food(delivered);
            self.cargo = 0.0;
            self.turn_around(ctx.grid);

            if ctx.grid.remove(self.pos) != Some(Occupant::Ant(self.key)) {
                warn!(
                    ant = ?self.key,
                    pos = ?self.pos,
                    "ant was not registered in its cell when entering the anthill"
                );
            }
            self.inside = true;
            self.foraging = false;
            self.lost = false;
            hill.admit(self.key);
            return AntAction::Delivered(delivered);
        }

        let home_pos = hill.pos;
        if self.step_toward(home_pos, ctx) {
            ctx.pheromones
                .deposit(self.trail_channel(), self.pos, self.trail_strength);
            AntAction::Moved
        } else {
            AntAction::Waited
        }
    }

    fn forage(&mut self, ctx: &mut AntContext) -> AntAction {
        self.ensure_heading(ctx);
        let cone = self.wide_cone(ctx.grid);
        self.advance(&cone, &[Channel::FoodProximity], ctx).into()
    }

    fn recover(&mut self, ctx: &mut AntContext) -> AntAction {
        self.ensure_heading(ctx);
        let trail = self.trail_channel();
        let cone = self.wide_cone(ctx.grid);
        let stride = self.advance(&cone, &[trail, Channel::FoodProximity], ctx);
        if stride == Stride::Moved(Some(trail)) {
            self.lost = false;
        }
        stride.into()
    }

    fn follow_trail(&mut self, ctx: &mut AntContext) -> AntAction {
        self.ensure_heading(ctx);
        let cone = self.narrow_cone(ctx.grid);
        let free: Vec<Position> = cone.into_iter().filter(|c| ctx.grid.is_empty(*c)).collect();
        if free.is_empty() {
            self.turn_around(ctx.grid);
            return AntAction::TurnedAround;
        }

        let scented = ctx.pheromones.smell(self.trail_channel(), &free);
        match scented.choose_weighted(ctx.rng, |(_, intensity)| *intensity) {
            Ok(&(cell, _)) => {
                self.move_to(cell, ctx.grid);
                AntAction::Moved
            }
            Err(_) => {
                self.lost = true;
                self.recover(ctx)
            }
        }
    }

    /// Queens wander away from home, then settle to found a colony.
    fn fly(&mut self, ctx: &mut AntContext) -> AntAction {
        self.flight_ticks += 1;
        if self.flight_ticks >= QUEEN_FLIGHT_TICKS && self.can_found_colony(ctx) {
            return AntAction::FoundColony;
        }
        self.ensure_heading(ctx);
        let cone = self.wide_cone(ctx.grid);
        self.advance(&cone, &[], ctx).into()
    }

    fn can_found_colony(&self, ctx: &AntContext) -> bool {
        let far_enough = match ctx.anthills.get(self.home) {
            Some(hill) => ctx.grid.chebyshev(self.pos, hill.pos) >= QUEEN_MIN_DISTANCE,
            None => true,
        };
        let free = ctx
            .grid
            .moore(self.pos)
            .into_iter()
            .filter(|c| ctx.grid.is_empty(*c))
            .count();
        far_enough && free >= QUEEN_MIN_FREE_NEIGHBORS
    }

    fn trail_channel(&self) -> Channel {
        Channel::Trail(self.species.id)
    }

    /// Moore ring minus the orthogonal cross (with center) around the previous cell.
    pub fn wide_cone(&self, grid: &SpatialGrid) -> Vec<Position> {
        let behind = grid.cross_with_center(self.last_pos);
        grid.moore(self.pos)
            .into_iter()
            .filter(|c| !behind.contains(c))
            .collect()
    }

    /// Moore ring intersected with the orthogonal cross (with center) around the cell ahead.
    pub fn narrow_cone(&self, grid: &SpatialGrid) -> Vec<Position> {
        let front = grid.cross_with_center(self.pos + self.orientation(grid));
        grid.moore(self.pos)
            .into_iter()
            .filter(|c| front.contains(c))
            .collect()
    }

    /// Reverses heading in place: the cell ahead becomes the previous cell.
    pub fn turn_around(&mut self, grid: &SpatialGrid) {
        self.last_pos = self.pos + self.orientation(grid);
    }

    /// Picks a random heading for an ant that has never moved.
    fn ensure_heading(&mut self, ctx: &mut AntContext) {
        if self.orientation(ctx.grid).is_zero() {
            if let Some(&dir) = KING_MOVES.choose(ctx.rng) {
                self.last_pos = self.pos - dir;
            }
        }
    }

    fn move_to(&mut self, cell: Position, grid: &mut SpatialGrid) -> bool {
        if grid.move_to(self.pos, cell) {
            self.last_pos = self.pos;
            self.pos = cell;
            return true;
        }
        false
    }

    /// One step inside `cone`: scent on the first channel that has any decides,
    /// otherwise a straight-biased draw. No free cell means turn-around.
    fn advance(&mut self, cone: &[Position], channels: &[Channel], ctx: &mut AntContext) -> Stride {
        let free: Vec<Position> = cone.iter().copied().filter(|c| ctx.grid.is_empty(*c)).collect();
        if free.is_empty() {
            self.turn_around(ctx.grid);
            return Stride::TurnedAround;
        }

        for &channel in channels {
            let scented = ctx.pheromones.smell(channel, &free);
            if let Ok(&(cell, _)) = scented.choose_weighted(ctx.rng, |(_, intensity)| *intensity) {
                self.move_to(cell, ctx.grid);
                return Stride::Moved(Some(channel));
            }
        }

        let ahead = ctx.grid.normalize(self.pos + self.orientation(ctx.grid));
        let cell = *free
            .choose_weighted(ctx.rng, |c| {
                if Some(*c) == ahead { STRAIGHT_BIAS } else { 1.0 }
            })
            .unwrap_or(&free[0]);
        self.move_to(cell, ctx.grid);
        Stride::Moved(None)
    }

    /// Greedy king step toward `target`, preferring the straight line.
    /// Sidesteps around blockers; returns false if boxed in.
    fn step_toward(&mut self, target: Position, ctx: &mut AntContext) -> bool {
        let grid = &*ctx.grid;
        let here = grid.chebyshev(self.pos, target);
        let ahead = grid.normalize(self.pos + grid.delta(self.pos, target).signum());
        let previous = grid.normalize(self.last_pos);

        let free: Vec<Position> = grid
            .moore(self.pos)
            .into_iter()
            .filter(|c| grid.is_empty(*c))
            .collect();
        let closer: Vec<Position> = free
            .iter()
            .copied()
            .filter(|c| grid.chebyshev(*c, target) < here)
            .collect();
        let options = if closer.is_empty() {
            let sidesteps: Vec<Position> = free
                .iter()
                .copied()
                .filter(|c| grid.chebyshev(*c, target) == here)
                .collect();
            let forward: Vec<Position> = sidesteps
                .iter()
                .copied()
                .filter(|c| Some(*c) != previous)
                .collect();
            if forward.is_empty() { sidesteps } else { forward }
        } else {
            closer
        };

        let Ok(&cell) = options.choose_weighted(ctx.rng, |c| {
            if Some(*c) == ahead { STRAIGHT_BIAS } else { 1.0 }
        }) else {
            return false;
        };
        self.move_to(cell, ctx.grid)
    }
}

impl From<Stride> for AntAction {
    fn from(stride: Stride) -> Self {
        match stride {
            Stride::Moved(_) => AntAction::Moved,
            Stride::TurnedAround => AntAction::TurnedAround,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct Fixture {
        grid: SpatialGrid,
        pheromones: PheromoneField,
        anthills: SlotMap<AnthillKey, Anthill>,
        food_sites: SlotMap<FoodKey, FoodSite>,
        ants: SlotMap<AntKey, Ant>,
        rng: StdRng,
        species: Rc<Species>,
        hill: AnthillKey,
    }

    impl Fixture {
        fn new(width: u32, height: u32, hill_pos: Position) -> Self {
            let species = Rc::new(Species::new(0, 3, 3));
            let mut grid = SpatialGrid::new(width, height, false);
            let mut anthills = SlotMap::with_key();
            let hill = anthills.insert_with_key(|k| Anthill::new(k, species.clone(), hill_pos, 50.0, &grid));
            grid.place(Occupant::Anthill(hill), hill_pos);
            Self {
                grid,
                pheromones: PheromoneField::new(),
                anthills,
                food_sites: SlotMap::with_key(),
                ants: SlotMap::with_key(),
                rng: StdRng::seed_from_u64(11),
                species,
                hill,
            }
        }

        /// Ant standing at `pos`, having just stepped in from `last_pos`.
        fn ant_at(&mut self, pos: Position, last_pos: Position) -> AntKey {
            let hill_pos = self.anthills[self.hill].pos;
            let mut ant = Ant::new(self.species.clone(), self.hill, Role::Worker, hill_pos);
            ant.leave_hill(pos, last_pos, false);
            let key = self.ants.insert_with_key(|k| {
                ant.key = k;
                ant
            });
            self.grid.place(Occupant::Ant(key), pos);
            key
        }

        fn update(&mut self, key: AntKey, neighbours: &Neighbours) -> AntAction {
            let mut ctx = AntContext {
                grid: &mut self.grid,
                pheromones: &mut self.pheromones,
                anthills: &mut self.anthills,
                food_sites: &mut self.food_sites,
                rng: &mut self.rng,
            };
            self.ants[key].update(neighbours, &mut ctx)
        }
    }

    fn sorted(mut cells: Vec<Position>) -> Vec<Position> {
        cells.sort();
        cells
    }

    #[test]
    fn test_wide_cone_excludes_cells_behind() {
        let mut fx = Fixture::new(9, 9, Position::new(0, 8));
        let key = fx.ant_at(Position::new(4, 4), Position::new(3, 4));
        let cone = fx.ants[key].wide_cone(&fx.grid);
        assert_eq!(
            sorted(cone),
            sorted(vec![
                Position::new(4, 3),
                Position::new(5, 3),
                Position::new(5, 4),
                Position::new(5, 5),
                Position::new(4, 5),
            ])
        );
    }

    #[test]
    fn test_wide_cone_on_a_diagonal_heading() {
        let mut fx = Fixture::new(9, 9, Position::new(0, 8));
        let key = fx.ant_at(Position::new(4, 4), Position::new(3, 3));
        let cone = fx.ants[key].wide_cone(&fx.grid);
        assert_eq!(cone.len(), 5);
        assert!(!cone.contains(&Position::new(3, 3)));
        assert!(!cone.contains(&Position::new(4, 3)));
        assert!(!cone.contains(&Position::new(3, 4)));
        assert!(cone.contains(&Position::new(5, 5)));
    }

    #[test]
    fn test_narrow_cone_is_forward_only() {
        let mut fx = Fixture::new(9, 9, Position::new(0, 8));
        let key = fx.ant_at(Position::new(4, 4), Position::new(3, 4));
        assert_eq!(
            sorted(fx.ants[key].narrow_cone(&fx.grid)),
            vec![Position::new(5, 3), Position::new(5, 4), Position::new(5, 5)]
        );

        let diagonal = fx.ant_at(Position::new(2, 2), Position::new(1, 1));
        assert_eq!(
            sorted(fx.ants[diagonal].narrow_cone(&fx.grid)),
            vec![Position::new(2, 3), Position::new(3, 2), Position::new(3, 3)]
        );
    }

    #[test]
    fn test_blocked_cone_turns_around_without_moving() {
        // Heading east against the east edge, the two cells left in the cone are taken
        let mut fx = Fixture::new(5, 5, Position::new(0, 4));
        let key = fx.ant_at(Position::new(4, 2), Position::new(3, 2));
        fx.ant_at(Position::new(4, 1), Position::new(4, 0));
        fx.ant_at(Position::new(4, 3), Position::new(4, 4));
        fx.ants[key].foraging = true;
        let before = fx.ants[key].orientation(&fx.grid);

        let action = fx.update(key, &Neighbours::default());
        let ant = &fx.ants[key];
        assert_eq!(action, AntAction::TurnedAround);
        assert_eq!(ant.pos, Position::new(4, 2), "turn-around must not relocate the ant");
        assert_eq!(ant.orientation(&fx.grid), -before, "heading is reversed");
    }

    #[test]
    fn test_enemy_in_reach_is_struck_before_anything_else() {
        let mut fx = Fixture::new(6, 6, Position::new(0, 0));
        let key = fx.ant_at(Position::new(3, 3), Position::new(2, 3));
        let enemy = fx.ant_at(Position::new(4, 3), Position::new(5, 3));
        let neighbours = Neighbours {
            enemies: vec![enemy],
            food: Vec::new(),
        };
        let action = fx.update(key, &neighbours);
        assert_eq!(
            action,
            AntAction::Strike {
                target: enemy,
                damage: 3.0 * SIZE_DAMAGE_RATIO
            }
        );
        assert_eq!(fx.ants[key].pos, Position::new(3, 3), "fighting ants do not move");
    }

    #[test]
    fn test_collect_sets_trail_and_reverses() {
        let mut fx = Fixture::new(8, 8, Position::new(0, 0));
        let site_pos = Position::new(5, 3);
        let site = fx.food_sites.insert(FoodSite::new(site_pos, 50.0, 0.0));
        fx.grid.place(Occupant::Food(site), site_pos);
        let key = fx.ant_at(Position::new(4, 3), Position::new(3, 3));

        let action = fx.update(key, &Neighbours { enemies: Vec::new(), food: vec![site] });
        assert_eq!(action, AntAction::Collected(9.0));

        let ant = &fx.ants[key];
        assert_eq!(ant.cargo, 9.0);
        assert_eq!(fx.food_sites[site].food_units, 41.0);
        assert_eq!(ant.trail_strength, 41.0 / TRAIL_STRENGTH_DIVISOR);
        assert_eq!(
            fx.pheromones.intensity(Channel::Trail(0), ant.pos),
            41.0 / TRAIL_STRENGTH_DIVISOR
        );
        assert_eq!(ant.orientation(&fx.grid), Position::new(-1, 0), "heads back the way it came");
    }

    #[test]
    fn test_returning_ant_walks_home_laying_trail() {
        let mut fx = Fixture::new(10, 10, Position::new(1, 1));
        let key = fx.ant_at(Position::new(6, 6), Position::new(7, 7));
        fx.ants[key].cargo = 6.0;
        fx.ants[key].trail_strength = 4.0;

        let action = fx.update(key, &Neighbours::default());
        assert_eq!(action, AntAction::Moved);
        let ant = &fx.ants[key];
        assert_eq!(fx.grid.chebyshev(ant.pos, Position::new(1, 1)), 4, "one step closer to home");
        assert_eq!(fx.pheromones.intensity(Channel::Trail(0), ant.pos), 4.0);
    }

    #[test]
    fn test_delivery_parks_ant_in_holding_queue() {
        let mut fx = Fixture::new(6, 6, Position::new(2, 2));
        let key = fx.ant_at(Position::new(3, 3), Position::new(4, 4));
        fx.ants[key].cargo = 9.0;
        let food_before = fx.anthills[fx.hill].food_units;

        let action = fx.update(key, &Neighbours::default());
        assert_eq!(action, AntAction::Delivered(9.0));
        let hill = &fx.anthills[fx.hill];
        assert_eq!(hill.food_units, food_before + 9.0);
        assert_eq!(hill.food_collected, 9.0);
        assert_eq!(hill.holding.back(), Some(&key));
        assert!(fx.ants[key].inside);
        assert_eq!(fx.ants[key].cargo, 0.0);
        assert!(fx.grid.is_empty(Position::new(3, 3)), "parked ants leave the grid");
    }

    #[test]
    fn test_follower_without_scent_gets_lost() {
        let mut fx = Fixture::new(9, 9, Position::new(0, 0));
        let key = fx.ant_at(Position::new(4, 4), Position::new(3, 4));
        let action = fx.update(key, &Neighbours::default());
        assert_eq!(action, AntAction::Moved);
        assert!(fx.ants[key].lost, "no trail ahead means the ant is lost");
    }

    #[test]
    fn test_follower_takes_scented_cell() {
        let mut fx = Fixture::new(9, 9, Position::new(0, 0));
        let key = fx.ant_at(Position::new(4, 4), Position::new(3, 4));
        fx.pheromones.deposit(Channel::Trail(0), Position::new(5, 5), 8.0);
        fx.pheromones.deposit(Channel::Trail(0), Position::new(3, 3), 50.0);

        let action = fx.update(key, &Neighbours::default());
        assert_eq!(action, AntAction::Moved);
        let ant = &fx.ants[key];
        assert_eq!(ant.pos, Position::new(5, 5), "only scent inside the narrow cone counts");
        assert!(!ant.lost);
    }

    #[test]
    fn test_lost_ant_recovers_on_own_trail() {
        let mut fx = Fixture::new(9, 9, Position::new(0, 0));
        let key = fx.ant_at(Position::new(4, 4), Position::new(3, 4));
        fx.ants[key].lost = true;
        fx.pheromones.deposit(Channel::Trail(0), Position::new(4, 3), 5.0);

        fx.update(key, &Neighbours::default());
        let ant = &fx.ants[key];
        assert_eq!(ant.pos, Position::new(4, 3));
        assert!(!ant.lost);
    }

    #[test]
    fn test_hungry_parked_ant_eats_from_hill() {
        let mut fx = Fixture::new(5, 5, Position::new(2, 2));
        let hill_pos = Position::new(2, 2);
        let mut ant = Ant::new(fx.species.clone(), fx.hill, Role::Worker, hill_pos);
        ant.energy = 50.0;
        let key = fx.ants.insert_with_key(|k| {
            ant.key = k;
            ant
        });

        assert_eq!(fx.update(key, &Neighbours::default()), AntAction::Rested);
        assert_eq!(fx.anthills[fx.hill].food_units, 49.0);
        assert_eq!(fx.ants[key].energy, 49.0 + 100.0 / 3.0);

        fx.ants[key].energy = 90.0;
        fx.update(key, &Neighbours::default());
        assert_eq!(fx.anthills[fx.hill].food_units, 49.0, "sated ants do not eat");
    }

    #[test]
    fn test_exhausted_ant_reports_death() {
        let mut fx = Fixture::new(5, 5, Position::new(0, 0));
        let key = fx.ant_at(Position::new(3, 3), Position::new(2, 3));
        fx.ants[key].energy = 1.0;
        assert_ne!(fx.update(key, &Neighbours::default()), AntAction::Died);
        assert_eq!(fx.update(key, &Neighbours::default()), AntAction::Died);
    }
}
