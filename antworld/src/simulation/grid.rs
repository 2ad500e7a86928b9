use rand::Rng;
use shared::Position;
use shared::util::wrapped_offset;
use slotmap::new_key_type;

use super::ant::AntKey;
use super::anthill::AnthillKey;
use super::food::FoodKey;

new_key_type! {
    /// Key for obstacle slotmap.
    pub struct ObstacleKey;
}

/// Immovable blocker occupying one cell.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Position,
}

/// What sits on a grid cell. The grid never owns the entity, only its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    Ant(AntKey),
    Anthill(AnthillKey),
    Food(FoodKey),
    Obstacle(ObstacleKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Full ring (8 cells at radius 1).
    Moore,
    /// Orthogonal cross (4 cells at radius 1).
    VonNeumann,
}

const NOT_EMPTY: usize = usize::MAX;

/// Single-occupancy grid with an index of its empty cells.
pub struct SpatialGrid {
    pub width: u32,
    pub height: u32,
    pub torus: bool,
    cells: Vec<Option<Occupant>>,
    empties: Vec<Position>,
    // Per cell: slot in `empties`, or NOT_EMPTY
    empty_slot: Vec<usize>,
}

impl SpatialGrid {
    pub fn new(width: u32, height: u32, torus: bool) -> Self {
        let area = width as usize * height as usize;
        let mut empties = Vec::with_capacity(area);
        let mut empty_slot = Vec::with_capacity(area);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                empty_slot.push(empties.len());
                empties.push(Position::new(x, y));
            }
        }
        Self {
            width,
            height,
            torus,
            cells: vec![None; area],
            empties,
            empty_slot,
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Maps a raw coordinate onto the grid: wraps on a torus, rejects out-of-bounds otherwise.
    #[inline(always)]
    pub fn normalize(&self, pos: Position) -> Option<Position> {
        if self.torus {
            Some(Position::new(
                pos.x.rem_euclid(self.width as i32),
                pos.y.rem_euclid(self.height as i32),
            ))
        } else if self.in_bounds(pos) {
            Some(pos)
        } else {
            None
        }
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    pub fn cell(&self, pos: Position) -> Option<Occupant> {
        let pos = self.normalize(pos)?;
        self.cells[self.index(pos)]
    }

    /// False for occupied cells and for cells off the grid.
    pub fn is_empty(&self, pos: Position) -> bool {
        match self.normalize(pos) {
            Some(pos) => self.cells[self.index(pos)].is_none(),
            None => false,
        }
    }

    /// Unconditional placement. Callers guarantee vacancy; violating that is a bug.
    pub fn place(&mut self, occupant: Occupant, pos: Position) {
        assert!(
            self.try_place(occupant, pos),
            "cannot place {:?} at {:?}: cell occupied by {:?} or off grid",
            occupant,
            pos,
            self.cell(pos)
        );
    }

    pub fn try_place(&mut self, occupant: Occupant, pos: Position) -> bool {
        let Some(pos) = self.normalize(pos) else {
            return false;
        };
        let idx = self.index(pos);
        if self.cells[idx].is_some() {
            return false;
        }
        self.cells[idx] = Some(occupant);
        self.unmark_empty(idx);
        true
    }

    pub fn remove(&mut self, pos: Position) -> Option<Occupant> {
        let pos = self.normalize(pos)?;
        let idx = self.index(pos);
        let occupant = self.cells[idx].take()?;
        self.mark_empty(idx, pos);
        Some(occupant)
    }

    /// Moves whatever occupies `from` onto `to`. Returns false, leaving the grid
    /// untouched, if `to` is taken or off the grid or `from` is vacant.
    pub fn move_to(&mut self, from: Position, to: Position) -> bool {
        let (Some(from), Some(to)) = (self.normalize(from), self.normalize(to)) else {
            return false;
        };
        if from == to {
            return self.cells[self.index(from)].is_some();
        }
        let to_idx = self.index(to);
        if self.cells[to_idx].is_some() {
            return false;
        }
        let from_idx = self.index(from);
        let Some(occupant) = self.cells[from_idx].take() else {
            return false;
        };
        self.mark_empty(from_idx, from);
        self.cells[to_idx] = Some(occupant);
        self.unmark_empty(to_idx);
        true
    }

    /// Unconditional move for callers that already checked `to` is vacant.
    pub fn move_unchecked(&mut self, from: Position, to: Position) {
        assert!(
            self.move_to(from, to),
            "cannot move occupant of {:?} to {:?}",
            from,
            to
        );
    }

    fn mark_empty(&mut self, idx: usize, pos: Position) {
        self.empty_slot[idx] = self.empties.len();
        self.empties.push(pos);
    }

    fn unmark_empty(&mut self, idx: usize) {
        let slot = self.empty_slot[idx];
        if slot == NOT_EMPTY {
            return;
        }
        self.empties.swap_remove(slot);
        if let Some(&moved) = self.empties.get(slot) {
            let moved_idx = self.index(moved);
            self.empty_slot[moved_idx] = slot;
        }
        self.empty_slot[idx] = NOT_EMPTY;
    }

    pub fn empties(&self) -> &[Position] {
        &self.empties
    }

    pub fn empty_count(&self) -> usize {
        self.empties.len()
    }

    /// Uniformly drawn vacant cell, if any.
    pub fn random_empty<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        if self.empties.is_empty() {
            return None;
        }
        Some(self.empties[rng.random_range(0..self.empties.len())])
    }

    /// Every occupied cell in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|occupant| {
                (
                    Position::new((idx % width) as i32, (idx / width) as i32),
                    occupant,
                )
            })
        })
    }

    /// Cells around `pos` in row-major order, wrapped or clipped to the grid.
    pub fn neighborhood(
        &self,
        pos: Position,
        radius: i32,
        mode: Neighborhood,
        include_center: bool,
    ) -> Vec<Position> {
        let mut cells = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 && !include_center {
                    continue;
                }
                if mode == Neighborhood::VonNeumann && dx.abs() + dy.abs() > radius {
                    continue;
                }
                if let Some(cell) = self.normalize(Position::new(pos.x + dx, pos.y + dy)) {
                    // Tiny tori can wrap onto the same cell twice
                    if !cells.contains(&cell) {
                        cells.push(cell);
                    }
                }
            }
        }
        cells
    }

    /// The 8 surrounding cells.
    pub fn moore(&self, pos: Position) -> Vec<Position> {
        self.neighborhood(pos, 1, Neighborhood::Moore, false)
    }

    /// The orthogonal cross around `pos`, `pos` included.
    pub fn cross_with_center(&self, pos: Position) -> Vec<Position> {
        self.neighborhood(pos, 1, Neighborhood::VonNeumann, true)
    }

    /// Displacement from `from` to `to`, taking the short way round on a torus.
    pub fn delta(&self, from: Position, to: Position) -> Position {
        if self.torus {
            Position::new(
                wrapped_offset(from.x, to.x, self.width as i32),
                wrapped_offset(from.y, to.y, self.height as i32),
            )
        } else {
            to - from
        }
    }

    pub fn chebyshev(&self, a: Position, b: Position) -> i32 {
        self.delta(a, b).king_len()
    }
}
