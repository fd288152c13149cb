//! Half-tile collision grid.
//!
//! Ground units reserve space in cells a quarter the area of a map tile;
//! a move is rejected when the destination cell is already full. This is
//! the only spatial structure in the simulation: there is no pathfinding,
//! blocked units simply stay put for the frame.

use crate::kinds::{UnitKind, TILE_SIZE};
use crate::unit::CombatUnit;

/// Positions shift right by this to find their cell: each cell spans
/// 16 position units, half a tile per axis.
pub const CELL_SHIFT: u32 = 4;

/// Ground units allowed in one cell before moves into it are rejected.
pub const MAX_CELL_OCCUPANCY: u8 = 2;

/// Occupancy counters over the map, indexed by half-tile cell.
#[derive(Debug, Clone)]
pub struct CollisionGrid {
    cells: Vec<u8>,
    /// Cells per row (twice the map width in tiles).
    width: usize,
    /// Map width in position units, for clamping.
    max_x: i32,
    /// Map height in position units, for clamping.
    max_y: i32,
}

impl CollisionGrid {
    /// Creates a grid for a map of the given size in tiles.
    #[must_use]
    pub fn new(map_width_tiles: usize, map_height_tiles: usize) -> Self {
        let width = map_width_tiles * 2;
        let height = map_height_tiles * 2;
        CollisionGrid {
            cells: vec![0; width * height],
            width,
            max_x: (map_width_tiles as i32) * TILE_SIZE - 1,
            max_y: (map_height_tiles as i32) * TILE_SIZE - 1,
        }
    }

    /// Whether a unit participates in collision at all.
    ///
    /// Flyers pass over everything; healers walk through their own
    /// formation by design of the engine being modeled.
    #[must_use]
    pub fn is_exempt<X>(unit: &CombatUnit<X>) -> bool {
        unit.flying || unit.kind == UnitKind::Medic
    }

    fn cell_index(&self, x: i32, y: i32) -> usize {
        let cx = (x.clamp(0, self.max_x) >> CELL_SHIFT) as usize;
        let cy = (y.clamp(0, self.max_y) >> CELL_SHIFT) as usize;
        cx + cy * self.width
    }

    /// Registers a unit at its current position and records its cell.
    ///
    /// Positions outside the map count against the nearest edge cell.
    /// Insertion never rejects: a cell may start above
    /// [`MAX_CELL_OCCUPANCY`] if the caller placed units on top of each
    /// other, and the cap is only enforced on subsequent moves.
    pub fn occupy<X>(&mut self, unit: &mut CombatUnit<X>) {
        if Self::is_exempt(unit) {
            return;
        }
        let index = self.cell_index(unit.x, unit.y);
        self.cells[index] = self.cells[index].saturating_add(1);
        unit.cell = index;
    }

    /// Releases a unit's cell on death or removal.
    pub fn release<X>(&mut self, unit: &CombatUnit<X>) {
        if Self::is_exempt(unit) {
            return;
        }
        self.cells[unit.cell] = self.cells[unit.cell].saturating_sub(1);
    }

    /// Attempts to move a unit to a new position, clamped to the map.
    ///
    /// Returns `true` when the unit's position changed. A ground move
    /// into a full cell is rejected and leaves the unit where it was.
    pub fn try_move<X>(&mut self, unit: &mut CombatUnit<X>, new_x: i32, new_y: i32) -> bool {
        if Self::is_exempt(unit) {
            let moved = new_x != unit.x || new_y != unit.y;
            unit.x = new_x;
            unit.y = new_y;
            return moved;
        }

        let clamped_x = new_x.clamp(0, self.max_x);
        let clamped_y = new_y.clamp(0, self.max_y);
        let dest = self.cell_index(clamped_x, clamped_y);

        if dest == unit.cell {
            let moved = clamped_x != unit.x || clamped_y != unit.y;
            unit.x = clamped_x;
            unit.y = clamped_y;
            return moved;
        }

        if self.cells[dest] >= MAX_CELL_OCCUPANCY {
            return false;
        }

        self.cells[unit.cell] = self.cells[unit.cell].saturating_sub(1);
        self.cells[dest] += 1;
        unit.cell = dest;
        unit.x = clamped_x;
        unit.y = clamped_y;
        true
    }

    /// Occupancy count of the cell containing the given position.
    #[must_use]
    pub fn occupancy_at(&self, x: i32, y: i32) -> u8 {
        self.cells[self.cell_index(x, y)]
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{UnitKind, UnitSize};
    use crate::math::Fixed;
    use crate::unit::{UnitBuilder, Weapon};

    fn walker(x: i32, y: i32) -> crate::unit::CombatUnit<()> {
        UnitBuilder::new(UnitKind::Trooper)
            .position(x, y)
            .vitals(40, 40)
            .mobility(Fixed::from_num(4), false, 0)
            .weapons(Weapon::NONE, Weapon::NONE)
            .profile(UnitSize::Small, true, false)
            .build()
    }

    fn flyer(x: i32, y: i32) -> crate::unit::CombatUnit<()> {
        UnitBuilder::new(UnitKind::Kamikaze)
            .position(x, y)
            .vitals(25, 25)
            .mobility(Fixed::from_num(6), true, -1)
            .weapons(Weapon::NONE, Weapon::NONE)
            .profile(UnitSize::Small, true, false)
            .build()
    }

    #[test]
    fn test_occupancy_cap_rejects_third_mover() {
        let mut grid = CollisionGrid::new(4, 4);
        let mut a = walker(8, 8);
        let mut b = walker(40, 8);
        let mut c = walker(72, 8);
        grid.occupy(&mut a);
        grid.occupy(&mut b);
        grid.occupy(&mut c);

        // Two units may share the cell at (8, 8); the third is blocked.
        assert!(grid.try_move(&mut b, 8, 8));
        assert!(!grid.try_move(&mut c, 8, 8));
        assert_eq!(c.x, 72);
        assert_eq!(grid.occupancy_at(8, 8), 2);
    }

    #[test]
    fn test_flyers_ignore_occupancy() {
        let mut grid = CollisionGrid::new(4, 4);
        let mut a = walker(8, 8);
        let mut b = walker(8, 9);
        grid.occupy(&mut a);
        grid.occupy(&mut b);

        let mut f = flyer(100, 100);
        grid.occupy(&mut f);
        assert!(grid.try_move(&mut f, 8, 8));
        assert_eq!(grid.occupancy_at(8, 8), 2);
    }

    #[test]
    fn test_moves_clamped_to_map() {
        let mut grid = CollisionGrid::new(4, 4);
        let mut a = walker(8, 8);
        grid.occupy(&mut a);
        assert!(grid.try_move(&mut a, -50, 500));
        assert_eq!(a.x, 0);
        assert_eq!(a.y, 4 * 32 - 1);
    }

    #[test]
    fn test_release_frees_cell() {
        let mut grid = CollisionGrid::new(4, 4);
        let mut a = walker(8, 8);
        let mut b = walker(8, 9);
        let mut c = walker(72, 8);
        grid.occupy(&mut a);
        grid.occupy(&mut b);
        grid.occupy(&mut c);

        assert!(!grid.try_move(&mut c, 8, 8));
        grid.release(&a);
        assert!(grid.try_move(&mut c, 8, 8));
    }

    #[test]
    fn test_occupy_outside_map_counts_against_edge_cell() {
        let mut grid = CollisionGrid::new(4, 4);
        let mut stray = walker(500, 500);
        grid.occupy(&mut stray);
        assert_eq!(grid.occupancy_at(500, 500), 1);
        assert_eq!(grid.occupancy_at(4 * 32 - 1, 4 * 32 - 1), 1);

        let mut negative = walker(-20, -20);
        grid.occupy(&mut negative);
        assert_eq!(grid.occupancy_at(0, 0), 1);
    }

    #[test]
    fn test_move_within_cell_reports_movement() {
        let mut grid = CollisionGrid::new(4, 4);
        let mut a = walker(8, 8);
        grid.occupy(&mut a);
        assert!(grid.try_move(&mut a, 9, 8));
        assert!(!grid.try_move(&mut a, 9, 8));
    }
}
