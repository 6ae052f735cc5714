//! Authoritative cell ownership for placed objects.

use std::collections::BTreeMap;

use blockyard_core::{Cell, CoordinateMapper, Footprint, ObjectId, PlacementError};

/// Mapping from grid cell to the object occupying it.
///
/// A cell maps to at most one object, and for every live object the cells
/// mapping to it are exactly its footprint. Only footprints that passed
/// [`OccupancyMap::validate`] are registered, so out-of-bounds cells never
/// appear as keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyMap {
    cells: BTreeMap<Cell, ObjectId>,
}

impl OccupancyMap {
    /// Creates an empty occupancy map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks every cell of the candidate footprint against bounds and ownership.
    ///
    /// Cells are visited x outermost, then y, then z, and the first violation is
    /// reported. The map is never modified.
    pub fn validate<M>(&self, mapper: &M, footprint: Footprint) -> Result<(), PlacementError>
    where
        M: CoordinateMapper + ?Sized,
    {
        for cell in mapper.cells_in_box(footprint.origin(), footprint.size()) {
            if !mapper.is_inside(cell) {
                return Err(PlacementError::OutOfBounds { cell });
            }
            if let Some(by) = self.cells.get(&cell).copied() {
                return Err(PlacementError::Occupied { cell, by });
            }
        }
        Ok(())
    }

    /// Binds every cell of the footprint to `object`.
    ///
    /// Callers must run [`OccupancyMap::validate`] on the same footprint first;
    /// registering over another object's cells breaks the map's invariants.
    pub fn register(&mut self, footprint: Footprint, object: ObjectId) {
        for cell in footprint.cells() {
            let previous = self.cells.insert(cell, object);
            debug_assert!(
                previous.map_or(true, |owner| owner == object),
                "cell {cell} registered for {object} while owned by {previous:?}",
            );
        }
    }

    /// Returns the object occupying the cell, if any.
    #[must_use]
    pub fn lookup(&self, cell: Cell) -> Option<ObjectId> {
        self.cells.get(&cell).copied()
    }

    /// Releases every cell of the footprint regardless of its owner.
    ///
    /// Returns the number of cells that were bound before the call.
    pub fn clear_footprint(&mut self, footprint: Footprint) -> usize {
        footprint
            .cells()
            .filter(|cell| self.cells.remove(cell).is_some())
            .count()
    }

    /// Releases a single cell, returning its previous owner.
    pub fn clear_cell(&mut self, cell: Cell) -> Option<ObjectId> {
        self.cells.remove(&cell)
    }

    /// Cells currently bound to `object` in ascending order.
    #[must_use]
    pub fn cells_of(&self, object: ObjectId) -> Vec<Cell> {
        self.cells
            .iter()
            .filter(|(_, owner)| **owner == object)
            .map(|(cell, _)| *cell)
            .collect()
    }

    /// Iterator over all bindings in ascending cell order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, ObjectId)> + '_ {
        self.cells.iter().map(|(cell, owner)| (*cell, *owner))
    }

    /// Number of bound cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockyard_core::{FootprintSize, GridConfig, UniformGrid};

    fn grid() -> UniformGrid {
        UniformGrid::new(GridConfig {
            cell_length: 1.0,
            dimensions: [4, 4, 4],
            center: [2.0, 0.0, 2.0],
        })
    }

    fn footprint(x: i32, y: i32, z: i32, size: [u32; 3]) -> Footprint {
        let size = FootprintSize::try_from(size).expect("valid size");
        Footprint::new(Cell::new(x, y, z), size)
    }

    #[test]
    fn validate_reports_first_violation_in_iteration_order() {
        let mut map = OccupancyMap::new();
        map.register(footprint(1, 0, 1, [1, 1, 1]), ObjectId::new(3));
        map.register(footprint(0, 0, 1, [1, 1, 1]), ObjectId::new(4));

        let result = map.validate(&grid(), footprint(0, 0, 0, [2, 1, 2]));

        assert_eq!(
            result,
            Err(PlacementError::Occupied {
                cell: Cell::new(0, 0, 1),
                by: ObjectId::new(4),
            })
        );
    }

    #[test]
    fn validate_prefers_earlier_out_of_bounds_cell() {
        let mut map = OccupancyMap::new();
        map.register(footprint(3, 0, 0, [1, 1, 1]), ObjectId::new(1));

        let result = map.validate(&grid(), footprint(-1, 0, 0, [5, 1, 1]));

        assert_eq!(
            result,
            Err(PlacementError::OutOfBounds {
                cell: Cell::new(-1, 0, 0),
            })
        );
    }

    #[test]
    fn register_binds_whole_footprint() {
        let mut map = OccupancyMap::new();
        let object = ObjectId::new(9);
        let region = footprint(1, 1, 1, [2, 2, 1]);
        map.register(region, object);

        assert_eq!(map.len(), 4);
        assert_eq!(map.cells_of(object), region.cells().collect::<Vec<_>>());
        assert_eq!(map.lookup(Cell::new(2, 2, 1)), Some(object));
        assert_eq!(map.lookup(Cell::new(3, 2, 1)), None);
    }

    #[test]
    fn clear_footprint_ignores_owner_and_counts_released_cells() {
        let mut map = OccupancyMap::new();
        map.register(footprint(0, 0, 0, [1, 1, 1]), ObjectId::new(1));
        map.register(footprint(1, 0, 0, [1, 1, 1]), ObjectId::new(2));

        let released = map.clear_footprint(footprint(0, 0, 0, [3, 1, 1]));

        assert_eq!(released, 2);
        assert!(map.is_empty());
    }

    #[test]
    fn clear_cell_releases_only_that_cell() {
        let mut map = OccupancyMap::new();
        let object = ObjectId::new(5);
        map.register(footprint(0, 0, 0, [2, 1, 1]), object);

        assert_eq!(map.clear_cell(Cell::new(0, 0, 0)), Some(object));
        assert_eq!(map.clear_cell(Cell::new(0, 0, 0)), None);
        assert_eq!(map.cells_of(object), vec![Cell::new(1, 0, 0)]);
    }
}
