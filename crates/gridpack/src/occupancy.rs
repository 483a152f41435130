use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

type Members = IndexSet<usize, FxBuildHasher>;

/// Per-cell membership of static items, plus a running count of non-empty cells.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Occupancy {
    cells: Vec<Members>,
    occupied: usize,
}

impl Occupancy {
    pub(crate) fn new(cell_count: usize) -> Self {
        Self {
            cells: vec![Members::default(); cell_count],
            occupied: 0,
        }
    }

    /// Registers `item` in `cell`. Returns `true` when the cell was empty before.
    pub(crate) fn insert(&mut self, cell: usize, item: usize) -> bool {
        let members = &mut self.cells[cell];
        let was_empty = members.is_empty();
        members.insert(item);
        if was_empty {
            self.occupied += 1;
        }
        was_empty
    }

    /// Unregisters `item` from `cell`. Returns `true` when this emptied the cell.
    pub(crate) fn remove(&mut self, cell: usize, item: usize) -> bool {
        let members = &mut self.cells[cell];
        if !members.shift_remove(&item) {
            return false;
        }
        if members.is_empty() {
            self.occupied -= 1;
            return true;
        }
        false
    }

    pub(crate) fn is_occupied(&self, cell: usize) -> bool {
        !self.cells[cell].is_empty()
    }

    pub(crate) fn members(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.cells[cell].iter().copied()
    }

    pub(crate) fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub(crate) fn free_count(&self) -> usize {
        self.cells.len() - self.occupied
    }
}
