use crate::geom::{Corner, Item, Point, point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major partition of the layout surface into fixed-size cells.
///
/// Each cell reserves `padding` on every side of the nominal node size, so a node placed at a
/// cell's [`Grid::anchor`] never touches a node placed in a neighboring cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub cell_width: f64,
    pub cell_height: f64,
    pub padding: f64,
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    /// Upper bound on `rows * cols` accepted by the layout engine.
    pub const MAX_CELLS: usize = 1 << 20;

    pub fn new(width: f64, height: f64, cell_width: f64, cell_height: f64, padding: f64) -> Self {
        Self {
            cell_width,
            cell_height,
            padding,
            rows: floor_count(height / cell_height),
            cols: floor_count(width / cell_width),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    pub fn col_of(&self, x: f64) -> usize {
        clamp_index(x / self.cell_width, self.cols)
    }

    pub fn row_of(&self, y: f64) -> usize {
        clamp_index(y / self.cell_height, self.rows)
    }

    pub fn cell_at(&self, p: Point) -> Cell {
        Cell::new(self.row_of(p.y), self.col_of(p.x))
    }

    /// Cells hit by the item's corners, in `Corner::ALL` order (entries may repeat).
    pub fn corner_cells(&self, item: &Item) -> [Cell; 4] {
        item.corners().map(|p| self.cell_at(p))
    }

    /// Distinct cells hit by the item's corners, first-seen order. Always 1 to 4 entries.
    pub fn unique_cells(&self, item: &Item) -> Vec<Cell> {
        let mut out: Vec<Cell> = Vec::with_capacity(Corner::ALL.len());
        for cell in self.corner_cells(item) {
            if !out.contains(&cell) {
                out.push(cell);
            }
        }
        out
    }

    /// Padded origin of a cell: where a node placed into it gets its top-left corner.
    pub fn anchor(&self, cell: Cell) -> Point {
        point(
            cell.col as f64 * self.cell_width + self.padding,
            cell.row as f64 * self.cell_height + self.padding,
        )
    }

    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// All cells, row outer and column inner.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }
}

fn floor_count(v: f64) -> usize {
    if v.is_finite() && v > 0.0 {
        v.floor() as usize
    } else {
        0
    }
}

/// `clamp(floor(v), 0, count - 1)`; NaN and negative inputs land on the first index.
fn clamp_index(v: f64, count: usize) -> usize {
    let max = count.saturating_sub(1);
    let f = v.floor();
    if !(f > 0.0) {
        return 0;
    }
    if f >= max as f64 { max } else { f as usize }
}
