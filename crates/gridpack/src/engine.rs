use crate::animate::Animator;
use crate::error::{Error, Result};
use crate::geom::{Item, Point, vector};
use crate::grid::{Cell, Grid};
use crate::occupancy::Occupancy;
use crate::random::{RandomSource, jitter};
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    /// Nominal node size; every cell holds exactly one node of this size.
    pub node_width: f64,
    pub node_height: f64,
    /// Half the gap between neighboring cells.
    pub cell_padding: f64,
    /// Jitter radius applied to placed positions. Clamped to `cell_padding`.
    pub random_offset: f64,
    /// Size of the surface being packed, usually the host's visible viewport.
    pub grid_width: f64,
    pub grid_height: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            node_width: 270.0,
            node_height: 80.0,
            cell_padding: 40.0,
            random_offset: 0.0,
            grid_width: 800.0,
            grid_height: 600.0,
        }
    }
}

impl GridOptions {
    fn validate(&self) -> Result<()> {
        let params = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("cell_padding", self.cell_padding),
            ("random_offset", self.random_offset),
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
        ];
        for (name, value) in params {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// A static item snapped onto one of its own cells to free the others.
    Evicted,
    /// A target item assigned a free cell.
    Placed,
    /// An item positioned by the sequential [`GridLayoutEngine::arrange`] pass.
    Arranged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub id: String,
    /// Index of the item in the slice the plan was computed from.
    pub index: usize,
    pub cell: Cell,
    pub from: Point,
    pub to: Point,
    pub kind: MoveKind,
}

/// Result of a layout computation. Moves are ordered: evictions first, then placements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPlan {
    pub moves: Vec<Move>,
    /// Targets that found no free cell. Their positions are left untouched.
    pub unplaced: Vec<String>,
}

impl LayoutPlan {
    pub fn evicted(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter().filter(|m| m.kind == MoveKind::Evicted)
    }

    pub fn placed(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter().filter(|m| m.kind != MoveKind::Evicted)
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Writes every move into `items` immediately.
    ///
    /// `items` must be the slice the plan was computed from; moves whose index no longer refers
    /// to an item with the same id are skipped.
    pub fn commit(&self, items: &mut [Item]) {
        for m in &self.moves {
            match items.get_mut(m.index) {
                Some(item) if item.id == m.id => item.set_position(m.to),
                _ => tracing::warn!(id = %m.id, index = m.index, "skipping move for a stale item"),
            }
        }
    }

    /// Hands every move to the host animator; item positions are not written.
    pub fn animate<A>(&self, items: &[Item], animator: &mut A)
    where
        A: Animator + ?Sized,
    {
        for m in &self.moves {
            match items.get(m.index) {
                Some(item) if item.id == m.id => animator.animate_move(item, m.to),
                _ => tracing::warn!(id = %m.id, index = m.index, "skipping move for a stale item"),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticEntry {
    pub index: usize,
    /// Number of distinct cells hit by the item's corners (1 to 4).
    pub unique_cells: usize,
}

/// Occupancy of the grid by static items, before any eviction.
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    pub cell_count: usize,
    pub static_items: Vec<StaticEntry>,
    occupancy: Occupancy,
}

impl Survey {
    pub fn occupied_cells(&self) -> usize {
        self.occupancy.occupied_count()
    }

    pub fn free_cells(&self) -> usize {
        self.occupancy.free_count()
    }

    /// Indices of the static items registered in a cell.
    pub fn members(&self, grid: &Grid, cell: Cell) -> Vec<usize> {
        self.occupancy.members(grid.index(cell)).collect()
    }
}

struct Selection {
    targets: Vec<usize>,
    is_target: Vec<bool>,
}

/// Grid-packing layout engine.
///
/// The engine only holds its configuration; every call builds a fresh grid from the items it is
/// given, so one engine can serve any number of independent item sets.
#[derive(Debug, Clone)]
pub struct GridLayoutEngine {
    options: GridOptions,
    grid: Grid,
}

impl GridLayoutEngine {
    pub fn new(mut options: GridOptions) -> Result<Self> {
        options.validate()?;
        options.random_offset = options.random_offset.min(options.cell_padding);

        let cell_width = options.node_width + 2.0 * options.cell_padding;
        let cell_height = options.node_height + 2.0 * options.cell_padding;
        if cell_width <= 0.0 || cell_height <= 0.0 {
            return Err(Error::DegenerateCell {
                width: cell_width,
                height: cell_height,
            });
        }

        let grid = Grid::new(
            options.grid_width,
            options.grid_height,
            cell_width,
            cell_height,
            options.cell_padding,
        );
        match grid.rows.checked_mul(grid.cols) {
            Some(cells) if cells <= Grid::MAX_CELLS => {}
            _ => {
                return Err(Error::GridTooLarge {
                    rows: grid.rows,
                    cols: grid.cols,
                });
            }
        }
        Ok(Self { options, grid })
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Effective jitter radius (after clamping to the cell padding).
    pub fn random_offset(&self) -> f64 {
        self.options.random_offset
    }

    /// Maps every non-target item onto the grid.
    pub fn survey<T>(&self, items: &[Item], targets: &[T]) -> Result<Survey>
    where
        T: AsRef<str>,
    {
        let selection = select(items, targets)?;
        Ok(self.survey_static(items, &selection.is_target))
    }

    /// Computes positions for `targets` (and any evicted static items) without touching `items`.
    pub fn plan<T, R>(&self, items: &[Item], targets: &[T], rng: &mut R) -> Result<LayoutPlan>
    where
        T: AsRef<str>,
        R: RandomSource + ?Sized,
    {
        let selection = select(items, targets)?;
        let mut plan = LayoutPlan::default();

        if selection.targets.is_empty() {
            return Ok(plan);
        }
        if self.grid.is_empty() {
            plan.unplaced = selection
                .targets
                .iter()
                .map(|&i| items[i].id.clone())
                .collect();
            tracing::warn!(
                targets = plan.unplaced.len(),
                grid_width = self.options.grid_width,
                grid_height = self.options.grid_height,
                "grid has no cells; nothing can be placed"
            );
            return Ok(plan);
        }

        let mut survey = self.survey_static(items, &selection.is_target);
        self.free_space(items, &mut survey, selection.targets.len(), rng, &mut plan);
        self.place_targets(items, &survey.occupancy, &selection.targets, rng, &mut plan);

        if !plan.unplaced.is_empty() {
            tracing::warn!(
                unplaced = plan.unplaced.len(),
                cells = self.grid.cell_count(),
                "not enough free cells for every target"
            );
        }
        Ok(plan)
    }

    /// Plans and then either writes positions into `items` or hands the moves to `animator`.
    pub fn apply<T, R, A>(
        &self,
        items: &mut [Item],
        targets: &[T],
        animated: bool,
        rng: &mut R,
        animator: &mut A,
    ) -> Result<LayoutPlan>
    where
        T: AsRef<str>,
        R: RandomSource + ?Sized,
        A: Animator + ?Sized,
    {
        let plan = self.plan(items, targets, rng)?;
        if animated {
            plan.animate(items, animator);
        } else {
            plan.commit(items);
        }
        Ok(plan)
    }

    /// Places every item in order, row-major, ignoring current positions and occupancy.
    ///
    /// Items beyond the last grid row keep flowing into further rows below the surface.
    pub fn arrange<R>(&self, items: &[Item], rng: &mut R) -> LayoutPlan
    where
        R: RandomSource + ?Sized,
    {
        let cols = self.grid.cols.max(1);
        let offset = self.random_offset();
        let moves = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let cell = Cell::new(index / cols, index % cols);
                let to = self.grid.anchor(cell) + jitter_vector(rng, offset);
                Move {
                    id: item.id.clone(),
                    index,
                    cell,
                    from: item.position(),
                    to,
                    kind: MoveKind::Arranged,
                }
            })
            .collect();
        LayoutPlan {
            moves,
            unplaced: Vec::new(),
        }
    }

    fn survey_static(&self, items: &[Item], is_target: &[bool]) -> Survey {
        let mut occupancy = Occupancy::new(self.grid.cell_count());
        let mut static_items = Vec::new();

        if !self.grid.is_empty() {
            for (index, item) in items.iter().enumerate() {
                if is_target[index] {
                    continue;
                }
                let cells = self.grid.unique_cells(item);
                for &cell in &cells {
                    occupancy.insert(self.grid.index(cell), index);
                }
                static_items.push(StaticEntry {
                    index,
                    unique_cells: cells.len(),
                });
            }
        }

        tracing::debug!(
            cells = self.grid.cell_count(),
            occupied = occupancy.occupied_count(),
            static_items = static_items.len(),
            "surveyed static items"
        );
        Survey {
            cell_count: self.grid.cell_count(),
            static_items,
            occupancy,
        }
    }

    /// Evicts static items, cheapest first, until the free cells cover `needed`.
    fn free_space<R>(
        &self,
        items: &[Item],
        survey: &mut Survey,
        needed: usize,
        rng: &mut R,
        plan: &mut LayoutPlan,
    ) where
        R: RandomSource + ?Sized,
    {
        let mut queue = survey.static_items.clone();
        // Stable: equal counts keep their original item order.
        queue.sort_by_key(|e| e.unique_cells);
        let mut queue = queue.into_iter();

        while survey.occupancy.free_count() < needed {
            let Some(entry) = queue.next() else {
                break;
            };
            let item = &items[entry.index];
            let from = item.position();
            let cell = self.nearest_corner_cell(item);
            let to = self.grid.anchor(cell) + jitter_vector(rng, self.random_offset());

            let mut freed = 0usize;
            for other in self.grid.unique_cells(item) {
                if other != cell && survey.occupancy.remove(self.grid.index(other), entry.index) {
                    freed += 1;
                }
            }
            tracing::trace!(
                id = %item.id,
                row = cell.row,
                col = cell.col,
                freed,
                "evicted static item"
            );

            plan.moves.push(Move {
                id: item.id.clone(),
                index: entry.index,
                cell,
                from,
                to,
                kind: MoveKind::Evicted,
            });
        }

        tracing::debug!(
            evicted = plan.moves.len(),
            free = survey.occupancy.free_count(),
            needed,
            "freed grid space"
        );
    }

    /// The corner cell whose anchor is closest to the item's current top-left corner.
    /// Ties go to the earlier corner in top-left, top-right, bottom-left, bottom-right order.
    fn nearest_corner_cell(&self, item: &Item) -> Cell {
        let origin = item.position();
        let cells = self.grid.corner_cells(item);
        let mut best = cells[0];
        let mut best_d2 = (self.grid.anchor(best) - origin).square_length();
        for &cell in &cells[1..] {
            let d2 = (self.grid.anchor(cell) - origin).square_length();
            if d2 < best_d2 {
                best = cell;
                best_d2 = d2;
            }
        }
        best
    }

    fn place_targets<R>(
        &self,
        items: &[Item],
        occupancy: &Occupancy,
        targets: &[usize],
        rng: &mut R,
        plan: &mut LayoutPlan,
    ) where
        R: RandomSource + ?Sized,
    {
        let mut pending = targets.iter().copied().peekable();
        for cell in self.grid.cells() {
            let Some(&index) = pending.peek() else {
                break;
            };
            if occupancy.is_occupied(self.grid.index(cell)) {
                continue;
            }
            pending.next();

            let item = &items[index];
            let to = self.grid.anchor(cell) + jitter_vector(rng, self.random_offset());
            tracing::trace!(id = %item.id, row = cell.row, col = cell.col, "placed target item");
            plan.moves.push(Move {
                id: item.id.clone(),
                index,
                cell,
                from: item.position(),
                to,
                kind: MoveKind::Placed,
            });
        }
        plan.unplaced = pending.map(|i| items[i].id.clone()).collect();
    }
}

fn jitter_vector<R>(rng: &mut R, offset: f64) -> crate::geom::Vector
where
    R: RandomSource + ?Sized,
{
    let dx = jitter(rng, offset);
    let dy = jitter(rng, offset);
    vector(dx, dy)
}

/// Resolves target ids to item indices. Duplicate target ids collapse to one entry.
fn select<T>(items: &[Item], targets: &[T]) -> Result<Selection>
where
    T: AsRef<str>,
{
    let mut by_id: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, item) in items.iter().enumerate() {
        if by_id.insert(item.id.as_str(), i).is_some() {
            return Err(Error::DuplicateItem {
                id: item.id.clone(),
            });
        }
    }

    let mut resolved: IndexSet<usize, FxBuildHasher> = IndexSet::default();
    for t in targets {
        let id = t.as_ref();
        let Some(&i) = by_id.get(id) else {
            return Err(Error::UnknownTarget { id: id.to_string() });
        };
        resolved.insert(i);
    }

    let mut is_target = vec![false; items.len()];
    for &i in &resolved {
        is_target[i] = true;
    }
    Ok(Selection {
        targets: resolved.into_iter().collect(),
        is_target,
    })
}
