use crate::config::{LayoutConfig, Viewport};
use crate::error::Result;
use crate::graph::BankGraph;
use gridpack::{GridLayoutEngine, Item, LayoutPlan, MoveKind, Point, RandomSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Summary of one layout pass over a [`BankGraph`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Static accounts snapped onto one of their own cells.
    pub evicted: Vec<Placement>,
    pub placed: Vec<Placement>,
    /// Targets left where they were because the surface ran out of cells.
    pub unplaced: Vec<String>,
    /// Moves were queued as transitions rather than written to the store.
    pub animated: bool,
}

impl LayoutReport {
    fn from_plan(plan: &LayoutPlan, animated: bool) -> Self {
        let mut report = Self {
            unplaced: plan.unplaced.clone(),
            animated,
            ..Self::default()
        };
        for m in &plan.moves {
            let placement = Placement {
                id: m.id.clone(),
                x: m.to.x,
                y: m.to.y,
            };
            match m.kind {
                MoveKind::Evicted => report.evicted.push(placement),
                MoveKind::Placed | MoveKind::Arranged => report.placed.push(placement),
            }
        }
        report
    }
}

/// Packs `targets` into the free cells of the viewport, evicting static accounts when needed.
///
/// With `config.animated` the moves are queued on the store as transitions; otherwise positions
/// are written immediately.
pub fn pack<T, R>(
    graph: &mut BankGraph,
    config: &LayoutConfig,
    viewport: Viewport,
    targets: &[T],
    rng: &mut R,
) -> Result<LayoutReport>
where
    T: AsRef<str>,
    R: RandomSource + ?Sized,
{
    let engine = GridLayoutEngine::new(config.grid_options(viewport))?;
    let items = graph.layout_items();
    let plan = engine.plan(&items, targets, rng)?;
    apply_plan(graph, &items, &plan, config.animated)?;

    tracing::debug!(
        evicted = plan.evicted().count(),
        placed = plan.placed().count(),
        unplaced = plan.unplaced.len(),
        animated = config.animated,
        "packed diagram"
    );
    Ok(LayoutReport::from_plan(&plan, config.animated))
}

/// Lays out every account in insertion order, row-major, ignoring current positions.
pub fn arrange<R>(
    graph: &mut BankGraph,
    config: &LayoutConfig,
    viewport: Viewport,
    rng: &mut R,
) -> Result<LayoutReport>
where
    R: RandomSource + ?Sized,
{
    let engine = GridLayoutEngine::new(config.grid_options(viewport))?;
    let items = graph.layout_items();
    let plan = engine.arrange(&items, rng);
    apply_plan(graph, &items, &plan, config.animated)?;

    tracing::debug!(
        accounts = items.len(),
        cols = engine.grid().cols,
        "arranged diagram"
    );
    Ok(LayoutReport::from_plan(&plan, config.animated))
}

fn apply_plan(
    graph: &mut BankGraph,
    items: &[Item],
    plan: &LayoutPlan,
    animated: bool,
) -> Result<()> {
    if animated {
        let mut queue = |item: &Item, to: Point| {
            if let Err(err) = graph.animate_move(&item.id, to.x, to.y) {
                tracing::warn!(id = %item.id, %err, "dropping transition");
            }
        };
        plan.animate(items, &mut queue);
        return Ok(());
    }
    for m in &plan.moves {
        graph.set_position(&m.id, m.to.x, m.to.y)?;
    }
    Ok(())
}
