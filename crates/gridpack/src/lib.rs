#![forbid(unsafe_code)]

//! Headless grid-packing layout for node diagrams.
//!
//! `gridpack` places newly added nodes into unoccupied cells of a coarse grid laid over the
//! visible surface, leaving nodes that are already on the canvas alone whenever there is room.
//! When there is not, it snaps the cheapest static nodes (those touching the fewest cells) onto a
//! single cell each until enough cells are free.
//!
//! The crate knows nothing about rendering: callers hand in rectangles and get positions back,
//! either written in place or routed through an [`Animator`] supplied by the host.

pub mod animate;
pub mod engine;
pub mod error;
pub mod geom;
pub mod grid;
mod occupancy;
pub mod random;

pub use animate::{Animator, RecordingAnimator};
pub use engine::{GridLayoutEngine, GridOptions, LayoutPlan, Move, MoveKind, StaticEntry, Survey};
pub use error::{Error, Result};
pub use geom::{Corner, Item, Point, Size};
pub use grid::{Cell, Grid};
pub use random::{RandomSource, XorShift64Star};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Places `targets` immediately using a seeded jitter source.
pub fn pack<T>(
    items: &mut [Item],
    targets: &[T],
    options: GridOptions,
    seed: u64,
) -> Result<LayoutPlan>
where
    T: AsRef<str>,
{
    let engine = GridLayoutEngine::new(options)?;
    let mut rng = XorShift64Star::new(seed);
    let plan = engine.plan(items, targets, &mut rng)?;
    plan.commit(items);
    Ok(plan)
}
