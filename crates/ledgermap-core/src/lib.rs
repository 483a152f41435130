#![forbid(unsafe_code)]

//! Bank-account relationship diagram model (headless).
//!
//! Accounts are nodes, transactions are directed edges between them. New accounts are laid out
//! with [`gridpack`] so they land in free space of the visible surface without disturbing the
//! accounts a user has already arranged. Moves can be applied immediately or queued as
//! [`Transition`]s for the host to animate.

pub mod config;
pub mod document;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod transition;

pub use config::{LayoutConfig, Viewport};
pub use document::{AccountEntry, DiagramDocument, TransactionEntry};
pub use error::{Error, Result};
pub use graph::{AccountNode, BankGraph, Geometry, TransactionEdge};
pub use gridpack;
pub use layout::{LayoutReport, Placement, arrange, pack};
pub use model::{Account, AccountType, Transaction, TransactionType};
pub use transition::{Position, Timing, Transition};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests;
