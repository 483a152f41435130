use crate::error::{Error, Result};
use crate::model::{Account, Transaction};
use crate::transition::{Position, Transition};
use gridpack::Item;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-left anchored footprint of a node on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A node of the given size at the canvas origin, waiting for a layout.
    pub fn unplaced(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountNode {
    pub id: String,
    pub geometry: Geometry,
    pub account: Account,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub transaction: Transaction,
}

/// Explicit store for a bank diagram: account nodes, transaction edges, and the queue of moves
/// waiting for the host to animate.
///
/// Iteration follows insertion order everywhere.
#[derive(Debug, Clone, Default)]
pub struct BankGraph {
    nodes: IndexMap<String, AccountNode>,
    edges: IndexMap<String, TransactionEdge>,
    transitions: Vec<Transition>,
}

impl BankGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an account under a freshly generated node id.
    pub fn add_account(&mut self, account: Account, geometry: Geometry) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.insert_account(id.clone(), account, geometry);
        id
    }

    /// Adds or replaces an account under a caller-chosen id. Returns the replaced node.
    pub fn insert_account(
        &mut self,
        id: impl Into<String>,
        account: Account,
        geometry: Geometry,
    ) -> Option<AccountNode> {
        let id = id.into();
        self.nodes.insert(
            id.clone(),
            AccountNode {
                id,
                geometry,
                account,
            },
        )
    }

    pub fn has_account(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn account(&self, id: &str) -> Option<&AccountNode> {
        self.nodes.get(id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut AccountNode> {
        self.nodes.get_mut(id)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &AccountNode> {
        self.nodes.values()
    }

    pub fn account_count(&self) -> usize {
        self.nodes.len()
    }

    /// Removes an account together with its incident transactions and pending transitions.
    pub fn remove_account(&mut self, id: &str) -> Option<AccountNode> {
        let node = self.nodes.shift_remove(id)?;
        let before = self.edges.len();
        self.edges.retain(|_, e| e.source != id && e.target != id);
        self.transitions.retain(|t| t.node_id != id);
        tracing::debug!(
            id,
            removed_transactions = before - self.edges.len(),
            "removed account"
        );
        Some(node)
    }

    /// Adds a transaction between two existing accounts under a freshly generated edge id.
    pub fn add_transaction(
        &mut self,
        source: &str,
        target: &str,
        transaction: Transaction,
    ) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.insert_transaction(id.clone(), source, target, transaction)?;
        Ok(id)
    }

    pub fn insert_transaction(
        &mut self,
        id: impl Into<String>,
        source: &str,
        target: &str,
        transaction: Transaction,
    ) -> Result<()> {
        let id = id.into();
        for endpoint in [source, target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Error::UnknownAccount {
                    id: endpoint.to_string(),
                });
            }
        }
        if self.edges.contains_key(&id) {
            return Err(Error::DuplicateTransaction { edge_id: id });
        }
        self.edges.insert(
            id.clone(),
            TransactionEdge {
                id,
                source: source.to_string(),
                target: target.to_string(),
                transaction,
            },
        );
        Ok(())
    }

    pub fn transaction(&self, id: &str) -> Option<&TransactionEdge> {
        self.edges.get(id)
    }

    pub fn transactions(&self) -> impl Iterator<Item = &TransactionEdge> {
        self.edges.values()
    }

    pub fn transaction_count(&self) -> usize {
        self.edges.len()
    }

    /// Transactions with `id` as source or target.
    pub fn transactions_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TransactionEdge> {
        self.edges
            .values()
            .filter(move |e| e.source == id || e.target == id)
    }

    /// Applies a size reported by the host after rendering (or re-rendering) a node.
    pub fn resize(&mut self, id: &str, width: f64, height: f64) -> Result<()> {
        let node = self.node_mut_or_err(id)?;
        node.geometry.width = width;
        node.geometry.height = height;
        Ok(())
    }

    pub fn set_position(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let node = self.node_mut_or_err(id)?;
        node.geometry.x = x;
        node.geometry.y = y;
        Ok(())
    }

    /// Queues a smooth move of `id` from its current position to `(x, y)`.
    ///
    /// The stored position is not changed until [`BankGraph::finish_transitions`] runs.
    pub fn animate_move(&mut self, id: &str, x: f64, y: f64) -> Result<()> {
        let from = self.node_or_err(id)?.geometry.position();
        self.transitions
            .push(Transition::new(id, from, Position { x, y }));
        Ok(())
    }

    pub fn pending_transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Hands the queued transitions to the host.
    pub fn drain_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    /// Converges every queued transition immediately, in queue order.
    pub fn finish_transitions(&mut self) {
        for t in std::mem::take(&mut self.transitions) {
            if let Some(node) = self.nodes.get_mut(&t.node_id) {
                node.geometry.x = t.to.x;
                node.geometry.y = t.to.y;
            }
        }
    }

    /// Every transaction must connect two accounts present in the store.
    pub fn validate(&self) -> Result<()> {
        for e in self.edges.values() {
            if !self.nodes.contains_key(&e.source) || !self.nodes.contains_key(&e.target) {
                return Err(Error::MissingEndpoint {
                    edge_id: e.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Geometry snapshot of every node, in insertion order, for the layout engine.
    pub fn layout_items(&self) -> Vec<Item> {
        self.nodes
            .values()
            .map(|n| {
                Item::new(
                    n.id.clone(),
                    n.geometry.x,
                    n.geometry.y,
                    n.geometry.width,
                    n.geometry.height,
                )
            })
            .collect()
    }

    fn node_or_err(&self, id: &str) -> Result<&AccountNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| Error::UnknownAccount { id: id.to_string() })
    }

    fn node_mut_or_err(&mut self, id: &str) -> Result<&mut AccountNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::UnknownAccount { id: id.to_string() })
    }
}
