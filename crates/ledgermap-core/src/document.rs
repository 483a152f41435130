//! JSON interchange format for a whole diagram.

use crate::config::{LayoutConfig, Viewport};
use crate::error::Result;
use crate::graph::{BankGraph, Geometry};
use crate::model::{Account, Transaction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub id: String,
    /// Accounts without a position are placed by the next layout pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Rendered size; defaults to the configured node size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub account: Account,
}

impl AccountEntry {
    pub fn has_position(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub transaction: Transaction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramDocument {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
    #[serde(default)]
    pub transactions: Vec<TransactionEntry>,
    /// Account ids to place. When absent, every account without a position is a target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
}

impl DiagramDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Builds the store. Transactions without an id get a generated one.
    pub fn build_graph(&self) -> Result<BankGraph> {
        let mut graph = BankGraph::new();
        for entry in &self.accounts {
            let geometry = Geometry::new(
                entry.x.unwrap_or(0.0),
                entry.y.unwrap_or(0.0),
                entry.width.unwrap_or(self.layout.node_width),
                entry.height.unwrap_or(self.layout.node_height),
            );
            if graph
                .insert_account(entry.id.clone(), entry.account.clone(), geometry)
                .is_some()
            {
                tracing::warn!(id = %entry.id, "duplicate account id; keeping the last entry");
            }
        }
        for entry in &self.transactions {
            let transaction = entry.transaction.clone();
            match &entry.id {
                Some(id) => {
                    graph.insert_transaction(id.clone(), &entry.source, &entry.target, transaction)?
                }
                None => {
                    graph.add_transaction(&entry.source, &entry.target, transaction)?;
                }
            }
        }
        tracing::debug!(
            accounts = graph.account_count(),
            transactions = graph.transaction_count(),
            "built diagram"
        );
        Ok(graph)
    }

    pub fn resolved_targets(&self) -> Vec<String> {
        match &self.targets {
            Some(targets) => targets.clone(),
            None => self
                .accounts
                .iter()
                .filter(|a| !a.has_position())
                .map(|a| a.id.clone())
                .collect(),
        }
    }

    /// Snapshot of a store with every account positioned.
    pub fn from_graph(graph: &BankGraph, viewport: Viewport, layout: LayoutConfig) -> Self {
        let accounts = graph
            .accounts()
            .map(|n| AccountEntry {
                id: n.id.clone(),
                x: Some(n.geometry.x),
                y: Some(n.geometry.y),
                width: Some(n.geometry.width),
                height: Some(n.geometry.height),
                account: n.account.clone(),
            })
            .collect();
        let transactions = graph
            .transactions()
            .map(|e| TransactionEntry {
                id: Some(e.id.clone()),
                source: e.source.clone(),
                target: e.target.clone(),
                transaction: e.transaction.clone(),
            })
            .collect();
        Self {
            viewport,
            layout,
            accounts,
            transactions,
            targets: None,
        }
    }
}
