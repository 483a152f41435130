use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Timing {
    #[default]
    EaseOutCubic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A move the host should animate; the store only records it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub node_id: String,
    pub from: Position,
    pub to: Position,
    pub duration_ms: u64,
    pub timing: Timing,
}

impl Transition {
    pub const DURATION: Duration = Duration::from_millis(1000);

    pub fn new(node_id: impl Into<String>, from: Position, to: Position) -> Self {
        Self {
            node_id: node_id.into(),
            from,
            to,
            duration_ms: Self::DURATION.as_millis() as u64,
            timing: Timing::EaseOutCubic,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}
