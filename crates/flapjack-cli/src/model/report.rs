use chrono::{DateTime, Utc};
use flapjack_engine::{AttemptCounts, OrderSeed, PerformanceRecord};
use serde::Serialize;

/// Outcome of a simulated session, written by `flapjack simulate --output`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub seed: OrderSeed,
    pub player: String,
    pub rounds: usize,
    pub counts: AttemptCounts,
    pub score: u64,
    pub distinct_orders: usize,
    /// The hardest recorded sequences when the session ended.
    pub difficulty_pool: Vec<PerformanceRecord>,
}
