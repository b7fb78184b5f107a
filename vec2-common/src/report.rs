use serde::{Deserialize, Serialize};

/// Timing record for one benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)] // Written out as JSON / bincode / MessagePack / CSV
pub struct BenchReport {
    /// Scenario name (`random_sets`, `observer_chain`, `ignore`).
    pub scenario: String,
    /// Number of operations timed.
    pub iterations: u64,
    /// Wall time of the timed section in milliseconds.
    pub elapsed_ms: f64,
    /// Derived throughput; 0 when the timed section was too short to measure.
    pub ops_per_sec: f64,
    /// How many observer invocations happened during the run.
    pub notifications: u64,
}

impl BenchReport {
    pub fn new(scenario: &str, iterations: u64, elapsed_ms: f64, notifications: u64) -> Self {
        let ops_per_sec = if elapsed_ms > 0.0 {
            iterations as f64 / elapsed_ms * 1000.0
        } else {
            0.0
        };
        BenchReport {
            scenario: scenario.to_string(),
            iterations,
            elapsed_ms,
            ops_per_sec,
            notifications,
        }
    }
}
