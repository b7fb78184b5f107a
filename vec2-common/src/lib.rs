pub mod config;
pub mod report;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{BenchConfig, OutputConfig, RunConfig, VectorPolicy};
pub use report::BenchReport;
pub use vecmath::{approx_eq, round_to, Point, EPSILON, PRECISION_DIGITS};
