//! Library exports for reuse in binaries, benchmarks and tests.
/// Optional TOML configuration for the demo drivers.
pub mod config;
/// Built-in toy and synthetic datasets.
pub mod dataset;
/// Logging setup.
pub mod logging;
/// Metrics, the eval-metric seam and stump boosting.
pub mod ml;
