pub mod data;
pub mod engine;
pub mod metrics;
pub mod signal;
pub mod types;

pub use engine::simulator;

pub fn engine_name() -> &'static str {
    "tidemark"
}
