pub mod aggregator;
pub mod alert;
pub mod config;
pub mod health;
pub mod host;
pub mod metrics;
pub mod orchestrator;
