pub mod cache;
pub mod cli;
pub mod config;
pub mod generator;
pub mod llm;
pub mod memory;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use config::Config;
pub use generator::workflow::launch;
