pub mod agent_executor;
pub mod compose;
pub mod context;
pub mod outlet;
pub mod planning;
pub mod preprocess;
pub mod types;
pub mod workflow;
