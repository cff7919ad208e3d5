pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod notes;
pub mod planner;
pub mod task;
pub mod tools;
