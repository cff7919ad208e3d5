pub mod cli;
pub mod notes;
pub mod plan;
pub mod run;
pub mod tasks;
pub mod tools;
