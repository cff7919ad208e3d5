pub mod factory;
pub mod notes;
pub mod services;
pub mod sinks;
pub mod tools;
