pub mod core;
pub mod execution;
