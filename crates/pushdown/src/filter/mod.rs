pub mod compiler;
pub mod disjunct;
pub mod slot;
