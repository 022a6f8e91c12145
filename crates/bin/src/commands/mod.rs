//! Subcommand implementations for the Doable binary.

pub mod health;
pub mod serve;
