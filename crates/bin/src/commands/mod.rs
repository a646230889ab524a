//! Subcommand implementations.

pub mod account;
pub mod domains;
pub mod health;
pub mod serve;
pub mod visit;
