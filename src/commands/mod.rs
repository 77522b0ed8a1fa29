//! Subcommand implementations.

pub mod projects;
pub mod query;
pub mod serve;
pub mod web;
