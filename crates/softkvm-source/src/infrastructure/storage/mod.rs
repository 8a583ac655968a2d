//! Persistence for the source application (TOML configuration).

pub mod config;
