//! Shared configuration and error types for the `dirinfo` codec crates.

pub mod config;
pub mod error;
