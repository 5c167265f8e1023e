//! Command implementations behind the `gk` binary.

pub mod commands;
