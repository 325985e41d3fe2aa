//! `kpu-cli` library crate.
//!
//! Re-exports the harness modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod commands;
pub mod config;
pub mod convert;
