//! Audia service crate.
//!
//! Configuration loading, registry setup and the stdio session bridge used by
//! the `audia` binary. The binary itself is a thin wrapper around this library.

pub mod bridge;
pub mod config;
pub mod registry;
