//! # Rotorpost Application Library
//!
//! CLI and configuration layers of the rotorpost binary, exposed as a library
//! so integration tests can drive commands directly.

pub mod cli;
pub mod config;
