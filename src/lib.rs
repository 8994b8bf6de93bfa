//! Ivy - translation resource inventory for PHP-style lang directories
//!
//! Ivy scans a lang directory holding JSON and PHP translation files,
//! parses them without executing any code, and reconciles their keys into
//! one table across every locale, showing which keys lack a value where.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`status`, `init`)
//! - `config`: `.ivyrc.json` loading and override resolution
//! - `core`: Scanning, parsing and key reconciliation
//! - `logging`: `tracing` subscriber setup for the binary

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
