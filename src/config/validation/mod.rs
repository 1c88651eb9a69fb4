//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.
//!
//! The validation is organized into several submodules:
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Server and logging validators
//! - `monitoring_validators`: Monitoring-related validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod monitoring_validators;
mod trait_def;

pub use trait_def::Validate;
