//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that routes a
//! subcommand to its platform planner.
//!
//! # Module Organization
//!
//! - [`orchestrator`] - [`Bundler`], [`Job`] and host checks
//! - [`tool_detection`] - External tool availability checking

pub(crate) mod orchestrator;
pub(crate) mod tool_detection;

pub use orchestrator::{Bundler, HostOs, Job};
