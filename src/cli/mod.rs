//! CLI infrastructure for the misère engine
//!
//! This module provides the command-line interface for analyzing positions
//! and driving automated games.

pub mod analyze;
pub mod output;
pub mod selfplay;
