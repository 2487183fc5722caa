//! Best-first search and the drivers built on it
//!
//! This module contains:
//! - The frontier priority queue and the content-addressed visited set
//! - The search engine and its callback trait
//! - Comparator-backed callbacks
//! - The iterative decomposition driver

/// Iterative residual decomposition
pub mod decompose;
/// Best-first engine and callback trait
pub mod engine;
/// Priority frontier and visited set
pub mod frontier;
/// Comparator-backed callbacks with progress reporting
pub mod hooks;

pub use engine::{SearchConfig, SearchEngine, SearchHooks, SearchStats, StopReason};
pub use hooks::ComparatorHooks;
