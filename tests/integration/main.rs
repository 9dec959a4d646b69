//! Integration Tests
//!
//! End-to-end tests across the three crates:
//! - Scenarios: load order conflicts and case folding through a client
//! - Lifecycle: queries before and after the readiness broadcast
//! - Concurrency: capture on one thread while others query
//! - Config: configuration file driving capture and logging

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod config;
mod lifecycle;
mod scenarios;
