//! Test modules for the protocol crate.
