//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's
//! main.rs.

#![allow(dead_code)]

use std::sync::Arc;

pub use edidmap::{
    CaptureAdapter, CapturePolicy, Client, FormId, HostEvent, MapperConfig, Responder, SharedIndex,
};

// ============================================================================
// Load order
// ============================================================================

/// Base game content source
pub const BASE: u8 = 0x00;
/// First official expansion
pub const DLC: u8 = 0x01;
/// A user mod loaded late
pub const PATCH: u8 = 0x05;

/// FormId in content source `mod_index`
pub fn form(mod_index: u8, slot: u32) -> FormId {
    FormId::from_parts(mod_index, slot)
}

// ============================================================================
// Harness
// ============================================================================

/// The full runtime: capture hooks, responder, and one connected client
pub struct Harness {
    pub capture: CaptureAdapter,
    pub responder: Arc<Responder>,
    pub client: Client<Arc<Responder>>,
}

impl Harness {
    /// Build a harness with the default configuration
    pub fn new() -> Self {
        Self::with_config(&MapperConfig::default())
    }

    /// Build a harness from `config`
    pub fn with_config(config: &MapperConfig) -> Self {
        let index = SharedIndex::new();
        let capture = CaptureAdapter::new(index.clone(), CapturePolicy::from_config(config));
        let responder = Arc::new(Responder::new(index, config));
        let client = responder.connect("IntegrationTest");
        Self {
            capture,
            responder,
            client,
        }
    }

    /// Simulate a content source assigning editor IDs
    pub fn load(&self, records: &[(&str, FormId)]) {
        for (editor_id, form_id) in records {
            self.capture.on_assign(Some(*editor_id), Some(*form_id));
        }
    }

    /// Signal that every content source has loaded
    pub fn finish_loading(&self) -> bool {
        self.responder.on_host_event(HostEvent::GameInitialized)
    }
}
