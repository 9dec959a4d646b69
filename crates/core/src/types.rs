//! Core types for edidmap
//!
//! This module defines the foundational types:
//! - FormId: 32-bit numeric id assigned by the host to every loaded object
//! - FormHandle: non-owning handle to a host object
//! - Editor ID folding: the ASCII lower-casing applied to every key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric id of a loaded host object.
///
/// A FormId is a 32-bit value where:
/// - The high byte (bits 24-31) is the index of the content source ("mod")
///   that defines the object, 0 being the base source
/// - The low 24 bits (bits 0-23) are the slot within that source
///
/// The value 0 is never assigned by the host and is used as the
/// "not found" sentinel throughout the query API.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub u32);

impl FormId {
    /// The reserved "not found" id
    pub const NULL: FormId = FormId(0);

    /// Mask selecting the in-source slot
    pub const SLOT_MASK: u32 = 0x00FF_FFFF;

    /// Create a FormId from its raw 32-bit value
    #[must_use]
    pub const fn new(value: u32) -> Self {
        FormId(value)
    }

    /// Build a FormId from a mod index and an in-source slot
    ///
    /// Bits of `slot` above the low 24 are discarded.
    #[must_use]
    pub const fn from_parts(mod_index: u8, slot: u32) -> Self {
        FormId(((mod_index as u32) << 24) | (slot & Self::SLOT_MASK))
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Index of the content source that defines this form (high byte)
    #[must_use]
    pub const fn mod_index(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Slot within the defining content source (low 24 bits)
    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.0 & Self::SLOT_MASK
    }

    /// Returns true for the "not found" sentinel
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for FormId {
    fn from(value: u32) -> Self {
        FormId(value)
    }
}

impl From<FormId> for u32 {
    fn from(id: FormId) -> Self {
        id.0
    }
}

impl fmt::Debug for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FormId(0x{:08X}, mod: 0x{:02X}, slot: 0x{:06X})",
            self.0,
            self.mod_index(),
            self.slot()
        )
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Non-owning handle to a host object.
///
/// The host owns the object; the index only keeps a copy of the handle
/// next to the object's FormId. Implementations must be cheap to copy
/// (a pointer or an id).
pub trait FormHandle: Copy {
    /// The FormId of the referenced object
    fn form_id(&self) -> FormId;
}

impl FormHandle for FormId {
    fn form_id(&self) -> FormId {
        *self
    }
}

/// Fold an editor ID to its key form.
///
/// Only ASCII letters are lower-cased. Any other byte, including every byte
/// of a non-ASCII character, is left unchanged.
pub fn fold_editor_id(editor_id: &str) -> String {
    editor_id.to_ascii_lowercase()
}

/// Returns true if `editor_id` is already in folded form
pub fn is_folded(editor_id: &str) -> bool {
    !editor_id.bytes().any(|b| b.is_ascii_uppercase())
}
