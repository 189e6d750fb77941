//! Core types for Nocturne: character records and rule values.
//!
//! This crate defines the data model shared between the mechanics engine
//! and its collaborators. It performs no I/O — a [`Character`] or a rule
//! tree can be constructed programmatically or deserialized from JSON by
//! whatever owns persistence.

/// Character records, equipment, and progression side tables.
pub mod character;
/// Free-form rule values (scalars, lists, nested tables).
pub mod value;

/// Re-export character types.
pub use character::{
    Character, CharacterId, Equipment, GainedAbility, GearPiece, StatusEffect,
};
/// Re-export the rule value type.
pub use value::RuleValue;
