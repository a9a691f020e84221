//! Engine integration tests.
//!
//! These tests drive the synthesis engine through the public factory surface
//! with fixed seeds. Each module covers one concern:
//! 1. Structural properties (termination, collection sizing, cardinality)
//! 2. Rule resolution (overrides, precedence, mismatch fallback)
//! 3. Declarative configuration loaded from files
//! 4. Runtime dispatch by type name and the demo API models

mod configuration;
mod dispatch;
mod fixtures;
mod properties;
mod rules;
