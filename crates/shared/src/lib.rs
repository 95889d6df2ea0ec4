//! Shared utilities for the attendance geofence workspace.
//!
//! This crate provides common functionality used by the other crates:
//! - Common validation logic for geographic inputs

pub mod validation;
