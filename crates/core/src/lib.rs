//! Slate core: pure scheduling domain logic.
//!
//! This crate has zero I/O and zero internal deps so the repository layer,
//! the HTTP handlers, and any future tooling can share one implementation of
//! shoot windows, personnel sets, and scene conflict detection.

pub mod error;
pub mod personnel;
pub mod scene;
pub mod scene_conflict;
pub mod shoot_window;
pub mod types;
