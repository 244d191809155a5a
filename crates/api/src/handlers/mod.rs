//! Request handlers.
//!
//! Each submodule provides async handler functions for a single entity type.
//! Handlers delegate to the corresponding repository in `slate_db` and map
//! errors via [`AppError`](crate::error::AppError).

pub mod scene;
pub mod show;
