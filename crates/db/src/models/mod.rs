//! Entity models (database rows) and their create/update DTOs.

pub mod scene;
pub mod show;
