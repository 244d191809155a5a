//! Repositories: one zero-sized struct per table with async CRUD methods.

pub mod scene_repo;
pub mod show_repo;

pub use scene_repo::SceneRepo;
pub use show_repo::ShowRepo;
