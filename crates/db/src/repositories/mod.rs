//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod item_repo;
pub mod outfit_repo;

pub use item_repo::ItemRepo;
pub use outfit_repo::OutfitRepo;
