//! Wardrobe domain logic.
//!
//! Everything here operates on materialized snapshots of items and outfits.
//! The only I/O seam is the [`source::WardrobeSource`] trait, which the `db`
//! crate implements against PostgreSQL.

pub mod dedup;
pub mod eligibility;
pub mod error;
pub mod freshness;
pub mod listing;
pub mod outfit;
pub mod ranking;
pub mod scoring;
pub mod service;
pub mod source;
pub mod suggestion;
pub mod types;
pub mod virtual_tags;
pub mod wardrobe;
