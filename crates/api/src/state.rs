use std::sync::Arc;

use chrono::Utc;
use wardrobe_core::source::WardrobeSource;
use wardrobe_core::types::Timestamp;

use crate::config::ServerConfig;

/// Source of "now" for freshness and `generated_at`.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    /// Pinned instant, used by tests.
    Fixed(Timestamp),
}

impl Clock {
    pub fn now(&self) -> Timestamp {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Wardrobe reads (PostgreSQL in production, in-memory in tests).
    pub source: Arc<dyn WardrobeSource>,
    pub config: Arc<ServerConfig>,
    pub clock: Clock,
}
