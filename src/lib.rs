//! InnerConnect - session, matching and realtime chat backend
//!
//! This library provides token-based sessions with role-gated access, the
//! pairwise compatibility scorer, and the match-room registry that relays
//! chat messages between matched employees.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod realtime;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use auth::{authenticate, authorize, Principal, TokenService};
pub use crate::core::{calculate_compatibility_score, Matcher, MatchResult};
pub use error::ApiError;
pub use models::{Role, ScoringWeights, UserProfile};
pub use realtime::MatchRoomRegistry;
pub use routes::{configure_app, AppState};
