// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AdminStats, Role, ScoringWeights, UserProfile};
pub use requests::{LoginRequest, ScoreRequest, SignupRequest, DEMO_USER_ID};
pub use responses::{DashboardResponse, ErrorResponse, HealthResponse, LoginResponse, ScoreResponse, SignupResponse};
