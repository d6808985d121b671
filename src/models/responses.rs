use serde::{Deserialize, Serialize};
use crate::models::domain::AdminStats;

/// Response for the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "tokenType")]
    pub token_type: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
}

/// Response for an accepted signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
    pub email: String,
}

/// Response for the score endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: u8,
    pub matched: bool,
}

/// Admin dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: AdminStats,
    #[serde(rename = "activeConnections")]
    pub active_connections: usize,
    #[serde(rename = "activeRooms")]
    pub active_rooms: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub connections: usize,
    pub rooms: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
