use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Role, UserProfile};

/// Request to sign up with a company email
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to obtain an access token
///
/// Both fields are optional; absent values fall back to the demo identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

pub const DEMO_USER_ID: &str = "demo-user-id";

impl LoginRequest {
    pub fn subject(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEMO_USER_ID)
    }

    pub fn role(&self) -> Role {
        self.role.unwrap_or_default()
    }
}

/// Request to score a candidate against the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub me: UserProfile,
    pub candidate: UserProfile,
}
