use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role carried inside every session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Employee,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile fields the compatibility scorer reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub department: String,
}

impl UserProfile {
    pub fn new<I, S>(interests: I, department: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interests: interests.into_iter().map(Into::into).collect(),
            department: department.into(),
        }
    }
}

/// Aggregate figures shown on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(rename = "totalUsers")]
    pub total_users: u64,
    #[serde(rename = "activeUsers")]
    pub active_users: u64,
    #[serde(rename = "totalMatches")]
    pub total_matches: u64,
    #[serde(rename = "openReports")]
    pub open_reports: u64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Points awarded for a perfect interest overlap
    pub interests: f64,
    pub same_department: f64,
    pub cross_department: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 85.0,
            same_department: 15.0,
            cross_department: 5.0,
        }
    }
}

impl From<&crate::config::WeightsConfig> for ScoringWeights {
    fn from(config: &crate::config::WeightsConfig) -> Self {
        Self {
            interests: config.interests,
            same_department: config.same_department,
            cross_department: config.cross_department,
        }
    }
}
