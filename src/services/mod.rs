// Service exports
pub mod admin_stats;

pub use admin_stats::{AdminStatsProvider, StaticAdminStats};
