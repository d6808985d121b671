use crate::models::AdminStats;

/// Source of the admin dashboard figures
///
/// Analytics live outside this service; deployments plug in their own
/// provider.
pub trait AdminStatsProvider: Send + Sync {
    fn snapshot(&self) -> AdminStats;
}

/// Fixed figures used until an analytics backend is wired in
#[derive(Debug, Clone, Copy)]
pub struct StaticAdminStats(pub AdminStats);

impl Default for StaticAdminStats {
    fn default() -> Self {
        Self(AdminStats {
            total_users: 124,
            active_users: 89,
            total_matches: 210,
            open_reports: 6,
        })
    }
}

impl AdminStatsProvider for StaticAdminStats {
    fn snapshot(&self) -> AdminStats {
        self.0
    }
}
