use actix_web::{web, HttpResponse};
use crate::auth::{Authorized, Staff};
use crate::models::DashboardResponse;
use crate::routes::AppState;

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/admin").route("/dashboard", web::get().to(dashboard)));
}

/// Admin dashboard, restricted to admins and moderators
///
/// GET /api/v1/admin/dashboard
async fn dashboard(state: web::Data<AppState>, staff: Authorized<Staff>) -> HttpResponse {
    tracing::info!("Dashboard requested by {} ({})", staff.principal.subject, staff.principal.role);

    HttpResponse::Ok().json(DashboardResponse {
        stats: state.admin_stats.snapshot(),
        active_connections: state.rooms.connection_count(),
        active_rooms: state.rooms.room_count(),
    })
}
