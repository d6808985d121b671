use actix_web::{web, HttpResponse};
use crate::auth::Principal;
use crate::models::{ScoreRequest, ScoreResponse};
use crate::routes::AppState;

/// Configure matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/matching").route("/score", web::post().to(score_candidate)));
}

/// Score endpoint
///
/// POST /api/v1/matching/score
///
/// Request body:
/// ```json
/// {
///   "me": { "interests": ["string"], "department": "string" },
///   "candidate": { "interests": ["string"], "department": "string" }
/// }
/// ```
async fn score_candidate(
    state: web::Data<AppState>,
    principal: Principal,
    req: web::Json<ScoreRequest>,
) -> HttpResponse {
    let result = state.matcher.score(&req.me, &req.candidate);

    tracing::debug!(
        "Scored candidate for {}: {} (matched: {})",
        principal.subject,
        result.score,
        result.matched
    );

    HttpResponse::Ok().json(ScoreResponse {
        score: result.score,
        matched: result.matched,
    })
}
