// Route exports
pub mod admin;
pub mod auth;
pub mod health;
pub mod matching;
pub mod realtime;

use actix_web::web;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::{RealtimeSettings, Settings};
use crate::core::Matcher;
use crate::error::{handle_json_payload_error, handle_query_payload_error};
use crate::models::ScoringWeights;
use crate::realtime::MatchRoomRegistry;
use crate::services::{AdminStatsProvider, StaticAdminStats};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub rooms: Arc<MatchRoomRegistry>,
    pub matcher: Matcher,
    pub admin_stats: Arc<dyn AdminStatsProvider>,
    pub company_domain: String,
    pub demo_login: bool,
    pub realtime: RealtimeSettings,
    pub json_limit_bytes: usize,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tokens: Arc::new(TokenService::from_settings(&settings.auth)),
            rooms: Arc::new(MatchRoomRegistry::with_queue_capacity(
                settings.realtime.outbound_queue_capacity,
            )),
            matcher: Matcher::new(
                ScoringWeights::from(&settings.matching.weights),
                settings.matching.threshold,
            ),
            admin_stats: Arc::new(StaticAdminStats::default()),
            company_domain: settings.signup.company_domain.clone(),
            demo_login: settings.auth.demo_login,
            realtime: settings.realtime.clone(),
            json_limit_bytes: settings.server.json_limit_bytes,
        }
    }
}

/// Register shared state, payload handling and every route
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::from(Arc::clone(&state.tokens)))
            .app_data(
                web::JsonConfig::default()
                    .limit(state.json_limit_bytes)
                    .error_handler(handle_json_payload_error),
            )
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::Data::new(state))
            .configure(configure_routes);
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(realtime::configure)
        .service(
            web::scope("/api/v1")
                .configure(auth::configure)
                .configure(matching::configure)
                .configure(admin::configure),
        );
}
