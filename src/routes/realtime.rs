use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{authenticate, bearer_token, TokenService};
use crate::realtime::{run_connection, ConnectionContext};
use crate::routes::AppState;

/// Configure the websocket upgrade route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(connect));
}

#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Fallback for browser clients, which cannot set headers on upgrade
    pub access_token: Option<String>,
}

/// Websocket upgrade
///
/// GET /ws  (Authorization: Bearer <token>, or ?access_token=<token>)
async fn connect(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
    tokens: web::Data<TokenService>,
    query: web::Query<ConnectQuery>,
) -> actix_web::Result<HttpResponse> {
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = bearer_token(header).or(query.access_token.as_deref());
    let principal = authenticate(&tokens, token)?;

    let (response, session, inbound) = actix_ws::handle(&req, body)?;
    let (connection, outbound) = state.rooms.connect();

    let ctx = ConnectionContext {
        rooms: Arc::clone(&state.rooms),
        connection,
        principal,
        settings: state.realtime.clone(),
    };
    actix_web::rt::spawn(run_connection(ctx, session, inbound, outbound));

    Ok(response)
}
