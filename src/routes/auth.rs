use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::routes::AppState;

/// Configure signup and login routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login)),
    );
}

/// Whether `email` belongs to the company domain (case-insensitive)
pub fn is_company_email(email: &str, company_domain: &str) -> bool {
    let suffix = format!("@{}", company_domain.to_ascii_lowercase());
    email.to_ascii_lowercase().ends_with(&suffix)
}

/// Signup endpoint
///
/// POST /api/v1/auth/signup
///
/// Request body:
/// ```json
/// { "email": "bob@company.com", "password": "string" }
/// ```
async fn signup(
    state: web::Data<AppState>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    if !is_company_email(&req.email, &state.company_domain) {
        tracing::info!("Rejected signup outside {}: {}", state.company_domain, req.email);
        return Err(ApiError::DomainMismatch);
    }

    tracing::info!("Accepted signup for {}", req.email);
    Ok(HttpResponse::Created().json(SignupResponse {
        message: "Signup accepted. Verification pending.".to_string(),
        email: req.into_inner().email,
    }))
}

/// Login endpoint
///
/// POST /api/v1/auth/login
///
/// Request body (all fields optional):
/// ```json
/// { "userId": "string", "role": "employee|moderator|admin" }
/// ```
///
/// Issues a token for the supplied identity without checking credentials;
/// only enabled while `auth.demo_login` is set.
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if !state.demo_login {
        return Err(ApiError::LoginDisabled);
    }
    req.validate()?;

    let access_token = state.tokens.issue(req.subject(), req.role())?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.ttl().as_secs(),
    }))
}
