//! Request guards: authenticate a bearer token, then optionally authorize by role.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::marker::PhantomData;

use crate::auth::token::{Principal, TokenService};
use crate::error::ApiError;
use crate::models::Role;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Presence and validity check
pub fn authenticate(tokens: &TokenService, token: Option<&str>) -> Result<Principal, ApiError> {
    let token = token.ok_or(ApiError::Unauthorized)?;
    tokens.verify(token).map_err(|e| {
        tracing::warn!(reason = %e, "Rejected session token");
        ApiError::InvalidToken
    })
}

/// Role check against an endpoint's allowed set
pub fn authorize(principal: &Principal, allowed: &[Role]) -> Result<(), ApiError> {
    if allowed.contains(&principal.role) {
        Ok(())
    } else {
        tracing::warn!(subject = %principal.subject, role = %principal.role, "Role not permitted");
        Err(ApiError::Forbidden)
    }
}

/// Authenticate from the request's headers and bind the principal to it
pub fn principal_from_request(req: &HttpRequest) -> Result<Principal, ApiError> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| ApiError::Internal("token service not configured".to_string()))?;

    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let principal = authenticate(tokens, bearer_token(header))?;

    req.extensions_mut().insert(principal.clone());
    Ok(principal)
}

impl FromRequest for Principal {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(principal_from_request(req))
    }
}

/// A fixed set of roles admitted by an endpoint
pub trait RoleSet {
    const ALLOWED: &'static [Role];
}

/// Administrators and moderators
#[derive(Debug)]
pub struct Staff;

impl RoleSet for Staff {
    const ALLOWED: &'static [Role] = &[Role::Admin, Role::Moderator];
}

/// Principal that passed both the presence check and the role check for `P`
#[derive(Debug)]
pub struct Authorized<P: RoleSet> {
    pub principal: Principal,
    _policy: PhantomData<P>,
}

impl<P: RoleSet> Authorized<P> {
    pub fn check(principal: Principal) -> Result<Self, ApiError> {
        authorize(&principal, P::ALLOWED)?;
        Ok(Self {
            principal,
            _policy: PhantomData,
        })
    }
}

impl<P: RoleSet> FromRequest for Authorized<P> {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(principal_from_request(req).and_then(Self::check))
    }
}
