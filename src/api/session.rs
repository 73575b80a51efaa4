//! Signed-cookie sessions and identity extractors.
//!
//! The session cookie carries the user id, signed with the key derived
//! from the configured secret. Pages extract [`SessionUser`] and get
//! redirected to the login page when no valid session exists; API
//! handlers that merely prefer a session use [`OptionalSessionUser`].

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::{error::AppError, models::User, AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "lectern_session";

/// Build the session cookie for a logged-in user
pub fn session_cookie(user_id: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie matching the session cookie's name and path, for removal
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .build()
}

async fn user_from_jar(jar: &SignedCookieJar, state: &AppState) -> Result<Option<User>, AppError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    let Ok(user_id) = cookie.value().parse::<i64>() else {
        return Ok(None);
    };

    match state.services.accounts.get_by_id(user_id).await {
        Ok(user) => Ok(Some(user)),
        // A session pointing at a vanished user is just a stale session.
        Err(AppError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Extractor for the logged-in user on page routes. Rejects by
/// redirecting to the login page.
pub struct SessionUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar = match SignedCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        match user_from_jar(&jar, state).await {
            Ok(Some(user)) => Ok(SessionUser(user)),
            Ok(None) => Err(Redirect::to("/login/").into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// Extractor for an optional session identity on API routes
pub struct OptionalSessionUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalSessionUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar = match SignedCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        Ok(OptionalSessionUser(user_from_jar(&jar, state).await?))
    }
}
