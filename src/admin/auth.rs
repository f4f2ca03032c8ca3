//! Staff authentication for the admin console.
//!
//! There is a single staff account configured through the environment. The
//! password is stored as a hex HMAC-SHA256 keyed by the server secret, so the
//! configured hash is useless without the secret. A successful login creates
//! a random session token kept in the session cache and handed to the browser
//! as the `admin_session` cookie.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "admin_session";

/// Hex HMAC-SHA256 of `password` keyed by `secret`.
///
/// This is the value expected in `ADMIN_PASSWORD_HASH`.
pub fn hash_password(secret: &str, password: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Configured staff credentials
#[derive(Clone)]
pub struct AdminAuth {
    email: String,
    password_hash: String,
    secret: String,
    session_ttl_seconds: u64,
}

impl AdminAuth {
    pub fn new(
        email: String,
        password_hash: String,
        secret: String,
        session_ttl_seconds: u64,
    ) -> Self {
        Self {
            email,
            password_hash: password_hash.to_lowercase(),
            secret,
            session_ttl_seconds,
        }
    }

    /// Check a login attempt. The password comparison runs in constant time.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        let Ok(expected) = hex::decode(&self.password_hash) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
            return false;
        };
        mac.update(password.as_bytes());
        let password_ok = mac.verify_slice(&expected).is_ok();

        password_ok && email.trim().eq_ignore_ascii_case(&self.email)
    }

    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }
}

/// A logged-in staff member, resolved by [`require_admin`]
#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    #[serde(skip)]
    pub token: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn new(email: &str) -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Value of the session cookie, ignoring any other cookies
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => {
                    Some(value.to_string())
                }
                _ => None,
            }
        })
}

fn session_cookie(token: &str, max_age: u64) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/admin; Max-Age={}",
        SESSION_COOKIE, token, max_age
    )
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub password: String,
}

/// `POST /admin/api/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response> {
    request.validate()?;

    if !state.auth.verify(&request.email, &request.password) {
        warn!(email = %request.email, "Admin login rejected");
        return Err(AppError::Unauthorized);
    }

    let session = Arc::new(AdminSession::new(request.email.trim()));
    let cookie = session_cookie(&session.token, state.auth.session_ttl_seconds());
    state
        .cache
        .sessions
        .insert(session.token.clone(), session.clone())
        .await;

    info!(email = %session.email, "Admin logged in");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(json!({ "email": session.email, "created_at": session.created_at })),
    )
        .into_response())
}

/// `POST /admin/api/logout`. Always clears the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.cache.sessions.invalidate(&token).await;
    }

    ([(SET_COOKIE, session_cookie("", 0))], Json(json!({ "logged_out": true }))).into_response()
}

/// `GET /admin/api/session`
pub async fn current_session(Extension(session): Extension<Arc<AdminSession>>) -> Json<AdminSession> {
    Json(session.as_ref().clone())
}

/// Rejects requests without a live session with 401 and makes the
/// [`AdminSession`] available to handlers as an extension.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let token = session_token(req.headers()).ok_or(AppError::Unauthorized)?;
    let session = state
        .cache
        .sessions
        .get(&token)
        .await
        .ok_or(AppError::Unauthorized)?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn auth() -> AdminAuth {
        AdminAuth::new(
            "office@freshplus.example".to_string(),
            hash_password("test-secret", "correct horse"),
            "test-secret".to_string(),
            3600,
        )
    }

    #[test]
    fn test_hash_password_is_stable_hex() {
        let a = hash_password("secret", "pw");
        assert_eq!(a, hash_password("secret", "pw"));
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_password("other-secret", "pw"));
        assert_ne!(a, hash_password("secret", "pw2"));
    }

    #[test]
    fn test_verify_accepts_configured_credentials() {
        let auth = auth();
        assert!(auth.verify("office@freshplus.example", "correct horse"));
        assert!(auth.verify(" Office@FreshPlus.example ", "correct horse"));
    }

    #[test]
    fn test_verify_rejects_wrong_password_or_email() {
        let auth = auth();
        assert!(!auth.verify("office@freshplus.example", "wrong"));
        assert!(!auth.verify("someone@freshplus.example", "correct horse"));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let auth = AdminAuth::new(
            "office@freshplus.example".to_string(),
            "not-hex".to_string(),
            "test-secret".to_string(),
            3600,
        );
        assert!(!auth.verify("office@freshplus.example", "correct horse"));
    }

    #[test]
    fn test_session_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=abc123; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("admin_session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", 60);
        assert!(cookie.starts_with("admin_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=60"));
    }
}
