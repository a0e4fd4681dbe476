use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
};
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::utils::time::now;
use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Identity carried by an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub company_id: Uuid,
    pub name: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub admin: bool,
    pub exp: usize,
}

/// Signs and verifies session tokens with the configured secret.
#[derive(Clone)]
pub struct SessionManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours.max(1)),
        }
    }

    pub fn issue(&self, identity: &SessionIdentity) -> Result<String> {
        let claims = Claims {
            sub: identity.company_id,
            name: identity.name.clone(),
            admin: identity.is_admin,
            exp: (now() + self.ttl).timestamp() as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| Error::Internal(format!("session signing failed: {}", e)))
    }

    /// Expired, tampered or foreign tokens resolve to no session at all.
    pub fn resolve(&self, token: &str) -> Option<SessionIdentity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &self.decoding, &validation).ok()?;
        Some(SessionIdentity {
            company_id: data.claims.sub,
            name: data.claims.name,
            is_admin: data.claims.admin,
        })
    }

    pub fn cookie(&self, token: &str) -> HeaderValue {
        let value = format!(
            "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.ttl.num_seconds()
        );
        HeaderValue::from_str(&value).unwrap_or_else(|_| clear_cookie())
    }
}

pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("session=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

pub fn require_session(session: Option<SessionIdentity>) -> Result<SessionIdentity> {
    session.ok_or(Error::Unauthenticated)
}

pub fn require_admin(session: Option<SessionIdentity>) -> Result<SessionIdentity> {
    let session = require_session(session)?;
    if !session.is_admin {
        return Err(Error::Forbidden("Administrator access required".to_string()));
    }
    Ok(session)
}

fn extract_cookie(parts: &Parts, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    parts
        .headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| s.strip_prefix(prefix.as_str()))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn extract_bearer(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
}

fn identity_from_parts(parts: &Parts, state: &AppState) -> Option<SessionIdentity> {
    let token = extract_cookie(parts, SESSION_COOKIE).or_else(|| extract_bearer(parts))?;
    state.sessions.resolve(&token)
}

/// Any signed-in company.
#[derive(Debug, Clone)]
pub struct Session(pub SessionIdentity);

/// A signed-in company with the administrator flag.
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionIdentity);

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        require_session(identity_from_parts(parts, state)).map(Session)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let identity = require_admin(identity_from_parts(parts, state));
        if let Err(Error::Forbidden(_)) = &identity {
            tracing::warn!("Non-admin company attempted to reach the admin panel");
        }
        identity.map(AdminSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(is_admin: bool) -> SessionIdentity {
        SessionIdentity {
            company_id: Uuid::new_v4(),
            name: "Acme".into(),
            is_admin,
        }
    }

    #[test]
    fn issued_token_resolves_to_same_identity() {
        let sessions = SessionManager::new("secret", 1);
        let who = identity(true);
        let token = sessions.issue(&who).unwrap();
        assert_eq!(sessions.resolve(&token), Some(who));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = SessionManager::new("secret-a", 1);
        let verifier = SessionManager::new("secret-b", 1);
        let token = issuer.issue(&identity(false)).unwrap();
        assert_eq!(verifier.resolve(&token), None);
    }

    #[test]
    fn guards_signal_failure_kind() {
        assert!(matches!(require_session(None), Err(Error::Unauthenticated)));
        assert!(matches!(require_admin(None), Err(Error::Unauthenticated)));
        assert!(matches!(
            require_admin(Some(identity(false))),
            Err(Error::Forbidden(_))
        ));
        assert!(require_admin(Some(identity(true))).is_ok());
    }
}
