// src/api/auth.rs

use super::{SharedState, error::ApiError};
use crate::{models::User, services::users};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};

/// The user behind the request's `Authorization: Basic` header.
#[derive(Debug)]
pub struct AuthUser(pub User);

/// Extracts `(email, password)` from a Basic authorization header.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let (email, password) = basic_credentials(&parts.headers).ok_or(ApiError::MissingCredentials)?;
        let user = {
            let db = state.db()?;
            users::find_login(&db, &email)?
        };
        // Hash verification runs off the runtime and without the database lock.
        let user = tokio::task::spawn_blocking(move || users::check_password(user, &password)).await??;
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_basic_credentials() {
        let mut headers = HeaderMap::new();
        let token = STANDARD.encode("ada@example.com:pa:ss word");
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {token}")).unwrap(),
        );
        assert_eq!(
            basic_credentials(&headers),
            Some(("ada@example.com".to_string(), "pa:ss word".to_string()))
        );
    }

    #[test]
    fn test_other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(basic_credentials(&headers), None);
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
    }
}
