// src/session.rs
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::auth_models::{TokenClaims, UserResult, UserType};

/// In-memory session store. The process owns exactly one per client context;
/// nothing survives a restart, matching the transient view-model ownership of
/// the rest of the client.
#[derive(Debug, Default)]
pub struct Session {
    current: RwLock<Option<UserResult>>,
}

impl Session {
    pub fn set_user(&self, user: UserResult) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(user);
    }

    pub fn clear(&self) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn current_user(&self) -> Option<UserResult> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current_user().map(|user| user.token)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.current_user().map(|user| user.user_type)
    }

    pub fn is_vendor(&self) -> bool {
        self.user_type() == Some(UserType::Vendor)
    }

    pub fn is_school(&self) -> bool {
        self.user_type() == Some(UserType::School)
    }

    pub fn is_university(&self) -> bool {
        self.user_type() == Some(UserType::University)
    }

    /// True only when the stored token carries a readable `exp` claim that
    /// lies in the past. Unreadable tokens are not treated as expired; the
    /// server remains the authority and will answer 401 if it disagrees.
    pub fn token_expired(&self) -> bool {
        let Some(token) = self.token() else {
            return false;
        };
        match decode_claims(&token) {
            Some(claims) => claims.exp <= Utc::now().timestamp(),
            None => false,
        }
    }
}

/// Reads the claims without verifying the signature. Projection only: the
/// client uses this to warn about stale sessions before the server does.
fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    match decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => Some(data.claims),
        Err(err) => {
            tracing::debug!("could not read token claims: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token_with_exp(exp: i64) -> String {
        let claims = TokenClaims {
            sub: Some("user-1".to_string()),
            exp,
            iat: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    fn user_with_token(token: String) -> UserResult {
        UserResult {
            display_name: "Sara".to_string(),
            email: "sara@uni.edu".to_string(),
            token,
            user_type: UserType::University,
        }
    }

    #[test]
    fn empty_session_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_logged_in());
        assert!(session.token().is_none());
        assert!(!session.token_expired());
    }

    #[test]
    fn stored_user_drives_the_discriminants() {
        let session = Session::default();
        session.set_user(user_with_token(token_with_exp(
            Utc::now().timestamp() + 3600,
        )));
        assert!(session.is_logged_in());
        assert!(session.is_university());
        assert!(!session.is_vendor());
        assert!(!session.token_expired());

        session.clear();
        assert!(!session.is_logged_in());
        assert!(session.user_type().is_none());
    }

    #[test]
    fn past_expiry_claim_is_detected() {
        let session = Session::default();
        session.set_user(user_with_token(token_with_exp(
            Utc::now().timestamp() - 60,
        )));
        assert!(session.token_expired());
    }

    #[test]
    fn unreadable_tokens_defer_to_the_server() {
        let session = Session::default();
        session.set_user(user_with_token("not-a-jwt".to_string()));
        assert!(!session.token_expired());
    }
}
