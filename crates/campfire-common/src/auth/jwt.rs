//! Signed access/refresh tokens
//!
//! Both tokens of a pair carry the same session id. The refresh token's
//! session id is what the Redis store keys on, so revoking a session
//! server-side invalidates the refresh token even though its signature is
//! still good. Access tokens stay short-lived and are only checked here.

use campfire_core::Snowflake;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
    /// Login session both tokens of a pair belong to
    pub sid: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Refresh token lifetime in seconds, used as the Redis TTL
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Issue an access/refresh pair for `session_id`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, user_id: Snowflake, session_id: &str) -> Result<TokenPair, AppError> {
        let access_token = self.encode_token(user_id, TokenType::Access, session_id)?;
        let refresh_token = self.encode_token(user_id, TokenType::Refresh, session_id)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    fn encode_token(
        &self,
        user_id: Snowflake,
        token_type: TokenType,
        session_id: &str,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
            token_type,
            sid: session_id.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    /// Decode and check signature and expiry
    ///
    /// # Errors
    /// `TokenExpired` for an expired token, `InvalidToken` otherwise
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_expecting(token, TokenType::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_expecting(token, TokenType::Refresh)
    }

    fn decode_expecting(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("campfire-test-secret-that-is-long-enough", 900, 604_800)
    }

    #[test]
    fn test_issue_pair_shares_session() {
        let jwt = service();
        let pair = jwt.issue(Snowflake::new(77), "sess-1").unwrap();

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 900);

        let access = jwt.validate_access_token(&pair.access_token).unwrap();
        let refresh = jwt.validate_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(access.sid, "sess-1");
        assert_eq!(refresh.sid, "sess-1");
        assert_eq!(access.user_id().unwrap(), Snowflake::new(77));
        assert!(!refresh.is_expired());
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let jwt = service();
        let pair = jwt.issue(Snowflake::new(1), "s").unwrap();

        assert!(matches!(
            jwt.validate_access_token(&pair.refresh_token),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            jwt.validate_refresh_token(&pair.access_token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let pair = service().issue(Snowflake::new(1), "s").unwrap();
        let other = JwtService::new("a-completely-different-secret-value", 900, 900);

        assert!(other.decode_token(&pair.access_token).is_err());
        assert!(matches!(
            other.decode_token("not.a.jwt"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        // Validation allows 60s of leeway by default
        let jwt = JwtService::new("campfire-test-secret-that-is-long-enough", -120, -120);
        let pair = jwt.issue(Snowflake::new(1), "s").unwrap();

        assert!(matches!(
            jwt.decode_token(&pair.access_token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_bad_subject() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            iat: 0,
            exp: i64::MAX,
            token_type: TokenType::Access,
            sid: String::new(),
        };
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken)));
    }
}
