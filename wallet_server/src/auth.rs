//! Access tokens.
//!
//! Users log in with their email and password (or register) and receive an HS256-signed JWT. The token is sent back
//! on every `/api` request in an `Authorization: Bearer <token>` header. [`crate::middleware::JwtMiddlewareFactory`]
//! validates it and stores the [`JwtClaims`] in the request extensions, where handlers pick them up by taking a
//! `JwtClaims` argument.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use serde::{Deserialize, Serialize};
use wallet_engine::db_types::User;

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The user id
    pub sub: i64,
    pub email: String,
    /// Expiry, in seconds since the Unix epoch
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(user_id: i64, email: &str, expiry: DateTime<Utc>) -> Self {
        Self { sub: user_id, email: email.to_string(), exp: expiry.timestamp() }
    }

    pub fn user_id(&self) -> i64 {
        self.sub
    }
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<JwtClaims>().cloned().ok_or_else(|| {
            warn!("🔐️ No JWT claims found in request extensions. Is the route behind the JWT middleware?");
            ServerError::AuthenticationError(AuthError::MissingToken)
        });
        ready(claims)
    }
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.reveal().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            lifetime: config.token_lifetime,
        }
    }

    /// Issue a new access token for the given user.
    /// This method DOES NOT check the user's credentials. This must be done prior to calling `issue_token`.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let expiry = Utc::now().checked_add_signed(self.lifetime).ok_or_else(|| {
            error!("🔐️ A token lifetime of {} hrs puts the expiry out of range", self.lifetime.num_hours());
            AuthError::CouldNotIssueToken("Token expiry is out of range".to_string())
        })?;
        let claims = JwtClaims::new(user.id, &user.email, expiry);
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &JwtClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!("🔐️ Could not sign access token. {e}");
            AuthError::CouldNotIssueToken(e.to_string())
        })
    }

    /// Checks the signature and expiry of an access token, and returns its claims.
    pub fn validate(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            debug!("🔐️ Access token rejected. {e}");
            match e.kind() {
                ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                    AuthError::PoorlyFormattedToken
                },
                _ => AuthError::ValidationError(e.to_string()),
            }
        })?;
        Ok(data.claims)
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}
