//! Bearer token encoding and validation.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use crate::auth::Claims;
use crate::config::Config;
use crate::error::{ApiError, ErrorCode, Result};

/// HS256 token service keyed by the configured shared secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    expiration_secs: i64,
}

impl JwtService {
    pub fn new(config: &Config) -> Result<Self> {
        if config.jwt_secret.len() < 16 {
            return Err(ApiError::with_code(
                ErrorCode::ConfigurationError,
                "JWT_SECRET must be at least 16 characters",
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.jwt_issuer.as_str()]);
        validation.leeway = 30;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            issuer: config.jwt_issuer.clone(),
            expiration_secs: config.jwt_expiration,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn expiration_secs(&self) -> i64 {
        self.expiration_secs
    }

    pub fn encode_token(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to encode token: {}", e)))
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    ApiError::with_code(ErrorCode::TokenExpired, "Token expired")
                }
                _ => ApiError::with_details(
                    ErrorCode::TokenInvalid,
                    "Invalid authentication token",
                    e.to_string(),
                ),
            })
    }
}
