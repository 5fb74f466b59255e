use crate::domain::DomainError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub id: Uuid,
    pub exp: usize,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, DomainError> {
        tracing::debug!(
            "Initializing JwtService with secret length: {}",
            secret.len()
        );

        if secret.is_empty() {
            return Err(DomainError::InternalError(
                "JWT secret must not be empty".to_string(),
            ));
        }

        if secret.len() < 32 {
            tracing::warn!(
                "JWT secret is too short ({} chars). Minimum recommended is 32 chars.",
                secret.len()
            );
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn generate_token(&self, id: Uuid, username: &str) -> Result<String, DomainError> {
        tracing::debug!("Generating token for id: {}, username: {}", id, username);

        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| DomainError::InternalError("token expiry overflow".to_string()))?
            .timestamp();

        let claims = Claims {
            username: username.to_string(),
            id,
            exp: usize::try_from(expiration)
                .map_err(|_| DomainError::InternalError("token expiry before epoch".to_string()))?,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {}", e);
            DomainError::InternalError(format!("Failed to generate token: {}", e))
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(token_data) => {
                tracing::debug!("Token verified for user id: {}", token_data.claims.id);
                Ok(token_data.claims)
            }
            Err(e) => {
                tracing::warn!("Token verification failed: {}", e);
                Err(DomainError::Unauthorized("token invalid".to_string()))
            }
        }
    }
}
