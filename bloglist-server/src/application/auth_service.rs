use crate::data::{BlogRepository, UserRepository};
use crate::domain::blog::BlogSummary;
use crate::domain::user::{
    LoginResponse, LoginUserRequest, NewUser, RegisterUserRequest, UserResponse,
};
use crate::domain::validation::{require, require_secret, validate_credentials, FieldError};
use crate::domain::DomainError;
use crate::infrastructure::jwt::JwtService;
use argon2::Argon2;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand_core::OsRng;
use std::sync::Arc;

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    blog_repo: Arc<dyn BlogRepository>,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        blog_repo: Arc<dyn BlogRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repo,
            blog_repo,
            jwt_service,
        }
    }

    pub async fn register(&self, req: RegisterUserRequest) -> Result<UserResponse, DomainError> {
        let username = require("username", req.username)?;
        let name = require("name", req.name)?;
        let password = require_secret("password", req.password)?;

        tracing::debug!("Registering username: {}", username);

        validate_credentials(&username, &password)?;

        match self.user_repo.find_by_username(&username).await {
            Ok(_) => {
                tracing::warn!("Registration failed: username {} already exists", username);
                return Err(FieldError::unique("username").into());
            }
            Err(DomainError::UserNotFound) => {}
            Err(e) => return Err(e),
        }

        let password_hash = hash_password(&password)?;

        let user = self
            .user_repo
            .create(NewUser {
                username,
                name,
                password_hash,
            })
            .await?;

        tracing::info!(
            "User registered successfully: id={}, username={}",
            user.id,
            user.username
        );

        Ok(UserResponse::new(user, Vec::new()))
    }

    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, req: LoginUserRequest) -> Result<LoginResponse, DomainError> {
        let (Some(username), Some(password)) = (req.username, req.password) else {
            return Err(DomainError::InvalidCredentials);
        };

        let user = match self.user_repo.find_by_username(username.trim()).await {
            Ok(u) => u,
            Err(DomainError::UserNotFound) => {
                tracing::warn!("Login for unknown user: {}", username);
                return Err(DomainError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !verify_password(&password, &user.password_hash)? {
            tracing::warn!("Invalid password for user {}", user.username);
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.jwt_service.generate_token(user.id, &user.username)?;

        tracing::info!(
            "User logged in successfully: id={}, username={}",
            user.id,
            user.username
        );

        Ok(LoginResponse {
            token,
            username: user.username,
            name: user.name,
        })
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>, DomainError> {
        let users = self.user_repo.list().await?;

        let mut responses = Vec::with_capacity(users.len());
        for user in users {
            let blogs = self
                .blog_repo
                .find_by_user(user.id)
                .await?
                .into_iter()
                .map(BlogSummary::from)
                .collect();
            responses.push(UserResponse::new(user, blogs));
        }

        Ok(responses)
    }
}

pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            DomainError::InternalError(format!("Password hashing failed: {}", e))
        })
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool, DomainError> {
    let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
        tracing::error!("Invalid password hash format: {}", e);
        DomainError::InternalError(format!("Invalid password hash: {}", e))
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_only_the_original_password() {
        let hash = hash_password("sekret").unwrap();
        assert_ne!(hash, "sekret");
        assert!(verify_password("sekret", &hash).unwrap());
        assert!(!verify_password("sekrets", &hash).unwrap());
    }

    #[test]
    fn corrupt_hash_is_an_internal_error() {
        let err = verify_password("sekret", "not-a-phc-string").unwrap_err();
        assert_eq!(err.to_status_code(), 500);
    }
}
