//! Account management service: registration and authentication

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{RegisterUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct AccountsService {
    repository: Repository,
}

impl AccountsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new member account. Registration never grants staff.
    pub async fn register(&self, input: RegisterUser) -> AppResult<User> {
        input.validate()?;

        if self.repository.users.username_exists(&input.username).await? {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let hash = self.hash_password(&input.password1)?;
        self.repository
            .users
            .create(&input.username, &input.email, &hash, false)
            .await
    }

    /// Create an account directly, staff flag included. Used for
    /// administrative provisioning rather than self-registration.
    pub async fn provision(
        &self,
        username: &str,
        email: &str,
        password: &str,
        is_staff: bool,
    ) -> AppResult<User> {
        if self.repository.users.username_exists(username).await? {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let hash = self.hash_password(password)?;
        self.repository.users.create(username, email, &hash, is_staff).await
    }

    /// Authenticate by username and password
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
