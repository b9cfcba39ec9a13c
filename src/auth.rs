//! Credential service: signup and login.
//!
//! One consistent policy across both storage variants: the password is
//! always bcrypt-hashed before persistence and always verified on login.
//! Login distinguishes an unknown email (`NotFound`) from a wrong password
//! (`InvalidCredentials`).

use std::sync::Arc;

use uuid::Uuid;

use crate::error::ApiError;
use crate::model::{LoginRequest, SignupRequest, User};
use crate::storage::StorageBackend;

/// Handles the user-credential lifecycle. Users are created here and never
/// mutated or deleted anywhere else.
pub struct CredentialService {
    storage: Arc<dyn StorageBackend>,
    bcrypt_cost: u32,
}

impl CredentialService {
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the hashing cost. Tests use the minimum to stay fast.
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Register a new user. The uniqueness check lives in the storage
    /// backend so both variants reject duplicates identically.
    pub async fn signup(&self, request: SignupRequest) -> Result<(), ApiError> {
        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))?;

        let user = User {
            id: request.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: request.name,
            email: request.email,
            password_hash,
            role: request.role,
            photo: None,
            notifications_enabled: true,
        };

        self.storage.insert_user(&user).await?;
        tracing::info!(user_id = %user.id, "user signed up");
        Ok(())
    }

    /// Authenticate by exact email match and hash verification. Returns the
    /// full user record; the hash is stripped at serialization.
    pub async fn login(&self, request: LoginRequest) -> Result<User, ApiError> {
        let user = self
            .storage
            .find_user_by_email(&request.email)
            .await?
            .ok_or(ApiError::NotFound)?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| ApiError::internal(format!("password verification failed: {e}")))?;
        if !valid {
            return Err(ApiError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user)
    }
}

// =============================================================================
// Tests
// =============================================================================
