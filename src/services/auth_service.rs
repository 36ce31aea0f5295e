//! Auth service: registration, login, token verification

use crate::{
    auth::{AuthContext, JwtService, PasswordHasher},
    error::{AppError, Result},
    models::{LoginResponse, NewUser, User, UserResponse},
    repository::UserStore,
};
use std::sync::Arc;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            users,
            jwt_service,
            hasher: PasswordHasher::new(),
        }
    }

    /// Register a new user
    ///
    /// Usernames match case-sensitively. The existence check here is an
    /// optimization; the store's unique constraint is what serializes
    /// racing registrations, and it surfaces the same error kind.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::UsernameTaken);
        }

        let password_hash = self.hasher.hash(password)?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Authenticate credentials and issue a token
    ///
    /// Unknown username and wrong password return the same error kind
    /// so callers cannot enumerate registered usernames.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            tracing::debug!(username = %username, "Password verification failed");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt_service.issue(user.id, &user.username)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            token,
            expires_in: self.jwt_service.token_ttl_secs(),
            user: UserResponse::from(user),
        })
    }

    /// Verify a token and return the embedded user ID
    ///
    /// Delegates to the token codec; its error kinds propagate
    /// unchanged.
    pub fn verify_token(&self, token: &str) -> Result<i64> {
        self.jwt_service.verify(token)
    }

    /// Verify a token and build the caller identity for the request gate
    pub fn authenticate(&self, token: &str) -> Result<AuthContext> {
        let claims = self.jwt_service.verify_claims(token)?;

        Ok(AuthContext {
            user_id: claims.user_id,
            username: claims.sub,
        })
    }

    /// Look up a user by ID (for identity echo endpoints)
    pub async fn find_user(&self, id: i64) -> Result<Option<User>> {
        self.users.find_by_id(id).await
    }
}
