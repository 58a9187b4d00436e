//! Authentication operations: login, signup, password reset, and logout.
//!
//! These are the only endpoints that mint or destroy the credential pair;
//! everything else consumes it through the gateway transparently.

pub mod models;

use crate::errors::{ApiError, ApiResult};
use crate::gateway::ApiGateway;
use models::{
    AuthSession, LoginRequest, MessageResponse, RequestPasswordResetRequest, SetPasswordRequest,
    SignupRequest, User, extract_access_token, extract_refresh_token, extract_user_id,
};
use tracing::info;

impl ApiGateway {
    /// Authenticates against `/auth/login` and commits the returned token
    /// pair. The user id, when present, is cached as the refresh hint.
    pub async fn login(&self, request: LoginRequest) -> ApiResult<AuthSession> {
        let body = self
            .post::<serde_json::Value, _>("/auth/login", &request)
            .await?;

        let access_token = extract_access_token(&body)
            .ok_or_else(|| ApiError::decode("login response carries no access token"))?;
        let refresh_token = extract_refresh_token(&body);
        self.configure_credentials(&access_token, refresh_token.as_deref())
            .await;

        let user_id = extract_user_id(&body);
        self.cache_user_hint(user_id).await;

        let user = body
            .get("user")
            .cloned()
            .and_then(|value| serde_json::from_value::<User>(value).ok());

        info!(username = %request.username, "Login succeeded");
        Ok(AuthSession {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Registers a new account via `/auth/signup`.
    pub async fn signup(&self, request: SignupRequest) -> ApiResult<MessageResponse> {
        self.post("/auth/signup", &request).await
    }

    /// Asks the API to mail a password-reset token.
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<MessageResponse> {
        let request = RequestPasswordResetRequest {
            email: email.to_string(),
        };
        self.post("/auth/request-password-reset", &request).await
    }

    /// Commits a new password against a previously issued reset token.
    pub async fn set_password(&self, token: &str, new_password: &str) -> ApiResult<MessageResponse> {
        let request = SetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.post("/auth/set-password", &request).await
    }

    /// Ends the session locally. The upstream has no logout endpoint; the
    /// credential pair is simply destroyed.
    pub async fn logout(&self) {
        self.clear_credentials().await;
        info!("Logged out");
    }
}
