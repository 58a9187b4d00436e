//! Data structures for authentication-related entities.
//!
//! This module defines the request and response payloads of the auth
//! subsystem and the token-extraction shim used to read credentials out of
//! the variably-shaped responses the upstream API has produced over time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login request payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Signup request payload
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Password-reset request payload
#[derive(Debug, Clone, Serialize)]
pub struct RequestPasswordResetRequest {
    pub email: String,
}

/// Payload committing a new password against a reset token
#[derive(Debug, Clone, Serialize)]
pub struct SetPasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Token refresh request sent to `/auth/refresh`. The user id is an
/// opportunistic hint cached from the last login.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Generic message envelope returned by several auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Role assigned to an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Provider,
    Client,
}

/// User information returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A committed access/refresh token pair together with the parsed user.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: Option<User>,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

// Token extraction.
//
// The upstream API has shipped several response shapes for the login and
// refresh endpoints: tokens at the top level (camel case, snake case, or a
// bare `token`), wrapped under `data`, or nested inside the `user` object.
// Extraction is an ordered list of probes tried in sequence; the first hit
// wins. This is a compatibility shim to drop once the upstream contract
// stabilizes.

const ACCESS_TOKEN_KEYS: [&str; 3] = ["accessToken", "access_token", "token"];
const REFRESH_TOKEN_KEYS: [&str; 2] = ["refreshToken", "refresh_token"];
const NESTED_SCOPES: [&str; 2] = ["data", "user"];

fn probe(body: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(token) = body.get(key).and_then(Value::as_str) {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    for scope in NESTED_SCOPES {
        if let Some(nested) = body.get(scope) {
            for key in keys {
                if let Some(token) = nested.get(key).and_then(Value::as_str) {
                    if !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
            }
        }
    }
    None
}

/// Extracts the access token from an auth response, probing every shape the
/// upstream has been observed to produce.
pub fn extract_access_token(body: &Value) -> Option<String> {
    probe(body, &ACCESS_TOKEN_KEYS)
}

/// Extracts the refresh token from an auth response, when one is present.
pub fn extract_refresh_token(body: &Value) -> Option<String> {
    probe(body, &REFRESH_TOKEN_KEYS)
}

/// Extracts the authenticated user's id, used as the refresh hint.
pub fn extract_user_id(body: &Value) -> Option<String> {
    body.get("user")
        .and_then(|user| user.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
