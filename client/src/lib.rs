//! API access layer for the practice-management front-end.
//!
//! This crate owns the authenticated gateway to the remote practice API:
//! it holds the access/refresh token pair, attaches credentials to every
//! outbound call, and recovers from expired-token rejections with a single
//! coordinated refresh shared across concurrent callers. On top of the
//! gateway it exposes typed wrappers for the lead, client, appointment,
//! service, invoice, payment, and calendar endpoints.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod storage;
pub mod transport;

pub use auth::models::{AuthSession, LoginRequest, SignupRequest, User, UserRole};
pub use config::Config;
pub use errors::{ApiError, ApiResult};
pub use gateway::ApiGateway;
pub use storage::{MemoryTokenStore, TokenStore};
pub use transport::{HttpTransport, Method};
