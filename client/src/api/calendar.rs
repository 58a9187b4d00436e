//! Calendar-integration endpoints.

use crate::errors::ApiResult;
use crate::gateway::ApiGateway;
use serde::Deserialize;

/// Response to starting the external-calendar OAuth hand-off.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarAuthResponse {
    #[serde(rename = "authUrl")]
    pub auth_url: String,
}

impl ApiGateway {
    /// Begins the calendar OAuth flow; the caller navigates to the returned URL.
    pub async fn init_calendar_auth(&self) -> ApiResult<CalendarAuthResponse> {
        self.get("/calendar/auth/init").await
    }
}
