//! Appointment endpoints and wire models, including the booking helpers
//! (reschedule, cancel, availability lookup).

use super::clients::Client;
use super::leads::Lead;
use super::query_string;
use super::services::Service;
use crate::errors::ApiResult;
use crate::gateway::ApiGateway;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Tentative,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    #[serde(rename = "leadId")]
    pub lead_id: Option<String>,
    #[serde(rename = "serviceId")]
    pub service_id: Option<String>,
    #[serde(rename = "startAt")]
    pub start_at: DateTime<Utc>,
    #[serde(rename = "endAt")]
    pub end_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub client: Option<Client>,
    pub lead: Option<Lead>,
    pub service: Option<Service>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// One bookable window returned by the availability lookup. The upstream has
/// answered with both `startTime`/`endTime` and `start`/`end` field pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlot {
    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAppointmentRequest {
    #[serde(rename = "clientId", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "leadId", skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(rename = "serviceId", skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(rename = "startAt")]
    pub start_at: DateTime<Utc>,
    #[serde(rename = "endAt")]
    pub end_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

/// Partial update; only the provided fields go over the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAppointmentRequest {
    #[serde(rename = "clientId", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "leadId", skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(rename = "serviceId", skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(rename = "startAt", skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(rename = "endAt", skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, Serialize)]
struct RescheduleRequest {
    #[serde(rename = "startAt")]
    start_at: DateTime<Utc>,
    #[serde(rename = "endAt")]
    end_at: DateTime<Utc>,
}

impl ApiGateway {
    pub async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
        self.get("/appointment").await
    }

    pub async fn get_appointment(&self, id: &str) -> ApiResult<Appointment> {
        self.get(&format!("/appointment/{id}")).await
    }

    pub async fn create_appointment(
        &self,
        data: &CreateAppointmentRequest,
    ) -> ApiResult<Appointment> {
        self.post("/appointment", data).await
    }

    pub async fn update_appointment(
        &self,
        id: &str,
        data: &UpdateAppointmentRequest,
    ) -> ApiResult<Appointment> {
        self.put(&format!("/appointment/{id}"), data).await
    }

    pub async fn delete_appointment(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/appointment/{id}")).await
    }

    /// Moves an appointment to a new window.
    pub async fn reschedule_appointment(
        &self,
        id: &str,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> ApiResult<Appointment> {
        let body = RescheduleRequest { start_at, end_at };
        self.put(&format!("/appointment/{id}/reschedule"), &body)
            .await
    }

    /// Marks an appointment cancelled without deleting it.
    pub async fn cancel_appointment(&self, id: &str) -> ApiResult<Appointment> {
        self.put_empty(&format!("/appointment/{id}/cancel")).await
    }

    /// Lists open booking windows between two dates, optionally constrained
    /// to slots long enough for `duration_minutes`.
    pub async fn available_slots(
        &self,
        start_date: &str,
        end_date: &str,
        duration_minutes: Option<u32>,
    ) -> ApiResult<Vec<AvailableSlot>> {
        let query = query_string([
            ("startDate", Some(start_date.to_string())),
            ("endDate", Some(end_date.to_string())),
            ("duration", duration_minutes.map(|d| d.to_string())),
        ]);
        self.get(&format!("/appointment/available/slots{query}"))
            .await
    }
}
