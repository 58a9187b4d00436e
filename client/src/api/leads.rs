//! Lead endpoints and wire models.

use super::ContactPreference;
use crate::errors::ApiResult;
use crate::gateway::ApiGateway;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Funnel position of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Lead,
    Contacted,
    Scheduled,
    Converted,
    Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub pref_contact: ContactPreference,
    pub service_category: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "convertedClientId")]
    pub converted_client_id: Option<String>,
    pub status: LeadStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLeadRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub pref_contact: ContactPreference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Partial update; only the provided fields go over the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateLeadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pref_contact: Option<ContactPreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
}

impl ApiGateway {
    pub async fn list_leads(&self) -> ApiResult<Vec<Lead>> {
        self.get("/lead").await
    }

    pub async fn get_lead(&self, id: &str) -> ApiResult<Lead> {
        self.get(&format!("/lead/{id}")).await
    }

    pub async fn create_lead(&self, data: &CreateLeadRequest) -> ApiResult<Lead> {
        self.post("/lead", data).await
    }

    pub async fn update_lead(&self, id: &str, data: &UpdateLeadRequest) -> ApiResult<Lead> {
        self.put(&format!("/lead/{id}"), data).await
    }

    pub async fn delete_lead(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/lead/{id}")).await
    }
}
