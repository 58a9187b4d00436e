//! Service-catalog endpoints and wire models.

use crate::errors::ApiResult;
use crate::gateway::ApiGateway;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The upstream sends prices both as JSON numbers and as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Legacy alias for `name` still present on some responses.
    pub service: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
    pub price: Price,
    #[serde(rename = "priceId")]
    pub price_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateServiceRequest {
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "priceId", skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
}

/// Partial update; only the provided fields go over the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateServiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "priceId", skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
}

impl ApiGateway {
    pub async fn list_services(&self) -> ApiResult<Vec<Service>> {
        self.get("/service").await
    }

    pub async fn get_service(&self, id: &str) -> ApiResult<Service> {
        self.get(&format!("/service/{id}")).await
    }

    pub async fn create_service(&self, data: &CreateServiceRequest) -> ApiResult<Service> {
        self.post("/service", data).await
    }

    pub async fn update_service(&self, id: &str, data: &UpdateServiceRequest) -> ApiResult<Service> {
        self.put(&format!("/service/{id}"), data).await
    }

    pub async fn delete_service(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/service/{id}")).await
    }
}
