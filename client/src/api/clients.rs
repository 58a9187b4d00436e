//! Client endpoints and wire models.

use super::ContactPreference;
use crate::errors::ApiResult;
use crate::gateway::ApiGateway;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub pref_contact: ContactPreference,
    pub service_category: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal: Option<String>,
    #[serde(rename = "stripeCustomerId")]
    pub stripe_customer_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateClientRequest {
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
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
    #[serde(
        rename = "stripeCustomerId",
        skip_serializing_if = "Option::is_none"
    )]
    pub stripe_customer_id: Option<String>,
}

/// Partial update; only the provided fields go over the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateClientRequest {
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
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
    #[serde(
        rename = "stripeCustomerId",
        skip_serializing_if = "Option::is_none"
    )]
    pub stripe_customer_id: Option<String>,
}

impl ApiGateway {
    pub async fn list_clients(&self) -> ApiResult<Vec<Client>> {
        self.get("/client").await
    }

    pub async fn get_client(&self, id: &str) -> ApiResult<Client> {
        self.get(&format!("/client/{id}")).await
    }

    pub async fn create_client(&self, data: &CreateClientRequest) -> ApiResult<Client> {
        self.post("/client", data).await
    }

    pub async fn update_client(&self, id: &str, data: &UpdateClientRequest) -> ApiResult<Client> {
        self.put(&format!("/client/{id}"), data).await
    }

    pub async fn delete_client(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/client/{id}")).await
    }
}
