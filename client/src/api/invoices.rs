//! Invoice endpoints and wire models.
//!
//! Monetary amounts arrive as decimal strings; issue and due dates arrive in
//! upstream-defined formats and are kept as strings rather than parsed.

use super::services::Price;
use crate::errors::ApiResult;
use crate::gateway::ApiGateway;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    PastDue,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: String,
    #[serde(rename = "serviceId")]
    pub service_id: Option<String>,
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub description: Option<String>,
    pub quantity: u32,
    #[serde(rename = "unitPrice")]
    pub unit_price: String,
    #[serde(rename = "lineTotal")]
    pub line_total: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Abbreviated client embedded in invoice responses. Unlike the full client
/// record this summary uses camel-case name fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceClientSummary {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub status: InvoiceStatus,
    #[serde(rename = "issueDate")]
    pub issue_date: String,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    pub currency: String,
    pub subtotal: String,
    pub tax: Option<String>,
    pub total: String,
    pub amount: String,
    #[serde(rename = "paidAmount")]
    pub paid_amount: String,
    pub notes: Option<String>,
    #[serde(rename = "lineItems")]
    pub line_items: Vec<InvoiceLineItem>,
    pub client: Option<InvoiceClientSummary>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceLineItem {
    #[serde(rename = "serviceId", skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    pub description: String,
    pub quantity: u32,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateInvoiceRequest {
    #[serde(rename = "invoiceNumber", skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "issueDate", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "lineItems")]
    pub line_items: Vec<CreateInvoiceLineItem>,
    /// The upstream accepts tax as a number or a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Price>,
}

#[derive(Debug, Clone, Serialize)]
struct UpdateInvoiceStatusRequest {
    status: InvoiceStatus,
}

/// Partial update; only the provided fields go over the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateInvoiceRequest {
    #[serde(rename = "invoiceNumber", skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(rename = "clientId", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "issueDate", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "lineItems", skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<CreateInvoiceLineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<Price>,
}

impl ApiGateway {
    pub async fn list_invoices(&self) -> ApiResult<Vec<Invoice>> {
        self.get("/invoice").await
    }

    pub async fn get_invoice(&self, id: &str) -> ApiResult<Invoice> {
        self.get(&format!("/invoice/{id}")).await
    }

    /// Lists every invoice issued to one client.
    pub async fn invoices_by_client(&self, client_id: &str) -> ApiResult<Vec<Invoice>> {
        self.get(&format!("/invoice/client/{client_id}")).await
    }

    pub async fn create_invoice(&self, data: &CreateInvoiceRequest) -> ApiResult<Invoice> {
        self.post("/invoice", data).await
    }

    pub async fn update_invoice(&self, id: &str, data: &UpdateInvoiceRequest) -> ApiResult<Invoice> {
        self.put(&format!("/invoice/{id}"), data).await
    }

    /// Moves an invoice through its lifecycle (draft, issued, paid, past_due,
    /// cancelled) without touching the rest of the record.
    pub async fn update_invoice_status(
        &self,
        id: &str,
        status: InvoiceStatus,
    ) -> ApiResult<Invoice> {
        let body = UpdateInvoiceStatusRequest { status };
        self.put(&format!("/invoice/{id}/status"), &body).await
    }
}
