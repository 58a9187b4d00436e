//! Payment endpoints: Stripe checkout hand-off and sales statistics.

use super::query_string;
use crate::errors::ApiResult;
use crate::gateway::ApiGateway;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    RequiresPayment,
    Pending,
    Paid,
    Refunded,
    Failed,
}

/// Starts a hosted checkout for an existing invoice.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutFromInvoiceRequest {
    #[serde(rename = "invoiceId")]
    pub invoice_id: String,
    #[serde(rename = "successUrl")]
    pub success_url: String,
    #[serde(rename = "cancelUrl")]
    pub cancel_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// Hosted payment page the caller should navigate to.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyTotals {
    pub amount: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalesStatistics {
    pub period: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "totalTransactions")]
    pub total_transactions: u64,
    #[serde(rename = "invoiceRevenue")]
    pub invoice_revenue: f64,
    #[serde(rename = "totalInvoices")]
    pub total_invoices: u64,
    #[serde(rename = "averageTransactionValue")]
    pub average_transaction_value: f64,
    #[serde(rename = "byCurrency")]
    pub by_currency: HashMap<String, CurrencyTotals>,
}

impl ApiGateway {
    pub async fn create_checkout_session(
        &self,
        data: &CheckoutFromInvoiceRequest,
    ) -> ApiResult<CheckoutSessionResponse> {
        self.post("/stripe/checkout-session/from-invoice", data).await
    }

    /// Revenue roll-up for the dashboard, optionally scoped to a period or
    /// date range.
    pub async fn sales_statistics(
        &self,
        period: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ApiResult<SalesStatistics> {
        let query = query_string([
            ("period", period.map(str::to_string)),
            ("startDate", start_date.map(str::to_string)),
            ("endDate", end_date.map(str::to_string)),
        ]);
        self.get(&format!("/stripe/sales-statistics{query}")).await
    }
}
