//! Request payloads for the gateway API.

use serde::{Deserialize, Serialize};

use crate::Amount;

/// A gateway response body: the remote JSON object passed through as-is.
pub type Response = serde_json::Map<String, serde_json::Value>;

/// A request failed structural validation before it was sent.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

fn require(field: &'static str, value: &str) -> Result<(), RequestError> {
    if value.trim().is_empty() {
        return Err(RequestError::MissingField(field));
    }
    Ok(())
}

/// Request to initiate a card payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Amount,
    /// ISO currency code, e.g. "NGN"
    pub currency: String,
    pub email: String,
    pub customer_name: String,
    /// Free-form merchant metadata echoed back in callbacks
    pub meta: String,
    /// URL the customer is redirected to after checkout
    #[serde(rename = "callback")]
    pub callback_url: String,
    #[serde(rename = "isAPI")]
    pub is_api: bool,
}

impl PaymentRequest {
    /// Checks required fields are non-empty. Business semantics (amount
    /// bounds, currency support) are left to the remote service.
    pub fn validate(&self) -> Result<(), RequestError> {
        require("currency", &self.currency)?;
        require("email", &self.email)?;
        require("customerName", &self.customer_name)?;
        require("callback", &self.callback_url)?;
        Ok(())
    }
}

/// Request to initiate a bank transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub amount: Amount,
    pub currency: String,
    pub email: String,
    pub customer_name: String,
    pub description: String,
    pub meta: String,
    #[serde(rename = "callback")]
    pub callback_url: String,
}

impl TransferRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        require("currency", &self.currency)?;
        require("email", &self.email)?;
        require("customerName", &self.customer_name)?;
        require("callback", &self.callback_url)?;
        Ok(())
    }
}

/// Request to simulate a bank transfer against a prior initiation.
///
/// Sandbox only; `client_transaction_ref` must be the `transactionRef`
/// returned by a previous transfer initiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateTransferRequest {
    pub amount: Amount,
    pub currency: String,
    pub client_transaction_ref: String,
}

impl SimulateTransferRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        require("currency", &self.currency)?;
        require("clientTransactionRef", &self.client_transaction_ref)?;
        Ok(())
    }
}

/// Body of a payment confirmation call. Built by the client from the
/// transaction reference argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub transaction_ref: String,
}
