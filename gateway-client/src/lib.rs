//! # Gateway Client SDK
//!
//! A typed Rust client for the payment gateway HTTP API: card payment
//! initiation and confirmation, bank transfer initiation, and sandbox
//! transfer simulation.
//!
//! Each operation is one request/response round-trip. The client never
//! retries, caches nothing, and validates only the structural shape of
//! requests and responses; business rules live in the remote service.

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, warn};

use gateway_types::{
    ConfirmPaymentRequest, Credentials, GatewayError, Mode, PaymentRequest, Response,
    SimulateTransferRequest, TransferRequest,
};

/// Base URL used in `Test` mode.
pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.paygate.africa";
/// Base URL used in `Live` mode.
pub const LIVE_BASE_URL: &str = "https://api.paygate.africa";

const INITIATE_PAYMENT: &str = "/api/v1/merchant/initiate-payment";
const CONFIRM_PAYMENT: &str = "/api/v1/merchant/confirm-payment";
const INITIATE_TRANSFER: &str = "/api/v1/merchant/initiate-bank-transfer";
const SIMULATE_TRANSFER: &str = "/api/v1/merchant/simulate-bank-transfer";

/// Fields a successful transfer initiation must carry under `data`.
const TRANSFER_DATA_FIELDS: &[&str] = &[
    "transactionRef",
    "virtualAccountNo",
    "virtualAccountName",
    "expiryDateTime",
    "transactionStatus",
    "amountPaid",
    "bankName",
];

/// Transport/decode/status failure, before it is assigned to an
/// operation family at the call site.
#[derive(Debug, thiserror::Error)]
enum CallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: status {status}")]
    Api { status: u16, body: Option<Value> },
}

impl CallError {
    fn parts(self) -> (String, Option<Value>) {
        match self {
            CallError::Http(e) => (e.to_string(), None),
            CallError::Json(e) => (format!("response body is not valid JSON: {e}"), None),
            CallError::Api { status, body } => (format!("gateway returned status {status}"), body),
        }
    }
}

/// Payment gateway API client.
///
/// Holds the credentials and one shared `reqwest::Client`; no other
/// state, so a single instance is freely shareable across tasks.
pub struct GatewayClient {
    base_url: String,
    credentials: Credentials,
    http: Client,
}

impl GatewayClient {
    /// Creates a client using the default base URL for the active mode.
    pub fn new(credentials: Credentials) -> Self {
        let base_url = match credentials.mode() {
            Mode::Test => SANDBOX_BASE_URL,
            Mode::Live => LIVE_BASE_URL,
        };
        Self {
            base_url: base_url.to_string(),
            credentials,
            http: Client::new(),
        }
    }

    /// Overrides the base URL (self-hosted deployments, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Initiates a card payment.
    ///
    /// On success the returned payload contains `authUrl` (the checkout
    /// redirect) and `validationRequired`.
    pub async fn initiate_payment(&self, req: &PaymentRequest) -> Result<Response, GatewayError> {
        req.validate()
            .map_err(|e| GatewayError::payment_initiate(e.to_string(), None))?;

        let value = self.post(INITIATE_PAYMENT, req).await.map_err(|e| {
            let (message, body) = e.parts();
            GatewayError::payment_initiate(message, body)
        })?;
        let envelope = as_object(value)
            .ok_or_else(|| GatewayError::payment_initiate("response is not a JSON object", None))?;

        let payload = unwrap_data(envelope);
        if !payload.contains_key("validationRequired") {
            return Err(GatewayError::payment_initiate(
                "response is missing validationRequired",
                Some(Value::Object(payload)),
            ));
        }
        if !payload.get("authUrl").is_some_and(|v| !v.is_null()) {
            return Err(GatewayError::payment_initiate(
                "response is missing authUrl",
                Some(Value::Object(payload)),
            ));
        }
        Ok(payload)
    }

    /// Confirms the status of a previously initiated payment.
    ///
    /// The returned payload contains `status` (e.g. `"Paid"`).
    pub async fn confirm_payment(&self, tx_ref: &str) -> Result<Response, GatewayError> {
        if tx_ref.trim().is_empty() {
            return Err(GatewayError::transaction_verification(
                "transaction reference is empty",
                None,
            ));
        }
        let req = ConfirmPaymentRequest {
            transaction_ref: tx_ref.to_string(),
        };

        let value = self.post(CONFIRM_PAYMENT, &req).await.map_err(|e| {
            let (message, body) = e.parts();
            GatewayError::transaction_verification(message, body)
        })?;
        let envelope = as_object(value).ok_or_else(|| {
            GatewayError::transaction_verification("response is not a JSON object", None)
        })?;

        let payload = unwrap_data(envelope);
        if !payload.contains_key("status") {
            return Err(GatewayError::transaction_verification(
                "response is missing status",
                Some(Value::Object(payload)),
            ));
        }
        Ok(payload)
    }

    /// Initiates a bank transfer.
    ///
    /// On success the full `{error, message, data}` envelope is returned;
    /// `data` carries the virtual account to pay into and the pending
    /// transaction reference.
    pub async fn initiate_transfer(&self, req: &TransferRequest) -> Result<Response, GatewayError> {
        req.validate()
            .map_err(|e| GatewayError::transaction_validation(e.to_string(), None))?;

        let value = self.post(INITIATE_TRANSFER, req).await.map_err(|e| {
            let (message, body) = e.parts();
            GatewayError::transaction_validation(message, body)
        })?;
        let envelope = as_object(value).ok_or_else(|| {
            GatewayError::transaction_validation("response is not a JSON object", None)
        })?;

        if envelope_failed(&envelope) {
            let message = envelope_message(&envelope, "gateway rejected the transfer");
            return Err(GatewayError::transaction_validation(
                message,
                Some(Value::Object(envelope)),
            ));
        }
        let missing = match envelope.get("data").and_then(Value::as_object) {
            Some(data) => missing_field(data, TRANSFER_DATA_FIELDS),
            None => Some("data".to_string()),
        };
        if let Some(field) = missing {
            return Err(GatewayError::transaction_validation(
                format!("response is missing {field}"),
                Some(Value::Object(envelope)),
            ));
        }
        Ok(envelope)
    }

    /// Simulates a bank transfer matching a prior initiation (sandbox only).
    ///
    /// The returned map carries the envelope's `error`/`message` plus the
    /// settlement fields (`orderId`, `transactionId`, `amount`, ...)
    /// flattened at the top level.
    pub async fn simulate_transfer(
        &self,
        req: &SimulateTransferRequest,
    ) -> Result<Response, GatewayError> {
        req.validate()
            .map_err(|e| GatewayError::transaction_validation(e.to_string(), None))?;

        let value = self.post(SIMULATE_TRANSFER, req).await.map_err(|e| {
            let (message, body) = e.parts();
            GatewayError::transaction_validation(message, body)
        })?;
        let mut envelope = as_object(value).ok_or_else(|| {
            GatewayError::transaction_validation("response is not a JSON object", None)
        })?;

        if envelope_failed(&envelope) {
            let message = envelope_message(&envelope, "gateway rejected the simulation");
            return Err(GatewayError::transaction_validation(
                message,
                Some(Value::Object(envelope)),
            ));
        }

        let mut flat = Response::new();
        if let Some(Value::Object(data)) = envelope.remove("data") {
            flat.extend(data);
        }
        flat.extend(envelope);

        for field in ["orderId", "transactionId"] {
            if !flat.get(field).is_some_and(|v| !v.is_null()) {
                return Err(GatewayError::transaction_validation(
                    format!("response is missing {field}"),
                    Some(Value::Object(flat)),
                ));
            }
        }
        Ok(flat)
    }

    async fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<Value, CallError> {
        debug!(path, mode = %self.credentials.mode(), "sending gateway request");
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header(AUTHORIZATION, self.credentials.active_key())
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            warn!(path, status = status.as_u16(), "gateway returned error status");
            Err(CallError::Api {
                status: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
            })
        }
    }
}

fn as_object(value: Value) -> Option<Response> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Unwraps `{..., "data": {...}}` payloads to the inner object; bodies
/// without a `data` object are passed through unchanged.
fn unwrap_data(mut map: Response) -> Response {
    match map.remove("data") {
        Some(Value::Object(inner)) => inner,
        Some(other) => {
            map.insert("data".to_string(), other);
            map
        }
        None => map,
    }
}

/// A 2xx envelope with `error` missing or not `false` is a business
/// failure.
fn envelope_failed(map: &Response) -> bool {
    map.get("error").and_then(Value::as_bool) != Some(false)
}

fn envelope_message(map: &Response, fallback: &str) -> String {
    map.get("message")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

fn missing_field(map: &Response, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find(|field| !map.contains_key(**field))
        .map(|field| field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_credentials() -> Credentials {
        Credentials::new("sk_test", "sk_live", Mode::Test).unwrap()
    }

    #[test]
    fn test_client_defaults_to_sandbox_url_in_test_mode() {
        let client = GatewayClient::new(test_credentials());
        assert_eq!(client.base_url, SANDBOX_BASE_URL);
    }

    #[test]
    fn test_client_defaults_to_live_url_in_live_mode() {
        let creds = Credentials::new("sk_test", "sk_live", Mode::Live).unwrap();
        let client = GatewayClient::new(creds);
        assert_eq!(client.base_url, LIVE_BASE_URL);
    }

    #[test]
    fn test_base_url_override_trims_trailing_slash() {
        let client =
            GatewayClient::new(test_credentials()).with_base_url("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_unwrap_data_returns_inner_object() {
        let map = as_object(json!({"statusCode": "90000", "data": {"authUrl": "u"}})).unwrap();
        let payload = unwrap_data(map);
        assert_eq!(payload.get("authUrl"), Some(&json!("u")));
        assert!(!payload.contains_key("statusCode"));
    }

    #[test]
    fn test_unwrap_data_passes_flat_bodies_through() {
        let map = as_object(json!({"status": "Paid"})).unwrap();
        let payload = unwrap_data(map);
        assert_eq!(payload.get("status"), Some(&json!("Paid")));
    }

    #[test]
    fn test_envelope_failed_requires_explicit_false() {
        assert!(!envelope_failed(&as_object(json!({"error": false})).unwrap()));
        assert!(envelope_failed(&as_object(json!({"error": true})).unwrap()));
        assert!(envelope_failed(&as_object(json!({"message": "ok"})).unwrap()));
        assert!(envelope_failed(&as_object(json!({"error": "no"})).unwrap()));
    }
}
