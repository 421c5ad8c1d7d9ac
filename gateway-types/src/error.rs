//! Error type returned by gateway client operations.

use serde_json::Value;

/// One error kind per operation family.
///
/// Transport failures (connect error, timeout, non-JSON body) and
/// business failures (non-2xx status, `error: true` envelope, missing
/// expected field) both surface as the kind belonging to the call site;
/// callers tell them apart by inspecting `message` and `body`. When the
/// remote returned a body it is attached raw, never swallowed.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("payment initiation failed: {message}")]
    PaymentInitiate {
        message: String,
        body: Option<Value>,
    },

    #[error("transaction verification failed: {message}")]
    TransactionVerification {
        message: String,
        body: Option<Value>,
    },

    #[error("transaction validation failed: {message}")]
    TransactionValidation {
        message: String,
        body: Option<Value>,
    },
}

impl GatewayError {
    pub fn payment_initiate(message: impl Into<String>, body: Option<Value>) -> Self {
        GatewayError::PaymentInitiate {
            message: message.into(),
            body,
        }
    }

    pub fn transaction_verification(message: impl Into<String>, body: Option<Value>) -> Self {
        GatewayError::TransactionVerification {
            message: message.into(),
            body,
        }
    }

    pub fn transaction_validation(message: impl Into<String>, body: Option<Value>) -> Self {
        GatewayError::TransactionValidation {
            message: message.into(),
            body,
        }
    }

    /// The raw response body carried by the error, if one was received.
    pub fn body(&self) -> Option<&Value> {
        match self {
            GatewayError::PaymentInitiate { body, .. }
            | GatewayError::TransactionVerification { body, .. }
            | GatewayError::TransactionValidation { body, .. } => body.as_ref(),
        }
    }
}
