//! # Gateway Types
//!
//! Data types shared by the gateway client and CLI: request structures,
//! the `Amount` wire format, credentials/mode selection, and the error
//! type returned by every client operation. This crate has ZERO IO
//! dependencies - only data structures and their validation rules.

pub mod amount;
pub mod credentials;
pub mod dto;
pub mod error;

// Re-export commonly used types
pub use amount::{Amount, AmountError};
pub use credentials::{Credentials, CredentialsError, Mode};
pub use dto::{
    ConfirmPaymentRequest, PaymentRequest, RequestError, Response, SimulateTransferRequest,
    TransferRequest,
};
pub use error::GatewayError;
