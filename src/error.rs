use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

use crate::machine::TransitionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidRequest,
    MissingOrderId,
    CartNotFound,
    AmountMismatch,
    OrderNotFound,
    OrderNotRouted,
    OrderNotFulfilled,
    PaymentNotProcessed,
    PaymentAlreadyRefunded,
    OrderAlreadyFulfilled,
    OrderAlreadyCancelled,
    InvalidTransition,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "InvalidRequest",
            ErrorCode::MissingOrderId => "MissingOrderID",
            ErrorCode::CartNotFound => "CartNotFound",
            ErrorCode::AmountMismatch => "AmountMismatch",
            ErrorCode::OrderNotFound => "OrderNotFound",
            ErrorCode::OrderNotRouted => "OrderNotRouted",
            ErrorCode::OrderNotFulfilled => "OrderNotFulfilled",
            ErrorCode::PaymentNotProcessed => "PaymentNotProcessed",
            ErrorCode::PaymentAlreadyRefunded => "PaymentAlreadyRefunded",
            ErrorCode::OrderAlreadyFulfilled => "OrderAlreadyFulfilled",
            ErrorCode::OrderAlreadyCancelled => "OrderAlreadyCancelled",
            ErrorCode::InvalidTransition => "InvalidTransition",
            ErrorCode::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckoutError {
    #[error("{message}")]
    Validation { code: ErrorCode, message: String },

    #[error("Cart for the given customer ID not found")]
    CartNotFound { customer_id: String },

    #[error("The order ID provided does not exist.")]
    OrderNotFound { order_id: String },

    #[error("The payment amount does not match the total cart amount")]
    AmountMismatch { expected: f64, received: f64 },

    #[error(transparent)]
    Conflict(#[from] TransitionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        CheckoutError::Validation {
            code: ErrorCode::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn missing_order_id(action: &str) -> Self {
        CheckoutError::Validation {
            code: ErrorCode::MissingOrderId,
            message: format!("Order ID is required to {action}."),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::Validation { code, .. } => *code,
            CheckoutError::CartNotFound { .. } => ErrorCode::CartNotFound,
            CheckoutError::OrderNotFound { .. } => ErrorCode::OrderNotFound,
            CheckoutError::AmountMismatch { .. } => ErrorCode::AmountMismatch,
            CheckoutError::Conflict(err) => err.code(),
            CheckoutError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn to_envelope(&self) -> ErrorEnvelope {
        let (target, details) = match self {
            CheckoutError::OrderNotFound { order_id } => {
                (Some("order_id"), Some(json!({ "order_id": order_id })))
            }
            CheckoutError::CartNotFound { customer_id } => {
                (Some("customer_id"), Some(json!({ "customer_id": customer_id })))
            }
            CheckoutError::AmountMismatch { expected, received } => (
                None,
                Some(json!({ "expected": expected, "received": received })),
            ),
            CheckoutError::Conflict(_) => (Some("order_id"), None),
            _ => (None, None),
        };

        ErrorEnvelope {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
                target,
                details,
            },
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<CheckoutError> for ErrorEnvelope {
    fn from(err: CheckoutError) -> Self {
        err.to_envelope()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_not_found_envelope_carries_target_and_details() {
        let envelope = CheckoutError::OrderNotFound {
            order_id: "o404".to_string(),
        }
        .to_envelope();

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "error": {
                    "code": "OrderNotFound",
                    "message": "The order ID provided does not exist.",
                    "target": "order_id",
                    "details": { "order_id": "o404" }
                }
            })
        );
    }

    #[test]
    fn validation_envelope_omits_optional_fields() {
        let value =
            serde_json::to_value(CheckoutError::missing_order_id("route the order").to_envelope())
                .unwrap();
        assert_eq!(
            value,
            json!({
                "error": {
                    "code": "MissingOrderID",
                    "message": "Order ID is required to route the order."
                }
            })
        );
    }

    #[test]
    fn conflict_uses_transition_code() {
        let err = CheckoutError::from(TransitionError::PaymentAlreadyRefunded);
        assert_eq!(err.code(), ErrorCode::PaymentAlreadyRefunded);
        assert_eq!(
            err.to_string(),
            "Payment has already been refunded for this order."
        );
        assert_eq!(err.to_envelope().error.target, Some("order_id"));
    }

    #[test]
    fn code_serializes_and_displays_as_wire_name() {
        assert_eq!(
            serde_json::to_value(ErrorCode::MissingOrderId).unwrap(),
            json!("MissingOrderID")
        );
        assert_eq!(ErrorCode::MissingOrderId.to_string(), "MissingOrderID");
        assert_eq!(
            serde_json::to_value(ErrorCode::InvalidTransition).unwrap(),
            json!("InvalidTransition")
        );
    }

    #[test]
    fn amount_mismatch_envelope_reports_both_amounts() {
        let envelope = CheckoutError::AmountMismatch {
            expected: 1000.0,
            received: 999.0,
        }
        .to_envelope();

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "error": {
                    "code": "AmountMismatch",
                    "message": "The payment amount does not match the total cart amount",
                    "details": { "expected": 1000.0, "received": 999.0 }
                }
            })
        );
    }

    #[test]
    fn cart_not_found_envelope_targets_customer() {
        let body = CheckoutError::CartNotFound {
            customer_id: "cust9".to_string(),
        }
        .to_envelope()
        .error;
        assert_eq!(body.target, Some("customer_id"));
        assert_eq!(body.details, Some(json!({ "customer_id": "cust9" })));
    }
}
