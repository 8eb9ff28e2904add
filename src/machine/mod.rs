pub mod routing;

use std::{fmt, sync::Arc};
use thiserror::Error;

use crate::{
    error::ErrorCode,
    models::order::{Order, OrderStatus},
};

use routing::{AlwaysRoute, RoutingDecision, RoutingPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    CompleteGracePeriod,
    Route,
    Fulfill,
    CapturePayment,
    RefundPayment,
    Cancel,
}

impl Transition {
    pub fn action(&self) -> &'static str {
        match self {
            Transition::CompleteGracePeriod => "wait_grace_period",
            Transition::Route => "route_order",
            Transition::Fulfill => "fulfill_order",
            Transition::CapturePayment => "capture_payment",
            Transition::RefundPayment => "refund_payment",
            Transition::Cancel => "cancel_order",
        }
    }

    pub fn is_terminal_action(&self) -> bool {
        matches!(self, Transition::RefundPayment | Transition::Cancel)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("The order must be routed before fulfillment.")]
    OrderNotRouted,

    #[error("The order must be fulfilled before capturing payment.")]
    OrderNotFulfilled,

    #[error("Payment has not been processed for this order.")]
    PaymentNotProcessed,

    #[error("Payment has already been refunded for this order.")]
    PaymentAlreadyRefunded,

    #[error("The order has already been fulfilled and cannot be cancelled.")]
    OrderAlreadyFulfilled,

    #[error("The order has already been cancelled.")]
    OrderAlreadyCancelled,

    #[error("Cannot {transition} an order with status '{from}'.")]
    InvalidTransition {
        from: OrderStatus,
        transition: Transition,
    },
}

impl TransitionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TransitionError::OrderNotRouted => ErrorCode::OrderNotRouted,
            TransitionError::OrderNotFulfilled => ErrorCode::OrderNotFulfilled,
            TransitionError::PaymentNotProcessed => ErrorCode::PaymentNotProcessed,
            TransitionError::PaymentAlreadyRefunded => ErrorCode::PaymentAlreadyRefunded,
            TransitionError::OrderAlreadyFulfilled => ErrorCode::OrderAlreadyFulfilled,
            TransitionError::OrderAlreadyCancelled => ErrorCode::OrderAlreadyCancelled,
            TransitionError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
        }
    }
}

/// The transition graph. `None` means the move is not allowed from `from`.
pub fn next_status(from: OrderStatus, transition: Transition) -> Option<OrderStatus> {
    use OrderStatus as S;
    use Transition as T;

    match (from, transition) {
        (S::PaymentProcessed, T::CompleteGracePeriod) => Some(S::GracePeriodCompleted),
        (
            S::PaymentProcessed | S::GracePeriodCompleted | S::Routed | S::RoutingFailed,
            T::Route,
        ) => Some(S::Routed),
        (S::Routed, T::Fulfill) => Some(S::FulfillmentCompleted),
        (S::FulfillmentCompleted, T::CapturePayment) => Some(S::PaymentCaptured),
        (
            S::PaymentProcessed
            | S::GracePeriodCompleted
            | S::Routed
            | S::RoutingFailed
            | S::FulfillmentCompleted
            | S::PaymentCaptured,
            T::RefundPayment,
        ) => Some(S::PaymentRefunded),
        (
            S::PaymentProcessed | S::GracePeriodCompleted | S::Routed | S::RoutingFailed,
            T::Cancel,
        ) => Some(S::OrderCancelled),
        _ => None,
    }
}

// Guards run before the graph so callers get the specific code for the
// condition they tripped rather than a generic rejection.
fn check_guard(order: &Order, transition: Transition) -> Result<(), TransitionError> {
    match transition {
        Transition::Fulfill if order.status != OrderStatus::Routed => {
            Err(TransitionError::OrderNotRouted)
        }
        Transition::CapturePayment if !order.fulfilled => Err(TransitionError::OrderNotFulfilled),
        Transition::RefundPayment if !order.payment_done => {
            Err(TransitionError::PaymentNotProcessed)
        }
        Transition::RefundPayment if order.refunded => Err(TransitionError::PaymentAlreadyRefunded),
        Transition::Cancel if order.fulfilled => Err(TransitionError::OrderAlreadyFulfilled),
        Transition::Cancel if order.cancelled => Err(TransitionError::OrderAlreadyCancelled),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct OrderStateMachine {
    routing: Arc<dyn RoutingPolicy>,
}

impl OrderStateMachine {
    pub fn new(routing: Arc<dyn RoutingPolicy>) -> Self {
        Self { routing }
    }

    pub fn apply(&self, order: &Order, transition: Transition) -> Result<Order, TransitionError> {
        check_guard(order, transition)?;

        let status =
            next_status(order.status, transition).ok_or(TransitionError::InvalidTransition {
                from: order.status,
                transition,
            })?;

        let mut next = order.clone();
        next.status = status;

        match transition {
            Transition::CompleteGracePeriod => {}
            // Re-routing a routed order is a no-op.
            Transition::Route if order.status == OrderStatus::Routed => {}
            Transition::Route => {
                if self.routing.route(order) == RoutingDecision::Failed {
                    next.status = OrderStatus::RoutingFailed;
                }
            }
            Transition::Fulfill => next.fulfilled = true,
            Transition::CapturePayment => next.payment_done = true,
            Transition::RefundPayment => next.refunded = true,
            Transition::Cancel => next.cancelled = true,
        }

        Ok(next)
    }
}

impl Default for OrderStateMachine {
    fn default() -> Self {
        Self::new(Arc::new(AlwaysRoute))
    }
}
