use serde::{Deserialize, Serialize};
use std::fmt;

use super::{billing::BillingAddress, item::Item};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    PaymentProcessed,
    GracePeriodCompleted,
    Routed,
    /// Reserved for a routing policy that can reject. The default policy never does.
    RoutingFailed,
    FulfillmentCompleted,
    PaymentCaptured,
    PaymentRefunded,
    OrderCancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::PaymentCaptured | OrderStatus::PaymentRefunded | OrderStatus::OrderCancelled
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::PaymentProcessed => "Payment Processed",
            OrderStatus::GracePeriodCompleted => "Grace Period Completed",
            OrderStatus::Routed => "Order Routed",
            OrderStatus::RoutingFailed => "Routing Failed",
            OrderStatus::FulfillmentCompleted => "Fulfillment Completed",
            OrderStatus::PaymentCaptured => "Payment Captured",
            OrderStatus::PaymentRefunded => "Payment Refunded",
            OrderStatus::OrderCancelled => "Order Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub status: OrderStatus,
    pub amount: f64,
    pub items: Vec<Item>,
    pub fulfilled: bool,
    pub payment_done: bool,
    pub refunded: bool,
    pub cancelled: bool,
    pub customer: BillingAddress,
    pub processed_by: String,
}

impl Order {
    pub fn paid(
        order_id: String,
        amount: f64,
        items: Vec<Item>,
        customer: BillingAddress,
        processed_by: String,
    ) -> Self {
        Self {
            order_id,
            status: OrderStatus::PaymentProcessed,
            amount,
            items,
            fulfilled: false,
            payment_done: true,
            refunded: false,
            cancelled: false,
            customer,
            processed_by,
        }
    }
}
