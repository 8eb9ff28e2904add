use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::CheckoutError,
    models::{billing::BillingAddress, order::Order},
    stores::{cart::CartStore, order::OrderStore},
};

pub struct PaymentValidator {
    carts: Arc<CartStore>,
    orders: Arc<OrderStore>,
    processed_by: String,
}

impl PaymentValidator {
    pub fn new(carts: Arc<CartStore>, orders: Arc<OrderStore>, processed_by: String) -> Self {
        Self {
            carts,
            orders,
            processed_by,
        }
    }

    pub async fn process(
        &self,
        order_id: &str,
        amount: f64,
        billing_address: BillingAddress,
    ) -> Result<Order, CheckoutError> {
        if order_id.is_empty() {
            warn!("Order ID is missing in process_payment request");
            return Err(CheckoutError::missing_order_id("process the payment"));
        }

        if amount.is_nan() || amount <= 0.0 || billing_address.missing_field().is_some() {
            warn!("Invalid parameters for process_payment");
            return Err(CheckoutError::invalid_request(
                "Billing details and valid amount are required",
            ));
        }

        let cart = self.carts.get(&billing_address.customer_id).await.inspect_err(|_| {
            warn!(
                "Cart for customer ID {} not found",
                billing_address.customer_id
            )
        })?;

        // Exact comparison. A tolerance would change which claims are
        // accepted, so representation error in the cart total is left visible.
        let total = cart.total();
        if total != amount {
            warn!("Payment amount mismatch: expected {total:.2}, received {amount:.2}");
            return Err(CheckoutError::AmountMismatch {
                expected: total,
                received: amount,
            });
        }

        info!(
            event.action = "process_payment",
            customer.id = %billing_address.customer_id,
            amount,
            "Payment processed successfully"
        );

        let order = Order::paid(
            order_id.to_owned(),
            amount,
            cart.items,
            billing_address,
            self.processed_by.clone(),
        );
        self.orders.insert(order.clone()).await;

        Ok(order)
    }
}
