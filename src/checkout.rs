use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    config::Settings,
    error::CheckoutError,
    grace::GraceTimers,
    machine::{
        Transition, TransitionError, next_status,
        routing::{AlwaysRoute, RoutingPolicy},
    },
    models::{
        billing::BillingAddress,
        cart::Cart,
        item::Item,
        order::{Order, OrderStatus},
    },
    payment::PaymentValidator,
    query::OrderQuery,
    stores::{cart::CartStore, order::OrderStore},
};

#[derive(Clone)]
pub struct Checkout {
    carts: Arc<CartStore>,
    orders: Arc<OrderStore>,
    payments: Arc<PaymentValidator>,
    timers: Arc<GraceTimers>,
    query: OrderQuery,
    preempt_grace_on_terminal: bool,
}

impl Checkout {
    pub fn new(settings: &Settings) -> Self {
        Self::with_routing(settings, Arc::new(AlwaysRoute))
    }

    pub fn with_routing(settings: &Settings, routing: Arc<dyn RoutingPolicy>) -> Self {
        let carts = Arc::new(CartStore::new());
        let orders = Arc::new(OrderStore::new(routing));
        let payments = Arc::new(PaymentValidator::new(
            Arc::clone(&carts),
            Arc::clone(&orders),
            settings.payment.processed_by.clone(),
        ));

        Self {
            carts,
            payments,
            timers: Arc::new(GraceTimers::new(settings.grace_period())),
            query: OrderQuery::new(Arc::clone(&orders)),
            orders,
            preempt_grace_on_terminal: settings.grace_period.preempt_on_terminal,
        }
    }

    pub async fn create_cart(
        &self,
        customer_id: &str,
        items: Vec<Item>,
    ) -> Result<Cart, CheckoutError> {
        self.carts.upsert(customer_id, items).await
    }

    pub async fn process_payment(
        &self,
        order_id: &str,
        amount: f64,
        billing_address: BillingAddress,
    ) -> Result<Order, CheckoutError> {
        self.payments
            .process(order_id, amount, billing_address)
            .await
    }

    pub async fn wait_grace_period(&self, order_id: &str) -> Result<Order, CheckoutError> {
        require_order_id(order_id, "wait for the grace period")?;
        let order = self
            .orders
            .get(order_id)
            .await
            .inspect_err(|_| warn!("Order ID {order_id} not found for grace period"))?;

        if order.status == OrderStatus::GracePeriodCompleted {
            info!(order.id = %order_id, "Grace period already completed for order");
            return Ok(order);
        }
        if next_status(order.status, Transition::CompleteGracePeriod).is_none() {
            let err = CheckoutError::from(TransitionError::InvalidTransition {
                from: order.status,
                transition: Transition::CompleteGracePeriod,
            });
            warn!(order.id = %order_id, code = %err.code(), "Grace period not applied: {err}");
            return Err(err);
        }

        info!(
            order.id = %order_id,
            delay_ms = self.timers.delay().as_millis() as u64,
            already_pending = self.timers.pending(order_id),
            "Starting grace period for order"
        );

        let order = self
            .timers
            .schedule(order_id, Arc::clone(&self.orders))
            .await
            .map_err(|err| CheckoutError::Internal(format!("grace period task failed: {err}")))?
            .inspect_err(|err| {
                warn!(order.id = %order_id, code = %err.code(), "Grace period not applied: {err}")
            })?;

        info!(order.id = %order_id, status = %order.status, "Grace period completed for order");
        Ok(order)
    }

    pub async fn route_order(&self, order_id: &str) -> Result<Order, CheckoutError> {
        self.transition(order_id, Transition::Route, "route the order")
            .await
    }

    pub async fn fulfill_order(&self, order_id: &str) -> Result<Order, CheckoutError> {
        self.transition(order_id, Transition::Fulfill, "process fulfillment")
            .await
    }

    pub async fn capture_payment(&self, order_id: &str) -> Result<Order, CheckoutError> {
        self.transition(order_id, Transition::CapturePayment, "capture the payment")
            .await
    }

    pub async fn refund_payment(&self, order_id: &str) -> Result<Order, CheckoutError> {
        self.transition(order_id, Transition::RefundPayment, "process the refund")
            .await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Order, CheckoutError> {
        self.transition(order_id, Transition::Cancel, "cancel the order")
            .await
    }

    pub async fn list_orders(&self) -> Vec<Order> {
        let orders = self.query.list_all().await;
        if orders.is_empty() {
            info!("No orders available");
        } else {
            info!(count = orders.len(), "Fetching all orders");
        }
        orders
    }

    async fn transition(
        &self,
        order_id: &str,
        transition: Transition,
        action: &str,
    ) -> Result<Order, CheckoutError> {
        require_order_id(order_id, action)?;

        match self.orders.transition(order_id, transition).await {
            Ok(order) => {
                info!(
                    event.action = transition.action(),
                    order.id = %order_id,
                    status = %order.status,
                    "Order transition applied"
                );
                if self.preempt_grace_on_terminal && transition.is_terminal_action() {
                    let cancelled = self.timers.cancel(order_id);
                    if cancelled > 0 {
                        info!(order.id = %order_id, cancelled, "Pending grace period preempted");
                    }
                }
                Ok(order)
            }
            Err(err) => {
                warn!(
                    event.action = transition.action(),
                    order.id = %order_id,
                    code = %err.code(),
                    "{err}"
                );
                Err(err)
            }
        }
    }
}

fn require_order_id(order_id: &str, action: &str) -> Result<(), CheckoutError> {
    if order_id.is_empty() {
        warn!("Order ID is missing, cannot {action}");
        return Err(CheckoutError::missing_order_id(action));
    }
    Ok(())
}
