use std::sync::Arc;

use crate::{
    error::CheckoutError,
    machine::{OrderStateMachine, Transition, routing::RoutingPolicy},
    models::order::Order,
};

use super::keyed::KeyedStore;

/// Orders keyed by order id. After insertion an order only changes through
/// [`OrderStateMachine`].
#[derive(Default)]
pub struct OrderStore {
    orders: KeyedStore<Order>,
    machine: OrderStateMachine,
}

impl OrderStore {
    pub fn new(routing: Arc<dyn RoutingPolicy>) -> Self {
        Self {
            orders: KeyedStore::new(),
            machine: OrderStateMachine::new(routing),
        }
    }

    pub async fn insert(&self, order: Order) {
        let order_id = order.order_id.clone();
        self.orders.put(&order_id, order).await;
    }

    pub async fn get(&self, order_id: &str) -> Result<Order, CheckoutError> {
        self.orders
            .get(order_id)
            .await
            .ok_or_else(|| CheckoutError::OrderNotFound {
                order_id: order_id.to_owned(),
            })
    }

    pub async fn transition(
        &self,
        order_id: &str,
        transition: Transition,
    ) -> Result<Order, CheckoutError> {
        let result = self
            .orders
            .update(order_id, |order| self.machine.apply(order, transition))
            .await
            .ok_or_else(|| CheckoutError::OrderNotFound {
                order_id: order_id.to_owned(),
            })?;

        Ok(result?)
    }

    pub async fn list_all(&self) -> Vec<Order> {
        self.orders.values().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorCode,
        machine::TransitionError,
        models::{billing::BillingAddress, order::OrderStatus},
    };

    fn order(order_id: &str) -> Order {
        Order::paid(
            order_id.to_string(),
            10.0,
            Vec::new(),
            BillingAddress::default(),
            "System".to_string(),
        )
    }

    #[tokio::test]
    async fn transition_on_missing_order_is_not_found() {
        let store = OrderStore::default();
        let err = store.transition("o404", Transition::Route).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn rejected_transition_does_not_write() {
        let store = OrderStore::default();
        store.insert(order("o1")).await;

        let err = store
            .transition("o1", Transition::Fulfill)
            .await
            .unwrap_err();
        assert_eq!(err, CheckoutError::Conflict(TransitionError::OrderNotRouted));
        assert_eq!(store.get("o1").await.unwrap(), order("o1"));
    }

    #[tokio::test]
    async fn transition_commits_new_status() {
        let store = OrderStore::default();
        store.insert(order("o1")).await;

        let routed = store.transition("o1", Transition::Route).await.unwrap();
        assert_eq!(routed.status, OrderStatus::Routed);
        assert_eq!(store.get("o1").await.unwrap(), routed);
    }

    #[tokio::test]
    async fn insert_overwrites_reused_id() {
        let store = OrderStore::default();
        store.insert(order("o1")).await;
        store.transition("o1", Transition::Cancel).await.unwrap();

        store.insert(order("o1")).await;
        let current = store.get("o1").await.unwrap();
        assert_eq!(current.status, OrderStatus::PaymentProcessed);
        assert!(!current.cancelled);
        assert_eq!(store.list_all().await.len(), 1);
    }
}
