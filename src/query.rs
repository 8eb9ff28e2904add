use std::sync::Arc;

use crate::{models::order::Order, stores::order::OrderStore};

#[derive(Clone)]
pub struct OrderQuery {
    orders: Arc<OrderStore>,
}

impl OrderQuery {
    pub fn new(orders: Arc<OrderStore>) -> Self {
        Self { orders }
    }

    pub async fn list_all(&self) -> Vec<Order> {
        self.orders.list_all().await
    }
}
