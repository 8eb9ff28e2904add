use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::info;

use crate::{
    error::CheckoutError,
    machine::Transition,
    models::order::{Order, OrderStatus},
    stores::order::OrderStore,
};

type Pending = HashMap<String, HashMap<u64, oneshot::Sender<()>>>;

/// Pending grace-period timers, keyed by order id.
pub struct GraceTimers {
    delay: Duration,
    next_token: AtomicU64,
    pending: Mutex<Pending>,
}

impl GraceTimers {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_token: AtomicU64::new(0),
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn lock_pending(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn schedule(
        self: &Arc<Self>,
        order_id: &str,
        orders: Arc<OrderStore>,
    ) -> JoinHandle<Result<Order, CheckoutError>> {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.lock_pending()
            .entry(order_id.to_owned())
            .or_default()
            .insert(token, cancel_tx);

        let timers = Arc::clone(self);
        let order_id = order_id.to_owned();
        let delay = self.delay;

        tokio::spawn(async move {
            let elapsed = tokio::select! {
                _ = tokio::time::sleep(delay) => true,
                _ = cancel_rx => false,
            };
            timers.release(&order_id, token);

            if elapsed {
                let result = orders
                    .transition(&order_id, Transition::CompleteGracePeriod)
                    .await;
                // Another waiter on the same order may have completed it first.
                if matches!(result, Err(CheckoutError::Conflict(_))) {
                    if let Ok(current) = orders.get(&order_id).await {
                        if current.status == OrderStatus::GracePeriodCompleted {
                            return Ok(current);
                        }
                    }
                }
                result
            } else {
                info!(order.id = %order_id, "Grace period cancelled for order");
                orders.get(&order_id).await
            }
        })
    }

    pub fn cancel(&self, order_id: &str) -> usize {
        let Some(timers) = self.lock_pending().remove(order_id) else {
            return 0;
        };
        let count = timers.len();
        for (_, cancel_tx) in timers {
            let _ = cancel_tx.send(());
        }
        count
    }

    pub fn pending(&self, order_id: &str) -> usize {
        self.lock_pending().get(order_id).map_or(0, HashMap::len)
    }

    fn release(&self, order_id: &str, token: u64) {
        let mut pending = self.lock_pending();
        if let Some(timers) = pending.get_mut(order_id) {
            timers.remove(&token);
            if timers.is_empty() {
                pending.remove(order_id);
            }
        }
    }
}
