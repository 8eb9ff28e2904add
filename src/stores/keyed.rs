use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

type Slot<V> = Arc<RwLock<V>>;

// The outer map lock is held only to find or insert a slot.
pub struct KeyedStore<V> {
    slots: RwLock<HashMap<String, Slot<V>>>,
}

impl<V: Clone> KeyedStore<V> {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    async fn slot(&self, key: &str) -> Option<Slot<V>> {
        self.slots.read().await.get(key).cloned()
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let slot = self.slot(key).await?;
        let value = slot.read().await.clone();
        Some(value)
    }

    pub async fn put(&self, key: &str, value: V) {
        let slot = {
            let mut slots = self.slots.write().await;
            match slots.get(key) {
                Some(slot) => Arc::clone(slot),
                None => {
                    slots.insert(key.to_owned(), Arc::new(RwLock::new(value)));
                    return;
                }
            }
        };
        *slot.write().await = value;
    }

    /// Returns `None` if `key` is absent. An `Err` from `apply` leaves the value as it was.
    pub async fn update<E>(
        &self,
        key: &str,
        apply: impl FnOnce(&V) -> Result<V, E>,
    ) -> Option<Result<V, E>> {
        let slot = self.slot(key).await?;
        let mut current = slot.write().await;
        let result = apply(&*current).map(|next| {
            *current = next.clone();
            next
        });
        Some(result)
    }

    pub async fn values(&self) -> Vec<V> {
        let slots: Vec<Slot<V>> = self.slots.read().await.values().cloned().collect();
        let mut values = Vec::with_capacity(slots.len());
        for slot in slots {
            values.push(slot.read().await.clone());
        }
        values
    }
}

impl<V: Clone> Default for KeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
