use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::CheckoutError,
    models::{cart::Cart, item::Item},
};

use super::keyed::KeyedStore;

/// Current cart per customer. Upserts replace the whole cart.
#[derive(Default)]
pub struct CartStore {
    carts: KeyedStore<Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert(&self, customer_id: &str, items: Vec<Item>) -> Result<Cart, CheckoutError> {
        if customer_id.is_empty() || items.is_empty() {
            warn!("Customer ID or items missing in create_cart request");
            return Err(CheckoutError::invalid_request(
                "Customer ID and items are required",
            ));
        }

        if let Some((index, field)) = items
            .iter()
            .enumerate()
            .find_map(|(index, item)| item.invalid_field().map(|field| (index, field)))
        {
            warn!(customer.id = %customer_id, "Invalid {field} on cart item {index}");
            return Err(CheckoutError::invalid_request(format!(
                "Item {index} has an invalid {field}"
            )));
        }

        let cart = Cart {
            cart_id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_owned(),
            items,
        };
        self.carts.put(customer_id, cart.clone()).await;

        info!(
            event.action = "create_cart",
            customer.id = %customer_id,
            cart.id = %cart.cart_id,
            "Cart created successfully"
        );

        Ok(cart)
    }

    pub async fn get(&self, customer_id: &str) -> Result<Cart, CheckoutError> {
        self.carts
            .get(customer_id)
            .await
            .ok_or_else(|| CheckoutError::CartNotFound {
                customer_id: customer_id.to_owned(),
            })
    }
}
