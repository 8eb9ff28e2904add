use serde::{Deserialize, Serialize};

use crate::utils::price::calculate_cart_total;

use super::item::Item;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Cart {
    pub cart_id: String,
    pub customer_id: String,
    pub items: Vec<Item>,
}

impl Cart {
    pub fn total(&self) -> f64 {
        calculate_cart_total(&self.items)
    }
}
