use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Item {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

impl Item {
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    /// Name of the first field that breaks the item constraints, if any.
    pub fn invalid_field(&self) -> Option<&'static str> {
        if self.item_id.is_empty() {
            Some("item_id")
        } else if self.quantity == 0 {
            Some("quantity")
        } else if !self.price.is_finite() || self.price < 0.0 {
            Some("price")
        } else {
            None
        }
    }
}
