use crate::models::item::Item;

// Compared exactly against payment claims, so totals carry binary rounding error.
pub fn calculate_cart_total(items: &[Item]) -> f64 {
    items.iter().fold(0.0, |total, item| total + item.line_total())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_id: &str, quantity: u32, price: f64) -> Item {
        Item {
            item_id: item_id.to_string(),
            name: item_id.to_uppercase(),
            quantity,
            price,
        }
    }

    #[test]
    fn total_sums_line_totals() {
        let items = vec![item("item001", 1, 1000.0), item("item002", 2, 50.0)];
        assert_eq!(calculate_cart_total(&items), 1100.0);
    }

    #[test]
    fn total_of_no_items_is_zero() {
        assert_eq!(calculate_cart_total(&[]), 0.0);
    }

    #[test]
    fn total_keeps_float_representation_error() {
        let items = vec![item("a", 1, 0.1), item("b", 1, 0.2)];
        assert_ne!(calculate_cart_total(&items), 0.3);
    }
}
