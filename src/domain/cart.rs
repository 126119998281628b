//! Cart line items and proportional discount distribution
//!
//! The discount engine hands the checkout a validated percentage; the
//! checkout spreads the resulting discount amount across line items in
//! proportion to each item's share of the subtotal, so per-item prices
//! shown downstream add up to the discounted total.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Percent;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

pub fn subtotal(items: &[LineItem]) -> Decimal {
    items.iter().map(LineItem::line_total).sum()
}

/// Distributes a percentage discount across line items.
///
/// Each item absorbs a share of the discount amount proportional to its
/// share of the subtotal; its unit price becomes
/// `(line_total - item_share) / quantity`, rounded to 2 decimal places.
/// Items with zero quantity and empty carts are returned unchanged.
pub fn apply_discount(items: &[LineItem], percent: Percent) -> Vec<LineItem> {
    let total = subtotal(items);
    if total <= Decimal::ZERO || items.is_empty() {
        return items.to_vec();
    }
    let ratio = percent.ratio();

    items
        .iter()
        .map(|item| {
            if item.quantity == 0 {
                return item.clone();
            }
            let line_total = item.line_total();
            let item_discount = line_total * ratio;
            let adjusted = (line_total - item_discount) / Decimal::from(item.quantity);
            LineItem {
                unit_price: adjusted.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                ..item.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(id: &str, unit_price: Decimal, quantity: u32) -> LineItem {
        LineItem {
            product_id: id.into(),
            title: id.into(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_proportional_distribution() {
        // subtotal 1000: A 600x1, B 200x2; 10% off -> discount amount 100
        let items = vec![item("A", dec!(600), 1), item("B", dec!(200), 2)];
        let discounted = apply_discount(&items, Percent::new(dec!(10)).unwrap());
        assert_eq!(discounted[0].unit_price, dec!(540.00));
        assert_eq!(discounted[1].unit_price, dec!(180.00));
    }

    #[test]
    fn test_discounted_subtotal_matches_amount() {
        let items = vec![item("A", dec!(600), 1), item("B", dec!(200), 2)];
        let discounted = apply_discount(&items, Percent::new(dec!(10)).unwrap());
        assert_eq!(subtotal(&discounted), dec!(900.00));
    }

    #[test]
    fn test_rounding_to_two_places() {
        let items = vec![item("A", dec!(9.99), 3)];
        let discounted = apply_discount(&items, Percent::new(dec!(7)).unwrap());
        // 29.97 * 0.93 / 3 = 9.2907 -> 9.29
        assert_eq!(discounted[0].unit_price, dec!(9.29));
    }

    #[test]
    fn test_empty_cart_unchanged() {
        let discounted = apply_discount(&[], Percent::new(dec!(10)).unwrap());
        assert!(discounted.is_empty());
    }

    #[test]
    fn test_quantities_preserved() {
        let items = vec![item("B", dec!(200), 2)];
        let discounted = apply_discount(&items, Percent::new(dec!(50)).unwrap());
        assert_eq!(discounted[0].quantity, 2);
        assert_eq!(discounted[0].unit_price, dec!(100.00));
    }
}
