use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pricing;
use super::types::{DiscountConfig, LineItem, OfferTotals};

/// The line items and discount an offer is being edited with.
///
/// The draft is plain data held by the caller. Totals are never cached;
/// [`OfferDraft::totals`] recomputes them from scratch after every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferDraft {
    pub items: Vec<LineItem>,
    pub discount: Option<DiscountConfig>,
}

impl OfferDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line. Adding a product already on the draft increases its
    /// quantity and keeps the existing prices.
    pub fn add_item(&mut self, item: LineItem) {
        if let Some(existing) = self.find_mut(&item.product_id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return;
        }
        self.items.push(item);
    }

    /// Remove a product. Returns the removed line, if any.
    pub fn remove_item(&mut self, product_id: &str) -> Option<LineItem> {
        let index = self.items.iter().position(|i| i.product_id == product_id)?;
        Some(self.items.remove(index))
    }

    /// Change the quantity of a product. A quantity of zero or less removes
    /// the line. Returns false when the product is not on the draft.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            debug!(product_id, quantity, "non-positive quantity removes line");
            return self.remove_item(product_id).is_some();
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.find_mut(product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Change the sale price of a product. Returns false when not found.
    pub fn set_unit_price(&mut self, product_id: &str, unit_price: Decimal) -> bool {
        match self.find_mut(product_id) {
            Some(item) => {
                item.unit_price = unit_price;
                true
            }
            None => false,
        }
    }

    pub fn set_discount(&mut self, discount: DiscountConfig) {
        self.discount = Some(discount);
    }

    pub fn clear_discount(&mut self) {
        self.discount = None;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Price the draft.
    pub fn totals(&self, vat_rate: Decimal) -> OfferTotals {
        pricing::calculate_totals(&self.items, self.discount.as_ref(), vat_rate)
    }

    /// Per-line discount amounts rounded to `dp` places, in item order.
    pub fn line_discounts(&self, dp: u32) -> Vec<Decimal> {
        pricing::allocate_discount(&self.items, self.discount.as_ref(), dp)
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn add_merges_same_product() {
        let mut draft = OfferDraft::new();
        draft.add_item(LineItem::new("P-1", 2, dec!(10)));
        draft.add_item(LineItem::new("P-1", 3, dec!(99)));
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].quantity, 5);
        assert_eq!(draft.items[0].unit_price, dec!(10));
    }

    #[test]
    fn zero_quantity_removes() {
        let mut draft = OfferDraft::new();
        draft.add_item(LineItem::new("P-1", 2, dec!(10)));
        assert!(draft.set_quantity("P-1", 0));
        assert!(draft.is_empty());
        assert!(!draft.set_quantity("P-1", -1));
    }

    #[test]
    fn quantity_saturates() {
        let mut draft = OfferDraft::new();
        draft.add_item(LineItem::new("P-1", 1, dec!(1)));
        assert!(draft.set_quantity("P-1", i64::MAX));
        assert_eq!(draft.items[0].quantity, u32::MAX);
    }

    #[test]
    fn unknown_product_edits_are_ignored() {
        let mut draft = OfferDraft::new();
        assert!(!draft.set_quantity("nope", 3));
        assert!(!draft.set_unit_price("nope", dec!(3)));
        assert!(draft.remove_item("nope").is_none());
    }
}
