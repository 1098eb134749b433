use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An offer (quote) as it is submitted to the offer storage service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    /// Offer number (unique, gapless within sequence).
    pub number: String,
    /// Date the offer was issued.
    pub issue_date: NaiveDate,
    /// Last day the offer is binding.
    pub valid_until: Option<NaiveDate>,
    /// Currency code (ISO 4217, e.g. "EUR").
    pub currency_code: String,
    /// Selected customer. Required for submission.
    pub customer: Option<Customer>,
    /// Free text notes printed on the offer.
    pub notes: Vec<String>,
    /// Offer lines.
    pub items: Vec<LineItem>,
    /// Optional discount applied to the offer.
    pub discount: Option<DiscountConfig>,
    /// VAT rate as a fraction (0.20 = 20%).
    pub vat_rate: Decimal,
    /// Calculated totals (set by the builder or `Offer::recalculate`).
    pub totals: Option<OfferTotals>,
}

impl Offer {
    /// Recompute `totals` from the current items, discount and VAT rate.
    pub fn recalculate(&mut self) {
        self.totals = Some(super::pricing::calculate_totals(
            &self.items,
            self.discount.as_ref(),
            self.vat_rate,
        ));
    }
}

/// Customer reference as selected from the customer catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single offer line.
///
/// Line totals are never stored; they are always derived from quantity and
/// price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product catalog reference.
    pub product_id: String,
    /// Ordered quantity.
    pub quantity: u32,
    /// Sale price per unit.
    pub unit_price: Decimal,
    /// Purchase price per unit (defaults to 0).
    #[serde(default)]
    pub purchase_unit_price: Decimal,
}

impl LineItem {
    /// Create a line with a purchase price of zero.
    pub fn new(product_id: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
            purchase_unit_price: Decimal::ZERO,
        }
    }

    /// Set the purchase price per unit.
    pub fn with_purchase_price(mut self, purchase_unit_price: Decimal) -> Self {
        self.purchase_unit_price = purchase_unit_price;
        self
    }

    /// `quantity × unit_price`, or zero when the product overflows or is negative.
    pub fn line_total(&self) -> Decimal {
        clamped_product(self.quantity, self.unit_price)
    }

    /// `quantity × purchase_unit_price`, clamped the same way as [`Self::line_total`].
    pub fn line_purchase_total(&self) -> Decimal {
        clamped_product(self.quantity, self.purchase_unit_price)
    }
}

fn clamped_product(quantity: u32, price: Decimal) -> Decimal {
    match Decimal::from(quantity).checked_mul(price) {
        Some(total) if total >= Decimal::ZERO => total,
        _ => Decimal::ZERO,
    }
}

/// How the discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountKind {
    /// Value is a percentage of the gross total. Not capped at 100.
    Percentage,
    /// Value is a flat amount, capped at the gross total.
    Amount,
}

/// Where the discount is shown and subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountAllocation {
    /// Subtracted once from the gross total.
    WholeOffer,
    /// Distributed proportionally across the lines for reporting.
    PerLine,
}

/// Discount entered for an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountConfig {
    pub kind: DiscountKind,
    pub value: Decimal,
    pub allocation: DiscountAllocation,
}

impl DiscountConfig {
    /// Whole-offer percentage discount.
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
            allocation: DiscountAllocation::WholeOffer,
        }
    }

    /// Whole-offer flat discount.
    pub fn amount(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Amount,
            value,
            allocation: DiscountAllocation::WholeOffer,
        }
    }

    /// Switch to per-line (distributed) allocation.
    pub fn per_line(mut self) -> Self {
        self.allocation = DiscountAllocation::PerLine;
        self
    }

    /// Switch to whole-offer allocation.
    pub fn whole_offer(mut self) -> Self {
        self.allocation = DiscountAllocation::WholeOffer;
        self
    }
}

/// Offer totals. Always derived, never edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OfferTotals {
    /// Sum of line totals before discount and tax.
    pub gross_total: Decimal,
    /// Sum of line purchase totals.
    pub purchase_total: Decimal,
    /// Discount amount derived from the discount config.
    pub discount_total: Decimal,
    /// Gross total minus whole-offer discount.
    pub net_total: Decimal,
    /// VAT on the net total.
    pub vat_amount: Decimal,
    /// Net total plus VAT.
    pub grand_total: Decimal,
}

impl OfferTotals {
    /// Sale minus purchase, before discount.
    pub fn margin(&self) -> Decimal {
        self.gross_total - self.purchase_total
    }

    /// Round every amount half-up to `dp` decimal places, for display.
    pub fn rounded(&self, dp: u32) -> Self {
        let r = |v: Decimal| super::pricing::round_half_up(v, dp);
        Self {
            gross_total: r(self.gross_total),
            purchase_total: r(self.purchase_total),
            discount_total: r(self.discount_total),
            net_total: r(self.net_total),
            vat_amount: r(self.vat_amount),
            grand_total: r(self.grand_total),
        }
    }
}
