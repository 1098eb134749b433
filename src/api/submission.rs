use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{
    AngebotError, DiscountAllocation, DiscountConfig, DiscountKind, Offer, OfferTotals,
    PricingConfig, allocate_discount, calculate_totals, minor_units, round_half_up,
};

/// Payload for the offer storage service.
///
/// Amounts are rounded half-up and carry a fixed number of decimal places:
/// the currency's minor units by default, or the precision of a
/// [`PricingConfig`] via [`OfferSubmission::from_offer_with_config`]. Totals
/// are recomputed from the offer's items, never copied from `Offer::totals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSubmission {
    pub number: String,
    pub issue_date: NaiveDate,
    pub valid_until: Option<NaiveDate>,
    pub customer_id: String,
    pub currency: String,
    pub notes: Vec<String>,
    pub discount: Option<DiscountPayload>,
    pub items: Vec<SubmissionItem>,
    pub totals: SubmissionTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPayload {
    /// "percentage" or "amount".
    pub kind: &'static str,
    pub value: Decimal,
    /// "total" for a whole-offer discount, "distribute" for per-line.
    pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub purchase_unit_price: Decimal,
    pub line_total: Decimal,
    /// This line's share of a distributed discount; 0 for whole-offer discounts.
    pub line_discount: Decimal,
    pub net_line_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionTotals {
    pub gross_total: Decimal,
    pub purchase_total: Decimal,
    pub discount_total: Decimal,
    pub net_total: Decimal,
    pub vat_rate: Decimal,
    pub vat_amount: Decimal,
    pub grand_total: Decimal,
}

impl OfferSubmission {
    /// Build the payload for `offer`, rounding to the currency's minor units.
    /// Fails only when no customer is selected.
    pub fn from_offer(offer: &Offer) -> Result<Self, AngebotError> {
        Self::with_precision(offer, minor_units(&offer.currency_code).unwrap_or(2))
    }

    /// Build the payload rounding to `config.decimal_places()`, so the
    /// submitted amounts match `OfferTotals::rounded` for the same config.
    pub fn from_offer_with_config(
        offer: &Offer,
        config: &PricingConfig,
    ) -> Result<Self, AngebotError> {
        config.validate()?;
        Self::with_precision(offer, config.decimal_places())
    }

    fn with_precision(offer: &Offer, dp: u32) -> Result<Self, AngebotError> {
        let customer = offer
            .customer
            .as_ref()
            .ok_or_else(|| AngebotError::Validation("a customer must be selected".into()))?;

        let discount = offer.discount.as_ref();
        let totals = calculate_totals(&offer.items, discount, offer.vat_rate);
        let line_discounts = allocate_discount(&offer.items, discount, dp);

        let items = offer
            .items
            .iter()
            .zip(line_discounts)
            .map(|(item, line_discount)| {
                let line_total = money(item.line_total(), dp);
                SubmissionItem {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    purchase_unit_price: item.purchase_unit_price,
                    line_total,
                    line_discount: money(line_discount, dp),
                    net_line_total: money(line_total - line_discount, dp),
                }
            })
            .collect();

        Ok(Self {
            number: offer.number.clone(),
            issue_date: offer.issue_date,
            valid_until: offer.valid_until,
            customer_id: customer.id.clone(),
            currency: offer.currency_code.clone(),
            notes: offer.notes.clone(),
            discount: offer.discount.as_ref().map(DiscountPayload::from),
            items,
            totals: SubmissionTotals::new(&totals, offer.vat_rate, dp),
        })
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, AngebotError> {
        serde_json::to_string_pretty(self).map_err(|e| AngebotError::Json(e.to_string()))
    }
}

impl From<&DiscountConfig> for DiscountPayload {
    fn from(config: &DiscountConfig) -> Self {
        Self {
            kind: match config.kind {
                DiscountKind::Percentage => "percentage",
                DiscountKind::Amount => "amount",
            },
            value: config.value,
            method: match config.allocation {
                DiscountAllocation::WholeOffer => "total",
                DiscountAllocation::PerLine => "distribute",
            },
        }
    }
}

impl SubmissionTotals {
    fn new(totals: &OfferTotals, vat_rate: Decimal, dp: u32) -> Self {
        Self {
            gross_total: money(totals.gross_total, dp),
            purchase_total: money(totals.purchase_total, dp),
            discount_total: money(totals.discount_total, dp),
            net_total: money(totals.net_total, dp),
            vat_rate,
            vat_amount: money(totals.vat_amount, dp),
            grand_total: money(totals.grand_total, dp),
        }
    }
}

/// Round half-up and pin the scale to exactly `dp` places ("250" → "250.00").
fn money(value: Decimal, dp: u32) -> Decimal {
    let mut rounded = round_half_up(value, dp);
    rounded.rescale(dp);
    rounded
}
