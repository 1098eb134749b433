use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::config::PricingConfig;
use super::draft::OfferDraft;
use super::error::AngebotError;
use super::types::*;
use super::validation;

/// Builder for constructing priced offers.
///
/// ```
/// use angebot::core::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let offer = OfferBuilder::new("AN-2024-001", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .customer(Customer::new("C-17", "Kunde AG"))
///     .add_item(LineItem::new("P-100", 2, dec!(100)))
///     .add_item(LineItem::new("P-200", 1, dec!(50)))
///     .discount(DiscountConfig::percentage(dec!(10)))
///     .build()
///     .unwrap();
///
/// assert_eq!(offer.totals.unwrap().grand_total, dec!(270));
/// ```
pub struct OfferBuilder {
    number: String,
    issue_date: NaiveDate,
    valid_until: Option<NaiveDate>,
    currency_code: String,
    customer: Option<Customer>,
    notes: Vec<String>,
    items: Vec<LineItem>,
    discount: Option<DiscountConfig>,
    vat_rate: Decimal,
}

impl OfferBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            issue_date,
            valid_until: None,
            currency_code: "EUR".to_string(),
            customer: None,
            notes: Vec::new(),
            items: Vec::new(),
            discount: None,
            vat_rate: dec!(0.20),
        }
    }

    /// Take currency and VAT rate from a [`PricingConfig`].
    pub fn config(mut self, config: &PricingConfig) -> Self {
        self.currency_code = config.currency_code.clone();
        self.vat_rate = config.vat_rate;
        self
    }

    /// Take items and discount from an edited draft.
    pub fn draft(mut self, draft: OfferDraft) -> Self {
        self.items = draft.items;
        self.discount = draft.discount;
        self
    }

    pub fn valid_until(mut self, date: NaiveDate) -> Self {
        self.valid_until = Some(date);
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn discount(mut self, discount: DiscountConfig) -> Self {
        self.discount = Some(discount);
        self
    }

    /// VAT rate as a fraction (0.20 = 20%).
    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    /// Build the offer, calculating totals and running submission validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Offer, AngebotError> {
        // Input limits to prevent abuse
        if self.items.len() > 10_000 {
            return Err(AngebotError::Builder(
                "offer cannot have more than 10,000 items".into(),
            ));
        }
        if self.number.len() > 200 {
            return Err(AngebotError::Builder(
                "offer number cannot exceed 200 characters".into(),
            ));
        }

        let offer = self.assemble();

        let errors = validation::validate_offer(&offer);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AngebotError::Validation(msg));
        }

        Ok(offer)
    }

    /// Build without validation — for drafts still being edited or for
    /// importing stored offers.
    pub fn build_unchecked(self) -> Offer {
        self.assemble()
    }

    fn assemble(self) -> Offer {
        let mut offer = Offer {
            number: self.number,
            issue_date: self.issue_date,
            valid_until: self.valid_until,
            currency_code: self.currency_code,
            customer: self.customer,
            notes: self.notes,
            items: self.items,
            discount: self.discount,
            vat_rate: self.vat_rate,
            totals: None,
        };
        offer.recalculate();
        offer
    }
}
