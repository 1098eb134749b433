use rust_decimal::Decimal;

use super::error::ValidationError;
use super::pricing;
use super::types::*;

/// Validate an offer before it is submitted.
/// Returns all validation errors found (not just the first).
///
/// The pricing engine accepts anything; these are the checks that decide
/// whether an offer may leave the editor.
pub fn validate_offer(offer: &Offer) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // OF-01: An offer shall have a number
    if offer.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "offer number must not be empty",
            "OF-01",
        ));
    }

    // OF-02: A customer must be selected
    match &offer.customer {
        None => errors.push(ValidationError::with_rule(
            "customer",
            "a customer must be selected",
            "OF-02",
        )),
        Some(customer) if customer.id.trim().is_empty() => {
            errors.push(ValidationError::with_rule(
                "customer.id",
                "customer identifier must not be empty",
                "OF-02",
            ))
        }
        Some(_) => {}
    }

    // OF-03: At least one line item
    if offer.items.is_empty() {
        errors.push(ValidationError::with_rule(
            "items",
            "at least one item must be added",
            "OF-03",
        ));
    }

    for (i, item) in offer.items.iter().enumerate() {
        validate_item(item, i, &mut errors);
    }

    // OF-05: Currency
    if !super::currencies::is_known_currency_code(&offer.currency_code) {
        errors.push(ValidationError::with_rule(
            "currency_code",
            format!(
                "currency code '{}' is not a known ISO 4217 code",
                offer.currency_code
            ),
            "OF-05",
        ));
    }

    // OF-06: Validity period
    if let Some(valid_until) = offer.valid_until {
        if valid_until < offer.issue_date {
            errors.push(ValidationError::with_rule(
                "valid_until",
                format!(
                    "offer validity {valid_until} must not precede issue date {}",
                    offer.issue_date
                ),
                "OF-06",
            ));
        }
    }

    if offer.vat_rate.is_sign_negative() {
        errors.push(ValidationError::new(
            "vat_rate",
            "VAT rate must not be negative",
        ));
    }

    if let Some(discount) = &offer.discount {
        validate_discount(discount, &mut errors);
    }

    errors.extend(validate_arithmetic(offer));

    errors
}

/// Validate that the stored totals match what the pricing engine computes
/// for the offer's current items and discount.
pub fn validate_arithmetic(offer: &Offer) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Some(totals) = &offer.totals else {
        errors.push(ValidationError::with_rule(
            "totals",
            "totals must be calculated before validation (call recalculate first)",
            "OF-09",
        ));
        return errors;
    };

    let expected = pricing::calculate_totals(&offer.items, offer.discount.as_ref(), offer.vat_rate);
    let checks: [(&str, Decimal, Decimal); 6] = [
        ("totals.gross_total", totals.gross_total, expected.gross_total),
        ("totals.purchase_total", totals.purchase_total, expected.purchase_total),
        ("totals.discount_total", totals.discount_total, expected.discount_total),
        ("totals.net_total", totals.net_total, expected.net_total),
        ("totals.vat_amount", totals.vat_amount, expected.vat_amount),
        ("totals.grand_total", totals.grand_total, expected.grand_total),
    ];
    for (field, actual, expected) in checks {
        if actual != expected {
            errors.push(ValidationError::with_rule(
                field,
                format!("stored amount {actual} does not match calculated {expected}"),
                "OF-09",
            ));
        }
    }

    errors
}

fn validate_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items[{index}]");

    if item.product_id.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.product_id"),
            "a product must be selected",
            "OF-04",
        ));
    }

    if item.quantity == 0 {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            "quantity must be at least 1",
            "OF-04",
        ));
    }

    if item.unit_price.is_sign_negative() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
            "OF-04",
        ));
    }

    if item.purchase_unit_price.is_sign_negative() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.purchase_unit_price"),
            "purchase price must not be negative",
            "OF-04",
        ));
    }
}

fn validate_discount(discount: &DiscountConfig, errors: &mut Vec<ValidationError>) {
    // OF-07
    if discount.value < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            "discount.value",
            "discount must not be negative",
            "OF-07",
        ));
    }

    // OF-08: percentages above 100 price fine but turn the net total negative
    if discount.kind == DiscountKind::Percentage && discount.value > Decimal::ONE_HUNDRED {
        errors.push(ValidationError::with_rule(
            "discount.value",
            format!("percentage discount {}% exceeds 100%", discount.value),
            "OF-08",
        ));
    }
}
