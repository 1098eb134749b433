use angebot::core::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    let config = PricingConfig::from_env().unwrap_or_default();
    let mut numbers = OfferNumberSequence::new("AN-", 2024);

    // Edit a draft the way an offer form would
    let mut draft = OfferDraft::new();
    draft.add_item(LineItem::new("P-100", 2, dec!(100)).with_purchase_price(dec!(70)));
    draft.add_item(LineItem::new("P-200", 1, dec!(50)).with_purchase_price(dec!(30)));
    draft.set_discount(DiscountConfig::percentage(dec!(10)).per_line());

    let issued = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let offer = OfferBuilder::new(numbers.issue_for(issued), issued)
        .valid_until(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .config(&config)
        .customer(Customer::new("C-17", "Kunde AG"))
        .draft(draft)
        .build()
        .expect("offer should be valid");

    let dp = config.decimal_places();
    let totals = offer.totals.unwrap().rounded(dp);
    let line_discounts = allocate_discount(&offer.items, offer.discount.as_ref(), dp);

    println!("Offer {} for {}", offer.number, offer.customer.as_ref().unwrap().name);
    for (item, discount) in offer.items.iter().zip(&line_discounts) {
        println!(
            "  {:<8} {:>3} x {:>8}  = {:>10}  discount {:>8}",
            item.product_id,
            item.quantity,
            item.unit_price,
            item.line_total(),
            discount
        );
    }
    println!("Gross:    {} {}", totals.gross_total, offer.currency_code);
    println!("Discount: {} {}", totals.discount_total, offer.currency_code);
    println!("Net:      {} {}", totals.net_total, offer.currency_code);
    println!("VAT:      {} {}", totals.vat_amount, offer.currency_code);
    println!("Total:    {} {}", totals.grand_total, offer.currency_code);
    println!("Margin:   {} {}", totals.margin(), offer.currency_code);
}
