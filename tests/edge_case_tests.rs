//! Edge cases for the pricing engine: malformed lines, extreme values,
//! discounts at and beyond their limits.

use angebot::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn negative_price_line_counts_as_zero() {
    let items = vec![
        LineItem::new("OK", 1, dec!(80)),
        LineItem::new("BAD", 2, dec!(-15)).with_purchase_price(dec!(-3)),
    ];
    assert_eq!(gross_total(&items), dec!(80));
    assert_eq!(purchase_total(&items), dec!(0));
}

#[test]
fn overflowing_line_counts_as_zero() {
    let items = vec![
        LineItem::new("OK", 1, dec!(80)),
        LineItem::new("HUGE", 1_000_000, Decimal::MAX),
    ];
    assert_eq!(gross_total(&items), dec!(80));
}

#[test]
fn gross_total_saturates_instead_of_panicking() {
    let items = vec![
        LineItem::new("A", 1, Decimal::MAX),
        LineItem::new("B", 1, Decimal::MAX),
    ];
    assert_eq!(gross_total(&items), Decimal::MAX);

    let discount = DiscountConfig::percentage(dec!(50));
    let totals = calculate_totals(&items, Some(&discount), dec!(0.20));
    assert!(totals.grand_total > Decimal::ZERO);
}

#[test]
fn saturated_gross_splits_discount_by_line_weight() {
    let items = vec![
        LineItem::new("A", 1, Decimal::MAX),
        LineItem::new("B", 1, Decimal::MAX),
        LineItem::new("C", 1, dec!(1000)),
    ];
    let discount = DiscountConfig::amount(dec!(100)).per_line();

    let allocated = allocate_discount(&items, Some(&discount), 2);
    assert_eq!(allocated.iter().copied().sum::<Decimal>(), dec!(100));
    assert_eq!(allocated, vec![dec!(50), dec!(50), dec!(0)]);

    let shares: Decimal = items
        .iter()
        .map(|item| per_line_discount(item, &items, Some(&discount)))
        .sum();
    assert!((shares - dec!(100)).abs() < dec!(0.000001), "shares {shares}");
}

#[test]
fn precision_beyond_decimal_scale() {
    let items = vec![
        LineItem::new("A", 1, dec!(10)),
        LineItem::new("B", 1, dec!(20)),
    ];
    let discount = DiscountConfig::amount(dec!(5)).per_line();
    for dp in [28, 29, 64] {
        let allocated = allocate_discount(&items, Some(&discount), dp);
        assert_eq!(allocated.iter().copied().sum::<Decimal>(), dec!(5), "dp {dp}");
    }

    let mut draft = OfferDraft::new();
    draft.add_item(LineItem::new("A", 3, dec!(9.99)));
    draft.set_discount(discount);
    assert_eq!(draft.line_discounts(30), vec![dec!(5)]);
}

#[test]
fn zero_quantity_line() {
    let items = vec![
        LineItem::new("A", 0, dec!(99)),
        LineItem::new("B", 1, dec!(10)),
    ];
    let discount = DiscountConfig::amount(dec!(4)).per_line();
    assert_eq!(gross_total(&items), dec!(10));
    assert_eq!(per_line_discount(&items[0], &items, Some(&discount)), Decimal::ZERO);
    assert_eq!(allocate_discount(&items, Some(&discount), 2), vec![dec!(0), dec!(4)]);
}

#[test]
fn amount_equal_to_gross() {
    let items = vec![LineItem::new("A", 4, dec!(12.50))];
    let discount = DiscountConfig::amount(dec!(50));
    assert_eq!(discount_total(&items, Some(&discount)), dec!(50));
    assert_eq!(net_total(&items, Some(&discount)), Decimal::ZERO);
}

#[test]
fn exactly_one_hundred_percent() {
    let items = vec![LineItem::new("A", 3, dec!(19.99))];
    let discount = DiscountConfig::percentage(dec!(100));
    let totals = calculate_totals(&items, Some(&discount), dec!(0.20));
    assert_eq!(totals.discount_total, totals.gross_total);
    assert_eq!(totals.grand_total, Decimal::ZERO);
}

#[test]
fn fractional_percentage() {
    let items = vec![LineItem::new("A", 1, dec!(199.99))];
    let discount = DiscountConfig::percentage(dec!(2.5));
    assert_eq!(discount_total(&items, Some(&discount)), dec!(4.99975));
}

#[test]
fn zero_vat_rate() {
    let items = vec![LineItem::new("A", 2, dec!(10))];
    let totals = calculate_totals(&items, None, Decimal::ZERO);
    assert_eq!(totals.vat_amount, Decimal::ZERO);
    assert_eq!(totals.grand_total, dec!(20));
}

#[test]
fn rounded_totals_for_display() {
    let items = vec![LineItem::new("A", 3, dec!(3.335))];
    let totals = calculate_totals(&items, None, dec!(0.19)).rounded(2);
    // 10.005 → 10.01, VAT 1.90095 → 1.90, grand 11.90595 → 11.91
    assert_eq!(totals.gross_total, dec!(10.01));
    assert_eq!(totals.vat_amount, dec!(1.90));
    assert_eq!(totals.grand_total, dec!(11.91));
}

#[test]
fn many_tiny_lines_allocate_exactly() {
    let mut items: Vec<LineItem> = (0..97)
        .map(|i| LineItem::new(format!("P-{i}"), 1, dec!(0.01)))
        .collect();
    items.push(LineItem::new("BIG", 1, dec!(1000)));
    let discount = DiscountConfig::amount(dec!(7.77)).per_line();

    let allocated = allocate_discount(&items, Some(&discount), 2);
    assert_eq!(allocated.iter().copied().sum::<Decimal>(), dec!(7.77));
    assert!(allocated.iter().all(|a| !a.is_sign_negative()));
}
