use angebot::core::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn customer() -> Customer {
    Customer::new("C-17", "Kunde AG")
}

fn sample_items() -> Vec<LineItem> {
    vec![
        LineItem::new("P-100", 2, dec!(100)).with_purchase_price(dec!(70)),
        LineItem::new("P-200", 1, dec!(50)).with_purchase_price(dec!(30)),
    ]
}

// --- Worked examples ---

#[test]
fn percentage_whole_offer_example() {
    let items = sample_items();
    let discount = DiscountConfig::percentage(dec!(10));

    assert_eq!(gross_total(&items), dec!(250));
    assert_eq!(discount_total(&items, Some(&discount)), dec!(25));

    let net = net_total(&items, Some(&discount));
    assert_eq!(net, dec!(225));
    let vat = vat_amount(net, dec!(0.20));
    assert_eq!(vat, dec!(45));
    assert_eq!(grand_total(net, vat), dec!(270));
}

#[test]
fn amount_exceeding_gross_example() {
    let items = sample_items();
    let discount = DiscountConfig::amount(dec!(1000));

    let totals = calculate_totals(&items, Some(&discount), dec!(0.20));
    assert_eq!(totals.discount_total, dec!(250));
    assert_eq!(totals.net_total, dec!(0));
    assert_eq!(totals.vat_amount, dec!(0));
    assert_eq!(totals.grand_total, dec!(0));
}

#[test]
fn empty_offer_example() {
    for discount in [
        None,
        Some(DiscountConfig::percentage(dec!(10)).per_line()),
        Some(DiscountConfig::amount(dec!(50)).per_line()),
    ] {
        let totals = calculate_totals(&[], discount.as_ref(), dec!(0.20));
        assert_eq!(totals, OfferTotals::default());
    }
}

#[test]
fn purchase_total_and_margin() {
    let totals = calculate_totals(&sample_items(), None, dec!(0.20));
    assert_eq!(totals.purchase_total, dec!(170));
    assert_eq!(totals.margin(), dec!(80));
}

#[test]
fn no_discount_net_equals_gross() {
    let totals = calculate_totals(&sample_items(), None, dec!(0.20));
    assert_eq!(totals.discount_total, Decimal::ZERO);
    assert_eq!(totals.net_total, totals.gross_total);
    assert_eq!(totals.grand_total, dec!(300));
}

// --- Per-line allocation ---

#[test]
fn per_line_keeps_net_at_gross() {
    let items = sample_items();
    let discount = DiscountConfig::percentage(dec!(10)).per_line();

    let totals = calculate_totals(&items, Some(&discount), dec!(0.20));
    assert_eq!(totals.discount_total, dec!(25));
    assert_eq!(totals.net_total, dec!(250));
    assert_eq!(totals.grand_total, dec!(300));

    let shares: Decimal = items
        .iter()
        .map(|item| per_line_discount(item, &items, Some(&discount)))
        .sum();
    assert_eq!(shares, dec!(25));
}

#[test]
fn allocation_with_uneven_shares() {
    let items = vec![
        LineItem::new("A", 1, dec!(33.33)),
        LineItem::new("B", 2, dec!(17.89)),
        LineItem::new("C", 7, dec!(4.99)),
    ];
    let discount = DiscountConfig::percentage(dec!(12.5)).per_line();

    let allocated = allocate_discount(&items, Some(&discount), 2);
    let target = round_half_up(discount_total(&items, Some(&discount)), 2);
    assert_eq!(allocated.iter().copied().sum::<Decimal>(), target);
    assert!(allocated.iter().all(|a| !a.is_sign_negative()));
}

#[test]
fn allocation_in_zero_decimal_currency() {
    let items = vec![
        LineItem::new("A", 1, dec!(1000)),
        LineItem::new("B", 1, dec!(1000)),
        LineItem::new("C", 1, dec!(1000)),
    ];
    let discount = DiscountConfig::amount(dec!(100)).per_line();

    let allocated = allocate_discount(&items, Some(&discount), 0);
    assert_eq!(allocated, vec![dec!(34), dec!(33), dec!(33)]);
}

// --- Builder ---

#[test]
fn builder_prices_offer() {
    let offer = OfferBuilder::new("AN-2024-001", date(2024, 6, 15))
        .valid_until(date(2024, 7, 15))
        .customer(customer())
        .note("Angebot gültig 30 Tage")
        .add_item(LineItem::new("P-100", 2, dec!(100)))
        .add_item(LineItem::new("P-200", 1, dec!(50)))
        .discount(DiscountConfig::percentage(dec!(10)))
        .build()
        .unwrap();

    let totals = offer.totals.unwrap();
    assert_eq!(totals.net_total, dec!(225));
    assert_eq!(totals.grand_total, dec!(270));
    assert_eq!(offer.currency_code, "EUR");
}

#[test]
fn builder_uses_pricing_config() {
    let config = PricingConfig {
        vat_rate: dec!(0.077),
        currency_code: "CHF".into(),
        minor_units: None,
    };
    let offer = OfferBuilder::new("AN-2024-002", date(2024, 6, 15))
        .config(&config)
        .customer(customer())
        .add_item(LineItem::new("P-1", 1, dec!(1000)))
        .build()
        .unwrap();

    assert_eq!(offer.currency_code, "CHF");
    assert_eq!(offer.totals.unwrap().vat_amount, dec!(77));
}

#[test]
fn builder_from_draft() {
    let mut draft = OfferDraft::new();
    draft.add_item(LineItem::new("P-1", 4, dec!(25)));
    draft.set_discount(DiscountConfig::amount(dec!(10)));

    let offer = OfferBuilder::new("AN-2024-003", date(2024, 6, 15))
        .customer(customer())
        .draft(draft)
        .build()
        .unwrap();

    assert_eq!(offer.items.len(), 1);
    assert_eq!(offer.totals.unwrap().net_total, dec!(90));
}

#[test]
fn builder_reports_all_errors() {
    let err = OfferBuilder::new("", date(2024, 6, 15))
        .valid_until(date(2024, 6, 1))
        .build()
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.starts_with("validation failed"));
    assert!(msg.contains("[OF-01]"));
    assert!(msg.contains("[OF-02]"));
    assert!(msg.contains("[OF-03]"));
    assert!(msg.contains("[OF-06]"));
}

#[test]
fn builder_unchecked_skips_validation() {
    let offer = OfferBuilder::new("", date(2024, 6, 15)).build_unchecked();
    assert!(offer.customer.is_none());
    assert_eq!(offer.totals.unwrap(), OfferTotals::default());
}

#[test]
fn builder_rejects_oversized_number() {
    let err = OfferBuilder::new("X".repeat(201), date(2024, 6, 15))
        .customer(customer())
        .add_item(LineItem::new("P-1", 1, dec!(1)))
        .build()
        .unwrap_err();
    assert!(matches!(err, AngebotError::Builder(_)));
}

// --- Validation ---

#[test]
fn validation_flags_bad_items() {
    let offer = OfferBuilder::new("AN-2024-004", date(2024, 6, 15))
        .customer(customer())
        .add_item(LineItem::new("", 0, dec!(-1)))
        .build_unchecked();

    let errors = validate_offer(&offer);
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["items[0].product_id", "items[0].quantity", "items[0].unit_price"]
    );
}

#[test]
fn validation_flags_unknown_currency() {
    let offer = OfferBuilder::new("AN-2024-005", date(2024, 6, 15))
        .currency("XXX")
        .customer(customer())
        .add_item(LineItem::new("P-1", 1, dec!(1)))
        .build_unchecked();

    let errors = validate_offer(&offer);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule.as_deref(), Some("OF-05"));
}

// --- Numbering ---

#[test]
fn numbering_feeds_builder() {
    let mut seq = OfferNumberSequence::new("AN-", 2024);
    assert_eq!(seq.peek(), "AN-2024-001");
    let first = OfferBuilder::new(seq.issue_for(date(2024, 6, 15)), date(2024, 6, 15))
        .customer(customer())
        .add_item(LineItem::new("P-1", 1, dec!(1)))
        .build()
        .unwrap();
    let second = OfferBuilder::new(seq.issue_for(date(2025, 1, 7)), date(2025, 1, 7))
        .customer(customer())
        .add_item(LineItem::new("P-1", 1, dec!(1)))
        .build()
        .unwrap();

    assert_eq!(first.number, "AN-2024-001");
    assert_eq!(second.number, "AN-2025-001");
}
