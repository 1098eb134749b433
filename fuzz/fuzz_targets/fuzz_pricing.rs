#![no_main]

use angebot::core::*;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|input: (Vec<(u32, i64, u32, i64)>, i64, u32, bool, bool, u8)| {
    let (lines, value, value_scale, is_amount, per_line, dp) = input;
    let items: Vec<LineItem> = lines
        .into_iter()
        .take(64)
        .enumerate()
        .map(|(i, (qty, price, scale, purchase))| {
            LineItem::new(format!("P-{i}"), qty, Decimal::new(price, scale % 29))
                .with_purchase_price(Decimal::new(purchase, 2))
        })
        .collect();

    let value = Decimal::new(value, value_scale % 29);
    let mut discount = if is_amount {
        DiscountConfig::amount(value)
    } else {
        DiscountConfig::percentage(value)
    };
    if per_line {
        discount = discount.per_line();
    }

    // Pricing must never panic, whatever the input.
    let _ = calculate_totals(&items, Some(&discount), Decimal::new(20, 2));
    let _ = allocate_discount(&items, Some(&discount), u32::from(dp));
    let _ = round_half_up(value, u32::from(dp));
});
