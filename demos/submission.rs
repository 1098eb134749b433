use angebot::api::{OfferSubmission, normalize_items};
use angebot::core::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Items as the catalog API returns them: mixed key styles, numbers as strings
    let body = r#"[
        {"productId": "P-100", "quantity": "2", "unitPrice": "100.00", "purchaseUnitPrice": 70},
        {"product_id": 200, "qty": 1, "price": "49,90"},
        {"productId": "P-300", "quantity": 1, "unitPrice": "tbd"}
    ]"#;

    let items = match normalize_items(body) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("cannot read items: {e}");
            return;
        }
    };

    let offer = OfferBuilder::new("AN-2024-042", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .customer(Customer::new("C-17", "Kunde AG"))
        .draft(OfferDraft {
            items,
            discount: Some(DiscountConfig::amount(dec!(25)).per_line()),
        })
        .build_unchecked();

    for error in validate_offer(&offer) {
        eprintln!("warning: {error}");
    }

    match OfferSubmission::from_offer(&offer).and_then(|s| s.to_json()) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("cannot build submission: {e}"),
    }
}
