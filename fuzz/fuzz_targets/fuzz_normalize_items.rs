#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Arbitrary catalog payloads must never panic, and whatever parses must price.
        if let Ok(items) = angebot::api::normalize_items(s) {
            let _ = angebot::calculate_totals(&items, None, rust_decimal::Decimal::new(20, 2));
        }
    }
});
