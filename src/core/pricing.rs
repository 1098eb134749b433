//! Offer pricing engine.
//!
//! Pure functions turning a list of [`LineItem`]s and an optional
//! [`DiscountConfig`] into [`OfferTotals`]. Nothing here allocates state
//! between calls, performs I/O, returns an error or panics: a line whose
//! total cannot be computed or is negative counts as zero, and sums
//! saturate instead of overflowing.
//!
//! Amounts are kept at full precision. Rounding to the currency's minor
//! units happens only in [`allocate_discount`] and [`OfferTotals::rounded`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::types::{DiscountAllocation, DiscountConfig, DiscountKind, LineItem, OfferTotals};

/// Sum of `quantity × unit_price` over all items.
pub fn gross_total(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(LineItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Sum of `quantity × purchase_unit_price` over all items.
pub fn purchase_total(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(LineItem::line_purchase_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Discount amount for the whole offer.
///
/// Percentages are not capped: 150% of a gross total of 100 is 150. Flat
/// amounts never exceed the gross total.
pub fn discount_total(items: &[LineItem], config: Option<&DiscountConfig>) -> Decimal {
    let Some(config) = config else {
        return Decimal::ZERO;
    };
    if config.value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let gross = gross_total(items);
    match config.kind {
        DiscountKind::Percentage => gross.saturating_mul(config.value) / Decimal::ONE_HUNDRED,
        DiscountKind::Amount => config.value.min(gross),
    }
}

/// Share of the discount allocated to `item`, at full precision.
///
/// Non-zero only for [`DiscountAllocation::PerLine`]. The share is
/// `line_total / gross_total`; with a gross total of zero every share is zero.
pub fn per_line_discount(
    item: &LineItem,
    items: &[LineItem],
    config: Option<&DiscountConfig>,
) -> Decimal {
    if !is_per_line(config) {
        return Decimal::ZERO;
    }
    let weights = ShareWeights::of(items);
    if weights.sum.is_zero() {
        return Decimal::ZERO;
    }
    proportional_share(weights.weight(item), weights.sum, discount_total(items, config))
}

/// Per-line discount amounts for every item, rounded to `dp` decimal places.
///
/// The returned amounts always sum to `discount_total` rounded half-up to
/// `dp` places and are never negative. Each line first receives its share
/// rounded toward zero; the remaining minor units go one each to the lines
/// with the largest truncated remainders (earlier lines win ties). Returns
/// all zeros unless the allocation is [`DiscountAllocation::PerLine`].
///
/// `dp` is capped so the discount needs at most 27 significant digits at
/// that precision (27 places for a discount below 1, 24 for one in the
/// hundreds), which keeps every sum of minor units exact.
pub fn allocate_discount(
    items: &[LineItem],
    config: Option<&DiscountConfig>,
    dp: u32,
) -> Vec<Decimal> {
    let mut allocated = vec![Decimal::ZERO; items.len()];
    if !is_per_line(config) {
        return allocated;
    }
    let weights = ShareWeights::of(items);
    if weights.sum.is_zero() {
        return allocated;
    }

    let discount = discount_total(items, config);
    let dp = dp.min(EXACT_DIGITS.saturating_sub(integer_digits(discount)));
    let target = round_half_up(discount, dp);

    let mut remainders = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let exact = proportional_share(weights.weight(item), weights.sum, discount);
        let floored = exact.round_dp_with_strategy(dp, RoundingStrategy::ToZero);
        allocated[i] = floored;
        remainders.push((i, exact.saturating_sub(floored)));
    }

    let unit = Decimal::new(1, dp);
    let leftover_units = target
        .saturating_sub(sum(&allocated))
        .checked_div(unit)
        .and_then(|units| units.round().to_usize())
        .unwrap_or(0)
        .min(items.len());

    // Stable sort keeps earlier lines first among equal remainders.
    remainders.sort_by(|a, b| b.1.cmp(&a.1));
    for &(i, _) in remainders.iter().take(leftover_units) {
        allocated[i] = allocated[i].saturating_add(unit);
    }

    settle(&mut allocated, target);
    allocated
}

/// Net total before VAT.
///
/// A whole-offer discount is subtracted here. With per-line allocation (or
/// no discount) the net total equals the gross total; the per-line amounts
/// are a reporting breakdown carried on the individual lines.
pub fn net_total(items: &[LineItem], config: Option<&DiscountConfig>) -> Decimal {
    let gross = gross_total(items);
    match config {
        Some(c) if c.allocation == DiscountAllocation::WholeOffer => {
            gross - discount_total(items, config)
        }
        _ => gross,
    }
}

/// VAT on `net_total`. `vat_rate` is a fraction (0.20 = 20%).
pub fn vat_amount(net_total: Decimal, vat_rate: Decimal) -> Decimal {
    net_total.saturating_mul(vat_rate)
}

/// Net total plus VAT.
pub fn grand_total(net_total: Decimal, vat_amount: Decimal) -> Decimal {
    net_total.saturating_add(vat_amount)
}

/// Compute all offer totals in one pass.
pub fn calculate_totals(
    items: &[LineItem],
    config: Option<&DiscountConfig>,
    vat_rate: Decimal,
) -> OfferTotals {
    debug!(
        items = items.len(),
        discount = ?config.map(|c| (c.kind, c.allocation)),
        %vat_rate,
        "calculating offer totals"
    );

    let net = net_total(items, config);
    let vat = vat_amount(net, vat_rate);

    OfferTotals {
        gross_total: gross_total(items),
        purchase_total: purchase_total(items),
        discount_total: discount_total(items, config),
        net_total: net,
        vat_amount: vat,
        grand_total: grand_total(net, vat),
    }
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
///
/// `dp` above [`Decimal::MAX_SCALE`] leaves the value unchanged.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(
        dp.min(Decimal::MAX_SCALE),
        RoundingStrategy::MidpointAwayFromZero,
    )
}

fn is_per_line(config: Option<&DiscountConfig>) -> bool {
    matches!(config, Some(c) if c.allocation == DiscountAllocation::PerLine)
}

const EXACT_DIGITS: u32 = Decimal::MAX_SCALE - 1;

fn integer_digits(value: Decimal) -> u32 {
    let mut whole = value.trunc().abs();
    let mut digits = 0;
    while !whole.is_zero() {
        whole = (whole / Decimal::TEN).trunc();
        digits += 1;
    }
    digits
}

/// Weights used to split a discount across lines: the line totals, each
/// divided by the number of lines when their plain sum would overflow.
struct ShareWeights {
    divisor: Decimal,
    sum: Decimal,
}

impl ShareWeights {
    fn of(items: &[LineItem]) -> Self {
        let exact = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()));
        if let Some(sum) = exact {
            return Self { divisor: Decimal::ONE, sum };
        }

        let divisor = Decimal::from(items.len());
        let sum = items
            .iter()
            .map(|item| item.line_total() / divisor)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        debug!(items = items.len(), "gross total overflows, scaling share weights");
        Self { divisor, sum }
    }

    fn weight(&self, item: &LineItem) -> Decimal {
        item.line_total() / self.divisor
    }
}

fn proportional_share(weight: Decimal, sum: Decimal, discount: Decimal) -> Decimal {
    // weight <= sum, so the quotient never exceeds the discount
    match weight.checked_mul(discount) {
        Some(product) => product / sum,
        None => (weight / sum).saturating_mul(discount),
    }
}

/// Make `allocated` sum to exactly `target`: a shortfall goes to the
/// largest line, an excess is taken back from the largest lines first.
fn settle(allocated: &mut [Decimal], target: Decimal) {
    let mut residual = target.saturating_sub(sum(allocated));
    if residual.is_zero() {
        return;
    }

    let mut order: Vec<usize> = (0..allocated.len()).collect();
    order.sort_by(|&a, &b| allocated[b].cmp(&allocated[a]));

    if residual > Decimal::ZERO {
        if let Some(&largest) = order.first() {
            allocated[largest] = allocated[largest].saturating_add(residual);
        }
        return;
    }
    for i in order {
        if residual >= Decimal::ZERO {
            break;
        }
        let take = allocated[i].min(-residual);
        allocated[i] -= take;
        residual += take;
    }
}

fn sum(amounts: &[Decimal]) -> Decimal {
    amounts
        .iter()
        .copied()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
