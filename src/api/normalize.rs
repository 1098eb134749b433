use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::core::{AngebotError, LineItem};

/// Line item as the catalog API sends it. Every field is optional and
/// untyped until [`normalize_item`] has looked at it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(alias = "product_id")]
    pub product_id: Option<Value>,
    #[serde(alias = "qty")]
    pub quantity: Option<Value>,
    #[serde(alias = "unit_price", alias = "price")]
    pub unit_price: Option<Value>,
    #[serde(alias = "purchase_unit_price", alias = "purchasePrice")]
    pub purchase_unit_price: Option<Value>,
}

/// Parse a JSON array of line items.
pub fn normalize_items(body: &str) -> Result<Vec<LineItem>, AngebotError> {
    let values: Vec<Value> = serde_json::from_str(body)
        .map_err(|e| AngebotError::Parse(format!("expected a JSON array of items: {e}")))?;

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            normalize_item(value).map_err(|e| match e {
                AngebotError::Parse(msg) => AngebotError::Parse(format!("items[{i}]: {msg}")),
                other => other,
            })
        })
        .collect()
}

/// Turn one loosely typed item into a [`LineItem`].
///
/// Numbers may be JSON numbers or numeric strings (a decimal comma is
/// accepted). Anything unparseable, negative or out of range becomes 0 and
/// is logged at `warn`. Quantities are truncated to whole units and
/// saturate at `u32::MAX`, including positive numbers too large for a
/// `Decimal` such as `"1.5e400"`. Only a missing or empty product id is an
/// error.
pub fn normalize_item(value: &Value) -> Result<LineItem, AngebotError> {
    if !value.is_object() {
        return Err(AngebotError::Parse(format!(
            "item must be a JSON object, got {}",
            json_type(value)
        )));
    }
    let raw = RawLineItem::deserialize(value)
        .map_err(|e| AngebotError::Parse(format!("malformed item: {e}")))?;

    let product_id = match &raw.product_id {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(AngebotError::Parse("item has no product id".into())),
    };

    let quantity = if beyond_decimal_range(raw.quantity.as_ref()) {
        warn!(product_id = %product_id, value = ?raw.quantity, "saturating oversized quantity");
        u32::MAX
    } else {
        amount(&product_id, "quantity", raw.quantity.as_ref())
            .trunc()
            .to_u32()
            .unwrap_or(u32::MAX)
    };
    let unit_price = amount(&product_id, "unit_price", raw.unit_price.as_ref());
    let purchase_unit_price = match &raw.purchase_unit_price {
        None | Some(Value::Null) => Decimal::ZERO,
        Some(v) => amount(&product_id, "purchase_unit_price", Some(v)),
    };

    Ok(LineItem {
        product_id,
        quantity,
        unit_price,
        purchase_unit_price,
    })
}

/// Coerce a JSON value to a non-negative Decimal, or 0.
fn amount(product_id: &str, field: &str, value: Option<&Value>) -> Decimal {
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s),
        _ => None,
    };

    match parsed {
        Some(d) if !d.is_sign_negative() => d,
        _ => {
            warn!(
                product_id,
                field,
                value = ?value,
                "clamping malformed amount to 0"
            );
            Decimal::ZERO
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // "12,50" from German-locale form fields
    let s = if s.contains(',') && !s.contains('.') {
        s.replace(',', ".")
    } else {
        s.to_string()
    };
    Decimal::from_str(&s)
        .or_else(|_| Decimal::from_scientific(&s))
        .ok()
}

/// A positive number written in plain or exponent notation that does not
/// fit in a `Decimal`.
fn beyond_decimal_range(value: Option<&Value>) -> bool {
    let text = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return false,
    };
    if parse_decimal(&text).is_some() {
        return false;
    }
    let (mantissa, exponent) = text.split_once(['e', 'E']).unwrap_or((text.as_str(), "0"));
    let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
    exponent.parse::<u32>().is_ok()
        && mantissa.chars().all(|c| c.is_ascii_digit() || c == '.')
        && mantissa.chars().any(|c| matches!(c, '1'..='9'))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
