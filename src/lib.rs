//! # angebot
//!
//! Offer (quote) pricing for business management applications: line totals,
//! whole-offer and distributed discounts, VAT, offer numbering and the
//! payload submitted to an offer storage service.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! The pricing engine is a set of pure functions: it holds no state, performs
//! no I/O and never fails. Malformed values are clamped to zero.
//!
//! ## Quick Start
//!
//! ```rust
//! use angebot::core::*;
//! use rust_decimal_macros::dec;
//!
//! let items = vec![
//!     LineItem::new("P-100", 2, dec!(100)),
//!     LineItem::new("P-200", 1, dec!(50)),
//! ];
//! let discount = DiscountConfig::percentage(dec!(10));
//!
//! let totals = calculate_totals(&items, Some(&discount), dec!(0.20));
//! assert_eq!(totals.gross_total, dec!(250));
//! assert_eq!(totals.discount_total, dec!(25));
//! assert_eq!(totals.net_total, dec!(225));
//! assert_eq!(totals.vat_amount, dec!(45));
//! assert_eq!(totals.grand_total, dec!(270));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Pricing engine, offer draft, builder, validation, numbering, config |
//! | `api` | Normalization of loosely typed JSON items, submission payload |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "api")]
pub mod api;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
