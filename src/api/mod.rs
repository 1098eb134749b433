//! Boundary to the offer storage API.
//!
//! Line items arriving from the product catalog API are loosely typed:
//! numbers may be strings, keys come in camelCase or snake_case, prices may
//! be missing. [`normalize_item`] and [`normalize_items`] turn those payloads
//! into [`LineItem`](crate::core::LineItem)s once, before anything reaches
//! the pricing engine. [`OfferSubmission`] is the payload sent back when an
//! offer is saved, with the per-line discount embedded in every item.

mod normalize;
mod submission;

pub use normalize::*;
pub use submission::*;
