//! Core offer types, pricing engine, validation, and numbering.
//!
//! The pricing functions in [`pricing`] are pure and stateless; everything
//! else in this module builds on top of them.

mod builder;
mod config;
pub mod currencies;
mod draft;
mod error;
mod numbering;
pub mod pricing;
mod types;
mod validation;

pub use builder::*;
pub use config::*;
pub use currencies::{is_known_currency_code, minor_units};
pub use draft::*;
pub use error::*;
pub use numbering::*;
pub use pricing::*;
pub use types::*;
pub use validation::*;
