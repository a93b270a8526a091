//! Price resolution for the wine dataset builder.
//!
//! This crate handles:
//! - The price waterfall (recent trade, bid/offer midpoint, single quote)
//! - Per-rule resolution statistics
//! - Deriving the `Price_to_use` column over a whole table
//! - Price-versus-score regression and relative value

pub mod derive;
pub mod regression;
pub mod resolver;

pub use derive::{derive_prices, derive_relative_values};
pub use regression::{LinearFit, LinearRegression, RelativeValue};
pub use resolver::{PriceResolver, PriceSource, ResolutionStats};
