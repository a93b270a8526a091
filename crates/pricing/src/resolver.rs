//! Price waterfall.
//!
//! Resolves a single "price to use" for a row from, in order: a recent last
//! trade, the bid/offer midpoint, the bid alone, the offer alone.

use chrono::NaiveDate;
use winedata_core::{config::PricingConfig, PriceRow};

/// Which waterfall rule produced a row's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// Last trade within the cutoff window.
    LastTrade,
    /// Mean of bid and offer.
    Midpoint,
    /// Bid only.
    BidOnly,
    /// Offer only.
    OfferOnly,
    /// Nothing usable.
    Unpriced,
}

/// Counts of rows per waterfall rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Rows resolved.
    pub total_rows: u64,
    /// Rows priced from a recent last trade.
    pub last_trade: u64,
    /// Rows priced at the bid/offer midpoint.
    pub midpoint: u64,
    /// Rows priced at the bid.
    pub bid_only: u64,
    /// Rows priced at the offer.
    pub offer_only: u64,
    /// Rows left without a price.
    pub unpriced: u64,
}

impl ResolutionStats {
    /// Record one resolution.
    pub fn record(&mut self, source: PriceSource) {
        self.total_rows += 1;
        match source {
            PriceSource::LastTrade => self.last_trade += 1,
            PriceSource::Midpoint => self.midpoint += 1,
            PriceSource::BidOnly => self.bid_only += 1,
            PriceSource::OfferOnly => self.offer_only += 1,
            PriceSource::Unpriced => self.unpriced += 1,
        }
    }

    /// Fraction of rows that received a price.
    pub fn priced_fraction(&self) -> f64 {
        if self.total_rows > 0 {
            (self.total_rows - self.unpriced) as f64 / self.total_rows as f64
        } else {
            0.0
        }
    }
}

/// Applies the price waterfall to individual rows.
#[derive(Debug, Clone, Copy)]
pub struct PriceResolver {
    /// Maximum last-trade age in days (inclusive).
    cutoff_days: i64,
}

impl Default for PriceResolver {
    fn default() -> Self {
        Self::from_config(&PricingConfig::default())
    }
}

impl PriceResolver {
    /// Create a resolver with an explicit cutoff.
    pub fn new(cutoff_days: i64) -> Self {
        Self { cutoff_days }
    }

    /// Create a resolver from configuration.
    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(config.cutoff_days)
    }

    /// Cutoff window in days.
    pub fn cutoff_days(&self) -> i64 {
        self.cutoff_days
    }

    /// Whether a trade on `trade_date` is recent enough relative to `today`.
    ///
    /// Trades dated after `today` have a negative age and count as recent.
    #[inline]
    pub fn is_recent(&self, trade_date: NaiveDate, today: NaiveDate) -> bool {
        (today - trade_date).num_days() <= self.cutoff_days
    }

    /// Resolve the price for a row.
    pub fn resolve(&self, row: &PriceRow, today: NaiveDate) -> Option<f64> {
        self.resolve_with_source(row, today).0
    }

    /// Resolve the price for a row, reporting which rule fired.
    pub fn resolve_with_source(&self, row: &PriceRow, today: NaiveDate) -> (Option<f64>, PriceSource) {
        // A recent date alone is not enough: the trade price must be present too.
        if let (Some(date), Some(last)) = (row.last_trade_date, row.last_trade_price) {
            if self.is_recent(date, today) {
                return (Some(last), PriceSource::LastTrade);
            }
        }

        match (row.bid, row.offer) {
            (Some(bid), Some(offer)) => (Some((bid + offer) / 2.0), PriceSource::Midpoint),
            (Some(bid), None) => (Some(bid), PriceSource::BidOnly),
            (None, Some(offer)) => (Some(offer), PriceSource::OfferOnly),
            (None, None) => (None, PriceSource::Unpriced),
        }
    }
}
