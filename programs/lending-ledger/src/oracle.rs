use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use pyth_solana_receiver_sdk::price_update::{PriceUpdateV2, VerificationLevel};

use crate::constants::MAX_PRICE_EXPONENT;
use crate::error::LedgerError;
use crate::math::fixed_point::{mul_div_down, pow10, to_u64};
use crate::state::Pool;

/// Token amounts to unit-of-account values (WAD) and back.
pub trait PriceOracle {
    fn value_of(&self, mint: &Pubkey, amount: u64) -> Result<u128>;
    fn amount_of(&self, mint: &Pubkey, value: u128) -> Result<u64>;
    fn is_stale(&self, mint: &Pubkey) -> Result<bool>;

    /// `value_of`, refusing stale prices.
    fn fresh_value_of(&self, mint: &Pubkey, amount: u64) -> Result<u128> {
        require!(!self.is_stale(mint)?, LedgerError::StalePrice);
        self.value_of(mint, amount)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceFeed {
    /// Value of one whole token (10^decimals base units), WAD.
    pub price: u128,
    pub decimals: u8,
    pub publish_time: i64,
    pub max_age: u64,
}

/// Prices for a single instruction, read from the Pyth accounts it was handed.
#[derive(Clone, Debug, Default)]
pub struct PriceBook {
    now: i64,
    feeds: BTreeMap<Pubkey, PriceFeed>,
}

impl PriceBook {
    pub fn new(now: i64) -> Self {
        Self {
            now,
            feeds: BTreeMap::new(),
        }
    }

    pub fn set_feed(&mut self, mint: Pubkey, feed: PriceFeed) {
        self.feeds.insert(mint, feed);
    }

    /// Fresh price at `now`.
    pub fn set_price(&mut self, mint: Pubkey, price: u128, decimals: u8) {
        self.set_feed(
            mint,
            PriceFeed {
                price,
                decimals,
                publish_time: self.now,
                max_age: crate::constants::DEFAULT_ORACLE_MAX_AGE,
            },
        );
    }

    pub fn insert_pyth(&mut self, pool: &Pool, update: &PriceUpdateV2) -> Result<()> {
        let message = &update.price_message;
        require!(
            message.feed_id == pool.feed_id,
            LedgerError::OracleAccountMismatch
        );
        require!(
            matches!(update.verification_level, VerificationLevel::Full),
            LedgerError::InvalidOraclePrice
        );
        let price = pyth_price_to_wad(message.price, message.exponent)?;
        msg!(
            "price {} expo {} conf {} published {}",
            message.price,
            message.exponent,
            message.conf,
            message.publish_time
        );
        self.set_feed(
            pool.mint,
            PriceFeed {
                price,
                decimals: pool.decimals,
                publish_time: message.publish_time,
                max_age: pool.oracle_max_age,
            },
        );
        Ok(())
    }

    fn feed(&self, mint: &Pubkey) -> Result<&PriceFeed> {
        self.feeds
            .get(mint)
            .ok_or_else(|| error!(LedgerError::InvalidOraclePrice))
    }
}

impl PriceOracle for PriceBook {
    fn value_of(&self, mint: &Pubkey, amount: u64) -> Result<u128> {
        let feed = self.feed(mint)?;
        mul_div_down(feed.price, amount as u128, pow10(feed.decimals as u32)?)
    }

    fn amount_of(&self, mint: &Pubkey, value: u128) -> Result<u64> {
        let feed = self.feed(mint)?;
        to_u64(mul_div_down(value, pow10(feed.decimals as u32)?, feed.price)?)
    }

    fn is_stale(&self, mint: &Pubkey) -> Result<bool> {
        let feed = self.feed(mint)?;
        let age = self.now.saturating_sub(feed.publish_time);
        Ok(age > 0 && age as u64 > feed.max_age)
    }
}

/// `price * 10^exponent` as a WAD value.
pub fn pyth_price_to_wad(price: i64, exponent: i32) -> Result<u128> {
    require!(price > 0, LedgerError::InvalidOraclePrice);
    require!(
        (-MAX_PRICE_EXPONENT..=MAX_PRICE_EXPONENT).contains(&exponent),
        LedgerError::InvalidOraclePrice
    );
    let scale = (18 + exponent) as u32;
    (price as u128)
        .checked_mul(pow10(scale)?)
        .ok_or_else(|| error!(LedgerError::MathOverflow))
}
