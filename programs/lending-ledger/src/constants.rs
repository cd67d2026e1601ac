use anchor_lang::prelude::*;

// PDA seeds
#[constant]
pub const LEDGER_SEED: &[u8] = b"ledger";
#[constant]
pub const POOL_SEED: &[u8] = b"pool";
#[constant]
pub const VAULT_SEED: &[u8] = b"vault";
#[constant]
pub const POSITION_SEED: &[u8] = b"position";
#[constant]
pub const POSITION_TOKEN_SEED: &[u8] = b"position_token";
#[constant]
pub const WRAPPER_SEED: &[u8] = b"wrapper";
#[constant]
pub const WRAPPER_VAULT_SEED: &[u8] = b"wrapper_vault";

/// 1e18 fixed point shared by ratios, rates, poles and unit-of-account values.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Basis points denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Shares minted at pool creation against the same amount of pseudo deposits.
pub const SEED_AMOUNT: u64 = 1_000;

pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 60 * 60;
pub const ONE_DAY: i64 = 24 * 60 * 60;

/// Time for the pole to travel the full [min_pole, max_pole] range.
pub const POLE_NORMALISATION_SECONDS: u128 = 8 * 7 * 24 * 60 * 60;

/// Idle period after which the pole falls back to its floor.
pub const POLE_IDLE_RESET_SECONDS: i64 = 30 * ONE_DAY;

/// Revenue drop (WAD) below the best observed value that sends the pole back to `best_pole`.
pub const POLE_RESET_DEVIATION: u128 = 50_000_000_000_000_000; // 5%

// Pole bounds accepted at pool creation
pub const MIN_POLE_FLOOR: u128 = WAD + 1_000_000_000_000_000; // 1.001
pub const MAX_POLE_CEILING: u128 = 2 * WAD;

pub const MAX_POOL_FEE: u128 = 500_000_000_000_000_000; // 50%

/// Distinct tokens a single position may touch.
pub const MAX_POSITION_TOKENS: usize = 8;

// Liquidation defaults
pub const DEFAULT_BASE_REWARD_LIQUIDATION: u128 = 100_000_000_000_000_000; // 10%
pub const DEFAULT_MAX_FEE_VALUE: u128 = 3 * WAD;
pub const DEFAULT_MAX_LIQUIDATION_BPS: u64 = 5_000;
pub const MAX_BASE_REWARD_LIQUIDATION: u128 = 200_000_000_000_000_000; // 20%

// Oracle
pub const DEFAULT_ORACLE_MAX_AGE: u64 = 60;
pub const MAX_PRICE_EXPONENT: i32 = 18;

/// Receipt wrapper exchange rate scale (1.0 = 1_000_000_000).
pub const RECEIPT_RATE_SCALE: u128 = 1_000_000_000;
