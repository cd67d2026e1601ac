use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::LedgerError;
use crate::math::fixed_point::{mul_div_down, mul_div_up, to_u64, wad_mul};
use crate::math::pole::PoleController;
use crate::math::rate_curve::{borrow_rate, revenue_value, utilization};
use crate::state::position::PositionToken;

/// Shared per-token reservoir with share accounting on both the lending and the borrowing side.
#[account]
#[derive(Debug, Default)]
pub struct Pool {
    pub mint: Pubkey,
    pub vault: Pubkey,
    /// Pyth `PriceUpdateV2` account pricing this token.
    pub oracle: Pubkey,
    pub feed_id: [u8; 32],
    pub oracle_max_age: u64,
    pub decimals: u8,

    /// Tokens physically held for the lending side.
    pub total_pool_amount: u64,
    /// Tokens held for solely deposits, never lent out.
    pub total_bare_amount: u64,

    pub pseudo_total_amount: u128,
    pub total_shares: u128,
    pub pseudo_total_borrow: u128,
    pub total_borrow_shares: u128,
    /// Protocol-owned lending shares minted from the pool fee.
    pub fee_shares: u128,

    pub borrow_rate: u128,
    pub utilization: u128,
    pub pole: PoleController,
    pub multiplicative_factor: u128,
    pub last_sync_timestamp: i64,

    pub allow_borrow: bool,
    pub collateral_factor: u128,
    pub max_deposit_amount: u64,
    pub borrow_cap: u64,
    pub pool_fee: u128,

    pub bump: u8,
    pub vault_bump: u8,
}

impl Pool {
    pub const LEN: usize = 8 + // discriminator
        32 + // mint
        32 + // vault
        32 + // oracle
        32 + // feed_id
        8 +  // oracle_max_age
        1 +  // decimals
        8 +  // total_pool_amount
        8 +  // total_bare_amount
        16 * 5 + // pseudo totals, shares, fee_shares
        16 + // borrow_rate
        16 + // utilization
        PoleController::SIZE +
        16 + // multiplicative_factor
        8 +  // last_sync_timestamp
        1 +  // allow_borrow
        16 + // collateral_factor
        8 +  // max_deposit_amount
        8 +  // borrow_cap
        16 + // pool_fee
        1 +  // bump
        1;   // vault_bump

    /// Fresh pool seeded with [`SEED_AMOUNT`] shares against as many pseudo deposits. The seed
    /// tokens are supplied by the creator and belong to no position.
    pub fn new(mint: Pubkey, decimals: u8, params: &PoolParams, now: i64) -> Result<Self> {
        params.validate()?;
        let pole = PoleController::new(params.min_pole, params.max_pole)?;
        Ok(Self {
            mint,
            feed_id: params.feed_id,
            oracle_max_age: params.oracle_max_age,
            decimals,
            total_pool_amount: SEED_AMOUNT,
            pseudo_total_amount: SEED_AMOUNT as u128,
            total_shares: SEED_AMOUNT as u128,
            borrow_rate: borrow_rate(0, pole.current_pole, params.multiplicative_factor)?,
            pole,
            multiplicative_factor: params.multiplicative_factor,
            last_sync_timestamp: now,
            allow_borrow: params.allow_borrow,
            collateral_factor: params.collateral_factor,
            max_deposit_amount: params.max_deposit_amount,
            borrow_cap: params.borrow_cap,
            pool_fee: params.pool_fee,
            ..Self::default()
        })
    }

    // ── Synchronization ─────────────────────────────────────

    /// Accrues interest up to `now` and re-evaluates the rate curve. Calls at or before the last
    /// sync timestamp leave the pool untouched.
    pub fn synchronize(&mut self, now: i64) -> Result<()> {
        if now <= self.last_sync_timestamp {
            return Ok(());
        }
        let elapsed = now - self.last_sync_timestamp;

        self.accrue_interest(elapsed)?;

        self.utilization = utilization(self.pseudo_total_borrow, self.pseudo_total_amount)?;
        let revenue = revenue_value(
            self.utilization,
            self.pole.current_pole,
            self.multiplicative_factor,
        )?;
        self.pole.step(revenue, elapsed)?;
        self.refresh_rate()?;
        self.last_sync_timestamp = now;
        Ok(())
    }

    /// Re-prices the pool at its current utilization. The pole and the sync timestamp stay put.
    pub fn refresh_rate(&mut self) -> Result<()> {
        self.utilization = utilization(self.pseudo_total_borrow, self.pseudo_total_amount)?;
        self.borrow_rate = borrow_rate(
            self.utilization,
            self.pole.current_pole,
            self.multiplicative_factor,
        )?;
        Ok(())
    }

    fn accrue_interest(&mut self, elapsed: i64) -> Result<()> {
        if self.pseudo_total_borrow == 0 || self.borrow_rate == 0 {
            return Ok(());
        }

        // simple interest over the interval, compounding from one sync to the next
        let period_rate = mul_div_down(self.borrow_rate, elapsed as u128, SECONDS_PER_YEAR)?;
        let interest = wad_mul(self.pseudo_total_borrow, period_rate)?;
        if interest == 0 {
            return Ok(());
        }

        self.pseudo_total_borrow = self
            .pseudo_total_borrow
            .checked_add(interest)
            .ok_or(LedgerError::MathOverflow)?;
        self.pseudo_total_amount = self
            .pseudo_total_amount
            .checked_add(interest)
            .ok_or(LedgerError::MathOverflow)?;

        let fee_amount = wad_mul(interest, self.pool_fee)?;
        if fee_amount > 0 {
            let fee_shares = mul_div_down(
                fee_amount,
                self.total_shares,
                self.pseudo_total_amount - fee_amount,
            )?;
            self.total_shares = self
                .total_shares
                .checked_add(fee_shares)
                .ok_or(LedgerError::MathOverflow)?;
            self.fee_shares = self
                .fee_shares
                .checked_add(fee_shares)
                .ok_or(LedgerError::MathOverflow)?;
        }
        Ok(())
    }

    // ── Conversions ─────────────────────────────────────────

    pub fn lending_shares(&self, amount: u128, round_up: bool) -> Result<u128> {
        if self.pseudo_total_amount == 0 || self.total_shares == 0 {
            return Ok(amount);
        }
        convert(amount, self.total_shares, self.pseudo_total_amount, round_up)
    }

    pub fn lending_amount(&self, shares: u128, round_up: bool) -> Result<u128> {
        if self.total_shares == 0 {
            return Ok(shares);
        }
        convert(shares, self.pseudo_total_amount, self.total_shares, round_up)
    }

    pub fn borrow_shares(&self, amount: u128, round_up: bool) -> Result<u128> {
        if self.pseudo_total_borrow == 0 || self.total_borrow_shares == 0 {
            return Ok(amount);
        }
        convert(amount, self.total_borrow_shares, self.pseudo_total_borrow, round_up)
    }

    pub fn borrow_amount(&self, shares: u128, round_up: bool) -> Result<u128> {
        if self.total_borrow_shares == 0 {
            return Ok(shares);
        }
        convert(shares, self.pseudo_total_borrow, self.total_borrow_shares, round_up)
    }

    /// Share price in WAD.
    pub fn share_price(&self) -> Result<u128> {
        if self.total_shares == 0 {
            return Ok(WAD);
        }
        mul_div_down(self.pseudo_total_amount, WAD, self.total_shares)
    }

    // ── Lending side ────────────────────────────────────────

    pub fn deposit_to_shares(&mut self, entry: &mut PositionToken, amount: u64) -> Result<u128> {
        require!(amount > 0, LedgerError::InvalidAmount);
        self.check_deposit_cap(amount)?;

        let shares = self.lending_shares(amount as u128, false)?;
        require!(shares > 0, LedgerError::InvalidAmount);

        self.total_pool_amount = self
            .total_pool_amount
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        self.pseudo_total_amount = self
            .pseudo_total_amount
            .checked_add(amount as u128)
            .ok_or(LedgerError::MathOverflow)?;
        self.total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(LedgerError::MathOverflow)?;
        entry.lending_shares = entry
            .lending_shares
            .checked_add(shares)
            .ok_or(LedgerError::MathOverflow)?;
        self.refresh_rate()?;
        Ok(shares)
    }

    pub fn withdraw_from_shares(&mut self, entry: &mut PositionToken, shares: u128) -> Result<u64> {
        require!(shares > 0, LedgerError::InvalidAmount);
        require!(shares <= entry.lending_shares, LedgerError::InsufficientShares);
        let amount = to_u64(self.lending_amount(shares, false)?)?;
        self.burn_lending(entry, shares, amount)?;
        Ok(amount)
    }

    /// Withdraws exactly `amount`, burning the shares rounded up.
    pub fn withdraw_amount(&mut self, entry: &mut PositionToken, amount: u64) -> Result<u128> {
        require!(amount > 0, LedgerError::InvalidAmount);
        let shares = self.lending_shares(amount as u128, true)?;
        require!(shares <= entry.lending_shares, LedgerError::InsufficientShares);
        self.burn_lending(entry, shares, amount)?;
        Ok(shares)
    }

    fn burn_lending(&mut self, entry: &mut PositionToken, shares: u128, amount: u64) -> Result<()> {
        require!(amount <= self.total_pool_amount, LedgerError::InsufficientLiquidity);
        self.total_pool_amount -= amount;
        self.pseudo_total_amount = self
            .pseudo_total_amount
            .checked_sub(amount as u128)
            .ok_or(LedgerError::MathOverflow)?;
        self.total_shares = self
            .total_shares
            .checked_sub(shares)
            .ok_or(LedgerError::MathOverflow)?;
        entry.lending_shares -= shares;
        self.refresh_rate()
    }

    pub fn solely_deposit(&mut self, entry: &mut PositionToken, amount: u64) -> Result<()> {
        require!(amount > 0, LedgerError::InvalidAmount);
        self.check_deposit_cap(amount)?;
        self.total_bare_amount = self
            .total_bare_amount
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        entry.bare_amount = entry
            .bare_amount
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(())
    }

    pub fn solely_withdraw(&mut self, entry: &mut PositionToken, amount: u64) -> Result<()> {
        require!(amount <= entry.bare_amount, LedgerError::InsufficientShares);
        self.total_bare_amount = self
            .total_bare_amount
            .checked_sub(amount)
            .ok_or(LedgerError::MathOverflow)?;
        entry.bare_amount -= amount;
        Ok(())
    }

    fn check_deposit_cap(&self, amount: u64) -> Result<()> {
        let total = self
            .pseudo_total_amount
            .checked_add(self.total_bare_amount as u128)
            .and_then(|v| v.checked_add(amount as u128))
            .ok_or(LedgerError::MathOverflow)?;
        require!(
            total <= self.max_deposit_amount as u128,
            LedgerError::PoolCapExceeded
        );
        Ok(())
    }

    // ── Borrow side ─────────────────────────────────────────

    pub fn borrow_to_shares(&mut self, entry: &mut PositionToken, amount: u64) -> Result<u128> {
        require!(amount > 0, LedgerError::InvalidAmount);
        require!(self.allow_borrow, LedgerError::NotAllowedToBorrow);
        require!(amount <= self.total_pool_amount, LedgerError::InsufficientLiquidity);

        let new_total_borrow = self
            .pseudo_total_borrow
            .checked_add(amount as u128)
            .ok_or(LedgerError::MathOverflow)?;
        require!(
            new_total_borrow <= self.borrow_cap as u128,
            LedgerError::BorrowCapExceeded
        );

        let shares = self.borrow_shares(amount as u128, true)?;
        self.total_pool_amount -= amount;
        self.pseudo_total_borrow = new_total_borrow;
        self.total_borrow_shares = self
            .total_borrow_shares
            .checked_add(shares)
            .ok_or(LedgerError::MathOverflow)?;
        entry.borrow_shares = entry
            .borrow_shares
            .checked_add(shares)
            .ok_or(LedgerError::MathOverflow)?;
        self.refresh_rate()?;
        Ok(shares)
    }

    /// Repays `shares` of debt; the amount owed is rounded up.
    pub fn payback_from_shares(&mut self, entry: &mut PositionToken, shares: u128) -> Result<u64> {
        require!(shares > 0, LedgerError::InvalidAmount);
        require!(shares <= entry.borrow_shares, LedgerError::InsufficientShares);
        let amount = self
            .borrow_amount(shares, true)?
            .min(self.pseudo_total_borrow);
        let amount = to_u64(amount)?;
        self.burn_borrow(entry, shares, amount)?;
        Ok(amount)
    }

    /// Repays up to `amount`, capped at the outstanding debt. Returns `(shares, amount pulled)`.
    pub fn payback_amount(&mut self, entry: &mut PositionToken, amount: u64) -> Result<(u128, u64)> {
        require!(amount > 0, LedgerError::InvalidAmount);
        let debt = self.borrow_amount(entry.borrow_shares, true)?;
        if amount as u128 >= debt {
            let shares = entry.borrow_shares;
            let pulled = self.payback_from_shares(entry, shares)?;
            return Ok((shares, pulled));
        }

        let shares = self.borrow_shares(amount as u128, false)?;
        require!(shares > 0, LedgerError::InvalidAmount);
        self.burn_borrow(entry, shares, amount)?;
        Ok((shares, amount))
    }

    fn burn_borrow(&mut self, entry: &mut PositionToken, shares: u128, amount: u64) -> Result<()> {
        self.total_pool_amount = self
            .total_pool_amount
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        self.pseudo_total_borrow = self.pseudo_total_borrow.saturating_sub(amount as u128);
        self.total_borrow_shares = self
            .total_borrow_shares
            .checked_sub(shares)
            .ok_or(LedgerError::MathOverflow)?;
        entry.borrow_shares -= shares;
        self.refresh_rate()
    }
}

fn convert(value: u128, numerator: u128, denominator: u128, round_up: bool) -> Result<u128> {
    if round_up {
        mul_div_up(value, numerator, denominator)
    } else {
        mul_div_down(value, numerator, denominator)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct PoolParams {
    pub allow_borrow: bool,
    pub collateral_factor: u128,
    pub max_deposit_amount: u64,
    pub borrow_cap: u64,
    pub min_pole: u128,
    pub max_pole: u128,
    pub multiplicative_factor: u128,
    pub pool_fee: u128,
    pub feed_id: [u8; 32],
    pub oracle_max_age: u64,
}

impl PoolParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.collateral_factor <= WAD, LedgerError::InvalidParams);
        require!(self.pool_fee <= MAX_POOL_FEE, LedgerError::InvalidParams);
        require!(self.multiplicative_factor > 0, LedgerError::InvalidParams);
        require!(self.max_deposit_amount > SEED_AMOUNT, LedgerError::InvalidParams);
        require!(self.oracle_max_age > 0, LedgerError::InvalidParams);
        Ok(())
    }
}
