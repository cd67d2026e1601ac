use anchor_lang::prelude::*;

use crate::constants::WAD;
use crate::error::LedgerError;
use crate::ledger::LendingLedger;
use crate::math::fixed_point::{bps_mul, mul_div_down, to_u64, wad_div, wad_mul};
use crate::oracle::PriceOracle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidationRequest {
    pub borrower: Pubkey,
    /// Position credited with the seized collateral.
    pub liquidator: Pubkey,
    pub payback_mint: Pubkey,
    pub wish_mint: Pubkey,
    pub payback_shares: u128,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LiquidationOutcome {
    /// Borrow tokens the liquidator pays in.
    pub payback_amount: u64,
    pub payback_value: u128,
    /// Reward actually delivered. Below the capped fee once the whole wish collateral is seized.
    pub reward_value: u128,
    /// Fraction (WAD) of the borrower's wish token collateral seized.
    pub wish_percentage: u128,
    /// Wish tokens paid out of bare collateral.
    pub bare_received: u64,
    /// Wish tokens paid out of pool liquidity.
    pub pool_tokens_received: u64,
    /// Lending shares moved to the liquidator where the pool could not pay in kind.
    pub shares_received: u128,
}

impl LiquidationOutcome {
    pub fn tokens_received(&self) -> u64 {
        self.bare_received.saturating_add(self.pool_tokens_received)
    }
}

/// Liquidator reward: `payback_value * base_reward`, capped at `max_fee`.
pub fn check_max_fee(payback_value: u128, base_reward: u128, max_fee: u128) -> Result<u128> {
    Ok(wad_mul(payback_value, base_reward)?.min(max_fee))
}

/// Fraction (WAD) of `collateral_value` covering the payback plus reward. One extra unit guards
/// against rounding the seizure below the settlement value; the result never exceeds 100%.
pub fn wish_percentage(
    collateral_value: u128,
    payback_value: u128,
    max_fee: u128,
    base_reward: u128,
) -> Result<u128> {
    require!(collateral_value > 0, LedgerError::InvalidAction);
    let reward = check_max_fee(payback_value, base_reward, max_fee)?;
    let covered = payback_value
        .checked_add(reward)
        .ok_or(LedgerError::MathOverflow)?;
    let percentage = wad_div(covered, collateral_value)?.saturating_add(1);
    Ok(percentage.min(WAD))
}

impl LendingLedger {
    pub fn calculate_wish_percentage(
        &self,
        position: &Pubkey,
        wish_mint: &Pubkey,
        payback_value: u128,
        max_fee: u128,
        base_reward: u128,
        oracle: &dyn PriceOracle,
    ) -> Result<u128> {
        let collateral_value = self.full_collateral_value(position, wish_mint, oracle)?;
        wish_percentage(collateral_value, payback_value, max_fee, base_reward)
    }

    /// Repays part of an over-leveraged position's debt and hands the liquidator collateral worth
    /// the repaid value plus the reward.
    ///
    /// Collateral comes out of the borrower's bare balance and pooled shares in equal proportion.
    /// Whatever the wish pool cannot pay out for lack of liquidity is credited to the liquidator's
    /// position as lending shares instead, so a liquidation never fails for illiquidity.
    pub fn liquidate(
        &mut self,
        request: &LiquidationRequest,
        caller: Pubkey,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<LiquidationOutcome> {
        let request = *request;
        self.atomic(&[request.borrower, request.liquidator], |ledger| {
            ledger.liquidate_inner(&request, caller, oracle, now)
        })
    }

    fn liquidate_inner(
        &mut self,
        request: &LiquidationRequest,
        caller: Pubkey,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<LiquidationOutcome> {
        let LiquidationRequest {
            borrower,
            liquidator,
            payback_mint,
            wish_mint,
            payback_shares,
        } = *request;
        require_keys_neq!(borrower, liquidator, LedgerError::InvalidAction);
        require!(payback_shares > 0, LedgerError::InvalidAmount);
        self.authorize_owner(&liquidator, &caller)?;

        self.sync_position(&borrower, &[payback_mint, wish_mint], now)?;

        // eligibility
        let (weighted, bare) = self.weighted_and_bare_collateral(&borrower, oracle)?;
        let borrow = self.total_borrow_value(&borrower, oracle)?;
        require!(borrow > weighted, LedgerError::LiquidationDenied);

        // payback sizing
        let borrow_shares = self
            .entry(&borrower, &payback_mint)
            .map_or(0, |e| e.borrow_shares);
        require!(payback_shares <= borrow_shares, LedgerError::InsufficientShares);
        // debt beyond the unweighted collateral can be closed out entirely
        let max_shares = if borrow > bare {
            borrow_shares
        } else {
            bps_mul(borrow_shares, self.liquidation_params().max_liquidation_bps)?
        };
        require!(payback_shares <= max_shares, LedgerError::TooManyShares);

        let payback_amount = to_u64(
            self.pool(&payback_mint)?
                .borrow_amount(payback_shares, true)?,
        )?;
        let payback_value = oracle.fresh_value_of(&payback_mint, payback_amount)?;

        // reward bound
        let params = *self.liquidation_params();
        let collateral_value = self.full_collateral_value(&borrower, &wish_mint, oracle)?;
        require!(collateral_value > 0, LedgerError::InvalidAction);
        let nominal_reward = check_max_fee(
            payback_value,
            params.base_reward_liquidation,
            params.max_fee_value,
        )?;
        let percentage = wish_percentage(
            collateral_value,
            payback_value,
            params.max_fee_value,
            params.base_reward_liquidation,
        )?;
        let reward_value = if percentage == WAD {
            nominal_reward.min(collateral_value.saturating_sub(payback_value))
        } else {
            nominal_reward
        };

        // settlement
        let (pool, entry) = self.pool_and_entry(borrower, payback_mint)?;
        let paid = pool.payback_from_shares(entry, payback_shares)?;

        let (wish_pool, wish_entry) = self.pool_and_entry(borrower, wish_mint)?;
        let bare_received = to_u64(mul_div_down(
            wish_entry.bare_amount as u128,
            percentage,
            WAD,
        )?)?;
        let seized_shares = mul_div_down(wish_entry.lending_shares, percentage, WAD)?;
        wish_pool.solely_withdraw(wish_entry, bare_received)?;

        let owed = wish_pool.lending_amount(seized_shares, false)?;
        let payable_shares = if owed <= wish_pool.total_pool_amount as u128 {
            seized_shares
        } else {
            wish_pool
                .lending_shares(wish_pool.total_pool_amount as u128, false)?
                .min(seized_shares)
        };
        let pool_tokens_received = if payable_shares > 0 {
            wish_pool.withdraw_from_shares(wish_entry, payable_shares)?
        } else {
            0
        };
        let shares_received = seized_shares - payable_shares;
        if shares_received > 0 {
            wish_entry.lending_shares -= shares_received;
            let (_, liquidator_entry) = self.pool_and_entry(liquidator, wish_mint)?;
            liquidator_entry.lending_shares = liquidator_entry
                .lending_shares
                .checked_add(shares_received)
                .ok_or(LedgerError::MathOverflow)?;
        }

        msg!(
            "liquidated {} borrow shares of {}: paid {} worth {}, seized {} wad, in kind {} bare {} shares {}",
            payback_shares,
            borrower,
            paid,
            payback_value,
            percentage,
            pool_tokens_received,
            bare_received,
            shares_received
        );

        Ok(LiquidationOutcome {
            payback_amount: paid,
            payback_value,
            reward_value,
            wish_percentage: percentage,
            bare_received,
            pool_tokens_received,
            shares_received,
        })
    }
}
