use anchor_lang::prelude::*;
use crate::constants::RECEIPT_RATE_SCALE;
use crate::error::LedgerError;
use crate::math::fixed_point::{mul_div_down, mul_div_up, to_u64};

/// Yield-bearing receipt over a base token. The ledger books the receipt mint as an ordinary
/// pool; callers keep dealing in the base token.
#[account]
#[derive(Debug, Default)]
pub struct ReceiptWrapper {
    pub base_mint: Pubkey,
    pub receipt_mint: Pubkey,
    pub base_vault: Pubkey,
    /// Tracked base balance backing the receipts. Direct transfers to the vault are ignored.
    pub total_base_held: u64,
    pub total_receipt_supply: u64,
    pub total_yield_accrued: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl ReceiptWrapper {
    pub const LEN: usize = 8 + 32 + 32 + 32 + 8 + 8 + 8 + 1 + 1;

    /// Base per receipt, scaled by [`RECEIPT_RATE_SCALE`]. Starts at 1:1.
    pub fn exchange_rate(&self) -> Result<u64> {
        if self.total_receipt_supply == 0 {
            return Ok(RECEIPT_RATE_SCALE as u64);
        }
        to_u64(mul_div_down(
            self.total_base_held as u128,
            RECEIPT_RATE_SCALE,
            self.total_receipt_supply as u128,
        )?)
    }

    pub fn receipt_for_base(&self, base: u64) -> Result<u64> {
        if self.total_receipt_supply == 0 || self.total_base_held == 0 {
            return Ok(base);
        }
        to_u64(mul_div_down(
            base as u128,
            self.total_receipt_supply as u128,
            self.total_base_held as u128,
        )?)
    }

    /// Receipts needed to release at least `base`.
    pub fn receipt_for_base_up(&self, base: u64) -> Result<u64> {
        if self.total_receipt_supply == 0 || self.total_base_held == 0 {
            return Ok(base);
        }
        to_u64(mul_div_up(
            base as u128,
            self.total_receipt_supply as u128,
            self.total_base_held as u128,
        )?)
    }

    pub fn base_for_receipt(&self, receipt: u64) -> Result<u64> {
        if self.total_receipt_supply == 0 {
            return Ok(receipt);
        }
        to_u64(mul_div_down(
            receipt as u128,
            self.total_base_held as u128,
            self.total_receipt_supply as u128,
        )?)
    }

    /// Books `base` in and returns the receipts to mint.
    pub fn wrap_base(&mut self, base: u64) -> Result<u64> {
        let receipt = self.receipt_for_base(base)?;
        require!(receipt > 0, LedgerError::InvalidAmount);
        self.total_base_held = self
            .total_base_held
            .checked_add(base)
            .ok_or(LedgerError::MathOverflow)?;
        self.total_receipt_supply = self
            .total_receipt_supply
            .checked_add(receipt)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(receipt)
    }

    /// Burns `receipt` and returns the base to release.
    pub fn unwrap_receipt(&mut self, receipt: u64) -> Result<u64> {
        require!(receipt > 0, LedgerError::InvalidAmount);
        require!(
            receipt <= self.total_receipt_supply,
            LedgerError::InsufficientShares
        );
        let base = self.base_for_receipt(receipt)?;
        self.total_base_held -= base;
        self.total_receipt_supply -= receipt;
        Ok(base)
    }

    /// Adds yield to the backing without minting receipts.
    pub fn donate(&mut self, base: u64) -> Result<()> {
        require!(base > 0, LedgerError::InvalidAmount);
        require!(self.total_receipt_supply > 0, LedgerError::InvalidAction);
        self.total_base_held = self
            .total_base_held
            .checked_add(base)
            .ok_or(LedgerError::MathOverflow)?;
        self.total_yield_accrued = self
            .total_yield_accrued
            .checked_add(base)
            .ok_or(LedgerError::MathOverflow)?;
        Ok(())
    }
}
