use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::ledger::accessor::{AccessOutcome, DirectPool, PoolAccessor};
use crate::ledger::LendingLedger;
use crate::oracle::PriceOracle;

impl LendingLedger {
    // ── Deposits ────────────────────────────────────────────

    pub fn deposit(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<u128> {
        let outcome = self.deposit_via(&DirectPool::new(mint), position, caller, amount, now)?;
        Ok(outcome.shares)
    }

    pub fn deposit_via(
        &mut self,
        accessor: &dyn PoolAccessor,
        position: Pubkey,
        caller: Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<AccessOutcome> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_any(&position, &caller)?;
            let mint = accessor.pool_mint();
            let pool_amount = accessor.to_pool_amount(amount)?;

            ledger.sync_pools(&[mint], now)?;
            let (pool, entry) = ledger.pool_and_entry(position, mint)?;
            let shares = pool.deposit_to_shares(entry, pool_amount)?;
            Ok(AccessOutcome {
                pool_amount,
                caller_amount: amount,
                shares,
            })
        })
    }

    pub fn solely_deposit(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<()> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_any(&position, &caller)?;
            ledger.sync_pools(&[mint], now)?;
            let (pool, entry) = ledger.pool_and_entry(position, mint)?;
            pool.solely_deposit(entry, amount)
        })
    }

    // ── Withdrawals ─────────────────────────────────────────

    /// Withdraws exactly `amount` of pooled tokens. Returns the shares burned.
    pub fn withdraw(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        amount: u64,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<u128> {
        let outcome =
            self.withdraw_via(&DirectPool::new(mint), position, caller, amount, oracle, now)?;
        Ok(outcome.shares)
    }

    pub fn withdraw_via(
        &mut self,
        accessor: &dyn PoolAccessor,
        position: Pubkey,
        caller: Pubkey,
        amount: u64,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<AccessOutcome> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_owner(&position, &caller)?;
            let mint = accessor.pool_mint();
            ledger.sync_position(&position, &[mint], now)?;

            let pool_amount = accessor.to_pool_amount_up(amount)?;
            let (pool, entry) = ledger.pool_and_entry(position, mint)?;
            let shares = pool.withdraw_amount(entry, pool_amount)?;
            ledger.ensure_solvent(&position, oracle)?;

            Ok(AccessOutcome {
                pool_amount,
                caller_amount: accessor.to_caller_amount(pool_amount)?,
                shares,
            })
        })
    }

    /// Redeems `shares` of pooled tokens. Returns the amount released.
    pub fn withdraw_shares(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        shares: u128,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<u64> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_owner(&position, &caller)?;
            ledger.sync_position(&position, &[mint], now)?;
            let (pool, entry) = ledger.pool_and_entry(position, mint)?;
            let amount = pool.withdraw_from_shares(entry, shares)?;
            ledger.ensure_solvent(&position, oracle)?;
            Ok(amount)
        })
    }

    pub fn solely_withdraw(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        amount: u64,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<()> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_owner(&position, &caller)?;
            require!(amount > 0, LedgerError::InvalidAmount);
            ledger.sync_position(&position, &[mint], now)?;
            let (pool, entry) = ledger.pool_and_entry(position, mint)?;
            pool.solely_withdraw(entry, amount)?;
            ledger.ensure_solvent(&position, oracle)
        })
    }

    // ── Borrowing ───────────────────────────────────────────

    /// Borrows exactly `amount`. Returns the borrow shares minted.
    pub fn borrow(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        amount: u64,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<u128> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_owner(&position, &caller)?;
            ledger.sync_position(&position, &[mint], now)?;
            let (pool, entry) = ledger.pool_and_entry(position, mint)?;
            let shares = pool.borrow_to_shares(entry, amount)?;
            ledger.ensure_solvent(&position, oracle)?;
            Ok(shares)
        })
    }

    /// Repays up to `amount`. Returns `(shares burned, amount pulled)`; the pulled amount never
    /// exceeds the outstanding debt.
    pub fn payback(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<(u128, u64)> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_any(&position, &caller)?;
            ledger.sync_pools(&[mint], now)?;
            let (pool, entry) = ledger.pool_and_entry(position, mint)?;
            pool.payback_amount(entry, amount)
        })
    }

    pub fn payback_shares(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        shares: u128,
        now: i64,
    ) -> Result<u64> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_any(&position, &caller)?;
            ledger.sync_pools(&[mint], now)?;
            let (pool, entry) = ledger.pool_and_entry(position, mint)?;
            pool.payback_from_shares(entry, shares)
        })
    }

    // ── Collateral flags ────────────────────────────────────

    /// Marks a token as collateral or takes it out. Taking it out is solvency checked and sticks
    /// across later deposits until the owner opts back in.
    pub fn set_collateral(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        mint: Pubkey,
        enabled: bool,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<()> {
        self.atomic(&[position], |ledger| {
            ledger.authorize_owner(&position, &caller)?;
            ledger.sync_position(&position, &[mint], now)?;
            let (_, entry) = ledger.pool_and_entry(position, mint)?;
            entry.is_collateral = enabled;
            entry.uncollateralized_override = !enabled;
            if !enabled {
                ledger.ensure_solvent(&position, oracle)?;
            }
            Ok(())
        })
    }

    // ── Isolation mode ──────────────────────────────────────

    pub fn lock_position(&mut self, position: Pubkey, owner: Pubkey, authority: Pubkey) -> Result<()> {
        require_keys_eq!(authority, self.isolation_authority(), LedgerError::Unauthorized);
        let record = self.position_mut(&position)?;
        require_keys_eq!(record.owner, owner, LedgerError::NotOwner);
        require!(!record.locked, LedgerError::InvalidAction);
        record.locked = true;
        Ok(())
    }

    pub fn unlock_position(&mut self, position: Pubkey, authority: Pubkey) -> Result<()> {
        require_keys_eq!(authority, self.isolation_authority(), LedgerError::Unauthorized);
        let record = self.position_mut(&position)?;
        require!(record.locked, LedgerError::InvalidAction);
        record.locked = false;
        Ok(())
    }

    /// Bare collateral deposit plus borrow on a locked position, as one unit. Both pools are
    /// synchronized before the solvency check.
    #[allow(clippy::too_many_arguments)]
    pub fn isolation_open(
        &mut self,
        position: Pubkey,
        caller: Pubkey,
        collateral_mint: Pubkey,
        collateral_amount: u64,
        borrow_mint: Pubkey,
        borrow_amount: u64,
        oracle: &dyn PriceOracle,
        now: i64,
    ) -> Result<u128> {
        self.atomic(&[position], |ledger| {
            require_keys_eq!(caller, ledger.isolation_authority(), LedgerError::Unauthorized);
            require!(ledger.position(&position)?.locked, LedgerError::InvalidAction);
            ledger.sync_position(&position, &[collateral_mint, borrow_mint], now)?;

            let (pool, entry) = ledger.pool_and_entry(position, collateral_mint)?;
            pool.solely_deposit(entry, collateral_amount)?;
            let (pool, entry) = ledger.pool_and_entry(position, borrow_mint)?;
            let shares = pool.borrow_to_shares(entry, borrow_amount)?;

            ledger.ensure_solvent(&position, oracle)?;
            Ok(shares)
        })
    }
}
