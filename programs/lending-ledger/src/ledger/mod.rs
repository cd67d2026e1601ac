//! In-memory lending engine.
//!
//! The engine owns every pool and position it was loaded with and runs each operation as one
//! atomic unit: either the whole mutation lands or the store is restored to what it held before
//! the call. On-chain, instruction handlers load the accounts they were given, run one operation
//! and write the accounts back.

pub mod accessor;
pub mod guard;
pub mod liquidation;
pub mod operations;
pub mod valuation;

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::error::LedgerError;
use crate::state::{LedgerConfig, LiquidationParams, Pool, PoolParams, PositionRecord, PositionToken};

pub use accessor::{AccessOutcome, DirectPool, PoolAccessor, WrappedReceipt};
pub use guard::ReentrancyGuard;
pub use liquidation::{check_max_fee, wish_percentage, LiquidationOutcome, LiquidationRequest};

/// Resolves the controlling party of a position.
pub trait IdentityRegistry {
    fn owner_of(&self, position: &Pubkey) -> Result<Pubkey>;
}

#[derive(Clone, Debug, Default)]
pub struct LendingLedger {
    pools: BTreeMap<Pubkey, Pool>,
    positions: BTreeMap<Pubkey, PositionRecord>,
    entries: BTreeMap<(Pubkey, Pubkey), PositionToken>,
    liquidation: LiquidationParams,
    isolation_authority: Pubkey,
    guard: ReentrancyGuard,
}

struct Snapshot {
    pools: BTreeMap<Pubkey, Pool>,
    positions: BTreeMap<Pubkey, PositionRecord>,
    entries: BTreeMap<(Pubkey, Pubkey), PositionToken>,
}

impl LendingLedger {
    pub fn new(liquidation: LiquidationParams, isolation_authority: Pubkey) -> Self {
        Self {
            liquidation,
            isolation_authority,
            ..Self::default()
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.liquidation, config.isolation_authority)
    }

    pub fn liquidation_params(&self) -> &LiquidationParams {
        &self.liquidation
    }

    pub fn isolation_authority(&self) -> Pubkey {
        self.isolation_authority
    }

    // ── Store ───────────────────────────────────────────────

    pub fn insert_pool(&mut self, pool: Pool) {
        self.pools.insert(pool.mint, pool);
    }

    pub fn insert_position(&mut self, record: PositionRecord) {
        self.positions.insert(record.id, record);
    }

    pub fn insert_entry(&mut self, entry: PositionToken) {
        self.entries.insert((entry.position, entry.mint), entry);
    }

    pub fn create_pool(
        &mut self,
        mint: Pubkey,
        decimals: u8,
        params: &PoolParams,
        now: i64,
    ) -> Result<()> {
        require!(!self.pools.contains_key(&mint), LedgerError::InvalidParams);
        let pool = Pool::new(mint, decimals, params, now)?;
        msg!("pool {} created with pole {}", mint, pool.pole.current_pole);
        self.insert_pool(pool);
        Ok(())
    }

    pub fn create_position(&mut self, id: Pubkey, owner: Pubkey) -> Result<()> {
        require!(!self.positions.contains_key(&id), LedgerError::InvalidParams);
        self.insert_position(PositionRecord::new(id, owner));
        Ok(())
    }

    pub fn pool(&self, mint: &Pubkey) -> Result<&Pool> {
        self.pools
            .get(mint)
            .ok_or_else(|| error!(LedgerError::UnknownPool))
    }

    pub fn position(&self, id: &Pubkey) -> Result<&PositionRecord> {
        self.positions
            .get(id)
            .ok_or_else(|| error!(LedgerError::UnknownPosition))
    }

    pub fn entry(&self, position: &Pubkey, mint: &Pubkey) -> Option<&PositionToken> {
        self.entries.get(&(*position, *mint))
    }

    pub fn has_pool(&self, mint: &Pubkey) -> bool {
        self.pools.contains_key(mint)
    }

    /// No operation is in flight.
    pub fn is_idle(&self) -> bool {
        self.guard.is_idle()
    }

    /// Runs `op` as one indivisible mutation over `positions`.
    ///
    /// The positions stay guarded for the duration of `op`; a nested call touching any of them
    /// fails with `ReentrantCall`. On error every pool and position is restored.
    pub fn atomic<R>(
        &mut self,
        positions: &[Pubkey],
        op: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.guard.enter(positions)?;
        let snapshot = Snapshot {
            pools: self.pools.clone(),
            positions: self.positions.clone(),
            entries: self.entries.clone(),
        };

        let result = op(self);
        if result.is_err() {
            self.pools = snapshot.pools;
            self.positions = snapshot.positions;
            self.entries = snapshot.entries;
        }
        self.guard.exit(positions);
        result
    }

    // ── Internal access ─────────────────────────────────────

    pub(crate) fn pool_mut(&mut self, mint: &Pubkey) -> Result<&mut Pool> {
        self.pools
            .get_mut(mint)
            .ok_or_else(|| error!(LedgerError::UnknownPool))
    }

    pub(crate) fn position_mut(&mut self, id: &Pubkey) -> Result<&mut PositionRecord> {
        self.positions
            .get_mut(id)
            .ok_or_else(|| error!(LedgerError::UnknownPosition))
    }

    /// Pool and entry for `(position, mint)`, registering the token on the position on first
    /// touch.
    pub(crate) fn pool_and_entry(
        &mut self,
        position: Pubkey,
        mint: Pubkey,
    ) -> Result<(&mut Pool, &mut PositionToken)> {
        require!(self.pools.contains_key(&mint), LedgerError::UnknownPool);
        self.position_mut(&position)?.touch(mint)?;

        let pool = self
            .pools
            .get_mut(&mint)
            .ok_or_else(|| error!(LedgerError::UnknownPool))?;
        let entry = self
            .entries
            .entry((position, mint))
            .or_insert_with(|| PositionToken::new(position, mint));
        Ok((pool, entry))
    }

    pub(crate) fn sync_pools(&mut self, mints: &[Pubkey], now: i64) -> Result<()> {
        for mint in mints {
            self.pool_mut(mint)?.synchronize(now)?;
        }
        Ok(())
    }

    /// Synchronizes every pool the position holds plus `extra`.
    pub(crate) fn sync_position(&mut self, position: &Pubkey, extra: &[Pubkey], now: i64) -> Result<()> {
        let mut mints = self.position(position)?.tokens.clone();
        for mint in extra {
            if !mints.contains(mint) {
                mints.push(*mint);
            }
        }
        self.sync_pools(&mints, now)
    }

    /// Owner-only actions. Locked positions answer to the isolation authority alone.
    pub(crate) fn authorize_owner(&self, position: &Pubkey, caller: &Pubkey) -> Result<()> {
        let record = self.position(position)?;
        if record.locked {
            require_keys_eq!(*caller, self.isolation_authority, LedgerError::PositionLocked);
            return Ok(());
        }
        require_keys_eq!(self.owner_of(position)?, *caller, LedgerError::NotOwner);
        Ok(())
    }

    /// Actions open to any caller, unless the position is locked.
    pub(crate) fn authorize_any(&self, position: &Pubkey, caller: &Pubkey) -> Result<()> {
        let record = self.position(position)?;
        if record.locked {
            require_keys_eq!(*caller, self.isolation_authority, LedgerError::PositionLocked);
        }
        Ok(())
    }
}

impl IdentityRegistry for LendingLedger {
    fn owner_of(&self, position: &Pubkey) -> Result<Pubkey> {
        Ok(self.position(position)?.owner)
    }
}
