use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

use crate::error::LedgerError;
use crate::ledger::LendingLedger;
use crate::oracle::PriceBook;
use crate::state::{LedgerConfig, Pool, PositionRecord, PositionToken};

/// Engine plus prices for one instruction.
///
/// Declared accounts are added by the handler, the rest of a position's token entries arrive as
/// `(pool, position_token, price_update)` triples in `remaining_accounts`. Nothing is written back
/// until the handler commits after the operation succeeded.
pub struct Session<'info> {
    pub ledger: LendingLedger,
    pub book: PriceBook,
    pools: Vec<Account<'info, Pool>>,
    entries: Vec<Account<'info, PositionToken>>,
}

impl<'info> Session<'info> {
    pub fn new(config: &LedgerConfig, now: i64) -> Self {
        Self {
            ledger: LendingLedger::from_config(config),
            book: PriceBook::new(now),
            pools: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn add_position(&mut self, record: &PositionRecord) {
        self.ledger.insert_position(record.clone());
    }

    pub fn add_pool(&mut self, pool: &Pool, price: &PriceUpdateV2) -> Result<()> {
        self.book.insert_pyth(pool, price)?;
        self.ledger.insert_pool(pool.clone());
        Ok(())
    }

    /// Entries freshly created by `init_if_needed` are left for the engine to populate.
    pub fn add_entry(&mut self, entry: &PositionToken) {
        if entry.is_initialized() {
            self.ledger.insert_entry(entry.clone());
        }
    }

    /// Loads the remaining triples of `position`. Triples repeating a loaded or `declared` mint
    /// are rejected.
    pub fn load_remaining(
        &mut self,
        remaining: &'info [AccountInfo<'info>],
        position: &Pubkey,
        declared: &[Pubkey],
    ) -> Result<()> {
        require!(
            remaining.len() % 3 == 0,
            LedgerError::MissingPositionAccounts
        );
        for triple in remaining.chunks(3) {
            require!(
                triple[0].is_writable && triple[1].is_writable,
                LedgerError::MissingPositionAccounts
            );
            let pool = Account::<Pool>::try_from(&triple[0])?;
            let entry = Account::<PositionToken>::try_from(&triple[1])?;
            let price = Account::<PriceUpdateV2>::try_from(&triple[2])?;

            require_keys_eq!(entry.position, *position, LedgerError::MissingPositionAccounts);
            require_keys_eq!(entry.mint, pool.mint, LedgerError::MissingPositionAccounts);
            require_keys_eq!(price.key(), pool.oracle, LedgerError::OracleAccountMismatch);
            require!(
                !declared.contains(&pool.mint) && !self.ledger.has_pool(&pool.mint),
                LedgerError::InvalidParams
            );

            self.add_pool(&pool, &price)?;
            self.add_entry(&entry);
            self.pools.push(pool);
            self.entries.push(entry);
        }
        Ok(())
    }

    /// Every token the position touched must be loaded before its collateral is valued.
    pub fn ensure_covered(&self, position: &Pubkey) -> Result<()> {
        let record = self.ledger.position(position)?;
        for mint in &record.tokens {
            require!(
                self.ledger.has_pool(mint) && self.ledger.entry(position, mint).is_some(),
                LedgerError::MissingPositionAccounts
            );
        }
        Ok(())
    }

    /// Engine state of a declared entry, stamped with its PDA bump.
    pub fn entry_state(&self, position: &Pubkey, mint: &Pubkey, bump: u8) -> Option<PositionToken> {
        self.ledger.entry(position, mint).map(|entry| PositionToken {
            bump,
            ..entry.clone()
        })
    }

    pub fn pool_state(&self, mint: &Pubkey) -> Result<Pool> {
        Ok(self.ledger.pool(mint)?.clone())
    }

    pub fn position_state(&self, position: &Pubkey) -> Result<PositionRecord> {
        Ok(self.ledger.position(position)?.clone())
    }

    /// Writes the remaining accounts back; declared accounts are serialized by Anchor on exit.
    pub fn commit(&mut self) -> Result<()> {
        for pool in self.pools.iter_mut() {
            let state = self.ledger.pool(&pool.mint)?.clone();
            pool.set_inner(state);
            pool.exit(&crate::ID)?;
        }
        for entry in self.entries.iter_mut() {
            if let Some(state) = self.ledger.entry(&entry.position, &entry.mint) {
                let state = state.clone();
                entry.set_inner(state);
                entry.exit(&crate::ID)?;
            }
        }
        Ok(())
    }
}
