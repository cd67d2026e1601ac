use anchor_lang::prelude::*;

use crate::constants::WAD;
use crate::error::LedgerError;
use crate::ledger::LendingLedger;
use crate::math::fixed_point::{to_u64, wad_div_up, wad_mul};
use crate::oracle::PriceOracle;
use crate::state::PositionToken;

impl LendingLedger {
    /// Pooled claim of `position` in `mint`, rounded down.
    pub fn lending_amount(&self, position: &Pubkey, mint: &Pubkey) -> Result<u64> {
        match self.entry(position, mint) {
            Some(entry) => self.pooled_amount(entry),
            None => Ok(0),
        }
    }

    /// Outstanding debt of `position` in `mint`, rounded up.
    pub fn borrow_amount(&self, position: &Pubkey, mint: &Pubkey) -> Result<u64> {
        match self.entry(position, mint) {
            Some(entry) if entry.borrow_shares > 0 => {
                to_u64(self.pool(mint)?.borrow_amount(entry.borrow_shares, true)?)
            }
            _ => Ok(0),
        }
    }

    fn pooled_amount(&self, entry: &PositionToken) -> Result<u64> {
        if entry.lending_shares == 0 {
            return Ok(0);
        }
        to_u64(self.pool(&entry.mint)?.lending_amount(entry.lending_shares, false)?)
    }

    fn collateral_amount(&self, entry: &PositionToken) -> Result<u64> {
        self.pooled_amount(entry)?
            .checked_add(entry.bare_amount)
            .ok_or_else(|| error!(LedgerError::MathOverflow))
    }

    fn entries_of<'a>(&'a self, position: &Pubkey) -> Result<impl Iterator<Item = &'a PositionToken>> {
        let record = self.position(position)?;
        let id = record.id;
        Ok(record
            .tokens
            .iter()
            .filter_map(move |mint| self.entry(&id, mint)))
    }

    /// Unweighted value of everything `position` holds in `mint` as collateral.
    pub fn full_collateral_value(
        &self,
        position: &Pubkey,
        mint: &Pubkey,
        oracle: &dyn PriceOracle,
    ) -> Result<u128> {
        let Some(entry) = self.entry(position, mint) else {
            return Ok(0);
        };
        if !entry.is_collateral {
            return Ok(0);
        }
        let amount = self.collateral_amount(entry)?;
        if amount == 0 {
            return Ok(0);
        }
        oracle.fresh_value_of(mint, amount)
    }

    /// `(weighted, bare)` collateral value over every token flagged as collateral.
    pub fn weighted_and_bare_collateral(
        &self,
        position: &Pubkey,
        oracle: &dyn PriceOracle,
    ) -> Result<(u128, u128)> {
        let mut weighted = 0u128;
        let mut bare = 0u128;
        for entry in self.entries_of(position)? {
            if !entry.is_collateral {
                continue;
            }
            let amount = self.collateral_amount(entry)?;
            if amount == 0 {
                continue;
            }
            let value = oracle.fresh_value_of(&entry.mint, amount)?;
            let factor = self.pool(&entry.mint)?.collateral_factor;
            bare = bare.checked_add(value).ok_or(LedgerError::MathOverflow)?;
            weighted = weighted
                .checked_add(wad_mul(value, factor)?)
                .ok_or(LedgerError::MathOverflow)?;
        }
        Ok((weighted, bare))
    }

    pub fn total_borrow_value(&self, position: &Pubkey, oracle: &dyn PriceOracle) -> Result<u128> {
        let mut total = 0u128;
        for entry in self.entries_of(position)? {
            if entry.borrow_shares == 0 {
                continue;
            }
            let amount = self.borrow_amount(position, &entry.mint)?;
            let value = oracle.fresh_value_of(&entry.mint, amount)?;
            total = total.checked_add(value).ok_or(LedgerError::MathOverflow)?;
        }
        Ok(total)
    }

    /// Borrow value over weighted collateral (WAD), rounded up. `u128::MAX` for debt without
    /// collateral.
    pub fn debt_ratio(&self, position: &Pubkey, oracle: &dyn PriceOracle) -> Result<u128> {
        let borrow = self.total_borrow_value(position, oracle)?;
        if borrow == 0 {
            return Ok(0);
        }
        let (weighted, _) = self.weighted_and_bare_collateral(position, oracle)?;
        if weighted == 0 {
            return Ok(u128::MAX);
        }
        wad_div_up(borrow, weighted)
    }

    /// Largest further borrow of `mint` the position's collateral still covers.
    pub fn borrow_limit_amount(
        &self,
        position: &Pubkey,
        mint: &Pubkey,
        oracle: &dyn PriceOracle,
    ) -> Result<u64> {
        let (weighted, _) = self.weighted_and_bare_collateral(position, oracle)?;
        let borrow = self.total_borrow_value(position, oracle)?;
        require!(!oracle.is_stale(mint)?, LedgerError::StalePrice);
        oracle.amount_of(mint, weighted.saturating_sub(borrow))
    }

    pub fn is_liquidatable(&self, position: &Pubkey, oracle: &dyn PriceOracle) -> Result<bool> {
        Ok(self.debt_ratio(position, oracle)? > WAD)
    }

    pub(crate) fn ensure_solvent(&self, position: &Pubkey, oracle: &dyn PriceOracle) -> Result<()> {
        let borrow = self.total_borrow_value(position, oracle)?;
        if borrow == 0 {
            return Ok(());
        }
        let (weighted, _) = self.weighted_and_bare_collateral(position, oracle)?;
        require!(borrow <= weighted, LedgerError::ResultsInBadDebt);
        Ok(())
    }
}
