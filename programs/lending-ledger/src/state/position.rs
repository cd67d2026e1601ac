use anchor_lang::prelude::*;
use crate::constants::MAX_POSITION_TOKENS;
use crate::error::LedgerError;

/// Registry record of a position: who controls it and which tokens it has touched.
#[account]
#[derive(Debug, Default)]
pub struct PositionRecord {
    pub id: Pubkey,
    pub owner: Pubkey,
    /// Mints with a [`PositionToken`] entry, in first-touch order.
    pub tokens: Vec<Pubkey>,
    /// Locked positions only accept calls from the isolation authority.
    pub locked: bool,
    pub bump: u8,
}

impl PositionRecord {
    pub const LEN: usize = 8 + // discriminator
        32 + // id
        32 + // owner
        4 + 32 * MAX_POSITION_TOKENS + // tokens
        1 +  // locked
        1;   // bump

    pub fn new(id: Pubkey, owner: Pubkey) -> Self {
        Self {
            id,
            owner,
            ..Self::default()
        }
    }

    /// Registers `mint` on first touch.
    pub fn touch(&mut self, mint: Pubkey) -> Result<()> {
        if self.tokens.contains(&mint) {
            return Ok(());
        }
        require!(
            self.tokens.len() < MAX_POSITION_TOKENS,
            LedgerError::PositionFull
        );
        self.tokens.push(mint);
        Ok(())
    }
}

/// Per (position, token) balances.
#[account]
#[derive(Debug, Default)]
pub struct PositionToken {
    pub position: Pubkey,
    pub mint: Pubkey,
    pub lending_shares: u128,
    pub borrow_shares: u128,
    pub bare_amount: u64,
    /// Counts towards collateral.
    pub is_collateral: bool,
    /// Set once the owner explicitly withdrew the token from collateral.
    pub uncollateralized_override: bool,
    pub bump: u8,
}

impl PositionToken {
    pub const LEN: usize = 8 + 32 + 32 + 16 + 16 + 8 + 1 + 1 + 1;

    pub fn new(position: Pubkey, mint: Pubkey) -> Self {
        Self {
            position,
            mint,
            is_collateral: true,
            ..Self::default()
        }
    }

    /// Zeroed accounts freshly created by `init_if_needed` carry no position.
    pub fn is_initialized(&self) -> bool {
        self.position != Pubkey::default()
    }
}
