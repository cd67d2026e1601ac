use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

use crate::constants::*;
use crate::error::LedgerError;
use crate::instructions::loader::Session;
use crate::instructions::token_flow::{transfer_in, transfer_out};
use crate::state::{LedgerConfig, Pool, PositionRecord, PositionToken};

/// Accounts shared by every single-pool position action.
#[derive(Accounts)]
pub struct PoolAction<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(seeds = [LEDGER_SEED], bump = config.bump)]
    pub config: Box<Account<'info, LedgerConfig>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, position.id.as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, PositionRecord>>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.mint.as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        init_if_needed,
        payer = signer,
        space = PositionToken::LEN,
        seeds = [POSITION_TOKEN_SEED, position.id.as_ref(), pool.mint.as_ref()],
        bump,
    )]
    pub position_token: Box<Account<'info, PositionToken>>,

    #[account(
        mut,
        address = pool.vault @ LedgerError::InvalidParams,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_token_account.mint == pool.mint @ LedgerError::InvalidParams,
    )]
    pub user_token_account: Box<Account<'info, TokenAccount>>,

    #[account(address = pool.oracle @ LedgerError::OracleAccountMismatch)]
    pub price_update: Box<Account<'info, PriceUpdateV2>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> PoolAction<'info> {
    pub(crate) fn session(
        &self,
        remaining: &'info [AccountInfo<'info>],
        now: i64,
    ) -> Result<Session<'info>> {
        let mut session = Session::new(&self.config, now);
        session.add_position(&self.position);
        session.add_pool(&self.pool, &self.price_update)?;
        session.add_entry(&self.position_token);
        session.load_remaining(remaining, &self.position.id, &[self.pool.mint])?;
        Ok(session)
    }

    /// Session with every token of the position loaded, for solvency-checked actions.
    pub(crate) fn valued_session(
        &self,
        remaining: &'info [AccountInfo<'info>],
        now: i64,
    ) -> Result<Session<'info>> {
        let session = self.session(remaining, now)?;
        session.ensure_covered(&self.position.id)?;
        Ok(session)
    }

    pub(crate) fn commit(&mut self, session: &mut Session<'info>, entry_bump: u8) -> Result<()> {
        let id = self.position.id;
        let mint = self.pool.mint;
        self.position.set_inner(session.position_state(&id)?);
        self.pool.set_inner(session.pool_state(&mint)?);
        if let Some(entry) = session.entry_state(&id, &mint, entry_bump) {
            self.position_token.set_inner(entry);
        }
        session.commit()
    }

    pub(crate) fn pull(&self, amount: u64) -> Result<()> {
        transfer_in(
            &self.token_program,
            &self.user_token_account,
            &self.vault,
            &self.signer,
            amount,
        )
    }

    pub(crate) fn push(&self, amount: u64) -> Result<()> {
        transfer_out(
            &self.token_program,
            &self.pool,
            &self.vault,
            &self.user_token_account,
            amount,
        )
    }
}
