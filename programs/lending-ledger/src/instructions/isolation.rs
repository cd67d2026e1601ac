use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

use crate::constants::*;
use crate::error::LedgerError;
use crate::events::{Borrowed, Deposited};
use crate::instructions::loader::Session;
use crate::instructions::token_flow::{transfer_in, transfer_out};
use crate::state::{LedgerConfig, Pool, PositionRecord, PositionToken};

#[derive(Accounts)]
pub struct IsolationOpen<'info> {
    #[account(mut)]
    pub isolation_authority: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED],
        bump = config.bump,
        constraint = config.isolation_authority == isolation_authority.key() @ LedgerError::Unauthorized,
    )]
    pub config: Box<Account<'info, LedgerConfig>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, position.id.as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, PositionRecord>>,

    #[account(
        mut,
        seeds = [POOL_SEED, collateral_pool.mint.as_ref()],
        bump = collateral_pool.bump,
    )]
    pub collateral_pool: Box<Account<'info, Pool>>,

    #[account(
        init_if_needed,
        payer = isolation_authority,
        space = PositionToken::LEN,
        seeds = [POSITION_TOKEN_SEED, position.id.as_ref(), collateral_pool.mint.as_ref()],
        bump,
    )]
    pub collateral_token: Box<Account<'info, PositionToken>>,

    #[account(mut, address = collateral_pool.vault @ LedgerError::InvalidParams)]
    pub collateral_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = collateral_source.mint == collateral_pool.mint @ LedgerError::InvalidParams,
    )]
    pub collateral_source: Box<Account<'info, TokenAccount>>,

    #[account(address = collateral_pool.oracle @ LedgerError::OracleAccountMismatch)]
    pub collateral_price: Box<Account<'info, PriceUpdateV2>>,

    #[account(
        mut,
        seeds = [POOL_SEED, borrow_pool.mint.as_ref()],
        bump = borrow_pool.bump,
        constraint = borrow_pool.mint != collateral_pool.mint @ LedgerError::InvalidAction,
    )]
    pub borrow_pool: Box<Account<'info, Pool>>,

    #[account(
        init_if_needed,
        payer = isolation_authority,
        space = PositionToken::LEN,
        seeds = [POSITION_TOKEN_SEED, position.id.as_ref(), borrow_pool.mint.as_ref()],
        bump,
    )]
    pub borrow_token: Box<Account<'info, PositionToken>>,

    #[account(mut, address = borrow_pool.vault @ LedgerError::InvalidParams)]
    pub borrow_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = borrow_destination.mint == borrow_pool.mint @ LedgerError::InvalidParams,
    )]
    pub borrow_destination: Box<Account<'info, TokenAccount>>,

    #[account(address = borrow_pool.oracle @ LedgerError::OracleAccountMismatch)]
    pub borrow_price: Box<Account<'info, PriceUpdateV2>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Opens an isolated leg on a locked position: bare collateral in, borrow out.
pub fn isolation_open<'info>(
    ctx: Context<'_, '_, 'info, 'info, IsolationOpen<'info>>,
    collateral_amount: u64,
    borrow_amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let collateral_bump = ctx.bumps.collateral_token;
    let borrow_bump = ctx.bumps.borrow_token;
    let a = ctx.accounts;

    let position = a.position.id;
    let collateral_mint = a.collateral_pool.mint;
    let borrow_mint = a.borrow_pool.mint;

    let mut session = Session::new(&a.config, now);
    session.add_position(&a.position);
    session.add_pool(&a.collateral_pool, &a.collateral_price)?;
    session.add_pool(&a.borrow_pool, &a.borrow_price)?;
    session.add_entry(&a.collateral_token);
    session.add_entry(&a.borrow_token);
    session.load_remaining(ctx.remaining_accounts, &position, &[collateral_mint, borrow_mint])?;
    session.ensure_covered(&position)?;

    let shares = session.ledger.isolation_open(
        position,
        a.isolation_authority.key(),
        collateral_mint,
        collateral_amount,
        borrow_mint,
        borrow_amount,
        &session.book,
        now,
    )?;
    let borrow_rate = session.ledger.pool(&borrow_mint)?.borrow_rate;

    a.position.set_inner(session.position_state(&position)?);
    a.collateral_pool.set_inner(session.pool_state(&collateral_mint)?);
    a.borrow_pool.set_inner(session.pool_state(&borrow_mint)?);
    if let Some(entry) = session.entry_state(&position, &collateral_mint, collateral_bump) {
        a.collateral_token.set_inner(entry);
    }
    if let Some(entry) = session.entry_state(&position, &borrow_mint, borrow_bump) {
        a.borrow_token.set_inner(entry);
    }
    session.commit()?;

    transfer_in(
        &a.token_program,
        &a.collateral_source,
        &a.collateral_vault,
        &a.isolation_authority,
        collateral_amount,
    )?;
    transfer_out(
        &a.token_program,
        &a.borrow_pool,
        &a.borrow_vault,
        &a.borrow_destination,
        borrow_amount,
    )?;

    emit!(Deposited {
        position,
        mint: collateral_mint,
        depositor: a.isolation_authority.key(),
        amount: collateral_amount,
        shares: 0,
        solely: true,
    });
    emit!(Borrowed {
        position,
        mint: borrow_mint,
        amount: borrow_amount,
        shares,
        borrow_rate,
    });
    Ok(())
}
