use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

use crate::constants::*;
use crate::error::LedgerError;
use crate::events::Liquidated;
use crate::instructions::loader::Session;
use crate::instructions::token_flow::{transfer_in, transfer_out};
use crate::ledger::LiquidationRequest;
use crate::state::{LedgerConfig, Pool, PositionRecord, PositionToken};

#[derive(Accounts)]
pub struct Liquidate<'info> {
    #[account(mut)]
    pub liquidator: Signer<'info>,

    #[account(seeds = [LEDGER_SEED], bump = config.bump)]
    pub config: Box<Account<'info, LedgerConfig>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, borrower_position.id.as_ref()],
        bump = borrower_position.bump,
    )]
    pub borrower_position: Box<Account<'info, PositionRecord>>,

    /// Receives the seized collateral.
    #[account(
        mut,
        seeds = [POSITION_SEED, liquidator_position.id.as_ref()],
        bump = liquidator_position.bump,
    )]
    pub liquidator_position: Box<Account<'info, PositionRecord>>,

    #[account(
        mut,
        seeds = [POOL_SEED, payback_pool.mint.as_ref()],
        bump = payback_pool.bump,
    )]
    pub payback_pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [POOL_SEED, wish_pool.mint.as_ref()],
        bump = wish_pool.bump,
    )]
    pub wish_pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [POSITION_TOKEN_SEED, borrower_position.id.as_ref(), payback_pool.mint.as_ref()],
        bump = borrower_payback_token.bump,
    )]
    pub borrower_payback_token: Box<Account<'info, PositionToken>>,

    #[account(
        mut,
        seeds = [POSITION_TOKEN_SEED, borrower_position.id.as_ref(), wish_pool.mint.as_ref()],
        bump = borrower_wish_token.bump,
    )]
    pub borrower_wish_token: Box<Account<'info, PositionToken>>,

    #[account(
        init_if_needed,
        payer = liquidator,
        space = PositionToken::LEN,
        seeds = [POSITION_TOKEN_SEED, liquidator_position.id.as_ref(), wish_pool.mint.as_ref()],
        bump,
    )]
    pub liquidator_wish_token: Box<Account<'info, PositionToken>>,

    #[account(mut, address = payback_pool.vault @ LedgerError::InvalidParams)]
    pub payback_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = wish_pool.vault @ LedgerError::InvalidParams)]
    pub wish_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = liquidator_payback_account.mint == payback_pool.mint @ LedgerError::InvalidParams,
    )]
    pub liquidator_payback_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = liquidator_wish_account.mint == wish_pool.mint @ LedgerError::InvalidParams,
    )]
    pub liquidator_wish_account: Box<Account<'info, TokenAccount>>,

    #[account(address = payback_pool.oracle @ LedgerError::OracleAccountMismatch)]
    pub payback_price: Box<Account<'info, PriceUpdateV2>>,

    #[account(address = wish_pool.oracle @ LedgerError::OracleAccountMismatch)]
    pub wish_price: Box<Account<'info, PriceUpdateV2>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Remaining accounts carry the borrower's other token entries.
pub fn liquidate<'info>(
    ctx: Context<'_, '_, 'info, 'info, Liquidate<'info>>,
    payback_shares: u128,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.liquidator_wish_token;
    let a = ctx.accounts;

    let borrower = a.borrower_position.id;
    let liquidator = a.liquidator_position.id;
    let payback_mint = a.payback_pool.mint;
    let wish_mint = a.wish_pool.mint;

    let mut session = Session::new(&a.config, now);
    session.add_position(&a.borrower_position);
    session.add_position(&a.liquidator_position);
    session.add_pool(&a.payback_pool, &a.payback_price)?;
    if wish_mint != payback_mint {
        session.add_pool(&a.wish_pool, &a.wish_price)?;
    }
    session.add_entry(&a.borrower_payback_token);
    session.add_entry(&a.borrower_wish_token);
    session.add_entry(&a.liquidator_wish_token);
    session.load_remaining(ctx.remaining_accounts, &borrower, &[payback_mint, wish_mint])?;
    session.ensure_covered(&borrower)?;

    let request = LiquidationRequest {
        borrower,
        liquidator,
        payback_mint,
        wish_mint,
        payback_shares,
    };
    let outcome = session
        .ledger
        .liquidate(&request, a.liquidator.key(), &session.book, now)?;

    a.borrower_position.set_inner(session.position_state(&borrower)?);
    a.liquidator_position.set_inner(session.position_state(&liquidator)?);
    a.payback_pool.set_inner(session.pool_state(&payback_mint)?);
    a.wish_pool.set_inner(session.pool_state(&wish_mint)?);
    let payback_bump = a.borrower_payback_token.bump;
    let wish_bump = a.borrower_wish_token.bump;
    if let Some(entry) = session.entry_state(&borrower, &payback_mint, payback_bump) {
        a.borrower_payback_token.set_inner(entry);
    }
    if let Some(entry) = session.entry_state(&borrower, &wish_mint, wish_bump) {
        a.borrower_wish_token.set_inner(entry);
    }
    if let Some(entry) = session.entry_state(&liquidator, &wish_mint, bump) {
        a.liquidator_wish_token.set_inner(entry);
    }
    session.commit()?;

    transfer_in(
        &a.token_program,
        &a.liquidator_payback_account,
        &a.payback_vault,
        &a.liquidator,
        outcome.payback_amount,
    )?;
    transfer_out(
        &a.token_program,
        &a.wish_pool,
        &a.wish_vault,
        &a.liquidator_wish_account,
        outcome.tokens_received(),
    )?;

    emit!(Liquidated {
        borrower,
        liquidator,
        payback_mint,
        wish_mint,
        payback_amount: outcome.payback_amount,
        payback_value: outcome.payback_value,
        reward_value: outcome.reward_value,
        tokens_received: outcome.tokens_received(),
        shares_received: outcome.shares_received,
    });
    Ok(())
}
