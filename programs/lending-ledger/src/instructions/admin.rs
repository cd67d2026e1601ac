use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

use crate::constants::*;
use crate::error::LedgerError;
use crate::events::{LedgerInitialized, PoolCreated};
use crate::instructions::token_flow::transfer_in;
use crate::state::{LedgerConfig, LiquidationParams, Pool, PoolParams};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeLedgerParams {
    pub isolation_authority: Pubkey,
    pub liquidation: LiquidationParams,
}

#[derive(Accounts)]
pub struct InitializeLedger<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = LedgerConfig::LEN,
        seeds = [LEDGER_SEED],
        bump,
    )]
    pub config: Box<Account<'info, LedgerConfig>>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_ledger(ctx: Context<InitializeLedger>, params: InitializeLedgerParams) -> Result<()> {
    params.liquidation.validate()?;
    let authority = ctx.accounts.authority.key();
    ctx.accounts.config.set_inner(LedgerConfig {
        authority,
        isolation_authority: params.isolation_authority,
        liquidation: params.liquidation,
        bump: ctx.bumps.config,
    });

    emit!(LedgerInitialized {
        authority,
        isolation_authority: params.isolation_authority,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED],
        bump = config.bump,
        has_one = authority @ LedgerError::Unauthorized,
    )]
    pub config: Box<Account<'info, LedgerConfig>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        space = Pool::LEN,
        seeds = [POOL_SEED, mint.key().as_ref()],
        bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        init,
        payer = authority,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = pool,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    /// Supplies the seed liquidity.
    #[account(
        mut,
        constraint = authority_token_account.mint == mint.key() @ LedgerError::InvalidParams,
    )]
    pub authority_token_account: Box<Account<'info, TokenAccount>>,

    pub price_update: Box<Account<'info, PriceUpdateV2>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn create_pool(ctx: Context<CreatePool>, params: PoolParams) -> Result<()> {
    require!(
        ctx.accounts.price_update.price_message.feed_id == params.feed_id,
        LedgerError::OracleAccountMismatch
    );

    let now = Clock::get()?.unix_timestamp;
    let mint = ctx.accounts.mint.key();
    let mut pool = Pool::new(mint, ctx.accounts.mint.decimals, &params, now)?;
    pool.vault = ctx.accounts.vault.key();
    pool.oracle = ctx.accounts.price_update.key();
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.vault;

    let event = PoolCreated {
        pool: ctx.accounts.pool.key(),
        mint,
        collateral_factor: pool.collateral_factor,
        min_pole: pool.pole.min_pole,
        max_pole: pool.pole.max_pole,
    };
    ctx.accounts.pool.set_inner(pool);

    transfer_in(
        &ctx.accounts.token_program,
        &ctx.accounts.authority_token_account,
        &ctx.accounts.vault,
        &ctx.accounts.authority,
        SEED_AMOUNT,
    )?;

    msg!("Pool initialized for mint: {}", mint);
    emit!(event);
    Ok(())
}
