use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use pyth_solana_receiver_sdk::price_update::PriceUpdateV2;

use crate::constants::*;
use crate::error::LedgerError;
use crate::events::{ReceiptUnwrapped, ReceiptWrapped, YieldDonated};
use crate::instructions::loader::Session;
use crate::instructions::token_flow::{burn_from_pool, mint_receipt, release_base, transfer_in};
use crate::ledger::WrappedReceipt;
use crate::state::{LedgerConfig, Pool, PositionRecord, PositionToken, ReceiptWrapper};

#[derive(Accounts)]
pub struct CreateWrapper<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED],
        bump = config.bump,
        has_one = authority @ LedgerError::Unauthorized,
    )]
    pub config: Box<Account<'info, LedgerConfig>>,

    pub base_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        space = ReceiptWrapper::LEN,
        seeds = [WRAPPER_SEED, base_mint.key().as_ref()],
        bump,
    )]
    pub wrapper: Box<Account<'info, ReceiptWrapper>>,

    #[account(
        init,
        payer = authority,
        mint::decimals = base_mint.decimals,
        mint::authority = wrapper,
    )]
    pub receipt_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        seeds = [WRAPPER_VAULT_SEED, wrapper.key().as_ref()],
        bump,
        token::mint = base_mint,
        token::authority = wrapper,
    )]
    pub base_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = authority_base_account.mint == base_mint.key() @ LedgerError::InvalidParams,
    )]
    pub authority_base_account: Box<Account<'info, TokenAccount>>,

    /// Receives the seed receipts that later seed the receipt pool.
    #[account(
        init,
        payer = authority,
        token::mint = receipt_mint,
        token::authority = authority,
    )]
    pub authority_receipt_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// Wraps a seed amount of base for the authority; the receipt mint still needs its own pool,
/// created through `create_pool`.
pub fn create_wrapper(ctx: Context<CreateWrapper>) -> Result<()> {
    let mut wrapper = ReceiptWrapper {
        base_mint: ctx.accounts.base_mint.key(),
        receipt_mint: ctx.accounts.receipt_mint.key(),
        base_vault: ctx.accounts.base_vault.key(),
        bump: ctx.bumps.wrapper,
        vault_bump: ctx.bumps.base_vault,
        ..ReceiptWrapper::default()
    };
    let seed_receipts = wrapper.wrap_base(SEED_AMOUNT)?;
    ctx.accounts.wrapper.set_inner(wrapper);

    transfer_in(
        &ctx.accounts.token_program,
        &ctx.accounts.authority_base_account,
        &ctx.accounts.base_vault,
        &ctx.accounts.authority,
        SEED_AMOUNT,
    )?;
    mint_receipt(
        &ctx.accounts.token_program,
        &ctx.accounts.wrapper,
        &ctx.accounts.receipt_mint.to_account_info(),
        &ctx.accounts.authority_receipt_account,
        seed_receipts,
    )?;

    msg!(
        "Wrapper initialized for base mint: {} receipt: {}",
        ctx.accounts.base_mint.key(),
        ctx.accounts.receipt_mint.key()
    );
    Ok(())
}

#[derive(Accounts)]
pub struct WrappedAction<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(seeds = [LEDGER_SEED], bump = config.bump)]
    pub config: Box<Account<'info, LedgerConfig>>,

    #[account(
        mut,
        seeds = [WRAPPER_SEED, wrapper.base_mint.as_ref()],
        bump = wrapper.bump,
    )]
    pub wrapper: Box<Account<'info, ReceiptWrapper>>,

    #[account(mut, address = wrapper.receipt_mint @ LedgerError::InvalidParams)]
    pub receipt_mint: Box<Account<'info, Mint>>,

    #[account(mut, address = wrapper.base_vault @ LedgerError::InvalidParams)]
    pub base_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_base_account.mint == wrapper.base_mint @ LedgerError::InvalidParams,
    )]
    pub user_base_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, position.id.as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, PositionRecord>>,

    #[account(
        mut,
        seeds = [POOL_SEED, wrapper.receipt_mint.as_ref()],
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

    #[account(mut, address = pool.vault @ LedgerError::InvalidParams)]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    #[account(address = pool.oracle @ LedgerError::OracleAccountMismatch)]
    pub price_update: Box<Account<'info, PriceUpdateV2>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> WrappedAction<'info> {
    fn session(&self, remaining: &'info [AccountInfo<'info>], now: i64) -> Result<Session<'info>> {
        let mut session = Session::new(&self.config, now);
        session.add_position(&self.position);
        session.add_pool(&self.pool, &self.price_update)?;
        session.add_entry(&self.position_token);
        session.load_remaining(remaining, &self.position.id, &[self.pool.mint])?;
        Ok(session)
    }

    fn commit(&mut self, session: &mut Session<'info>, entry_bump: u8) -> Result<()> {
        let id = self.position.id;
        let mint = self.pool.mint;
        self.position.set_inner(session.position_state(&id)?);
        self.pool.set_inner(session.pool_state(&mint)?);
        if let Some(entry) = session.entry_state(&id, &mint, entry_bump) {
            self.position_token.set_inner(entry);
        }
        session.commit()
    }
}

/// Deposits base tokens; the position is credited in the receipt pool.
pub fn wrapped_deposit<'info>(
    ctx: Context<'_, '_, 'info, 'info, WrappedAction<'info>>,
    amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let a = ctx.accounts;
    let mut session = a.session(ctx.remaining_accounts, now)?;
    let position = a.position.id;

    let outcome = {
        let accessor = WrappedReceipt::new(&a.wrapper);
        session
            .ledger
            .deposit_via(&accessor, position, a.signer.key(), amount, now)?
    };
    let minted = a.wrapper.wrap_base(amount)?;
    require!(minted == outcome.pool_amount, LedgerError::MathOverflow);
    a.commit(&mut session, bump)?;

    transfer_in(
        &a.token_program,
        &a.user_base_account,
        &a.base_vault,
        &a.signer,
        amount,
    )?;
    mint_receipt(
        &a.token_program,
        &a.wrapper,
        &a.receipt_mint.to_account_info(),
        &a.pool_vault,
        minted,
    )?;

    emit!(ReceiptWrapped {
        wrapper: a.wrapper.key(),
        position,
        base_amount: amount,
        receipt_amount: minted,
        exchange_rate: a.wrapper.exchange_rate()?,
    });
    Ok(())
}

/// Withdraws at least `amount` base tokens out of the position's receipt balance.
pub fn wrapped_withdraw<'info>(
    ctx: Context<'_, '_, 'info, 'info, WrappedAction<'info>>,
    amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let a = ctx.accounts;
    let mut session = a.session(ctx.remaining_accounts, now)?;
    session.ensure_covered(&a.position.id)?;
    let position = a.position.id;

    let outcome = {
        let accessor = WrappedReceipt::new(&a.wrapper);
        session.ledger.withdraw_via(
            &accessor,
            position,
            a.signer.key(),
            amount,
            &session.book,
            now,
        )?
    };
    let released = a.wrapper.unwrap_receipt(outcome.pool_amount)?;
    a.commit(&mut session, bump)?;

    burn_from_pool(
        &a.token_program,
        &a.pool,
        &a.pool_vault,
        &a.receipt_mint.to_account_info(),
        outcome.pool_amount,
    )?;
    release_base(
        &a.token_program,
        &a.wrapper,
        &a.base_vault,
        &a.user_base_account,
        released,
    )?;

    emit!(ReceiptUnwrapped {
        wrapper: a.wrapper.key(),
        position,
        base_amount: released,
        receipt_amount: outcome.pool_amount,
        exchange_rate: a.wrapper.exchange_rate()?,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct DonateYield<'info> {
    pub donor: Signer<'info>,

    #[account(
        mut,
        seeds = [WRAPPER_SEED, wrapper.base_mint.as_ref()],
        bump = wrapper.bump,
    )]
    pub wrapper: Box<Account<'info, ReceiptWrapper>>,

    #[account(mut, address = wrapper.base_vault @ LedgerError::InvalidParams)]
    pub base_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = donor_base_account.mint == wrapper.base_mint @ LedgerError::InvalidParams,
    )]
    pub donor_base_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

/// Adds yield to the wrapper backing; every receipt is worth more base afterwards.
pub fn donate_yield(ctx: Context<DonateYield>, amount: u64) -> Result<()> {
    ctx.accounts.wrapper.donate(amount)?;
    transfer_in(
        &ctx.accounts.token_program,
        &ctx.accounts.donor_base_account,
        &ctx.accounts.base_vault,
        &ctx.accounts.donor,
        amount,
    )?;

    emit!(YieldDonated {
        wrapper: ctx.accounts.wrapper.key(),
        donor: ctx.accounts.donor.key(),
        amount,
        exchange_rate: ctx.accounts.wrapper.exchange_rate()?,
    });
    Ok(())
}
