use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LedgerError;
use crate::events::{PositionCreated, PositionLockChanged};
use crate::ledger::LendingLedger;
use crate::state::{LedgerConfig, PositionRecord};

#[derive(Accounts)]
#[instruction(position_id: Pubkey)]
pub struct CreatePosition<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        init,
        payer = owner,
        space = PositionRecord::LEN,
        seeds = [POSITION_SEED, position_id.as_ref()],
        bump,
    )]
    pub position: Box<Account<'info, PositionRecord>>,

    pub system_program: Program<'info, System>,
}

pub fn create_position(ctx: Context<CreatePosition>, position_id: Pubkey) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    ctx.accounts.position.set_inner(PositionRecord {
        bump: ctx.bumps.position,
        ..PositionRecord::new(position_id, owner)
    });

    emit!(PositionCreated {
        position: position_id,
        owner,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct LockPosition<'info> {
    pub owner: Signer<'info>,

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
}

pub fn lock_position(ctx: Context<LockPosition>) -> Result<()> {
    let accounts = ctx.accounts;
    let id = accounts.position.id;
    let mut ledger = LendingLedger::from_config(&accounts.config);
    ledger.insert_position((**accounts.position).clone());
    ledger.lock_position(id, accounts.owner.key(), accounts.isolation_authority.key())?;
    accounts.position.set_inner(ledger.position(&id)?.clone());

    emit!(PositionLockChanged {
        position: id,
        locked: true,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UnlockPosition<'info> {
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
}

pub fn unlock_position(ctx: Context<UnlockPosition>) -> Result<()> {
    let accounts = ctx.accounts;
    let id = accounts.position.id;
    let mut ledger = LendingLedger::from_config(&accounts.config);
    ledger.insert_position((**accounts.position).clone());
    ledger.unlock_position(id, accounts.isolation_authority.key())?;
    accounts.position.set_inner(ledger.position(&id)?.clone());

    emit!(PositionLockChanged {
        position: id,
        locked: false,
    });
    Ok(())
}
