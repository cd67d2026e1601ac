use anchor_lang::prelude::*;

use crate::events::{Deposited, Withdrawn};
use crate::instructions::pool_action::PoolAction;

pub fn deposit<'info>(ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    let shares = session
        .ledger
        .deposit(position, accounts.signer.key(), mint, amount, now)?;

    accounts.commit(&mut session, bump)?;
    accounts.pull(amount)?;

    emit!(Deposited {
        position,
        mint,
        depositor: accounts.signer.key(),
        amount,
        shares,
        solely: false,
    });
    Ok(())
}

pub fn solely_deposit<'info>(
    ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
    amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    session
        .ledger
        .solely_deposit(position, accounts.signer.key(), mint, amount, now)?;

    accounts.commit(&mut session, bump)?;
    accounts.pull(amount)?;

    emit!(Deposited {
        position,
        mint,
        depositor: accounts.signer.key(),
        amount,
        shares: 0,
        solely: true,
    });
    Ok(())
}

pub fn withdraw<'info>(ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.valued_session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    let shares = session.ledger.withdraw(
        position,
        accounts.signer.key(),
        mint,
        amount,
        &session.book,
        now,
    )?;

    accounts.commit(&mut session, bump)?;
    accounts.push(amount)?;

    emit!(Withdrawn {
        position,
        mint,
        amount,
        shares,
        solely: false,
    });
    Ok(())
}

pub fn withdraw_shares<'info>(
    ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
    shares: u128,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.valued_session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    let amount = session.ledger.withdraw_shares(
        position,
        accounts.signer.key(),
        mint,
        shares,
        &session.book,
        now,
    )?;

    accounts.commit(&mut session, bump)?;
    accounts.push(amount)?;

    emit!(Withdrawn {
        position,
        mint,
        amount,
        shares,
        solely: false,
    });
    Ok(())
}

pub fn solely_withdraw<'info>(
    ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
    amount: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.valued_session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    session.ledger.solely_withdraw(
        position,
        accounts.signer.key(),
        mint,
        amount,
        &session.book,
        now,
    )?;

    accounts.commit(&mut session, bump)?;
    accounts.push(amount)?;

    emit!(Withdrawn {
        position,
        mint,
        amount,
        shares: 0,
        solely: true,
    });
    Ok(())
}
