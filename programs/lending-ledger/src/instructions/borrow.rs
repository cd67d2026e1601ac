use anchor_lang::prelude::*;

use crate::events::{Borrowed, PaidBack};
use crate::instructions::pool_action::PoolAction;

pub fn borrow<'info>(ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.valued_session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    let shares = session.ledger.borrow(
        position,
        accounts.signer.key(),
        mint,
        amount,
        &session.book,
        now,
    )?;
    let borrow_rate = session.ledger.pool(&mint)?.borrow_rate;

    accounts.commit(&mut session, bump)?;
    accounts.push(amount)?;

    msg!("borrowed {} of {} at rate {}", amount, mint, borrow_rate);
    emit!(Borrowed {
        position,
        mint,
        amount,
        shares,
        borrow_rate,
    });
    Ok(())
}

pub fn payback<'info>(ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    let (shares, pulled) = session
        .ledger
        .payback(position, accounts.signer.key(), mint, amount, now)?;

    accounts.commit(&mut session, bump)?;
    accounts.pull(pulled)?;

    emit!(PaidBack {
        position,
        mint,
        payer: accounts.signer.key(),
        amount: pulled,
        shares,
    });
    Ok(())
}

pub fn payback_shares<'info>(
    ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
    shares: u128,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    let amount = session
        .ledger
        .payback_shares(position, accounts.signer.key(), mint, shares, now)?;

    accounts.commit(&mut session, bump)?;
    accounts.pull(amount)?;

    emit!(PaidBack {
        position,
        mint,
        payer: accounts.signer.key(),
        amount,
        shares,
    });
    Ok(())
}
