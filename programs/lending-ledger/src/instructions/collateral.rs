use anchor_lang::prelude::*;

use crate::events::CollateralToggled;
use crate::instructions::pool_action::PoolAction;

/// Token accounts of [`PoolAction`] are unused here; no tokens move.
pub fn set_collateral<'info>(
    ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
    enabled: bool,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let bump = ctx.bumps.position_token;
    let accounts = ctx.accounts;
    let mut session = accounts.valued_session(ctx.remaining_accounts, now)?;

    let position = accounts.position.id;
    let mint = accounts.pool.mint;
    session.ledger.set_collateral(
        position,
        accounts.signer.key(),
        mint,
        enabled,
        &session.book,
        now,
    )?;

    accounts.commit(&mut session, bump)?;

    emit!(CollateralToggled {
        position,
        mint,
        enabled,
    });
    Ok(())
}
