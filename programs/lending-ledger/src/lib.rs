// Summary: Anchor program implementing a collateralized lending ledger. Lenders hold pool
// shares, borrowers hold borrow shares, and every pool is priced by a pole rate curve that
// hill-climbs towards revenue. Uses u128 fixed-point WAD = 1e18 with Pyth-priced collateral.
//
// NOTE: Liquidations are partial and pay out of bare collateral first, then pool liquidity,
// then lending shares. Receipt wrappers let a wrapped token be booked as its own pool.

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod oracle;
pub mod state;

use instructions::*;
use state::PoolParams;

declare_id!("45cd5RnENwSmpPw98UyhJfu4ifQDEcwD7ziQzuZGQDWh");

#[program]
pub mod lending_ledger {
    use super::*;

    /// Initialize the ledger configuration (authority, isolation authority, liquidation bounds)
    pub fn initialize_ledger(
        ctx: Context<InitializeLedger>,
        params: InitializeLedgerParams,
    ) -> Result<()> {
        admin::initialize_ledger(ctx, params)
    }

    /// Create a pool for a mint, seeded with the initial 1000 units
    pub fn create_pool(ctx: Context<CreatePool>, params: PoolParams) -> Result<()> {
        admin::create_pool(ctx, params)
    }

    pub fn create_position(ctx: Context<CreatePosition>, position_id: Pubkey) -> Result<()> {
        position::create_position(ctx, position_id)
    }

    pub fn deposit<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        amount: u64,
    ) -> Result<()> {
        supply::deposit(ctx, amount)
    }

    /// Deposit held as bare collateral, outside the lending pool
    pub fn solely_deposit<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        amount: u64,
    ) -> Result<()> {
        supply::solely_deposit(ctx, amount)
    }

    pub fn withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        amount: u64,
    ) -> Result<()> {
        supply::withdraw(ctx, amount)
    }

    pub fn withdraw_shares<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        shares: u128,
    ) -> Result<()> {
        supply::withdraw_shares(ctx, shares)
    }

    pub fn solely_withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        amount: u64,
    ) -> Result<()> {
        supply::solely_withdraw(ctx, amount)
    }

    pub fn borrow<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        amount: u64,
    ) -> Result<()> {
        borrow::borrow(ctx, amount)
    }

    /// Repay up to `amount`; anything above the outstanding debt is left with the payer
    pub fn payback<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        amount: u64,
    ) -> Result<()> {
        borrow::payback(ctx, amount)
    }

    pub fn payback_shares<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        shares: u128,
    ) -> Result<()> {
        borrow::payback_shares(ctx, shares)
    }

    pub fn set_collateral<'info>(
        ctx: Context<'_, '_, 'info, 'info, PoolAction<'info>>,
        enabled: bool,
    ) -> Result<()> {
        collateral::set_collateral(ctx, enabled)
    }

    /// Repay part of an unhealthy position's debt in exchange for its collateral
    pub fn liquidate<'info>(
        ctx: Context<'_, '_, 'info, 'info, Liquidate<'info>>,
        payback_shares: u128,
    ) -> Result<()> {
        liquidate::liquidate(ctx, payback_shares)
    }

    pub fn lock_position(ctx: Context<LockPosition>) -> Result<()> {
        position::lock_position(ctx)
    }

    pub fn unlock_position(ctx: Context<UnlockPosition>) -> Result<()> {
        position::unlock_position(ctx)
    }

    /// Deposit collateral and borrow against it on a locked position (isolation authority only)
    pub fn isolation_open<'info>(
        ctx: Context<'_, '_, 'info, 'info, IsolationOpen<'info>>,
        collateral_amount: u64,
        borrow_amount: u64,
    ) -> Result<()> {
        isolation::isolation_open(ctx, collateral_amount, borrow_amount)
    }

    pub fn create_wrapper(ctx: Context<CreateWrapper>) -> Result<()> {
        wrapped::create_wrapper(ctx)
    }

    pub fn wrapped_deposit<'info>(
        ctx: Context<'_, '_, 'info, 'info, WrappedAction<'info>>,
        amount: u64,
    ) -> Result<()> {
        wrapped::wrapped_deposit(ctx, amount)
    }

    pub fn wrapped_withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, WrappedAction<'info>>,
        amount: u64,
    ) -> Result<()> {
        wrapped::wrapped_withdraw(ctx, amount)
    }

    pub fn donate_yield(ctx: Context<DonateYield>, amount: u64) -> Result<()> {
        wrapped::donate_yield(ctx, amount)
    }
}
