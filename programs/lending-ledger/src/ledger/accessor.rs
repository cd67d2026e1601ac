use anchor_lang::prelude::*;
use crate::state::ReceiptWrapper;

/// Maps a caller's token amounts onto the pool the ledger books them in.
pub trait PoolAccessor {
    fn pool_mint(&self) -> Pubkey;
    /// Pool amount booked for `amount` handed in by the caller.
    fn to_pool_amount(&self, amount: u64) -> Result<u64>;
    /// Pool amount to release so the caller receives at least `amount`.
    fn to_pool_amount_up(&self, amount: u64) -> Result<u64>;
    /// Caller amount released for `pool_amount` leaving the pool.
    fn to_caller_amount(&self, pool_amount: u64) -> Result<u64>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessOutcome {
    pub pool_amount: u64,
    pub caller_amount: u64,
    pub shares: u128,
}

/// Caller tokens are the pool tokens.
#[derive(Clone, Copy, Debug)]
pub struct DirectPool {
    mint: Pubkey,
}

impl DirectPool {
    pub fn new(mint: Pubkey) -> Self {
        Self { mint }
    }
}

impl PoolAccessor for DirectPool {
    fn pool_mint(&self) -> Pubkey {
        self.mint
    }

    fn to_pool_amount(&self, amount: u64) -> Result<u64> {
        Ok(amount)
    }

    fn to_pool_amount_up(&self, amount: u64) -> Result<u64> {
        Ok(amount)
    }

    fn to_caller_amount(&self, pool_amount: u64) -> Result<u64> {
        Ok(pool_amount)
    }
}

/// Caller deals in the base token, the ledger books the wrapper's receipt pool.
#[derive(Clone, Copy, Debug)]
pub struct WrappedReceipt<'a> {
    wrapper: &'a ReceiptWrapper,
}

impl<'a> WrappedReceipt<'a> {
    pub fn new(wrapper: &'a ReceiptWrapper) -> Self {
        Self { wrapper }
    }
}

impl PoolAccessor for WrappedReceipt<'_> {
    fn pool_mint(&self) -> Pubkey {
        self.wrapper.receipt_mint
    }

    fn to_pool_amount(&self, amount: u64) -> Result<u64> {
        self.wrapper.receipt_for_base(amount)
    }

    fn to_pool_amount_up(&self, amount: u64) -> Result<u64> {
        self.wrapper.receipt_for_base_up(amount)
    }

    fn to_caller_amount(&self, pool_amount: u64) -> Result<u64> {
        self.wrapper.base_for_receipt(pool_amount)
    }
}
