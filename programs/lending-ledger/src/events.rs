use anchor_lang::prelude::*;

#[event]
pub struct LedgerInitialized {
    pub authority: Pubkey,
    pub isolation_authority: Pubkey,
}

#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub collateral_factor: u128,
    pub min_pole: u128,
    pub max_pole: u128,
}

#[event]
pub struct PositionCreated {
    pub position: Pubkey,
    pub owner: Pubkey,
}

#[event]
pub struct Deposited {
    pub position: Pubkey,
    pub mint: Pubkey,
    pub depositor: Pubkey,
    pub amount: u64,
    /// Zero for solely deposits.
    pub shares: u128,
    pub solely: bool,
}

#[event]
pub struct Withdrawn {
    pub position: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub shares: u128,
    pub solely: bool,
}

#[event]
pub struct Borrowed {
    pub position: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub shares: u128,
    pub borrow_rate: u128,
}

#[event]
pub struct PaidBack {
    pub position: Pubkey,
    pub mint: Pubkey,
    pub payer: Pubkey,
    pub amount: u64,
    pub shares: u128,
}

#[event]
pub struct CollateralToggled {
    pub position: Pubkey,
    pub mint: Pubkey,
    pub enabled: bool,
}

#[event]
pub struct Liquidated {
    pub borrower: Pubkey,
    pub liquidator: Pubkey,
    pub payback_mint: Pubkey,
    pub wish_mint: Pubkey,
    pub payback_amount: u64,
    pub payback_value: u128,
    pub reward_value: u128,
    pub tokens_received: u64,
    pub shares_received: u128,
}

#[event]
pub struct PositionLockChanged {
    pub position: Pubkey,
    pub locked: bool,
}

#[event]
pub struct ReceiptWrapped {
    pub wrapper: Pubkey,
    pub position: Pubkey,
    pub base_amount: u64,
    pub receipt_amount: u64,
    pub exchange_rate: u64,
}

#[event]
pub struct ReceiptUnwrapped {
    pub wrapper: Pubkey,
    pub position: Pubkey,
    pub base_amount: u64,
    pub receipt_amount: u64,
    pub exchange_rate: u64,
}

#[event]
pub struct YieldDonated {
    pub wrapper: Pubkey,
    pub donor: Pubkey,
    pub amount: u64,
    pub exchange_rate: u64,
}
