use anchor_lang::prelude::*;

#[error_code]
pub enum LedgerError {
    // Access
    #[msg("Caller is not the controlling party of the position")]
    NotOwner,
    #[msg("Position is locked in isolation mode")]
    PositionLocked,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Re-entrant call into a position with an operation in flight")]
    ReentrantCall,

    // Solvency
    #[msg("Operation would leave the position with bad debt")]
    ResultsInBadDebt,
    #[msg("Position is not liquidatable")]
    LiquidationDenied,
    #[msg("Invalid action for this position")]
    InvalidAction,
    #[msg("Liquidation repays more shares than allowed")]
    TooManyShares,

    // Pool
    #[msg("Borrowing is disabled for this pool")]
    NotAllowedToBorrow,
    #[msg("Insufficient liquidity in pool")]
    InsufficientLiquidity,
    #[msg("Insufficient shares")]
    InsufficientShares,
    #[msg("Deposit exceeds pool cap")]
    PoolCapExceeded,
    #[msg("Borrow exceeds pool borrow cap")]
    BorrowCapExceeded,
    #[msg("Pool not found")]
    UnknownPool,

    // Position
    #[msg("Position not found")]
    UnknownPosition,
    #[msg("Position already holds the maximum number of tokens")]
    PositionFull,
    #[msg("Remaining accounts do not cover every token of the position")]
    MissingPositionAccounts,

    // Oracle
    #[msg("Oracle price is stale")]
    StalePrice,
    #[msg("Invalid oracle price")]
    InvalidOraclePrice,
    #[msg("Oracle account mismatch")]
    OracleAccountMismatch,

    // General
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Invalid amount - must be greater than zero")]
    InvalidAmount,
    #[msg("Invalid parameters")]
    InvalidParams,
}
