use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::LedgerError;

#[account]
#[derive(Debug, Default)]
pub struct LedgerConfig {
    pub authority: Pubkey,
    /// Only party allowed to act on locked positions.
    pub isolation_authority: Pubkey,
    pub liquidation: LiquidationParams,
    pub bump: u8,
}

impl LedgerConfig {
    pub const LEN: usize = 8 + 32 + 32 + LiquidationParams::SIZE + 1;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidationParams {
    /// Reward on top of the repaid value (WAD).
    pub base_reward_liquidation: u128,
    /// Reward ceiling in unit-of-account value (WAD).
    pub max_fee_value: u128,
    /// Share of a position's debt repayable in one liquidation while it is still backed by its
    /// bare collateral value.
    pub max_liquidation_bps: u64,
}

impl LiquidationParams {
    pub const SIZE: usize = 16 + 16 + 8;

    pub fn validate(&self) -> Result<()> {
        require!(
            self.base_reward_liquidation <= MAX_BASE_REWARD_LIQUIDATION,
            LedgerError::InvalidParams
        );
        require!(
            self.max_liquidation_bps > 0 && self.max_liquidation_bps <= BPS_DENOMINATOR,
            LedgerError::InvalidParams
        );
        Ok(())
    }
}

impl Default for LiquidationParams {
    fn default() -> Self {
        Self {
            base_reward_liquidation: DEFAULT_BASE_REWARD_LIQUIDATION,
            max_fee_value: DEFAULT_MAX_FEE_VALUE,
            max_liquidation_bps: DEFAULT_MAX_LIQUIDATION_BPS,
        }
    }
}
