use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, MintTo, Token, TokenAccount, Transfer};

use crate::constants::{POOL_SEED, WRAPPER_SEED};
use crate::state::{Pool, ReceiptWrapper};

/// Moves tokens the signer owns into a vault.
pub fn transfer_in<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: authority.to_account_info(),
    };
    token::transfer(
        CpiContext::new(token_program.to_account_info(), cpi_accounts),
        amount,
    )
}

/// Pays out of a pool vault, signed by the pool PDA.
pub fn transfer_out<'info>(
    token_program: &Program<'info, Token>,
    pool: &Account<'info, Pool>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let mint = pool.mint;
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[POOL_SEED, mint.as_ref(), &bump];
    let signer = &[seeds];

    let cpi_accounts = Transfer {
        from: vault.to_account_info(),
        to: to.to_account_info(),
        authority: pool.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer),
        amount,
    )
}

/// Burns receipts held in a pool vault.
pub fn burn_from_pool<'info>(
    token_program: &Program<'info, Token>,
    pool: &Account<'info, Pool>,
    vault: &Account<'info, TokenAccount>,
    mint: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let pool_mint = pool.mint;
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[POOL_SEED, pool_mint.as_ref(), &bump];
    let signer = &[seeds];

    let cpi_accounts = Burn {
        mint: mint.clone(),
        from: vault.to_account_info(),
        authority: pool.to_account_info(),
    };
    token::burn(
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer),
        amount,
    )
}

/// Mints receipts, signed by the wrapper PDA.
pub fn mint_receipt<'info>(
    token_program: &Program<'info, Token>,
    wrapper: &Account<'info, ReceiptWrapper>,
    mint: &AccountInfo<'info>,
    to: &Account<'info, TokenAccount>,
    amount: u64,
) -> Result<()> {
    let base_mint = wrapper.base_mint;
    let bump = [wrapper.bump];
    let seeds: &[&[u8]] = &[WRAPPER_SEED, base_mint.as_ref(), &bump];
    let signer = &[seeds];

    let cpi_accounts = MintTo {
        mint: mint.clone(),
        to: to.to_account_info(),
        authority: wrapper.to_account_info(),
    };
    token::mint_to(
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer),
        amount,
    )
}

/// Releases base tokens from the wrapper vault.
pub fn release_base<'info>(
    token_program: &Program<'info, Token>,
    wrapper: &Account<'info, ReceiptWrapper>,
    vault: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let base_mint = wrapper.base_mint;
    let bump = [wrapper.bump];
    let seeds: &[&[u8]] = &[WRAPPER_SEED, base_mint.as_ref(), &bump];
    let signer = &[seeds];

    let cpi_accounts = Transfer {
        from: vault.to_account_info(),
        to: to.to_account_info(),
        authority: wrapper.to_account_info(),
    };
    token::transfer(
        CpiContext::new_with_signer(token_program.to_account_info(), cpi_accounts, signer),
        amount,
    )
}
