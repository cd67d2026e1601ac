use anchor_lang::prelude::*;
use crate::constants::WAD;
use crate::error::LedgerError;

/// `a * b / d` rounded down.
///
/// Falls back to `(a / d) * b + (a % d) * b / d` when the plain product overflows, which keeps
/// WAD-scaled values multiplied by ratios (b <= WAD) or by token prices within u128.
pub fn mul_div_down(a: u128, b: u128, d: u128) -> Result<u128> {
    require!(d != 0, LedgerError::DivisionByZero);
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / d);
    }
    let whole = (a / d)
        .checked_mul(b)
        .ok_or(LedgerError::MathOverflow)?;
    let rest = (a % d)
        .checked_mul(b)
        .ok_or(LedgerError::MathOverflow)?
        / d;
    whole.checked_add(rest).ok_or(LedgerError::MathOverflow.into())
}

/// `a * b / d` rounded up.
pub fn mul_div_up(a: u128, b: u128, d: u128) -> Result<u128> {
    let down = mul_div_down(a, b, d)?;
    let exact = match a.checked_mul(b) {
        Some(product) => product % d == 0,
        None => (a % d).checked_mul(b).map(|rest| rest % d == 0).unwrap_or(false),
    };
    if exact {
        Ok(down)
    } else {
        down.checked_add(1).ok_or(LedgerError::MathOverflow.into())
    }
}

/// Multiply two WAD values: (a * b) / WAD
pub fn wad_mul(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, b, WAD)
}

/// Divide two WAD values: (a * WAD) / b
pub fn wad_div(a: u128, b: u128) -> Result<u128> {
    mul_div_down(a, WAD, b)
}

pub fn wad_div_up(a: u128, b: u128) -> Result<u128> {
    mul_div_up(a, WAD, b)
}

/// Multiply a value by basis points: (value * bps) / 10_000
pub fn bps_mul(value: u128, bps: u64) -> Result<u128> {
    mul_div_down(value, bps as u128, crate::constants::BPS_DENOMINATOR as u128)
}

pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| LedgerError::MathOverflow.into())
}

pub fn pow10(exp: u32) -> Result<u128> {
    10u128
        .checked_pow(exp)
        .ok_or(LedgerError::MathOverflow.into())
}
