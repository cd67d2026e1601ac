use anchor_lang::prelude::*;
use crate::constants::WAD;
use crate::error::LedgerError;
use crate::math::fixed_point::{wad_div, wad_mul};

/// Annualized borrow rate (WAD) on the pole curve:
///
/// rate(u) = m * u / (pole * (pole - u))
///
/// `pole` sits strictly above 1.0, so the curve stays finite up to full utilization and steepens
/// as the pole moves down towards it.
pub fn borrow_rate(utilization: u128, pole: u128, multiplicative_factor: u128) -> Result<u128> {
    require!(pole > WAD, LedgerError::InvalidParams);
    let utilization = utilization.min(WAD);
    if utilization == 0 {
        return Ok(0);
    }

    let distance = pole
        .checked_sub(utilization)
        .ok_or(LedgerError::MathOverflow)?;
    let denominator = wad_mul(pole, distance)?;
    let numerator = wad_mul(multiplicative_factor, utilization)?;
    wad_div(numerator, denominator)
}

/// Interest revenue per unit of lent liquidity: rate(u) * u.
/// This is the quantity the pole controller climbs on.
pub fn revenue_value(utilization: u128, pole: u128, multiplicative_factor: u128) -> Result<u128> {
    let rate = borrow_rate(utilization, pole, multiplicative_factor)?;
    wad_mul(rate, utilization.min(WAD))
}

/// utilization = pseudo_total_borrow / pseudo_total_amount, 0 on an empty pool.
pub fn utilization(pseudo_total_borrow: u128, pseudo_total_amount: u128) -> Result<u128> {
    if pseudo_total_amount == 0 {
        return Ok(0);
    }
    Ok(wad_div(pseudo_total_borrow, pseudo_total_amount)?.min(WAD))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTOR: u128 = 50_000_000_000_000_000; // 0.05
    const POLE: u128 = 1_100_000_000_000_000_000; // 1.1

    #[test]
    fn idle_pool_charges_nothing() -> Result<()> {
        assert_eq!(borrow_rate(0, POLE, FACTOR)?, 0);
        assert_eq!(utilization(0, 0)?, 0);
        Ok(())
    }

    #[test]
    fn rate_matches_curve() -> Result<()> {
        // 0.05 * 0.8 / (1.1 * 0.3) = 0.121212...
        let rate = borrow_rate(800_000_000_000_000_000, POLE, FACTOR)?;
        assert_eq!(rate / 1_000_000_000_000, 121_212);
        Ok(())
    }

    #[test]
    fn rate_grows_with_utilization() -> Result<()> {
        let mut last = 0;
        for step in 1..=10u128 {
            let rate = borrow_rate(step * WAD / 10, POLE, FACTOR)?;
            assert!(rate > last);
            last = rate;
        }
        Ok(())
    }

    #[test]
    fn lower_pole_steepens_curve() -> Result<()> {
        let u = 900_000_000_000_000_000;
        let steep = borrow_rate(u, 1_010_000_000_000_000_000, FACTOR)?;
        let flat = borrow_rate(u, 1_500_000_000_000_000_000, FACTOR)?;
        assert!(steep > flat);
        Ok(())
    }

    #[test]
    fn pole_at_unit_is_rejected() {
        assert!(borrow_rate(WAD / 2, WAD, FACTOR).is_err());
    }
}
