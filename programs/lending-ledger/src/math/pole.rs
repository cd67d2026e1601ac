use anchor_lang::prelude::*;
use crate::constants::*;
use crate::error::LedgerError;
use crate::math::fixed_point::wad_mul;

/// Hill-climbing controller for the rate curve pole.
///
/// Every synchronization feeds the revenue observed at the new utilization. While revenue keeps
/// rising (or holds) the pole keeps moving the same way; a drop reverses the direction. The step
/// is proportional to the elapsed time, so a pool that syncs rarely moves as far as one that syncs
/// often. A collapse below the best observed revenue jumps back to `best_pole`, and a pool idle
/// for longer than [`POLE_IDLE_RESET_SECONDS`] falls back to `min_pole`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoleController {
    pub current_pole: u128,
    pub best_pole: u128,
    pub min_pole: u128,
    pub max_pole: u128,
    /// Pole travel per second.
    pub delta_pole: u128,
    pub increase_pole: bool,
    pub max_value: u128,
    pub previous_value: u128,
}

impl PoleController {
    pub const SIZE: usize = 16 * 5 + 1 + 16 * 2;

    pub fn new(min_pole: u128, max_pole: u128) -> Result<Self> {
        require!(
            min_pole >= MIN_POLE_FLOOR && min_pole < max_pole && max_pole <= MAX_POLE_CEILING,
            LedgerError::InvalidParams
        );
        let current_pole = min_pole + (max_pole - min_pole) / 2;
        Ok(Self {
            current_pole,
            best_pole: current_pole,
            min_pole,
            max_pole,
            delta_pole: (max_pole - min_pole) / POLE_NORMALISATION_SECONDS,
            increase_pole: false,
            max_value: 0,
            previous_value: 0,
        })
    }

    pub fn step(&mut self, revenue: u128, elapsed: i64) -> Result<()> {
        if elapsed <= 0 {
            return Ok(());
        }

        if elapsed >= POLE_IDLE_RESET_SECONDS {
            self.current_pole = self.min_pole;
            self.best_pole = self.min_pole;
            self.increase_pole = true;
            self.max_value = revenue;
            self.previous_value = revenue;
            return Ok(());
        }

        if revenue >= self.max_value {
            self.max_value = revenue;
            self.best_pole = self.current_pole;
        } else if revenue < wad_mul(self.max_value, WAD - POLE_RESET_DEVIATION)? {
            self.current_pole = self.best_pole;
            self.max_value = revenue;
            self.previous_value = revenue;
            return Ok(());
        }

        if revenue < self.previous_value {
            self.increase_pole = !self.increase_pole;
        }

        let travel = self
            .delta_pole
            .checked_mul(elapsed as u128)
            .ok_or(LedgerError::MathOverflow)?;
        self.current_pole = if self.increase_pole {
            self.current_pole.saturating_add(travel).min(self.max_pole)
        } else {
            self.current_pole.saturating_sub(travel).max(self.min_pole)
        };
        self.previous_value = revenue;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rate_curve::revenue_value;

    const MIN: u128 = 1_010_000_000_000_000_000;
    const MAX: u128 = 1_250_000_000_000_000_000;
    const FACTOR: u128 = 50_000_000_000_000_000;

    fn controller() -> PoleController {
        PoleController::new(MIN, MAX).unwrap()
    }

    #[test]
    fn starts_mid_range_moving_down() {
        let c = controller();
        assert_eq!(c.current_pole, 1_130_000_000_000_000_000);
        assert!(!c.increase_pole);
        assert_eq!(c.delta_pole, (MAX - MIN) / POLE_NORMALISATION_SECONDS);
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(PoleController::new(MAX, MIN).is_err());
        assert!(PoleController::new(WAD, MAX).is_err());
    }

    #[test]
    fn keeps_direction_while_revenue_rises() -> Result<()> {
        let mut c = controller();
        let start = c.current_pole;
        c.step(10, ONE_DAY)?;
        c.step(20, ONE_DAY)?;
        assert_eq!(c.current_pole, start - 2 * c.delta_pole * ONE_DAY as u128);
        assert_eq!(c.best_pole, start - c.delta_pole * ONE_DAY as u128);
        assert!(!c.increase_pole);
        Ok(())
    }

    #[test]
    fn reverses_on_small_drop() -> Result<()> {
        let mut c = controller();
        c.step(1_000, ONE_DAY)?;
        let before = c.current_pole;
        c.step(990, ONE_DAY)?;
        assert!(c.increase_pole);
        assert_eq!(c.current_pole, before + c.delta_pole * ONE_DAY as u128);
        Ok(())
    }

    #[test]
    fn collapse_returns_to_best_pole() -> Result<()> {
        let mut c = controller();
        c.step(1_000, ONE_DAY)?;
        let best = c.best_pole;
        c.step(1_200, ONE_DAY)?;
        let best_after = c.best_pole;
        assert!(best_after < best);
        c.step(100, ONE_DAY)?;
        assert_eq!(c.current_pole, best_after);
        assert_eq!(c.max_value, 100);
        Ok(())
    }

    #[test]
    fn long_idle_floors_the_pole() -> Result<()> {
        let mut c = controller();
        c.increase_pole = true;
        c.step(0, 1_000 * ONE_DAY)?;
        assert_eq!(c.current_pole, MIN);
        Ok(())
    }

    #[test]
    fn zero_elapsed_is_ignored() -> Result<()> {
        let mut c = controller();
        let before = c;
        c.step(500, 0)?;
        assert_eq!(c, before);
        Ok(())
    }

    #[test]
    fn stays_within_bounds_over_utilization_sequence() -> Result<()> {
        let mut c = controller();
        let utilizations = [10u128, 35, 60, 80, 95, 70, 40, 90, 99, 20, 5, 85];
        for (i, percent) in utilizations.iter().cycle().take(120).enumerate() {
            let revenue = revenue_value(percent * WAD / 100, c.current_pole, FACTOR)?;
            c.step(revenue, (i as i64 % 5 + 1) * 6 * ONE_DAY)?;
            assert!(c.current_pole >= c.min_pole && c.current_pole <= c.max_pole);
        }
        Ok(())
    }
}
